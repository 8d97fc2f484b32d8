//! Callables and the generic wrapper every decorator builds on.

use crate::args::CallArgs;
use crate::error::CallError;
use crate::value::Value;
use std::fmt;
use std::sync::Arc;

/// The identity of a callable: its name and a human-readable description.
///
/// Wrappers report the metadata of the callable they wrap, so the name seen
/// by diagnostics and the plugin registry is always the original function's.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Metadata {
    name: String,
    description: String,
}

impl Metadata {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// A named unit of behavior that accepts arguments and produces a value.
///
/// Implementations must be shareable across threads; decorators that keep
/// state synchronize it themselves.
pub trait Callable: Send + Sync {
    /// The identity this callable reports.
    fn metadata(&self) -> &Metadata;

    /// Invokes the callable.
    fn call(&self, args: CallArgs) -> Result<Value, CallError>;

    /// Shorthand for `self.metadata().name()`.
    fn name(&self) -> &str {
        self.metadata().name()
    }

    /// Shorthand for `self.metadata().description()`.
    fn description(&self) -> &str {
        self.metadata().description()
    }
}

/// A type-erased, shareable callable.
pub type BoxCallable = Arc<dyn Callable>;

impl<C: Callable + ?Sized> Callable for Arc<C> {
    fn metadata(&self) -> &Metadata {
        (**self).metadata()
    }

    fn call(&self, args: CallArgs) -> Result<Value, CallError> {
        (**self).call(args)
    }
}

impl<C: Callable + ?Sized> Callable for Box<C> {
    fn metadata(&self) -> &Metadata {
        (**self).metadata()
    }

    fn call(&self, args: CallArgs) -> Result<Value, CallError> {
        (**self).call(args)
    }
}

/// A base callable backed by a closure. Created with [`callable_fn`].
#[derive(Clone)]
pub struct FnCallable<F> {
    metadata: Metadata,
    f: F,
}

impl<F> fmt::Debug for FnCallable<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnCallable")
            .field("metadata", &self.metadata)
            .finish()
    }
}

/// Lifts a closure into a named [`Callable`].
///
/// # Examples
///
/// ```
/// use decorum_core::{callable_fn, CallArgs, Callable, Value};
///
/// let greet = callable_fn("greet", "Say hello.", |args: CallArgs| {
///     let name = args.get(0).and_then(Value::as_str).unwrap_or("World");
///     Ok(Value::from(format!("Hello {}", name)))
/// });
///
/// assert_eq!(greet.name(), "greet");
/// assert_eq!(greet.call(CallArgs::new().arg("Ada")).unwrap(), Value::from("Hello Ada"));
/// ```
pub fn callable_fn<F>(
    name: impl Into<String>,
    description: impl Into<String>,
    f: F,
) -> FnCallable<F>
where
    F: Fn(CallArgs) -> Result<Value, CallError> + Send + Sync,
{
    FnCallable {
        metadata: Metadata::new(name, description),
        f,
    }
}

impl<F> Callable for FnCallable<F>
where
    F: Fn(CallArgs) -> Result<Value, CallError> + Send + Sync,
{
    fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    fn call(&self, args: CallArgs) -> Result<Value, CallError> {
        (self.f)(args)
    }
}

/// A callable that runs `f` around an inner callable.
///
/// `f` receives the inner callable and the call's arguments and decides
/// when, and how often, to delegate. The wrapper reports the inner
/// callable's metadata as its own.
#[derive(Clone)]
pub struct Wrap<S, F> {
    inner: S,
    f: F,
}

impl<S, F> Wrap<S, F> {
    /// The callable being wrapped.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Unwraps, returning the inner callable.
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: fmt::Debug, F> fmt::Debug for Wrap<S, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wrap").field("inner", &self.inner).finish()
    }
}

/// Wraps `inner` with the around-call logic `f`.
///
/// # Examples
///
/// ```
/// use decorum_core::{callable_fn, wrap_fn, CallArgs, Callable, Value};
///
/// let base = callable_fn("answer", "The answer.", |_| Ok(Value::Int(41)));
/// let plus_one = wrap_fn(base, |inner: &dyn Callable, args| {
///     let v = inner.call(args)?;
///     Ok(Value::Int(v.as_int().unwrap_or_default() + 1))
/// });
///
/// assert_eq!(plus_one.name(), "answer");
/// assert_eq!(plus_one.call(CallArgs::new()).unwrap(), Value::Int(42));
/// ```
pub fn wrap_fn<S, F>(inner: S, f: F) -> Wrap<S, F>
where
    S: Callable,
    F: Fn(&dyn Callable, CallArgs) -> Result<Value, CallError> + Send + Sync,
{
    Wrap { inner, f }
}

impl<S, F> Callable for Wrap<S, F>
where
    S: Callable,
    F: Fn(&dyn Callable, CallArgs) -> Result<Value, CallError> + Send + Sync,
{
    fn metadata(&self) -> &Metadata {
        self.inner.metadata()
    }

    fn call(&self, args: CallArgs) -> Result<Value, CallError> {
        (self.f)(&self.inner, args)
    }
}

/// A [`Layer`](tower_layer::Layer) that applies the same around-call logic
/// to whatever it wraps.
#[derive(Clone)]
pub struct WrapLayer<F> {
    f: F,
}

impl<F> WrapLayer<F>
where
    F: Fn(&dyn Callable, CallArgs) -> Result<Value, CallError> + Clone + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> fmt::Debug for WrapLayer<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WrapLayer").finish()
    }
}

impl<S, F> tower_layer::Layer<S> for WrapLayer<F>
where
    S: Callable,
    F: Fn(&dyn Callable, CallArgs) -> Result<Value, CallError> + Clone + Send + Sync,
{
    type Service = Wrap<S, F>;

    fn layer(&self, inner: S) -> Self::Service {
        wrap_fn(inner, self.f.clone())
    }
}
