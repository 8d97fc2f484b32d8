//! Stacking decorators.
//!
//! Decorators are [`Layer`]s, so they stack the same way any layer does.
//! The layer applied last is the outermost: its pre-call logic runs first
//! and its post-call logic runs last.
//!
//! ```text
//! f.decorate(b).decorate(a)
//!     == a.layer(b.layer(f))
//!     == ServiceBuilder::new().layer(a).layer(b).service(f)
//!
//! call:  a.pre -> b.pre -> f -> b.post -> a.post
//! ```
//!
//! Nothing here reorders layers. Whether a behavior sees one call or many
//! depends entirely on where it sits: a logger outside a repeat logs once
//! per call, a logger inside it logs once per repetition.

use crate::callable::{BoxCallable, Callable};
use std::sync::Arc;
use tower_layer::Layer;

/// Extension methods for applying decorators to any [`Callable`].
pub trait DecorateExt: Callable + Sized {
    /// Wraps `self` with `layer`, making `layer` the new outermost behavior.
    ///
    /// # Examples
    ///
    /// ```
    /// use decorum_core::{callable_fn, CallArgs, Callable, DecorateExt, Value, WrapLayer};
    ///
    /// let shout = WrapLayer::new(|inner: &dyn Callable, args| {
    ///     let out = inner.call(args)?;
    ///     Ok(Value::from(out.to_string().to_uppercase()))
    /// });
    ///
    /// let greet = callable_fn("greet", "", |_| Ok(Value::from("hi")));
    /// let loud = greet.decorate(shout);
    /// assert_eq!(loud.call(CallArgs::new()).unwrap(), Value::from("HI"));
    /// ```
    fn decorate<L>(self, layer: L) -> L::Service
    where
        L: Layer<Self>,
    {
        layer.layer(self)
    }

    /// Erases the concrete wrapper type.
    fn boxed(self) -> BoxCallable
    where
        Self: 'static,
    {
        Arc::new(self)
    }
}

impl<C: Callable> DecorateExt for C {}
