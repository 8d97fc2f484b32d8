//! Login guard.

use crate::events::LoginEvent;
use decorum_core::{CallArgs, CallError, Callable, EventListeners, FnListener, Metadata, Value};
use std::sync::Arc;
use std::time::Instant;
use tower_layer::Layer;

#[cfg(feature = "metrics")]
use metrics::counter;

#[cfg(feature = "tracing")]
use tracing::info;

/// Decides whether the caller of a guarded function is logged in.
///
/// The decision is made from the call's arguments, which is where a request
/// or session handle travels. Closures of type `Fn(&CallArgs) -> bool`
/// implement this trait.
pub trait Authenticator: Send + Sync {
    fn is_authenticated(&self, args: &CallArgs) -> bool;
}

impl<F> Authenticator for F
where
    F: Fn(&CallArgs) -> bool + Send + Sync,
{
    fn is_authenticated(&self, args: &CallArgs) -> bool {
        self(args)
    }
}

/// Produces the result returned in place of a guarded call when the caller
/// is not logged in.
pub trait Redirect: Send + Sync {
    /// `name` is the guarded function's name.
    fn redirect(&self, name: &str, args: &CallArgs) -> Result<Value, CallError>;
}

impl<F> Redirect for F
where
    F: Fn(&str, &CallArgs) -> Result<Value, CallError> + Send + Sync,
{
    fn redirect(&self, name: &str, args: &CallArgs) -> Result<Value, CallError> {
        self(name, args)
    }
}

/// Redirects to a login location, passing the guarded function's name as
/// the `next` parameter: `/login?next=secret`.
#[derive(Debug, Clone)]
pub struct RedirectTo {
    location: String,
}

impl RedirectTo {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
        }
    }
}

impl Default for RedirectTo {
    fn default() -> Self {
        Self::new("/login")
    }
}

impl Redirect for RedirectTo {
    fn redirect(&self, name: &str, _args: &CallArgs) -> Result<Value, CallError> {
        Ok(Value::from(format!("{}?next={}", self.location, name)))
    }
}

/// Configuration for the login guard.
pub struct LoginRequiredConfig {
    pub(crate) authenticator: Arc<dyn Authenticator>,
    pub(crate) redirect: Arc<dyn Redirect>,
    pub(crate) event_listeners: EventListeners<LoginEvent>,
}

/// Builder for [`LoginRequiredLayer`].
pub struct LoginRequiredConfigBuilder {
    authenticator: Option<Arc<dyn Authenticator>>,
    redirect: Arc<dyn Redirect>,
    event_listeners: EventListeners<LoginEvent>,
}

impl Default for LoginRequiredConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginRequiredConfigBuilder {
    /// Creates a new builder.
    ///
    /// Defaults:
    /// - authenticator: none, must be set
    /// - redirect: [`RedirectTo`] `"/login"`
    pub fn new() -> Self {
        Self {
            authenticator: None,
            redirect: Arc::new(RedirectTo::default()),
            event_listeners: EventListeners::new(),
        }
    }

    pub fn authenticator<A>(mut self, authenticator: A) -> Self
    where
        A: Authenticator + 'static,
    {
        self.authenticator = Some(Arc::new(authenticator));
        self
    }

    pub fn redirect<R>(mut self, redirect: R) -> Self
    where
        R: Redirect + 'static,
    {
        self.redirect = Arc::new(redirect);
        self
    }

    /// Registers a callback invoked with the guarded function's name when an
    /// unauthenticated call is redirected.
    pub fn on_redirected<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.event_listeners.add(FnListener::new(move |event| {
            if let LoginEvent::Redirected { name, .. } = event {
                f(name);
            }
        }));
        self
    }

    /// Registers a callback invoked when an authenticated call goes through.
    pub fn on_admitted<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.event_listeners.add(FnListener::new(move |event| {
            if let LoginEvent::Admitted { name, .. } = event {
                f(name);
            }
        }));
        self
    }

    /// Builds the guard.
    ///
    /// Fails with [`CallError::InvalidConfiguration`] when no authenticator
    /// was given.
    pub fn build(self) -> Result<LoginRequiredLayer, CallError> {
        let authenticator = self.authenticator.ok_or_else(|| {
            CallError::invalid_config("login_required", "an authenticator is required")
        })?;
        Ok(LoginRequiredLayer {
            config: Arc::new(LoginRequiredConfig {
                authenticator,
                redirect: self.redirect,
                event_listeners: self.event_listeners,
            }),
        })
    }
}

/// A [`Layer`] that only lets authenticated callers through.
///
/// Unauthenticated calls never reach the wrapped function; they get the
/// [`Redirect`]'s value instead.
///
/// # Examples
///
/// ```
/// use decorum_core::{callable_fn, CallArgs, Callable, DecorateExt, Value};
/// use decorum_guard::LoginRequiredLayer;
///
/// let secret = callable_fn("secret", "", |_| Ok(Value::from("the secret")))
///     .decorate(
///         LoginRequiredLayer::builder()
///             .authenticator(|args: &CallArgs| args.named("user").is_some())
///             .build()
///             .unwrap(),
///     );
///
/// assert_eq!(secret.call(CallArgs::new()).unwrap(), Value::from("/login?next=secret"));
/// assert_eq!(
///     secret.call(CallArgs::new().kwarg("user", "ada")).unwrap(),
///     Value::from("the secret")
/// );
/// ```
#[derive(Clone)]
pub struct LoginRequiredLayer {
    config: Arc<LoginRequiredConfig>,
}

impl LoginRequiredLayer {
    pub fn builder() -> LoginRequiredConfigBuilder {
        LoginRequiredConfigBuilder::new()
    }
}

impl<S: Callable> Layer<S> for LoginRequiredLayer {
    type Service = LoginRequired<S>;

    fn layer(&self, inner: S) -> Self::Service {
        LoginRequired {
            inner,
            config: Arc::clone(&self.config),
        }
    }
}

pub struct LoginRequired<S> {
    inner: S,
    config: Arc<LoginRequiredConfig>,
}

impl<S: Clone> Clone for LoginRequired<S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            config: Arc::clone(&self.config),
        }
    }
}

impl<S: Callable> Callable for LoginRequired<S> {
    fn metadata(&self) -> &Metadata {
        self.inner.metadata()
    }

    fn call(&self, args: CallArgs) -> Result<Value, CallError> {
        let name = self.inner.name();

        if !self.config.authenticator.is_authenticated(&args) {
            #[cfg(feature = "tracing")]
            info!(callable = %name, "Unauthenticated call redirected");

            #[cfg(feature = "metrics")]
            counter!("login_required_calls_total", "callable" => name.to_string(), "result" => "redirected")
                .increment(1);

            self.config.event_listeners.emit(&LoginEvent::Redirected {
                name: name.to_string(),
                timestamp: Instant::now(),
            });
            return self.config.redirect.redirect(name, &args);
        }

        #[cfg(feature = "metrics")]
        counter!("login_required_calls_total", "callable" => name.to_string(), "result" => "admitted")
            .increment(1);

        self.config.event_listeners.emit(&LoginEvent::Admitted {
            name: name.to_string(),
            timestamp: Instant::now(),
        });
        self.inner.call(args)
    }
}
