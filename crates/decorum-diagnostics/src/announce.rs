//! Fixed messages around each call.

use crate::events::AnnounceEvent;
use decorum_core::{
    CallArgs, CallError, Callable, Decorator, EventListeners, FnListener, Metadata, Options, Value,
};
use std::sync::Arc;
use std::time::Instant;
use tower_layer::Layer;

pub const DEFAULT_BEFORE: &str = "Something is happening before the function is called.";
pub const DEFAULT_AFTER: &str = "Something is happening after the function is called.";

/// Configuration for the announce decorator.
pub struct AnnounceConfig {
    pub(crate) before: String,
    pub(crate) after: String,
    pub(crate) event_listeners: EventListeners<AnnounceEvent>,
}

/// Builder for [`AnnounceLayer`].
pub struct AnnounceConfigBuilder {
    before: String,
    after: String,
    event_listeners: EventListeners<AnnounceEvent>,
}

impl Default for AnnounceConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AnnounceConfigBuilder {
    /// Creates a new builder with defaults.
    ///
    /// Defaults:
    /// - before: `"Something is happening before the function is called."`
    /// - after: `"Something is happening after the function is called."`
    pub fn new() -> Self {
        Self {
            before: DEFAULT_BEFORE.to_string(),
            after: DEFAULT_AFTER.to_string(),
            event_listeners: EventListeners::new(),
        }
    }

    pub fn before(mut self, message: impl Into<String>) -> Self {
        self.before = message.into();
        self
    }

    pub fn after(mut self, message: impl Into<String>) -> Self {
        self.after = message.into();
        self
    }

    /// Registers a callback receiving the message announced before the call.
    pub fn on_before<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.event_listeners.add(FnListener::new(move |event| {
            if let AnnounceEvent::Before { message, .. } = event {
                f(message);
            }
        }));
        self
    }

    /// Registers a callback receiving the message announced after a
    /// successful call.
    pub fn on_after<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.event_listeners.add(FnListener::new(move |event| {
            if let AnnounceEvent::After { message, .. } = event {
                f(message);
            }
        }));
        self
    }

    pub fn build(self) -> AnnounceLayer {
        AnnounceLayer {
            config: Arc::new(AnnounceConfig {
                before: self.before,
                after: self.after,
                event_listeners: self.event_listeners,
            }),
        }
    }
}

/// A [`Layer`] that announces a message before and after every call.
///
/// The after message is skipped when the call fails.
///
/// # Examples
///
/// ```
/// use decorum_core::{callable_fn, CallArgs, Callable, DecorateExt, Value};
/// use decorum_diagnostics::AnnounceLayer;
///
/// let say_whee = callable_fn("say_whee", "", |_| Ok(Value::from("Whee!")))
///     .decorate(AnnounceLayer::builder().before("Here we go").build());
///
/// assert_eq!(say_whee.call(CallArgs::new()).unwrap(), Value::from("Whee!"));
/// ```
#[derive(Clone)]
pub struct AnnounceLayer {
    config: Arc<AnnounceConfig>,
}

impl AnnounceLayer {
    pub fn builder() -> AnnounceConfigBuilder {
        AnnounceConfigBuilder::new()
    }
}

impl Decorator for AnnounceLayer {
    const BEHAVIOR: &'static str = "announce";

    fn defaults() -> Self {
        AnnounceConfigBuilder::new().build()
    }

    /// Accepts `before` and `after` (strings).
    fn configured(options: &Options) -> Result<Self, CallError> {
        let mut reader = options.reader(Self::BEHAVIOR);
        let before = reader.string("before")?;
        let after = reader.string("after")?;
        reader.finish()?;

        let mut builder = AnnounceConfigBuilder::new();
        if let Some(before) = before {
            builder = builder.before(before);
        }
        if let Some(after) = after {
            builder = builder.after(after);
        }
        Ok(builder.build())
    }
}

impl<S: Callable> Layer<S> for AnnounceLayer {
    type Service = Announce<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Announce {
            inner,
            config: Arc::clone(&self.config),
        }
    }
}

pub struct Announce<S> {
    inner: S,
    config: Arc<AnnounceConfig>,
}

impl<S: Clone> Clone for Announce<S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            config: Arc::clone(&self.config),
        }
    }
}

impl<S: Callable> Callable for Announce<S> {
    fn metadata(&self) -> &Metadata {
        self.inner.metadata()
    }

    fn call(&self, args: CallArgs) -> Result<Value, CallError> {
        let name = self.inner.name();

        tracing::info!(callable = %name, "{}", self.config.before);
        self.config.event_listeners.emit(&AnnounceEvent::Before {
            name: name.to_string(),
            timestamp: Instant::now(),
            message: self.config.before.clone(),
        });

        let value = self.inner.call(args)?;

        tracing::info!(callable = %name, "{}", self.config.after);
        self.config.event_listeners.emit(&AnnounceEvent::After {
            name: name.to_string(),
            timestamp: Instant::now(),
            message: self.config.after.clone(),
        });

        Ok(value)
    }
}
