//! Call and return logging.

use crate::events::DebugEvent;
use decorum_core::{
    CallArgs, CallError, Callable, Decorator, EventListeners, FnListener, Metadata, Options, Value,
};
use std::sync::Arc;
use std::time::Instant;
use tower_layer::Layer;

/// Configuration for the debug decorator.
pub struct DebugConfig {
    pub(crate) event_listeners: EventListeners<DebugEvent>,
}

/// Builder for [`DebugLayer`].
#[derive(Default)]
pub struct DebugConfigBuilder {
    event_listeners: EventListeners<DebugEvent>,
}

impl DebugConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a callback invoked before each call with the callable's
    /// name and its rendered arguments, e.g. `"'Benjamin', age=37"`.
    pub fn on_calling<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, &str) + Send + Sync + 'static,
    {
        self.event_listeners.add(FnListener::new(move |event| {
            if let DebugEvent::Calling { name, args, .. } = event {
                f(name, args);
            }
        }));
        self
    }

    /// Registers a callback invoked after a successful call with the
    /// callable's name and the rendered return value.
    pub fn on_returned<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, &str) + Send + Sync + 'static,
    {
        self.event_listeners.add(FnListener::new(move |event| {
            if let DebugEvent::Returned { name, value, .. } = event {
                f(name, value);
            }
        }));
        self
    }

    /// Registers a callback invoked when the call fails.
    pub fn on_failed<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, &str) + Send + Sync + 'static,
    {
        self.event_listeners.add(FnListener::new(move |event| {
            if let DebugEvent::Failed { name, error, .. } = event {
                f(name, error);
            }
        }));
        self
    }

    pub fn build(self) -> DebugLayer {
        DebugLayer {
            config: Arc::new(DebugConfig {
                event_listeners: self.event_listeners,
            }),
        }
    }
}

/// A [`Layer`] that logs every call with its arguments and its result.
///
/// Lines are written at debug level:
///
/// ```text
/// Calling make_greeting('Benjamin')
/// 'make_greeting' returned 'Howdy Benjamin!'
/// ```
#[derive(Clone)]
pub struct DebugLayer {
    config: Arc<DebugConfig>,
}

impl DebugLayer {
    pub fn builder() -> DebugConfigBuilder {
        DebugConfigBuilder::new()
    }
}

impl Decorator for DebugLayer {
    const BEHAVIOR: &'static str = "debug";

    fn defaults() -> Self {
        DebugConfigBuilder::new().build()
    }

    /// Takes no options.
    fn configured(options: &Options) -> Result<Self, CallError> {
        options.reader(Self::BEHAVIOR).finish()?;
        Ok(Self::defaults())
    }
}

impl<S: Callable> Layer<S> for DebugLayer {
    type Service = DebugCalls<S>;

    fn layer(&self, inner: S) -> Self::Service {
        DebugCalls {
            inner,
            config: Arc::clone(&self.config),
        }
    }
}

pub struct DebugCalls<S> {
    inner: S,
    config: Arc<DebugConfig>,
}

impl<S: Clone> Clone for DebugCalls<S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            config: Arc::clone(&self.config),
        }
    }
}

impl<S: Callable> Callable for DebugCalls<S> {
    fn metadata(&self) -> &Metadata {
        self.inner.metadata()
    }

    fn call(&self, args: CallArgs) -> Result<Value, CallError> {
        let name = self.inner.name();
        let rendered = args.render();

        tracing::debug!(callable = %name, "Calling {}({})", name, rendered);
        self.config.event_listeners.emit(&DebugEvent::Calling {
            name: name.to_string(),
            timestamp: Instant::now(),
            args: rendered,
        });

        match self.inner.call(args) {
            Ok(value) => {
                let repr = value.repr();
                tracing::debug!(callable = %name, "'{}' returned {}", name, repr);
                self.config.event_listeners.emit(&DebugEvent::Returned {
                    name: name.to_string(),
                    timestamp: Instant::now(),
                    value: repr,
                });
                Ok(value)
            }
            Err(err) => {
                tracing::debug!(callable = %name, error = %err, "'{}' failed", name);
                self.config.event_listeners.emit(&DebugEvent::Failed {
                    name: name.to_string(),
                    timestamp: Instant::now(),
                    error: err.to_string(),
                });
                Err(err)
            }
        }
    }
}
