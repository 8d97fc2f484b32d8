//! Repeat decorator for decorum callables.
//!
//! [`RepeatLayer`] runs the wrapped callable a fixed number of times per
//! invocation and returns the result of the last run. With the default of
//! two runs this is the classic "do twice" decorator.
//!
//! A failing run stops the repetition; its error is returned and the
//! remaining runs are skipped.
//!
//! # Examples
//!
//! ```
//! use decorum_core::{callable_fn, CallArgs, Callable, DecorateExt, Value};
//! use decorum_repeat::RepeatLayer;
//!
//! let greet = callable_fn("greet", "", |args: CallArgs| {
//!     let name = args.get(0).map(|v| v.to_string()).unwrap_or_default();
//!     println!("Hello {}", name);
//!     Ok(Value::from(format!("Hi {}", name)))
//! });
//!
//! let greet = greet.decorate(RepeatLayer::builder().times(4).build().unwrap());
//! assert_eq!(greet.call(CallArgs::new().arg("World")).unwrap(), Value::from("Hi World"));
//! ```

mod events;

pub use events::RepeatEvent;

use decorum_core::{
    CallArgs, CallError, Callable, Decorator, EventListeners, FnListener, Metadata, Options, Value,
};
use std::sync::Arc;
use std::time::Instant;
use tower_layer::Layer;

#[cfg(feature = "metrics")]
use metrics::counter;

#[cfg(feature = "tracing")]
use tracing::{debug, warn};

const DEFAULT_TIMES: usize = 2;

/// Configuration for the repeat decorator.
pub struct RepeatConfig {
    pub(crate) times: usize,
    pub(crate) event_listeners: EventListeners<RepeatEvent>,
}

/// Builder for [`RepeatLayer`].
pub struct RepeatConfigBuilder {
    times: usize,
    event_listeners: EventListeners<RepeatEvent>,
}

impl Default for RepeatConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RepeatConfigBuilder {
    /// Creates a new builder with defaults.
    ///
    /// Defaults:
    /// - times: 2
    pub fn new() -> Self {
        Self {
            times: DEFAULT_TIMES,
            event_listeners: EventListeners::new(),
        }
    }

    /// Sets how many times the wrapped callable runs per invocation.
    pub fn times(mut self, times: usize) -> Self {
        self.times = times;
        self
    }

    /// Registers a callback invoked after each successful run with the
    /// 1-based run index.
    pub fn on_iteration<F>(mut self, f: F) -> Self
    where
        F: Fn(usize) + Send + Sync + 'static,
    {
        self.event_listeners.add(FnListener::new(move |event| {
            if let RepeatEvent::Iteration { iteration, .. } = event {
                f(*iteration);
            }
        }));
        self
    }

    /// Registers a callback invoked when a failing run stops the repetition.
    pub fn on_aborted<F>(mut self, f: F) -> Self
    where
        F: Fn(usize) + Send + Sync + 'static,
    {
        self.event_listeners.add(FnListener::new(move |event| {
            if let RepeatEvent::Aborted { iteration, .. } = event {
                f(*iteration);
            }
        }));
        self
    }

    /// Builds the repeat layer.
    ///
    /// Fails with [`CallError::InvalidConfiguration`] when `times` is zero.
    pub fn build(self) -> Result<RepeatLayer, CallError> {
        if self.times < 1 {
            return Err(CallError::invalid_config(
                RepeatLayer::BEHAVIOR,
                "times must be at least 1",
            ));
        }
        Ok(RepeatLayer {
            config: Arc::new(RepeatConfig {
                times: self.times,
                event_listeners: self.event_listeners,
            }),
        })
    }
}

/// A [`Layer`] that runs the wrapped callable several times per call.
#[derive(Clone)]
pub struct RepeatLayer {
    config: Arc<RepeatConfig>,
}

impl RepeatLayer {
    pub fn builder() -> RepeatConfigBuilder {
        RepeatConfigBuilder::new()
    }

    pub fn times(&self) -> usize {
        self.config.times
    }
}

impl Decorator for RepeatLayer {
    const BEHAVIOR: &'static str = "repeat";

    fn defaults() -> Self {
        RepeatLayer {
            config: Arc::new(RepeatConfig {
                times: DEFAULT_TIMES,
                event_listeners: EventListeners::new(),
            }),
        }
    }

    /// Accepts `times` (int, at least 1).
    fn configured(options: &Options) -> Result<Self, CallError> {
        let mut reader = options.reader(Self::BEHAVIOR);
        let times = reader.positive_int("times")?;
        reader.finish()?;

        let mut builder = RepeatConfigBuilder::new();
        if let Some(times) = times {
            builder = builder.times(usize::try_from(times).map_err(|_| {
                CallError::invalid_config(Self::BEHAVIOR, "times is too large")
            })?);
        }
        builder.build()
    }
}

impl<S: Callable> Layer<S> for RepeatLayer {
    type Service = Repeat<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Repeat {
            inner,
            config: Arc::clone(&self.config),
        }
    }
}

/// A callable that runs its inner callable `times` times per invocation.
pub struct Repeat<S> {
    inner: S,
    config: Arc<RepeatConfig>,
}

impl<S> Repeat<S> {
    pub fn times(&self) -> usize {
        self.config.times
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: Clone> Clone for Repeat<S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            config: Arc::clone(&self.config),
        }
    }
}

impl<S: Callable> Callable for Repeat<S> {
    fn metadata(&self) -> &Metadata {
        self.inner.metadata()
    }

    fn call(&self, args: CallArgs) -> Result<Value, CallError> {
        let name = self.inner.name();
        let times = self.config.times;
        let mut last = Value::None;

        for iteration in 1..=times {
            match self.inner.call(args.clone()) {
                Ok(value) => {
                    #[cfg(feature = "tracing")]
                    debug!(callable = %name, iteration, times, "Repeat run finished");

                    #[cfg(feature = "metrics")]
                    counter!("repeat_runs_total", "callable" => name.to_string()).increment(1);

                    self.config.event_listeners.emit(&RepeatEvent::Iteration {
                        name: name.to_string(),
                        timestamp: Instant::now(),
                        iteration,
                        times,
                    });
                    last = value;
                }
                Err(err) => {
                    #[cfg(feature = "tracing")]
                    warn!(callable = %name, iteration, times, error = %err, "Repeat aborted");

                    self.config.event_listeners.emit(&RepeatEvent::Aborted {
                        name: name.to_string(),
                        timestamp: Instant::now(),
                        iteration,
                    });
                    return Err(err);
                }
            }
        }

        Ok(last)
    }
}
