//! Wall-clock timing of calls.

use crate::events::TimerEvent;
use decorum_core::{
    CallArgs, CallError, Callable, Decorator, EventListeners, FnListener, Metadata, Options, Value,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower_layer::Layer;

#[cfg(feature = "metrics")]
use metrics::histogram;

/// Configuration for the timer.
pub struct TimerConfig {
    pub(crate) event_listeners: EventListeners<TimerEvent>,
}

/// Builder for [`TimerLayer`].
#[derive(Default)]
pub struct TimerConfigBuilder {
    event_listeners: EventListeners<TimerEvent>,
}

impl TimerConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a callback invoked with the callable's name and the elapsed
    /// time after every call, including failed ones.
    pub fn on_finished<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, Duration) + Send + Sync + 'static,
    {
        self.event_listeners.add(FnListener::new(move |event| {
            let TimerEvent::Finished { name, elapsed, .. } = event;
            f(name, *elapsed);
        }));
        self
    }

    pub fn build(self) -> TimerLayer {
        TimerLayer {
            config: Arc::new(TimerConfig {
                event_listeners: self.event_listeners,
            }),
        }
    }
}

/// A [`Layer`] that measures how long each call takes.
///
/// Logs `Finished 'name' in 0.0012 secs` at info level.
#[derive(Clone)]
pub struct TimerLayer {
    config: Arc<TimerConfig>,
}

impl TimerLayer {
    pub fn builder() -> TimerConfigBuilder {
        TimerConfigBuilder::new()
    }
}

impl Decorator for TimerLayer {
    const BEHAVIOR: &'static str = "timer";

    fn defaults() -> Self {
        TimerConfigBuilder::new().build()
    }

    /// Takes no options.
    fn configured(options: &Options) -> Result<Self, CallError> {
        options.reader(Self::BEHAVIOR).finish()?;
        Ok(Self::defaults())
    }
}

impl<S: Callable> Layer<S> for TimerLayer {
    type Service = Timer<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Timer {
            inner,
            config: Arc::clone(&self.config),
        }
    }
}

pub struct Timer<S> {
    inner: S,
    config: Arc<TimerConfig>,
}

impl<S> Timer<S> {
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: Clone> Clone for Timer<S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            config: Arc::clone(&self.config),
        }
    }
}

impl<S: Callable> Callable for Timer<S> {
    fn metadata(&self) -> &Metadata {
        self.inner.metadata()
    }

    fn call(&self, args: CallArgs) -> Result<Value, CallError> {
        let start = Instant::now();
        let result = self.inner.call(args);
        let elapsed = start.elapsed();
        let name = self.inner.name();

        tracing::info!(
            callable = %name,
            elapsed_secs = elapsed.as_secs_f64(),
            "Finished '{}' in {:.4} secs",
            name,
            elapsed.as_secs_f64()
        );

        #[cfg(feature = "metrics")]
        histogram!("decorum_call_duration_seconds", "callable" => name.to_string())
            .record(elapsed.as_secs_f64());

        self.config.event_listeners.emit(&TimerEvent::Finished {
            name: name.to_string(),
            timestamp: Instant::now(),
            elapsed,
            succeeded: result.is_ok(),
        });

        result
    }
}
