//! Slow-down decorator for decorum callables.
//!
//! [`SlowDownLayer`] sleeps the calling thread for a fixed pause before
//! every call, either as an explicit delay or derived from a calls-per-second
//! rate. It is a pacing tool for scripts and tests rather than a rate
//! limiter: there is no shared budget, each call simply waits.
//!
//! # Examples
//!
//! ```
//! use decorum_core::{callable_fn, CallArgs, Callable, Decorator, Options, Value};
//! use decorum_ratelimit::SlowDownLayer;
//! use tower::ServiceBuilder;
//!
//! let layer = SlowDownLayer::configured(&Options::new().with("rate", 200)).unwrap();
//! let ping = ServiceBuilder::new()
//!     .layer(layer)
//!     .service(callable_fn("ping", "", |_| Ok(Value::from("pong"))));
//!
//! assert_eq!(ping.call(CallArgs::new()).unwrap(), Value::from("pong"));
//! ```

mod config;
mod events;
mod layer;

pub use config::{SlowDownConfig, SlowDownConfigBuilder};
pub use events::SlowDownEvent;
pub use layer::SlowDownLayer;

use decorum_core::{CallArgs, CallError, Callable, Metadata, Value};
use std::sync::Arc;
use std::time::Instant;

#[cfg(feature = "metrics")]
use metrics::{describe_histogram, histogram};

#[cfg(feature = "tracing")]
use tracing::debug;

/// A callable that waits before delegating to the callable it wraps.
pub struct SlowDown<S> {
    inner: S,
    config: Arc<SlowDownConfig>,
}

impl<S> SlowDown<S> {
    pub fn new(inner: S, config: Arc<SlowDownConfig>) -> Self {
        #[cfg(feature = "metrics")]
        describe_histogram!(
            "slow_down_delay_seconds",
            "Time spent sleeping before each call"
        );

        Self { inner, config }
    }
}

impl<S: Clone> Clone for SlowDown<S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            config: Arc::clone(&self.config),
        }
    }
}

impl<S: Callable> Callable for SlowDown<S> {
    fn metadata(&self) -> &Metadata {
        self.inner.metadata()
    }

    fn call(&self, args: CallArgs) -> Result<Value, CallError> {
        let delay = self.config.delay;

        #[cfg(feature = "tracing")]
        debug!(
            slow_down = %self.config.name,
            callable = %self.inner.name(),
            delay_ms = delay.as_millis() as u64,
            "Sleeping before call"
        );

        if !delay.is_zero() {
            std::thread::sleep(delay);
        }

        #[cfg(feature = "metrics")]
        histogram!("slow_down_delay_seconds", "slow_down" => self.config.name.clone())
            .record(delay.as_secs_f64());

        self.config.event_listeners.emit(&SlowDownEvent::Delayed {
            name: self.inner.name().to_string(),
            timestamp: Instant::now(),
            delay,
        });

        self.inner.call(args)
    }
}
