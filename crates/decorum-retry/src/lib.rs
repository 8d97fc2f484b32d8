//! Retry decorator for decorum callables.
//!
//! [`RetryLayer`] calls the wrapped function again when it fails, up to a
//! fixed number of attempts, pausing between attempts according to a
//! backoff strategy. The calling thread sleeps during the pause.
//!
//! # Features
//!
//! - **IntervalFunction abstraction**: fixed, exponential, randomized
//!   exponential, or closure-based backoff
//! - **Retry predicates**: choose which [`CallError`]s are retried; by
//!   default only failures raised by the wrapped function are
//! - **Event system**: Retry, Success, Exhausted and IgnoredError events
//!
//! Once attempts are exhausted the last failure is returned unchanged.

mod backoff;
mod config;
mod events;
mod layer;
mod policy;

pub use backoff::{
    ExponentialBackoff, ExponentialRandomBackoff, FixedInterval, FnInterval, IntervalFunction,
};
pub use config::{RetryConfig, RetryConfigBuilder};
pub use events::RetryEvent;
pub use layer::RetryLayer;
pub use policy::{RetryPolicy, RetryPredicate};

use decorum_core::{CallArgs, CallError, Callable, Metadata, Value};
use std::sync::Arc;
use std::time::Instant;

#[cfg(feature = "metrics")]
use metrics::{counter, describe_counter};

#[cfg(feature = "tracing")]
use tracing::{debug, warn};

/// A callable that retries the callable it wraps.
pub struct Retry<S> {
    inner: S,
    config: Arc<RetryConfig>,
}

impl<S> Retry<S> {
    pub fn new(inner: S, config: Arc<RetryConfig>) -> Self {
        #[cfg(feature = "metrics")]
        {
            describe_counter!("retry_calls_total", "Total retried calls by outcome");
            describe_counter!("retry_attempts_total", "Total retry attempts");
        }

        Self { inner, config }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: Clone> Clone for Retry<S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            config: Arc::clone(&self.config),
        }
    }
}

impl<S: Callable> Callable for Retry<S> {
    fn metadata(&self) -> &Metadata {
        self.inner.metadata()
    }

    fn call(&self, args: CallArgs) -> Result<Value, CallError> {
        let config = &self.config;
        let name = self.inner.name();
        let mut attempt = 0;

        loop {
            let error = match self.inner.call(args.clone()) {
                Ok(value) => {
                    #[cfg(feature = "metrics")]
                    counter!("retry_calls_total", "retry" => config.name.clone(), "result" => "success")
                        .increment(1);

                    config.event_listeners.emit(&RetryEvent::Success {
                        name: name.to_string(),
                        timestamp: Instant::now(),
                        attempts: attempt + 1,
                    });
                    return Ok(value);
                }
                Err(error) => error,
            };

            if !config.policy.should_retry(&error) {
                #[cfg(feature = "tracing")]
                debug!(retry = %config.name, callable = %name, error = %error, "Failure not retried");

                config.event_listeners.emit(&RetryEvent::IgnoredError {
                    name: name.to_string(),
                    timestamp: Instant::now(),
                });
                return Err(error);
            }

            if attempt + 1 >= config.policy.max_attempts {
                #[cfg(feature = "tracing")]
                warn!(
                    retry = %config.name,
                    callable = %name,
                    attempts = attempt + 1,
                    error = %error,
                    "Retries exhausted"
                );

                #[cfg(feature = "metrics")]
                counter!("retry_calls_total", "retry" => config.name.clone(), "result" => "exhausted")
                    .increment(1);

                config.event_listeners.emit(&RetryEvent::Exhausted {
                    name: name.to_string(),
                    timestamp: Instant::now(),
                    attempts: attempt + 1,
                });
                return Err(error);
            }

            let delay = config.policy.next_backoff(attempt);
            attempt += 1;

            #[cfg(feature = "tracing")]
            debug!(
                retry = %config.name,
                callable = %name,
                attempt,
                delay_ms = delay.as_millis() as u64,
                "Retrying after failure"
            );

            #[cfg(feature = "metrics")]
            counter!("retry_attempts_total", "retry" => config.name.clone()).increment(1);

            config.event_listeners.emit(&RetryEvent::Retry {
                name: name.to_string(),
                timestamp: Instant::now(),
                attempt,
                delay,
            });

            if !delay.is_zero() {
                std::thread::sleep(delay);
            }
        }
    }
}
