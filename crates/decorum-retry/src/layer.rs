use crate::backoff::FixedInterval;
use crate::config::{RetryConfig, RetryConfigBuilder};
use crate::policy::RetryPolicy;
use crate::Retry;
use decorum_core::{CallError, Callable, Decorator, EventListeners, Options};
use std::sync::Arc;
use std::time::Duration;
use tower_layer::Layer;

/// A [`Layer`] that retries failed calls.
///
/// # Examples
///
/// ```
/// use decorum_core::{callable_fn, CallArgs, CallError, Callable, Value};
/// use decorum_retry::RetryLayer;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::time::Duration;
/// use tower::ServiceBuilder;
///
/// let attempts = AtomicUsize::new(0);
/// let fetch = ServiceBuilder::new()
///     .layer(
///         RetryLayer::builder()
///             .max_attempts(4)
///             .fixed_backoff(Duration::from_millis(1))
///             .on_retry(|attempt, delay| println!("retry {} after {:?}", attempt, delay))
///             .build()
///             .unwrap(),
///     )
///     .service(callable_fn("fetch", "", move |_| {
///         if attempts.fetch_add(1, Ordering::SeqCst) < 2 {
///             Err(CallError::application("fetch", "connection reset"))
///         } else {
///             Ok(Value::from("payload"))
///         }
///     }));
///
/// assert_eq!(fetch.call(CallArgs::new()).unwrap(), Value::from("payload"));
/// ```
#[derive(Clone)]
pub struct RetryLayer {
    config: Arc<RetryConfig>,
}

impl RetryLayer {
    /// Creates a new `RetryLayer` with the given configuration.
    pub fn new(config: RetryConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Creates a new builder for configuring a retry layer.
    pub fn builder() -> RetryConfigBuilder {
        RetryConfigBuilder::new()
    }

    pub fn max_attempts(&self) -> usize {
        self.config.policy.max_attempts
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }
}

impl Decorator for RetryLayer {
    const BEHAVIOR: &'static str = "retry";

    fn defaults() -> Self {
        Self::new(RetryConfig {
            policy: RetryPolicy::new(3, Arc::new(FixedInterval::new(Duration::ZERO))),
            event_listeners: EventListeners::new(),
            name: "<unnamed>".to_string(),
        })
    }

    /// Accepts `max_attempts` (int, at least 1) and `backoff` (seconds).
    fn configured(options: &Options) -> Result<Self, CallError> {
        let mut reader = options.reader(Self::BEHAVIOR);
        let max_attempts = reader.positive_int("max_attempts")?;
        let backoff = reader.seconds("backoff")?;
        reader.finish()?;

        let mut builder = RetryConfigBuilder::new();
        if let Some(max_attempts) = max_attempts {
            builder = builder.max_attempts(usize::try_from(max_attempts).map_err(|_| {
                CallError::invalid_config(Self::BEHAVIOR, "max_attempts is too large")
            })?);
        }
        if let Some(backoff) = backoff {
            builder = builder.fixed_backoff(backoff);
        }
        builder.build()
    }
}

impl<S: Callable> Layer<S> for RetryLayer {
    type Service = Retry<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Retry::new(inner, Arc::clone(&self.config))
    }
}
