//! Call counting.

use crate::events::CountCallsEvent;
use decorum_core::{
    CallArgs, CallError, Callable, Decorator, EventListeners, FnListener, Metadata, Options, Value,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tower_layer::Layer;

#[cfg(feature = "metrics")]
use metrics::{counter, describe_counter};

/// Configuration for the call counter.
pub struct CountCallsConfig {
    pub(crate) event_listeners: EventListeners<CountCallsEvent>,
    pub(crate) log: bool,
}

/// Builder for [`CountCallsLayer`].
pub struct CountCallsConfigBuilder {
    event_listeners: EventListeners<CountCallsEvent>,
    log: bool,
}

impl Default for CountCallsConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CountCallsConfigBuilder {
    /// Creates a new builder with defaults.
    ///
    /// Defaults:
    /// - log: true (one `tracing` line per call)
    pub fn new() -> Self {
        Self {
            event_listeners: EventListeners::new(),
            log: true,
        }
    }

    /// Enables or disables the per-call log line. Events are emitted either way.
    pub fn log(mut self, log: bool) -> Self {
        self.log = log;
        self
    }

    /// Registers a callback invoked with the callable's name and its new
    /// count each time a call is counted.
    pub fn on_call<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, u64) + Send + Sync + 'static,
    {
        self.event_listeners.add(FnListener::new(move |event| {
            let CountCallsEvent::CallCounted { name, count, .. } = event;
            f(name, *count);
        }));
        self
    }

    pub fn build(self) -> CountCallsLayer {
        CountCallsLayer {
            config: Arc::new(CountCallsConfig {
                event_listeners: self.event_listeners,
                log: self.log,
            }),
        }
    }
}

/// A [`Layer`] that counts invocations of the callable it wraps.
///
/// Every [`layer`](Layer::layer) call starts a fresh count at zero, so
/// wrapping the same function twice yields two independent counters.
///
/// # Examples
///
/// ```
/// use decorum_core::{callable_fn, CallArgs, DecorateExt, Value};
/// use decorum_state::CountCallsLayer;
///
/// let say_whee = callable_fn("say_whee", "", |_| Ok(Value::from("Whee!")))
///     .decorate(CountCallsLayer::builder().build());
///
/// say_whee.call(CallArgs::new()).unwrap();
/// say_whee.call(CallArgs::new()).unwrap();
/// assert_eq!(say_whee.count(), 2);
/// # use decorum_core::Callable;
/// ```
#[derive(Clone)]
pub struct CountCallsLayer {
    config: Arc<CountCallsConfig>,
}

impl CountCallsLayer {
    pub fn builder() -> CountCallsConfigBuilder {
        CountCallsConfigBuilder::new()
    }
}

impl Decorator for CountCallsLayer {
    const BEHAVIOR: &'static str = "count_calls";

    fn defaults() -> Self {
        CountCallsConfigBuilder::new().build()
    }

    /// Accepts `log` (bool).
    fn configured(options: &Options) -> Result<Self, CallError> {
        let mut reader = options.reader(Self::BEHAVIOR);
        let log = reader.bool("log")?;
        reader.finish()?;

        let mut builder = CountCallsConfigBuilder::new();
        if let Some(log) = log {
            builder = builder.log(log);
        }
        Ok(builder.build())
    }
}

impl<S: Callable> Layer<S> for CountCallsLayer {
    type Service = CountCalls<S>;

    fn layer(&self, inner: S) -> Self::Service {
        CountCalls::new(inner, Arc::clone(&self.config))
    }
}

/// A callable that counts its own invocations.
///
/// Clones share the count: a clone is another handle to the same wrapped
/// callable, not a new one.
pub struct CountCalls<S> {
    inner: S,
    config: Arc<CountCallsConfig>,
    count: Arc<AtomicU64>,
}

impl<S> CountCalls<S> {
    pub fn new(inner: S, config: Arc<CountCallsConfig>) -> Self {
        #[cfg(feature = "metrics")]
        describe_counter!("decorum_calls_total", "Total number of counted calls");

        Self {
            inner,
            config,
            count: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Number of invocations so far.
    pub fn count(&self) -> u64 {
        self.count.load(Ordering::SeqCst)
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: Clone> Clone for CountCalls<S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            config: Arc::clone(&self.config),
            count: Arc::clone(&self.count),
        }
    }
}

impl<S: Callable> Callable for CountCalls<S> {
    fn metadata(&self) -> &Metadata {
        self.inner.metadata()
    }

    fn call(&self, args: CallArgs) -> Result<Value, CallError> {
        let count = self.count.fetch_add(1, Ordering::SeqCst) + 1;
        let name = self.inner.name();

        if self.config.log {
            tracing::info!(callable = %name, count, "Call {} of '{}'", count, name);
        }

        #[cfg(feature = "metrics")]
        counter!("decorum_calls_total", "callable" => name.to_string()).increment(1);

        self.config.event_listeners.emit(&CountCallsEvent::CallCounted {
            name: name.to_string(),
            timestamp: Instant::now(),
            count,
        });

        self.inner.call(args)
    }
}
