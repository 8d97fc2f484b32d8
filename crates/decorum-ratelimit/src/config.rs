use crate::events::SlowDownEvent;
use crate::SlowDownLayer;
use decorum_core::{CallError, EventListeners, FnListener};
use std::time::Duration;

/// Configuration for the slow-down pattern.
pub struct SlowDownConfig {
    pub(crate) delay: Duration,
    pub(crate) event_listeners: EventListeners<SlowDownEvent>,
    pub(crate) name: String,
}

enum Pace {
    Delay(Duration),
    Rate(f64),
}

/// Builder for [`SlowDownLayer`].
pub struct SlowDownConfigBuilder {
    pace: Pace,
    event_listeners: EventListeners<SlowDownEvent>,
    name: String,
}

impl Default for SlowDownConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SlowDownConfigBuilder {
    /// Creates a new builder with defaults.
    ///
    /// Defaults:
    /// - delay: 1 second
    /// - name: `"<unnamed>"`
    pub fn new() -> Self {
        Self {
            pace: Pace::Delay(Duration::from_secs(1)),
            event_listeners: EventListeners::new(),
            name: "<unnamed>".to_string(),
        }
    }

    /// Sets the pause before each call. Overrides any earlier [`rate`](Self::rate).
    pub fn delay(mut self, delay: Duration) -> Self {
        self.pace = Pace::Delay(delay);
        self
    }

    /// Sets the pause as a number of calls per second, so `rate(4.0)` waits
    /// 250ms before each call. Overrides any earlier [`delay`](Self::delay).
    pub fn rate(mut self, calls_per_second: f64) -> Self {
        self.pace = Pace::Rate(calls_per_second);
        self
    }

    /// Sets the name for this instance (used in events).
    pub fn name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    /// Registers a callback invoked with the pause length before each call
    /// is delegated.
    pub fn on_delayed<F>(mut self, f: F) -> Self
    where
        F: Fn(Duration) + Send + Sync + 'static,
    {
        self.event_listeners.add(FnListener::new(move |event| {
            let SlowDownEvent::Delayed { delay, .. } = event;
            f(*delay);
        }));
        self
    }

    /// Builds the slow-down layer.
    ///
    /// Fails with [`CallError::InvalidConfiguration`] when a rate is not a
    /// positive finite number, or is so small that the pause overflows
    /// [`Duration`].
    pub fn build(self) -> Result<SlowDownLayer, CallError> {
        let delay = match self.pace {
            Pace::Delay(delay) => delay,
            Pace::Rate(rate) if rate > 0.0 && rate.is_finite() => {
                Duration::try_from_secs_f64(1.0 / rate).map_err(|_| {
                    CallError::invalid_config(
                        "slow_down",
                        format!("rate {} is too small to express as a delay", rate),
                    )
                })?
            }
            Pace::Rate(rate) => {
                return Err(CallError::invalid_config(
                    "slow_down",
                    format!("rate must be positive, got {}", rate),
                ))
            }
        };

        Ok(SlowDownLayer::new(SlowDownConfig {
            delay,
            event_listeners: self.event_listeners,
            name: self.name,
        }))
    }
}
