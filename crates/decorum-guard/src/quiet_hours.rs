//! Time-of-day gate.

use crate::events::QuietHoursEvent;
use chrono::Timelike;
use decorum_core::{
    CallArgs, CallError, Callable, Decorator, EventListeners, FnListener, Metadata, Options, Value,
};
use std::sync::Arc;
use std::time::Instant;
use tower_layer::Layer;

#[cfg(feature = "tracing")]
use tracing::debug;

/// Source of the current local hour.
pub trait Clock: Send + Sync {
    /// Hour of the day, 0 to 23.
    fn hour(&self) -> u32;
}

/// The system clock in the local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn hour(&self) -> u32 {
        chrono::Local::now().hour()
    }
}

/// A clock stuck at one hour.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub u32);

impl Clock for FixedClock {
    fn hour(&self) -> u32 {
        self.0
    }
}

/// Configuration for the quiet-hours gate.
pub struct QuietHoursConfig {
    pub(crate) start: u32,
    pub(crate) end: u32,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) event_listeners: EventListeners<QuietHoursEvent>,
}

/// Builder for [`QuietHoursLayer`].
pub struct QuietHoursConfigBuilder {
    start: u32,
    end: u32,
    clock: Arc<dyn Clock>,
    event_listeners: EventListeners<QuietHoursEvent>,
}

impl Default for QuietHoursConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl QuietHoursConfigBuilder {
    /// Creates a new builder with defaults.
    ///
    /// Defaults:
    /// - allowed: 7 to 22 (calls run from 07:00 until 21:59)
    /// - clock: [`SystemClock`]
    pub fn new() -> Self {
        Self {
            start: 7,
            end: 22,
            clock: Arc::new(SystemClock),
            event_listeners: EventListeners::new(),
        }
    }

    /// Sets the window in which calls run, as `[start, end)` in whole hours.
    pub fn allowed(mut self, start: u32, end: u32) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    pub fn clock<C>(mut self, clock: C) -> Self
    where
        C: Clock + 'static,
    {
        self.clock = Arc::new(clock);
        self
    }

    /// Registers a callback invoked with the hour when a call is skipped.
    pub fn on_suppressed<F>(mut self, f: F) -> Self
    where
        F: Fn(u32) + Send + Sync + 'static,
    {
        self.event_listeners.add(FnListener::new(move |event| {
            if let QuietHoursEvent::Suppressed { hour, .. } = event {
                f(*hour);
            }
        }));
        self
    }

    /// Registers a callback invoked with the hour when a call runs.
    pub fn on_allowed<F>(mut self, f: F) -> Self
    where
        F: Fn(u32) + Send + Sync + 'static,
    {
        self.event_listeners.add(FnListener::new(move |event| {
            if let QuietHoursEvent::Allowed { hour, .. } = event {
                f(*hour);
            }
        }));
        self
    }

    /// Builds the gate.
    ///
    /// Fails with [`CallError::InvalidConfiguration`] unless
    /// `start < end <= 24`.
    pub fn build(self) -> Result<QuietHoursLayer, CallError> {
        if self.end > 24 || self.start >= self.end {
            return Err(CallError::invalid_config(
                QuietHoursLayer::BEHAVIOR,
                format!(
                    "allowed window must satisfy start < end <= 24, got {}..{}",
                    self.start, self.end
                ),
            ));
        }
        Ok(QuietHoursLayer {
            config: Arc::new(QuietHoursConfig {
                start: self.start,
                end: self.end,
                clock: self.clock,
                event_listeners: self.event_listeners,
            }),
        })
    }
}

/// A [`Layer`] that only runs the wrapped function during allowed hours.
///
/// Outside the window the call is skipped and returns [`Value::None`]
/// without an error, so noisy jobs simply stay quiet at night.
///
/// # Examples
///
/// ```
/// use decorum_core::{callable_fn, CallArgs, Callable, DecorateExt, Value};
/// use decorum_guard::{FixedClock, QuietHoursLayer};
///
/// let say_whee = callable_fn("say_whee", "", |_| Ok(Value::from("Whee!")));
/// let at_night = say_whee.clone().decorate(
///     QuietHoursLayer::builder().clock(FixedClock(23)).build().unwrap(),
/// );
/// let at_noon = say_whee.decorate(
///     QuietHoursLayer::builder().clock(FixedClock(12)).build().unwrap(),
/// );
///
/// assert_eq!(at_night.call(CallArgs::new()).unwrap(), Value::None);
/// assert_eq!(at_noon.call(CallArgs::new()).unwrap(), Value::from("Whee!"));
/// ```
#[derive(Clone)]
pub struct QuietHoursLayer {
    config: Arc<QuietHoursConfig>,
}

impl QuietHoursLayer {
    pub fn builder() -> QuietHoursConfigBuilder {
        QuietHoursConfigBuilder::new()
    }

    /// The allowed window as `(start, end)`.
    pub fn allowed(&self) -> (u32, u32) {
        (self.config.start, self.config.end)
    }
}

impl Decorator for QuietHoursLayer {
    const BEHAVIOR: &'static str = "quiet_hours";

    fn defaults() -> Self {
        QuietHoursLayer {
            config: Arc::new(QuietHoursConfig {
                start: 7,
                end: 22,
                clock: Arc::new(SystemClock),
                event_listeners: EventListeners::new(),
            }),
        }
    }

    /// Accepts `start` and `end` (hours, 0 to 24). The clock is always the
    /// system clock.
    fn configured(options: &Options) -> Result<Self, CallError> {
        let mut reader = options.reader(Self::BEHAVIOR);
        let start = reader.hour("start")?;
        let end = reader.hour("end")?;
        reader.finish()?;

        QuietHoursConfigBuilder::new()
            .allowed(start.unwrap_or(7), end.unwrap_or(22))
            .build()
    }
}

impl<S: Callable> Layer<S> for QuietHoursLayer {
    type Service = QuietHours<S>;

    fn layer(&self, inner: S) -> Self::Service {
        QuietHours {
            inner,
            config: Arc::clone(&self.config),
        }
    }
}

pub struct QuietHours<S> {
    inner: S,
    config: Arc<QuietHoursConfig>,
}

impl<S: Clone> Clone for QuietHours<S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            config: Arc::clone(&self.config),
        }
    }
}

impl<S: Callable> Callable for QuietHours<S> {
    fn metadata(&self) -> &Metadata {
        self.inner.metadata()
    }

    fn call(&self, args: CallArgs) -> Result<Value, CallError> {
        let name = self.inner.name();
        let hour = self.config.clock.hour();

        if !(self.config.start..self.config.end).contains(&hour) {
            #[cfg(feature = "tracing")]
            debug!(callable = %name, hour, "Call suppressed outside allowed hours");

            self.config.event_listeners.emit(&QuietHoursEvent::Suppressed {
                name: name.to_string(),
                timestamp: Instant::now(),
                hour,
            });
            return Ok(Value::None);
        }

        self.config.event_listeners.emit(&QuietHoursEvent::Allowed {
            name: name.to_string(),
            timestamp: Instant::now(),
            hour,
        });
        self.inner.call(args)
    }
}
