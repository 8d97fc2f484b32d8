//! Two-shape construction for configurable decorators.
//!
//! A configurable behavior can be applied either bare, with its defaults, or
//! after configuring it. Rather than guessing which shape the caller meant,
//! [`Decorator`] exposes one explicit entry point per shape:
//!
//! - [`Decorator::with_defaults`] wraps a target immediately.
//! - [`Decorator::configured`] validates [`Options`] and returns a layer that
//!   is applied to the target later.
//!
//! Both shapes end in the same [`Layer::layer`] call, so the wrapped result is
//! identical for equivalent configuration.

use crate::error::CallError;
use crate::value::Value;
use std::time::Duration;
use tower_layer::Layer;

/// Named configuration values for [`Decorator::configured`].
///
/// # Examples
///
/// ```
/// use decorum_core::Options;
///
/// let options = Options::new().with("times", 3).with("name", "greeting");
/// assert_eq!(options.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    entries: Vec<(String, Value)>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an option, replacing any earlier value with the same name.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((name, value)),
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Starts a validating read of these options on behalf of `behavior`.
    pub fn reader(&self, behavior: &'static str) -> OptionReader<'_> {
        OptionReader {
            behavior,
            options: self,
            consumed: Vec::new(),
        }
    }
}

/// Reads typed values out of [`Options`], rejecting anything outside the
/// behavior's domain with [`CallError::InvalidConfiguration`].
///
/// Call [`finish`](OptionReader::finish) after reading to reject unknown
/// option names.
#[derive(Debug)]
pub struct OptionReader<'a> {
    behavior: &'static str,
    options: &'a Options,
    consumed: Vec<&'a str>,
}

impl<'a> OptionReader<'a> {
    fn take(&mut self, key: &'static str) -> Option<&'a Value> {
        let options: &'a Options = self.options;
        let (name, value) = options.entries.iter().find(|(n, _)| n == key)?;
        self.consumed.push(name.as_str());
        Some(value)
    }

    fn invalid(&self, reason: String) -> CallError {
        CallError::invalid_config(self.behavior, reason)
    }

    /// Reads an integer that must be at least 1.
    pub fn positive_int(&mut self, key: &'static str) -> Result<Option<u64>, CallError> {
        match self.take(key) {
            None => Ok(None),
            Some(Value::Int(i)) if *i >= 1 => Ok(Some(*i as u64)),
            Some(Value::Int(i)) => Err(self.invalid(format!("{} must be at least 1, got {}", key, i))),
            Some(other) => Err(self.invalid(format!(
                "{} must be an int, got {}",
                key,
                other.kind()
            ))),
        }
    }

    /// Reads a number that must be strictly positive.
    pub fn positive_float(&mut self, key: &'static str) -> Result<Option<f64>, CallError> {
        match self.take(key) {
            None => Ok(None),
            Some(v) => match v.as_float() {
                Some(x) if x > 0.0 && x.is_finite() => Ok(Some(x)),
                Some(x) => Err(self.invalid(format!("{} must be positive, got {}", key, x))),
                None => Err(self.invalid(format!(
                    "{} must be a number, got {}",
                    key,
                    v.kind()
                ))),
            },
        }
    }

    /// Reads a non-negative number of seconds as a [`Duration`].
    pub fn seconds(&mut self, key: &'static str) -> Result<Option<Duration>, CallError> {
        match self.take(key) {
            None => Ok(None),
            Some(v) => match v.as_float() {
                Some(x) if x >= 0.0 && x.is_finite() => match Duration::try_from_secs_f64(x) {
                    Ok(d) => Ok(Some(d)),
                    Err(_) => Err(self.invalid(format!("{} is out of range, got {}", key, x))),
                },
                Some(x) => Err(self.invalid(format!("{} must be non-negative, got {}", key, x))),
                None => Err(self.invalid(format!(
                    "{} must be a number of seconds, got {}",
                    key,
                    v.kind()
                ))),
            },
        }
    }

    /// Reads an hour of the day (0 to 24 inclusive).
    pub fn hour(&mut self, key: &'static str) -> Result<Option<u32>, CallError> {
        match self.take(key) {
            None => Ok(None),
            Some(Value::Int(h)) if (0..=24).contains(h) => Ok(Some(*h as u32)),
            Some(v) => Err(self.invalid(format!(
                "{} must be an hour between 0 and 24, got {}",
                key,
                v.repr()
            ))),
        }
    }

    pub fn string(&mut self, key: &'static str) -> Result<Option<String>, CallError> {
        match self.take(key) {
            None => Ok(None),
            Some(Value::Str(s)) => Ok(Some(s.clone())),
            Some(other) => Err(self.invalid(format!(
                "{} must be a str, got {}",
                key,
                other.kind()
            ))),
        }
    }

    pub fn bool(&mut self, key: &'static str) -> Result<Option<bool>, CallError> {
        match self.take(key) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(self.invalid(format!(
                "{} must be a bool, got {}",
                key,
                other.kind()
            ))),
        }
    }

    /// Fails if any option was supplied that no read consumed.
    pub fn finish(self) -> Result<(), CallError> {
        match self
            .options
            .entries
            .iter()
            .find(|(n, _)| !self.consumed.contains(&n.as_str()))
        {
            Some((unknown, _)) => Err(self.invalid(format!("unknown option '{}'", unknown))),
            None => Ok(()),
        }
    }
}

/// A behavior that can be applied bare or configured.
///
/// # Examples
///
/// ```ignore
/// // Bare: default configuration, wraps immediately.
/// let twice = RepeatLayer::with_defaults(greet);
///
/// // Configured: validate options, wrap later.
/// let thrice = RepeatLayer::configured(&Options::new().with("times", 3))?.layer(greet);
/// ```
pub trait Decorator: Sized {
    /// The behavior name reported in configuration errors.
    const BEHAVIOR: &'static str;

    /// The layer with default configuration.
    fn defaults() -> Self;

    /// Validates `options` and returns the configured layer.
    fn configured(options: &Options) -> Result<Self, CallError>;

    /// Wraps `target` using the default configuration.
    fn with_defaults<S>(target: S) -> <Self as Layer<S>>::Service
    where
        Self: Layer<S>,
    {
        Self::defaults().layer(target)
    }
}
