use decorum_core::DecoratorEvent;
use std::time::{Duration, Instant};

/// Events emitted by the retry decorator.
#[derive(Debug, Clone)]
pub enum RetryEvent {
    /// A retry is about to be made after `delay`.
    Retry {
        name: String,
        timestamp: Instant,
        /// 1 for the first retry.
        attempt: usize,
        delay: Duration,
    },
    /// The call succeeded, on the first attempt or after retries.
    Success {
        name: String,
        timestamp: Instant,
        attempts: usize,
    },
    /// Every attempt failed; the last failure is returned.
    Exhausted {
        name: String,
        timestamp: Instant,
        attempts: usize,
    },
    /// A failure the policy does not retry was returned immediately.
    IgnoredError { name: String, timestamp: Instant },
}

impl DecoratorEvent for RetryEvent {
    fn event_type(&self) -> &'static str {
        match self {
            RetryEvent::Retry { .. } => "retry",
            RetryEvent::Success { .. } => "success",
            RetryEvent::Exhausted { .. } => "exhausted",
            RetryEvent::IgnoredError { .. } => "ignored_error",
        }
    }

    fn timestamp(&self) -> Instant {
        match self {
            RetryEvent::Retry { timestamp, .. }
            | RetryEvent::Success { timestamp, .. }
            | RetryEvent::Exhausted { timestamp, .. }
            | RetryEvent::IgnoredError { timestamp, .. } => *timestamp,
        }
    }

    fn callable_name(&self) -> &str {
        match self {
            RetryEvent::Retry { name, .. }
            | RetryEvent::Success { name, .. }
            | RetryEvent::Exhausted { name, .. }
            | RetryEvent::IgnoredError { name, .. } => name,
        }
    }
}
