use decorum_core::DecoratorEvent;
use std::time::{Duration, Instant};

/// Events emitted by the slow-down decorator.
#[derive(Debug, Clone)]
pub enum SlowDownEvent {
    /// The calling thread slept for `delay` and the call is about to run.
    Delayed {
        name: String,
        timestamp: Instant,
        delay: Duration,
    },
}

impl DecoratorEvent for SlowDownEvent {
    fn event_type(&self) -> &'static str {
        "delayed"
    }

    fn timestamp(&self) -> Instant {
        match self {
            SlowDownEvent::Delayed { timestamp, .. } => *timestamp,
        }
    }

    fn callable_name(&self) -> &str {
        match self {
            SlowDownEvent::Delayed { name, .. } => name,
        }
    }
}
