use decorum_core::DecoratorEvent;
use std::time::Instant;

/// Events emitted by the call counter.
#[derive(Debug, Clone)]
pub enum CountCallsEvent {
    /// A call was counted, before it was delegated.
    CallCounted {
        name: String,
        timestamp: Instant,
        count: u64,
    },
}

impl DecoratorEvent for CountCallsEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CountCallsEvent::CallCounted { .. } => "call_counted",
        }
    }

    fn timestamp(&self) -> Instant {
        match self {
            CountCallsEvent::CallCounted { timestamp, .. } => *timestamp,
        }
    }

    fn callable_name(&self) -> &str {
        match self {
            CountCallsEvent::CallCounted { name, .. } => name,
        }
    }
}

/// Events emitted by the singleton decorator.
#[derive(Debug, Clone)]
pub enum SingletonEvent {
    /// The instance was constructed and cached.
    Created { name: String, timestamp: Instant },
    /// The cached instance was returned.
    Reused {
        name: String,
        timestamp: Instant,
        /// Whether this call's arguments differ from the ones the instance
        /// was built with. They are ignored either way.
        args_differ: bool,
    },
}

impl DecoratorEvent for SingletonEvent {
    fn event_type(&self) -> &'static str {
        match self {
            SingletonEvent::Created { .. } => "created",
            SingletonEvent::Reused { .. } => "reused",
        }
    }

    fn timestamp(&self) -> Instant {
        match self {
            SingletonEvent::Created { timestamp, .. }
            | SingletonEvent::Reused { timestamp, .. } => *timestamp,
        }
    }

    fn callable_name(&self) -> &str {
        match self {
            SingletonEvent::Created { name, .. } | SingletonEvent::Reused { name, .. } => name,
        }
    }
}
