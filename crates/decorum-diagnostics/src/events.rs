use decorum_core::DecoratorEvent;
use std::time::{Duration, Instant};

/// Events emitted by the timer.
#[derive(Debug, Clone)]
pub enum TimerEvent {
    /// The wrapped call returned, successfully or not.
    Finished {
        name: String,
        timestamp: Instant,
        elapsed: Duration,
        succeeded: bool,
    },
}

impl DecoratorEvent for TimerEvent {
    fn event_type(&self) -> &'static str {
        "finished"
    }

    fn timestamp(&self) -> Instant {
        match self {
            TimerEvent::Finished { timestamp, .. } => *timestamp,
        }
    }

    fn callable_name(&self) -> &str {
        match self {
            TimerEvent::Finished { name, .. } => name,
        }
    }
}

/// Events emitted by the debug decorator. Arguments and results are carried
/// in their rendered form.
#[derive(Debug, Clone)]
pub enum DebugEvent {
    Calling {
        name: String,
        timestamp: Instant,
        args: String,
    },
    Returned {
        name: String,
        timestamp: Instant,
        value: String,
    },
    Failed {
        name: String,
        timestamp: Instant,
        error: String,
    },
}

impl DecoratorEvent for DebugEvent {
    fn event_type(&self) -> &'static str {
        match self {
            DebugEvent::Calling { .. } => "calling",
            DebugEvent::Returned { .. } => "returned",
            DebugEvent::Failed { .. } => "failed",
        }
    }

    fn timestamp(&self) -> Instant {
        match self {
            DebugEvent::Calling { timestamp, .. }
            | DebugEvent::Returned { timestamp, .. }
            | DebugEvent::Failed { timestamp, .. } => *timestamp,
        }
    }

    fn callable_name(&self) -> &str {
        match self {
            DebugEvent::Calling { name, .. }
            | DebugEvent::Returned { name, .. }
            | DebugEvent::Failed { name, .. } => name,
        }
    }
}

/// Events emitted by the announce decorator.
#[derive(Debug, Clone)]
pub enum AnnounceEvent {
    Before {
        name: String,
        timestamp: Instant,
        message: String,
    },
    After {
        name: String,
        timestamp: Instant,
        message: String,
    },
}

impl DecoratorEvent for AnnounceEvent {
    fn event_type(&self) -> &'static str {
        match self {
            AnnounceEvent::Before { .. } => "before",
            AnnounceEvent::After { .. } => "after",
        }
    }

    fn timestamp(&self) -> Instant {
        match self {
            AnnounceEvent::Before { timestamp, .. } | AnnounceEvent::After { timestamp, .. } => {
                *timestamp
            }
        }
    }

    fn callable_name(&self) -> &str {
        match self {
            AnnounceEvent::Before { name, .. } | AnnounceEvent::After { name, .. } => name,
        }
    }
}
