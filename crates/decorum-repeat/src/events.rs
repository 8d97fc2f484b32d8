use decorum_core::DecoratorEvent;
use std::time::Instant;

/// Events emitted by the repeat decorator.
#[derive(Debug, Clone)]
pub enum RepeatEvent {
    /// One run of the wrapped callable finished successfully.
    Iteration {
        name: String,
        timestamp: Instant,
        /// 1-based index of the run.
        iteration: usize,
        times: usize,
    },
    /// A run failed and the remaining runs were skipped.
    Aborted {
        name: String,
        timestamp: Instant,
        iteration: usize,
    },
}

impl DecoratorEvent for RepeatEvent {
    fn event_type(&self) -> &'static str {
        match self {
            RepeatEvent::Iteration { .. } => "iteration",
            RepeatEvent::Aborted { .. } => "aborted",
        }
    }

    fn timestamp(&self) -> Instant {
        match self {
            RepeatEvent::Iteration { timestamp, .. } | RepeatEvent::Aborted { timestamp, .. } => {
                *timestamp
            }
        }
    }

    fn callable_name(&self) -> &str {
        match self {
            RepeatEvent::Iteration { name, .. } | RepeatEvent::Aborted { name, .. } => name,
        }
    }
}
