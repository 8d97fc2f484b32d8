use crate::backoff::IntervalFunction;
use decorum_core::CallError;
use std::sync::Arc;
use std::time::Duration;

/// Decides whether a failure is worth another attempt.
pub type RetryPredicate = Arc<dyn Fn(&CallError) -> bool + Send + Sync>;

/// Attempt budget, backoff and retry predicate for one retry layer.
pub struct RetryPolicy {
    pub(crate) max_attempts: usize,
    pub(crate) interval_fn: Arc<dyn IntervalFunction>,
    pub(crate) retry_predicate: Option<RetryPredicate>,
}

impl RetryPolicy {
    pub fn new(max_attempts: usize, interval_fn: Arc<dyn IntervalFunction>) -> Self {
        Self {
            max_attempts,
            interval_fn,
            retry_predicate: None,
        }
    }

    pub fn with_retry_predicate<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&CallError) -> bool + Send + Sync + 'static,
    {
        self.retry_predicate = Some(Arc::new(predicate));
        self
    }

    /// Without a predicate only failures raised by the wrapped function
    /// itself are retried. Configuration errors, unhashable arguments and
    /// registry misses fail the same way every time.
    pub fn should_retry(&self, error: &CallError) -> bool {
        match &self.retry_predicate {
            Some(predicate) => predicate(error),
            None => error.is_application(),
        }
    }

    pub fn next_backoff(&self, attempt: usize) -> Duration {
        self.interval_fn.next_interval(attempt)
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }
}
