use rand::Rng;
use std::time::Duration;

/// Computes the pause before a retry.
pub trait IntervalFunction: Send + Sync {
    /// `attempt` is 0 for the first retry.
    fn next_interval(&self, attempt: usize) -> Duration;
}

/// The same pause before every retry.
#[derive(Debug, Clone)]
pub struct FixedInterval {
    duration: Duration,
}

impl FixedInterval {
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }
}

impl IntervalFunction for FixedInterval {
    fn next_interval(&self, _attempt: usize) -> Duration {
        self.duration
    }
}

/// A pause that grows by `multiplier` (default 2.0) with each retry,
/// optionally capped.
#[derive(Debug, Clone)]
pub struct ExponentialBackoff {
    initial_interval: Duration,
    multiplier: f64,
    max_interval: Option<Duration>,
}

impl ExponentialBackoff {
    pub fn new(initial_interval: Duration) -> Self {
        Self {
            initial_interval,
            multiplier: 2.0,
            max_interval: None,
        }
    }

    /// Sets the growth factor. Negative values are clamped to 0 and NaN
    /// falls back to 1.0 (a constant pause).
    pub fn multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = if multiplier.is_nan() {
            1.0
        } else {
            multiplier.max(0.0)
        };
        self
    }

    pub fn max_interval(mut self, max_interval: Duration) -> Self {
        self.max_interval = Some(max_interval);
        self
    }

    /// Saturates at [`Duration::MAX`] before the cap is applied.
    fn interval(&self, attempt: usize) -> Duration {
        let exponent = i32::try_from(attempt).unwrap_or(i32::MAX);
        let secs = self.initial_interval.as_secs_f64() * self.multiplier.powi(exponent);
        // 0 * inf from a zero initial interval stays zero.
        let interval = if secs.is_nan() {
            Duration::ZERO
        } else {
            Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
        };
        match self.max_interval {
            Some(max) => interval.min(max),
            None => interval,
        }
    }
}

impl IntervalFunction for ExponentialBackoff {
    fn next_interval(&self, attempt: usize) -> Duration {
        self.interval(attempt)
    }
}

/// Exponential backoff spread by a random factor so that callers retrying
/// together drift apart.
///
/// A `randomization_factor` of 0.5 picks each pause between 50% and 150% of
/// the exponential value.
#[derive(Debug, Clone)]
pub struct ExponentialRandomBackoff {
    exponential: ExponentialBackoff,
    randomization_factor: f64,
}

impl ExponentialRandomBackoff {
    pub fn new(initial_interval: Duration, randomization_factor: f64) -> Self {
        Self {
            exponential: ExponentialBackoff::new(initial_interval),
            randomization_factor: randomization_factor.clamp(0.0, 1.0),
        }
    }

    pub fn multiplier(mut self, multiplier: f64) -> Self {
        self.exponential = self.exponential.multiplier(multiplier);
        self
    }

    pub fn max_interval(mut self, max_interval: Duration) -> Self {
        self.exponential = self.exponential.max_interval(max_interval);
        self
    }
}

impl IntervalFunction for ExponentialRandomBackoff {
    fn next_interval(&self, attempt: usize) -> Duration {
        let base = self.exponential.interval(attempt).as_secs_f64();
        let delta = base * self.randomization_factor;
        if delta == 0.0 {
            return Duration::try_from_secs_f64(base).unwrap_or(Duration::MAX);
        }
        let randomized = rand::rng().random_range((base - delta)..=(base + delta));
        Duration::try_from_secs_f64(randomized.max(0.0)).unwrap_or(Duration::MAX)
    }
}

/// Backoff computed by a closure.
pub struct FnInterval<F> {
    f: F,
}

impl<F> FnInterval<F>
where
    F: Fn(usize) -> Duration + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> IntervalFunction for FnInterval<F>
where
    F: Fn(usize) -> Duration + Send + Sync,
{
    fn next_interval(&self, attempt: usize) -> Duration {
        (self.f)(attempt)
    }
}
