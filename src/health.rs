//! Connection health tracking.

/// Counts consecutive fetch failures against a configurable threshold.
///
/// A pure counter: it does not warn or act on its own. The monitor reads
/// [`HealthTracker::is_healthy`] each tick and decides what to do.
#[derive(Debug, Clone)]
pub struct HealthTracker {
    consecutive_failures: u32,
    max_failures: u32,
}

impl HealthTracker {
    /// Create a tracker that reports unhealthy after `max_failures`
    /// consecutive failures.
    pub fn new(max_failures: u32) -> Self {
        Self {
            consecutive_failures: 0,
            max_failures,
        }
    }

    /// Record the outcome of one fetch attempt.
    ///
    /// Success resets the failure count; failure increments it by one.
    pub fn record_outcome(&mut self, success: bool) {
        if success {
            self.consecutive_failures = 0;
        } else {
            self.consecutive_failures += 1;
        }
    }

    /// Whether the connection is currently considered healthy.
    pub fn is_healthy(&self) -> bool {
        self.consecutive_failures < self.max_failures
    }

    /// Current consecutive failure count.
    pub fn failures(&self) -> u32 {
        self.consecutive_failures
    }
}

impl Default for HealthTracker {
    fn default() -> Self {
        Self::new(5)
    }
}
