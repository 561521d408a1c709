use std::time::Duration;

/// Outcome of counting one request against its client's window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    pub allowed: bool,
    pub limit: u32,
    pub remaining: u32,
    /// Time left until the current window resets.
    pub reset_after: Duration,
    pub window: Duration,
}

impl RateLimitDecision {
    /// Whole seconds until reset, rounded up so clients never retry early.
    pub fn reset_after_secs(&self) -> u64 {
        let secs = self.reset_after.as_secs();
        if self.reset_after.subsec_nanos() > 0 {
            secs + 1
        } else {
            secs
        }
    }

    /// `RateLimit-Policy` value, e.g. `100;w=900`.
    pub fn policy(&self) -> String {
        format!("{};w={}", self.limit, self.window.as_secs())
    }
}
