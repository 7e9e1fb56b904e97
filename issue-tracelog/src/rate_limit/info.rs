//! Rate limit information.

/// Rate limit information for the core API resource.
#[derive(Debug, Clone)]
pub struct RateLimitInfo {
    /// Requests remaining in the current window.
    pub remaining: u32,

    /// Unix timestamp when the rate limit resets.
    pub reset: u64,

    /// Total requests allowed per window.
    pub limit: u32,
}

impl RateLimitInfo {
    /// Seconds until the window resets, relative to `now`.
    #[must_use]
    pub fn secs_until_reset(&self, now: u64) -> u64 {
        self.reset.saturating_sub(now)
    }
}
