/// Token bucket rate limiter for upstream catalog requests
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use std::num::NonZeroU32;

/// Token bucket rate limiter
///
/// Shared by every member of a fan-out batch so that a page of forty
/// concurrent fetches still respects the upstream's fair-use policy.
///
/// # Algorithm
/// - Capacity: `burst_size` tokens available up front
/// - Refill rate: `requests_per_second` tokens per second
/// - On acquire: wait until one token is available, then consume it
pub struct UpstreamRateLimiter {
    limiter: DefaultDirectRateLimiter,
}

impl UpstreamRateLimiter {
    /// Create a new limiter. Zero values are raised to one.
    pub fn new(requests_per_second: u32, burst_size: u32) -> Self {
        let rate = NonZeroU32::new(requests_per_second).unwrap_or(NonZeroU32::MIN);
        let burst = NonZeroU32::new(burst_size).unwrap_or(NonZeroU32::MIN);
        Self {
            limiter: RateLimiter::direct(Quota::per_second(rate).allow_burst(burst)),
        }
    }

    /// Wait for a token and consume it.
    pub async fn acquire(&self) {
        self.limiter.until_ready().await;
    }

    /// Consume a token if one is available right now.
    pub fn try_acquire(&self) -> bool {
        self.limiter.check().is_ok()
    }
}

impl std::fmt::Debug for UpstreamRateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamRateLimiter").finish_non_exhaustive()
    }
}
