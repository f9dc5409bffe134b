//! Client-side request throttling
//!
//! Scroll events can arrive far faster than the upstream quota allows. Every
//! outgoing request takes a permit from a governor token bucket first; a
//! request that has to wait is logged with the time it was held back.

use governor::clock::DefaultClock;
use governor::middleware::NoOpMiddleware;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter as Governor};
use std::num::NonZeroU32;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

type DirectLimiter = Governor<NotKeyed, InMemoryState, DefaultClock, NoOpMiddleware>;

/// Requests per second and burst allowance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimiterConfig {
    /// Sustained requests per second
    pub requests_per_second: u32,
    /// Requests allowed back to back before throttling starts
    pub burst_size: u32,
}

impl Default for RateLimiterConfig {
    fn default() -> Self {
        Self::new(10, 10)
    }
}

impl RateLimiterConfig {
    /// Create a config
    pub fn new(requests_per_second: u32, burst_size: u32) -> Self {
        Self {
            requests_per_second,
            burst_size,
        }
    }

    /// Governor quota; zero values count as one
    fn quota(&self) -> Quota {
        let per_second = NonZeroU32::new(self.requests_per_second).unwrap_or(NonZeroU32::MIN);
        let burst = NonZeroU32::new(self.burst_size).unwrap_or(NonZeroU32::MIN);
        Quota::per_second(per_second).allow_burst(burst)
    }
}

/// Token bucket shared by every clone of an `HttpClient`
#[derive(Clone)]
pub struct RateLimiter {
    bucket: Arc<DirectLimiter>,
    throttled: Arc<AtomicU64>,
}

impl RateLimiter {
    /// Create a limiter with a full bucket
    pub fn new(config: &RateLimiterConfig) -> Self {
        Self {
            bucket: Arc::new(Governor::direct(config.quota())),
            throttled: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Wait for a permit and return how long the request was held back
    pub async fn wait(&self) -> Duration {
        if self.bucket.check().is_ok() {
            return Duration::ZERO;
        }

        let started = Instant::now();
        self.bucket.until_ready().await;
        let held = started.elapsed();

        let throttled = self.throttled.fetch_add(1, Ordering::Relaxed) + 1;
        debug!(
            held_ms = held.as_millis() as u64,
            throttled, "Request throttled by client rate limit"
        );
        held
    }

    /// Take a permit if one is free right now
    pub fn try_acquire(&self) -> bool {
        self.bucket.check().is_ok()
    }

    /// Requests that had to wait for a permit so far
    pub fn throttled(&self) -> u64 {
        self.throttled.load(Ordering::Relaxed)
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("throttled", &self.throttled())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod rate_limit_tests {
    use super::*;

    #[test]
    fn test_burst_then_empty_bucket() {
        let limiter = RateLimiter::new(&RateLimiterConfig::new(1, 3));

        for _ in 0..3 {
            assert!(limiter.try_acquire());
        }
        assert!(!limiter.try_acquire());
    }

    #[test]
    fn test_zero_quota_allows_one_request() {
        let limiter = RateLimiter::new(&RateLimiterConfig::new(0, 0));
        assert!(limiter.try_acquire());
        assert!(!limiter.try_acquire());
    }

    #[tokio::test]
    async fn test_wait_within_burst_is_immediate() {
        let limiter = RateLimiter::new(&RateLimiterConfig::default());

        assert_eq!(limiter.wait().await, Duration::ZERO);
        assert_eq!(limiter.throttled(), 0);
    }

    #[tokio::test]
    async fn test_wait_past_burst_is_counted() {
        let limiter = RateLimiter::new(&RateLimiterConfig::new(50, 1));

        limiter.wait().await;
        let held = limiter.wait().await;

        assert!(held > Duration::ZERO);
        assert_eq!(limiter.throttled(), 1);

        // Clones share the bucket and the counter
        let clone = limiter.clone();
        assert_eq!(clone.throttled(), 1);
    }
}
