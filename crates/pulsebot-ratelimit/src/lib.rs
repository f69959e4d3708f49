//! Client-side sliding-window rate limiting, one window per provider.
//!
//! The window is not persisted: a restart begins empty, so a brief burst
//! above the nominal rate right after restart is possible and accepted.

use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tracing::debug;

/// Per-provider request ceiling over a trailing window.
#[derive(Debug, Clone, Copy)]
pub struct RatePolicy {
    pub max_calls: u32,
    pub window: Duration,
}

impl RatePolicy {
    pub fn per_minute(max_calls: u32) -> Self {
        Self {
            max_calls,
            window: Duration::from_secs(60),
        }
    }
}

/// Outcome of an acquire attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acquire {
    /// A slot was taken; the call may proceed now.
    Ready,
    /// Window saturated; retry after the given duration.
    RetryAfter(Duration),
    /// Policy admits no calls at all (`max_calls == 0`).
    Rejected,
}

/// Tracks recent request timestamps per provider and enforces each
/// provider's [`RatePolicy`].
pub struct RateLimiter {
    policies: HashMap<String, RatePolicy>,
    windows: Mutex<HashMap<String, VecDeque<Instant>>>,
}

impl RateLimiter {
    pub fn new(policies: HashMap<String, RatePolicy>) -> Self {
        Self {
            policies,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Try to take a call slot for `provider`.
    ///
    /// On `Ready` the call timestamp has already been recorded; the check
    /// and the record happen under one lock so two concurrent callers can
    /// never both take the last slot. Providers without a registered
    /// policy are unlimited.
    pub async fn acquire(&self, provider: &str) -> Acquire {
        self.acquire_at(provider, Instant::now()).await
    }

    async fn acquire_at(&self, provider: &str, now: Instant) -> Acquire {
        let Some(policy) = self.policies.get(provider) else {
            return Acquire::Ready;
        };
        if policy.max_calls == 0 {
            return Acquire::Rejected;
        }

        let mut windows = self.windows.lock().await;
        let window = windows.entry(provider.to_string()).or_default();

        // Half-open boundary: a timestamp exactly `window` old has expired.
        while let Some(front) = window.front() {
            if now.duration_since(*front) >= policy.window {
                window.pop_front();
            } else {
                break;
            }
        }

        if (window.len() as u32) < policy.max_calls {
            window.push_back(now);
            return Acquire::Ready;
        }

        // Oldest in-window timestamp bounds the wait.
        let oldest = *window.front().unwrap();
        let wait = policy.window - now.duration_since(oldest);
        debug!(provider, wait_ms = wait.as_millis() as u64, "rate window saturated");
        Acquire::RetryAfter(wait)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter(max_calls: u32, window_secs: u64) -> RateLimiter {
        let mut policies = HashMap::new();
        policies.insert(
            "p".to_string(),
            RatePolicy {
                max_calls,
                window: Duration::from_secs(window_secs),
            },
        );
        RateLimiter::new(policies)
    }

    #[tokio::test]
    async fn test_under_ceiling_is_ready() {
        let rl = limiter(3, 60);
        let t0 = Instant::now();
        for _ in 0..3 {
            assert_eq!(rl.acquire_at("p", t0).await, Acquire::Ready);
        }
    }

    #[tokio::test]
    async fn test_over_ceiling_gets_wait() {
        let rl = limiter(3, 60);
        let t0 = Instant::now();
        for _ in 0..3 {
            assert_eq!(rl.acquire_at("p", t0).await, Acquire::Ready);
        }
        let t1 = t0 + Duration::from_secs(10);
        match rl.acquire_at("p", t1).await {
            Acquire::RetryAfter(wait) => assert_eq!(wait, Duration::from_secs(50)),
            other => panic!("expected RetryAfter, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_boundary_timestamp_is_expired() {
        // A call at t=0, the rest of the budget immediately after, then a
        // call at exactly t=window must be admitted.
        let rl = limiter(3, 60);
        let t0 = Instant::now();
        for _ in 0..3 {
            assert_eq!(rl.acquire_at("p", t0).await, Acquire::Ready);
        }
        let boundary = t0 + Duration::from_secs(60);
        assert_eq!(rl.acquire_at("p", boundary).await, Acquire::Ready);
    }

    #[tokio::test]
    async fn test_zero_ceiling_rejects() {
        let rl = limiter(0, 60);
        assert_eq!(rl.acquire_at("p", Instant::now()).await, Acquire::Rejected);
        // And keeps rejecting, regardless of elapsed time.
        let later = Instant::now() + Duration::from_secs(3600);
        assert_eq!(rl.acquire_at("p", later).await, Acquire::Rejected);
    }

    #[tokio::test]
    async fn test_unknown_provider_is_unlimited() {
        let rl = limiter(1, 60);
        let t0 = Instant::now();
        for _ in 0..10 {
            assert_eq!(rl.acquire_at("other", t0).await, Acquire::Ready);
        }
    }

    #[tokio::test]
    async fn test_window_refills_as_calls_expire() {
        let rl = limiter(2, 60);
        let t0 = Instant::now();
        assert_eq!(rl.acquire_at("p", t0).await, Acquire::Ready);
        assert_eq!(rl.acquire_at("p", t0 + Duration::from_secs(30)).await, Acquire::Ready);
        // First slot frees at t=60, second at t=90.
        match rl.acquire_at("p", t0 + Duration::from_secs(45)).await {
            Acquire::RetryAfter(wait) => assert_eq!(wait, Duration::from_secs(15)),
            other => panic!("expected RetryAfter, got {other:?}"),
        }
        assert_eq!(rl.acquire_at("p", t0 + Duration::from_secs(61)).await, Acquire::Ready);
    }
}
