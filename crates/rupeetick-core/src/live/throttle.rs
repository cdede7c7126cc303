use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use governor::clock::{Clock, DefaultClock};
use governor::state::direct::NotKeyed;
use governor::state::InMemoryState;
use governor::{Quota, RateLimiter};

type DirectRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Request budget for one provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaPolicy {
    pub window: Duration,
    pub limit: u32,
}

impl QuotaPolicy {
    /// Alpha Vantage free tier: 5 calls per minute.
    pub const fn alphavantage_free_tier() -> Self {
        Self {
            window: Duration::from_secs(60),
            limit: 5,
        }
    }
}

/// Local rate limiter in front of the live provider. Requests over budget are
/// refused immediately with the time until the next slot frees up.
#[derive(Clone)]
pub struct RequestThrottle {
    limiter: Arc<DirectRateLimiter>,
    clock: DefaultClock,
    policy: QuotaPolicy,
}

impl std::fmt::Debug for RequestThrottle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestThrottle")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl RequestThrottle {
    pub fn new(policy: QuotaPolicy) -> Self {
        Self {
            limiter: Arc::new(RateLimiter::direct(quota_from_policy(policy))),
            clock: DefaultClock::default(),
            policy,
        }
    }

    pub const fn policy(&self) -> QuotaPolicy {
        self.policy
    }

    pub fn acquire(&self) -> Result<(), Duration> {
        self.limiter
            .check()
            .map_err(|not_until| not_until.wait_time_from(self.clock.now()))
    }
}

impl Default for RequestThrottle {
    fn default() -> Self {
        Self::new(QuotaPolicy::alphavantage_free_tier())
    }
}

/// Full burst up front, then one cell back every `window / limit`.
fn quota_from_policy(policy: QuotaPolicy) -> Quota {
    let burst = NonZeroU32::new(policy.limit).unwrap_or(NonZeroU32::MIN);
    let seconds_per_cell = (policy.window.as_secs_f64() / f64::from(burst.get())).max(0.001);

    Quota::with_period(Duration::from_secs_f64(seconds_per_cell))
        .unwrap_or_else(|| Quota::per_second(burst))
        .allow_burst(burst)
}
