//! [`Throttle`] – leading-edge rate limiter.
//!
//! The first request passes; further requests are dropped until `window`
//! has elapsed since the last request that passed.  Backed by a `governor`
//! GCRA limiter with a burst of one.

use std::fmt;
use std::time::Duration;

use governor::clock::{Clock, DefaultClock};
use governor::middleware::NoOpMiddleware;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};

type DirectLimiter<C> = RateLimiter<NotKeyed, InMemoryState, C, NoOpMiddleware<<C as Clock>::Instant>>;

pub struct Throttle<C: Clock = DefaultClock> {
    window: Duration,
    clock: C,
    /// `None` for a zero window, which never drops anything.
    limiter: Option<DirectLimiter<C>>,
}

impl Throttle {
    pub fn new(window: Duration) -> Self {
        Self::with_clock(window, DefaultClock::default())
    }
}

impl<C: Clock + Clone> Throttle<C> {
    /// Throttle driven by `clock`, e.g. a `FakeRelativeClock` in tests.
    pub fn with_clock(window: Duration, clock: C) -> Self {
        let limiter = build_limiter(window, &clock);
        Self {
            window,
            clock,
            limiter,
        }
    }

    /// Ask to pass now.  Returns `true` and restarts the window when the
    /// previous pass is at least `window` old.
    pub fn allow(&self) -> bool {
        self.limiter
            .as_ref()
            .is_none_or(|limiter| limiter.check().is_ok())
    }

    /// Forget the last pass; the next request passes.
    pub fn reset(&mut self) {
        self.limiter = build_limiter(self.window, &self.clock);
    }

    pub fn window(&self) -> Duration {
        self.window
    }
}

fn build_limiter<C: Clock + Clone>(window: Duration, clock: &C) -> Option<DirectLimiter<C>> {
    Quota::with_period(window).map(|quota| RateLimiter::direct_with_clock(quota, clock.clone()))
}

impl<C: Clock> fmt::Debug for Throttle<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Throttle")
            .field("window", &self.window)
            .finish_non_exhaustive()
    }
}
