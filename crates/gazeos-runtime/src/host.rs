//! Hosting-screen interface.
//!
//! The engine never manipulates screens itself; it asks a
//! [`NavigationHost`] to go back.  [`ThrottledHost`] wraps any host with a
//! leading-edge rate limit so a gaze that lingers left of the screen does not
//! unwind the whole navigation stack.

use std::time::Duration;

use gazeos_kernel::Throttle;
use gazeos_middleware::{EventBus, Topic};
use gazeos_types::{NavEvent, NavPayload};
use tracing::{debug, trace};

/// Default minimum spacing between forwarded go-back requests.
pub const DEFAULT_GO_BACK_WINDOW: Duration = Duration::from_secs(2);

/// Receives the engine's outward navigation requests.
pub trait NavigationHost: Send {
    fn request_go_back(&mut self);
}

impl<F: FnMut() + Send> NavigationHost for F {
    fn request_go_back(&mut self) {
        self()
    }
}

/// Host that publishes [`NavPayload::GoBackRequested`] on the navigation
/// topic for whoever owns the screen stack.
#[derive(Debug, Clone)]
pub struct BusNavigationHost {
    bus: EventBus,
}

impl BusNavigationHost {
    pub fn new(bus: EventBus) -> Self {
        Self { bus }
    }
}

impl NavigationHost for BusNavigationHost {
    fn request_go_back(&mut self) {
        let event = NavEvent::new("gazeos-runtime::host", NavPayload::GoBackRequested);
        if let Err(e) = self.bus.publish_to(Topic::Navigation, event) {
            debug!(error = %e, "go-back request had no listener");
        }
    }
}

/// Forwards at most one go-back request per window to `inner`.
#[derive(Debug)]
pub struct ThrottledHost<H> {
    inner: H,
    throttle: Throttle,
}

impl<H: NavigationHost> ThrottledHost<H> {
    pub fn new(inner: H, window: Duration) -> Self {
        Self {
            inner,
            throttle: Throttle::new(window),
        }
    }

    pub fn inner(&self) -> &H {
        &self.inner
    }
}

impl<H: NavigationHost> NavigationHost for ThrottledHost<H> {
    fn request_go_back(&mut self) {
        if self.throttle.allow() {
            self.inner.request_go_back();
        } else {
            trace!("go-back request throttled");
        }
    }
}
