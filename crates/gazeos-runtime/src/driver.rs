//! [`SessionDriver`] – single consumer of the capture hand-off queue.
//!
//! The driver owns the [`TrackingSession`] and processes one
//! [`SessionMessage`] at a time.  After each message it yields to the
//! scheduler and only then runs deferred work, so a blink-triggered
//! `select` always lands on a later turn than the reading that completed
//! the gesture.

use gazeos_hal::{GazeReading, SensorInfo};
use gazeos_layout::FocusView;
use gazeos_middleware::HandoffReceiver;
use gazeos_types::SessionInfo;
use tokio::sync::oneshot;
use tracing::{debug, warn};

use crate::session::TrackingSession;

/// Point-in-time view of the navigation state.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationSnapshot {
    pub running: bool,
    pub depth_path: Vec<usize>,
    pub section_count: usize,
    pub session: Option<SessionInfo>,
}

/// Messages accepted by [`SessionDriver`].
#[derive(Debug)]
pub enum SessionMessage {
    Start(SensorInfo),
    Reading(GazeReading),
    End,
    /// Reply with a [`NavigationSnapshot`].
    Inspect(oneshot::Sender<NavigationSnapshot>),
}

pub struct SessionDriver<V> {
    session: TrackingSession<V>,
    inbox: HandoffReceiver<SessionMessage>,
}

impl<V: FocusView> SessionDriver<V> {
    pub fn new(session: TrackingSession<V>, inbox: HandoffReceiver<SessionMessage>) -> Self {
        Self { session, inbox }
    }

    /// Process messages until every sender is gone, then end any running
    /// session and hand the session back.
    pub async fn run(mut self) -> TrackingSession<V> {
        while let Some(message) = self.inbox.recv().await {
            self.dispatch(message);
            tokio::task::yield_now().await;
            let ran = self.session.run_deferred();
            if ran > 0 {
                debug!(ran, "deferred work completed");
            }
        }
        self.session.end();
        self.session
    }

    fn dispatch(&mut self, message: SessionMessage) {
        match message {
            SessionMessage::Start(sensor) => {
                if let Err(e) = self.session.start(&sensor) {
                    warn!(error = %e, sensor = %sensor.id, "session start refused");
                }
            }
            SessionMessage::Reading(reading) => {
                if let Err(e) = self.session.handle_reading(reading) {
                    debug!(error = %e, "reading dropped");
                }
            }
            SessionMessage::End => {
                self.session.end();
            }
            SessionMessage::Inspect(reply) => {
                let _ = reply.send(self.snapshot());
            }
        }
    }

    fn snapshot(&self) -> NavigationSnapshot {
        let engine = self.session.adapter().engine();
        NavigationSnapshot {
            running: self.session.is_running(),
            depth_path: engine.depth_path().to_vec(),
            section_count: engine.section_count(),
            session: self.session.info().cloned(),
        }
    }
}
