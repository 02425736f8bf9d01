//! [`TrackingSession`] – one start/end cycle of gaze tracking.
//!
//! Per reading the session:
//!
//! 1. optionally mirrors the raw point for front-camera projections,
//! 2. smooths it with the [`PointerFilter`],
//! 3. moves the pointer overlay and forwards the point to the
//!    [`GazeAdapter`],
//! 4. feeds the blink score to the [`BlinkAccumulator`] and, when a blink
//!    gesture completes, queues a deferred `select` at the filtered point.
//!
//! Deferred work never runs inside [`handle_reading`][TrackingSession::handle_reading];
//! the owner calls [`run_deferred`][TrackingSession::run_deferred] on a later
//! turn (see [`SessionDriver`][crate::driver::SessionDriver]).

use std::collections::VecDeque;
use std::time::Duration;

use gazeos_hal::{GazeReading, NoPointer, PointerOverlay, SensorInfo};
use gazeos_layout::FocusView;
use gazeos_middleware::{EventBus, Topic};
use gazeos_perception::{BlinkAccumulator, PointerFilter};
use gazeos_perception::blink::{DEFAULT_FRAME_THRESHOLD, DEFAULT_SCORE_THRESHOLD};
use gazeos_types::{DeviceInfo, NavError, NavEvent, NavPayload, Point, ScreenGeometry, SessionInfo};
use tracing::{debug, info, trace};

use crate::adapter::GazeAdapter;
use crate::host::DEFAULT_GO_BACK_WINDOW;

const SOURCE: &str = "gazeos-runtime::session";

// ─────────────────────────────────────────────────────────────────────────────
// Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Tuning for a [`TrackingSession`].
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerConfig {
    pub screen: ScreenGeometry,
    /// Filter coefficient; higher is smoother and slower.
    pub smoothing: f64,
    /// A reading is a positive blink frame when its score is strictly above.
    pub blink_score_threshold: f32,
    /// Select fires once the positive frame count exceeds this.
    pub blink_frames: usize,
    /// Flip both axes before filtering.
    pub mirror_projection: bool,
    /// Log every raw screen point at `debug`.
    pub gaze_log: bool,
    /// Minimum spacing between forwarded go-back requests.
    pub go_back_window: Duration,
    /// Recorded in [`SessionInfo::app_id`].
    pub app_id: String,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            screen: ScreenGeometry::default(),
            smoothing: 0.85,
            blink_score_threshold: DEFAULT_SCORE_THRESHOLD,
            blink_frames: DEFAULT_FRAME_THRESHOLD,
            mirror_projection: false,
            gaze_log: false,
            go_back_window: DEFAULT_GO_BACK_WINDOW,
            app_id: "gazeos".to_string(),
        }
    }
}

/// Work queued by a reading, run on a later turn.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Deferred {
    Blink(Point),
}

// ─────────────────────────────────────────────────────────────────────────────
// TrackingSession
// ─────────────────────────────────────────────────────────────────────────────

pub struct TrackingSession<V> {
    config: TrackerConfig,
    adapter: GazeAdapter<V>,
    filter: PointerFilter,
    blinks: BlinkAccumulator,
    deferred: VecDeque<Deferred>,
    pointer: Box<dyn PointerOverlay>,
    current: Option<SessionInfo>,
    events: Option<EventBus>,
}

impl<V: FocusView> TrackingSession<V> {
    pub fn new(config: TrackerConfig, adapter: GazeAdapter<V>) -> Self {
        Self {
            filter: PointerFilter::new(config.smoothing),
            blinks: BlinkAccumulator::new(config.blink_score_threshold, config.blink_frames),
            config,
            adapter,
            deferred: VecDeque::new(),
            pointer: Box::new(NoPointer),
            current: None,
            events: None,
        }
    }

    pub fn with_pointer(mut self, pointer: impl PointerOverlay + 'static) -> Self {
        self.pointer = Box::new(pointer);
        self
    }

    /// Publish session start/end on `bus`.
    pub fn with_event_bus(mut self, bus: EventBus) -> Self {
        self.events = Some(bus);
        self
    }

    pub fn is_running(&self) -> bool {
        self.current.is_some()
    }

    pub fn info(&self) -> Option<&SessionInfo> {
        self.current.as_ref()
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn adapter(&self) -> &GazeAdapter<V> {
        &self.adapter
    }

    pub fn adapter_mut(&mut self) -> &mut GazeAdapter<V> {
        &mut self.adapter
    }

    pub fn pending_deferred(&self) -> usize {
        self.deferred.len()
    }

    // ------------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------------

    /// Begin tracking on `sensor`.
    ///
    /// Starting a running session changes nothing and returns its metadata.
    ///
    /// # Errors
    ///
    /// [`NavError::TrackingUnsupported`] when the sensor cannot track gaze;
    /// the session stays stopped.
    pub fn start(&mut self, sensor: &SensorInfo) -> Result<&SessionInfo, NavError> {
        if !sensor.supported {
            return Err(NavError::TrackingUnsupported {
                sensor: sensor.id.clone(),
            });
        }

        if self.current.is_none() {
            let device = DeviceInfo {
                model: sensor.model.clone(),
                screen: self.config.screen,
            };
            let info = SessionInfo::begin(self.config.app_id.clone(), device);
            info!(session_id = %info.id, sensor = %sensor.id, "tracking session started");

            self.adapter.engine_mut().reset();
            self.pointer.show();
            self.publish(NavPayload::SessionStarted(info.clone()));
            self.current = Some(info);
        } else {
            debug!(sensor = %sensor.id, "session already running");
        }

        self.current.as_ref().ok_or(NavError::SessionInactive)
    }

    /// Stop tracking and return the finished metadata, or `None` when no
    /// session was running.
    pub fn end(&mut self) -> Option<SessionInfo> {
        let mut info = self.current.take()?;
        info.end_time = Some(chrono::Utc::now());

        self.filter.reset();
        self.blinks.reset();
        self.deferred.clear();
        self.pointer.hide();

        info!(session_id = %info.id, "tracking session ended");
        self.publish(NavPayload::SessionEnded(info.clone()));
        Some(info)
    }

    // ------------------------------------------------------------------------
    // Per-reading pipeline
    // ------------------------------------------------------------------------

    /// Process one sensor reading to completion.
    ///
    /// # Errors
    ///
    /// [`NavError::SessionInactive`] when no session is running.
    pub fn handle_reading(&mut self, reading: GazeReading) -> Result<(), NavError> {
        if self.current.is_none() {
            return Err(NavError::SessionInactive);
        }
        // A NaN would stick in the filter until the session restarts.
        if !(reading.point.x.is_finite() && reading.point.y.is_finite()) {
            trace!(x = reading.point.x, y = reading.point.y, "non-finite gaze point dropped");
            return Ok(());
        }

        let raw = if self.config.mirror_projection {
            self.config.screen.mirror(reading.point)
        } else {
            reading.point
        };
        if self.config.gaze_log {
            debug!(
                x = raw.x,
                y = raw.y,
                timestamp = %chrono::Utc::now().to_rfc3339(),
                "gaze point"
            );
        }

        let point = self.filter.filter(raw);
        self.pointer.move_to(point);
        self.adapter.on_sample(point);

        if self.blinks.record(reading.blink_score) {
            debug!(x = point.x, y = point.y, "blink gesture; select deferred");
            self.deferred.push_back(Deferred::Blink(point));
        }
        Ok(())
    }

    /// Run queued deferred work; returns how many items ran.
    pub fn run_deferred(&mut self) -> usize {
        let mut ran = 0;
        while let Some(work) = self.deferred.pop_front() {
            match work {
                Deferred::Blink(point) => {
                    self.blinks.complete();
                    self.adapter.on_blink(point);
                }
            }
            ran += 1;
        }
        ran
    }

    fn publish(&self, payload: NavPayload) {
        if let Some(bus) = &self.events {
            let topic = Topic::of(&payload);
            if let Err(e) = bus.publish_to(topic, NavEvent::new(SOURCE, payload)) {
                debug!(error = %e, ?topic, "session event had no subscriber");
            }
        }
    }
}
