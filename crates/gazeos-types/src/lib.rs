use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// A 2-D screen coordinate in points, origin at the top-left corner.
///
/// Negative coordinates are used by capture adapters as out-of-bounds
/// sentinels ("looked above" / "looked left of" the visible area).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Size of the render surface the gaze point is projected onto.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenGeometry {
    pub width: f64,
    pub height: f64,
}

impl ScreenGeometry {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Mirror `point` across both axes (front-camera projections arrive
    /// flipped relative to the screen).
    pub fn mirror(&self, point: Point) -> Point {
        Point::new(self.width - point.x, self.height - point.y)
    }
}

impl Default for ScreenGeometry {
    fn default() -> Self {
        Self::new(390.0, 844.0)
    }
}

/// Discrete navigation gesture derived from a gaze reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EyeAction {
    /// Drill into the focused section, or fire its command at a leaf.
    Select,
    /// Back out one level of the depth path.
    Deselect,
    /// Ask the host to go back to the previous screen.
    Pop,
}

/// Number of sections the active subtree divides the screen into.
///
/// Shared between the navigation engine (writer) and the gaze interpreter
/// (reader). Clones observe the same value. Never reports less than 1.
#[derive(Debug, Clone)]
pub struct SectionCounter(Arc<AtomicUsize>);

impl SectionCounter {
    pub fn new(count: usize) -> Self {
        Self(Arc::new(AtomicUsize::new(count.max(1))))
    }

    pub fn get(&self) -> usize {
        self.0.load(Ordering::Acquire)
    }

    /// Store a new count. Zero is stored as 1.
    pub fn set(&self, count: usize) {
        self.0.store(count.max(1), Ordering::Release);
    }
}

impl Default for SectionCounter {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Hardware the session ran on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// e.g. `"iPhone14,2"` or `"sim"`.
    pub model: String,
    pub screen: ScreenGeometry,
}

/// Metadata of one tracking session, from start to end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionInfo {
    pub id: Uuid,
    pub app_id: String,
    pub device: DeviceInfo,
    pub begin_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
}

impl SessionInfo {
    pub fn begin(app_id: impl Into<String>, device: DeviceInfo) -> Self {
        Self {
            id: Uuid::new_v4(),
            app_id: app_id.into(),
            device,
            begin_time: Utc::now(),
            end_time: None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.end_time.is_some()
    }
}

/// Unified event wrapper for the outbound navigation bus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavEvent {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    /// e.g., "gazeos-runtime::engine"
    pub source: String,
    pub payload: NavPayload,
}

impl NavEvent {
    pub fn new(source: impl Into<String>, payload: NavPayload) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            source: source.into(),
            payload,
        }
    }
}

/// Signals the runtime emits towards hosts and observers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum NavPayload {
    /// The user asked to leave the current screen.
    GoBackRequested,
    /// A leaf command was executed.
    CommandFired { event_id: String },
    /// Focus was redrawn on `section` below `path`.
    FocusMoved {
        section: usize,
        path: Vec<usize>,
        depth: usize,
    },
    SessionStarted(SessionInfo),
    SessionEnded(SessionInfo),
}

/// Error type shared by every gazeos crate.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NavError {
    #[error("Gaze tracking not supported by sensor '{sensor}'")]
    TrackingUnsupported { sensor: String },

    #[error("No tracking session is running")]
    SessionInactive,

    #[error("Sensor fault on {sensor}: {details}")]
    Sensor { sensor: String, details: String },

    #[error("Channel error: {0}")]
    Channel(String),

    #[error("Invalid layout: {0}")]
    Layout(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_counter_never_drops_below_one() {
        let counter = SectionCounter::new(0);
        assert_eq!(counter.get(), 1);
        counter.set(4);
        assert_eq!(counter.get(), 4);
        counter.set(0);
        assert_eq!(counter.get(), 1);
    }

    #[test]
    fn section_counter_clones_share_state() {
        let writer = SectionCounter::new(2);
        let reader = writer.clone();
        writer.set(7);
        assert_eq!(reader.get(), 7);
    }

    #[test]
    fn mirror_flips_both_axes() {
        let screen = ScreenGeometry::new(400.0, 800.0);
        assert_eq!(screen.mirror(Point::new(100.0, 50.0)), Point::new(300.0, 750.0));
        // Past the right edge lands left of the screen.
        assert!(screen.mirror(Point::new(420.0, 10.0)).x < 0.0);
    }

    #[test]
    fn eye_action_serializes_snake_case() {
        let json = serde_json::to_string(&EyeAction::Deselect).unwrap();
        assert_eq!(json, "\"deselect\"");
    }

    #[test]
    fn focus_payload_roundtrip() {
        let event = NavEvent::new(
            "gazeos-runtime::engine",
            NavPayload::FocusMoved {
                section: 1,
                path: vec![0, 2],
                depth: 2,
            },
        );
        let json = serde_json::to_string(&event).unwrap();
        let back: NavEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, event.id);
        assert_eq!(back.payload, event.payload);
    }

    #[test]
    fn session_info_lifecycle() {
        let device = DeviceInfo {
            model: "sim".to_string(),
            screen: ScreenGeometry::default(),
        };
        let mut info = SessionInfo::begin("demo", device);
        assert!(!info.is_finished());
        info.end_time = Some(Utc::now());
        assert!(info.is_finished());
        assert!(info.end_time.unwrap() >= info.begin_time);
    }

    #[test]
    fn nav_error_display() {
        let err = NavError::TrackingUnsupported {
            sensor: "front_camera".to_string(),
        };
        assert!(err.to_string().contains("front_camera"));

        let err2 = NavError::Sensor {
            sensor: "sim".to_string(),
            details: "disconnected".to_string(),
        };
        assert!(err2.to_string().contains("disconnected"));
    }
}
