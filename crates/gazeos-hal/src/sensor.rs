//! Generic `GazeSensor` trait and supporting types for gaze-capture hardware.

use gazeos_types::{NavError, Point};

/// One frame of gaze data, already projected onto screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GazeReading {
    /// Projected gaze point.  Negative coordinates are out-of-bounds
    /// sentinels (above / left of the screen).
    pub point: Point,
    /// Eye-closure score in `[0, 1]`; 1 means fully closed.
    pub blink_score: f32,
}

impl GazeReading {
    /// Open-eye reading at `(x, y)`.
    pub fn look(x: f64, y: f64) -> Self {
        Self {
            point: Point::new(x, y),
            blink_score: 0.0,
        }
    }

    /// Closed-eye reading at `(x, y)`.
    pub fn blink(x: f64, y: f64) -> Self {
        Self {
            point: Point::new(x, y),
            blink_score: 1.0,
        }
    }
}

/// Static description of a sensor, used to gate session start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorInfo {
    /// Stable identifier, e.g. `"front_truedepth"`.
    pub id: String,
    /// Device model string recorded in session metadata.
    pub model: String,
    /// Whether the hardware can track gaze at all.
    pub supported: bool,
}

/// A gaze-capture device.
///
/// Drivers are moved onto a capture thread and polled there; see
/// `gazeos_runtime::capture`.
pub trait GazeSensor: Send {
    fn info(&self) -> SensorInfo;

    /// Begin capturing.
    ///
    /// # Errors
    ///
    /// [`NavError::TrackingUnsupported`] when the hardware cannot track gaze,
    /// [`NavError::Sensor`] for any other start failure.
    fn start(&mut self) -> Result<(), NavError>;

    /// Stop capturing.  Must be safe to call when not started.
    fn pause(&mut self);

    /// Next frame, or `Ok(None)` when the feed has ended.
    ///
    /// # Errors
    ///
    /// [`NavError::Sensor`] if the frame cannot be captured.
    fn next_reading(&mut self) -> Result<Option<GazeReading>, NavError>;
}
