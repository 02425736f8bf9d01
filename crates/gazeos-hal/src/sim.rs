//! In-process simulation drivers for CI/CD testing without capture hardware.
//!
//! [`SimGazeSensor`] replays a scripted list of readings; [`SimPointer`]
//! records what the runtime asked the pointer to do.
//!
//! # Example
//!
//! ```rust
//! use gazeos_hal::{GazeSensor, SimGazeSensor};
//!
//! let mut sensor = SimGazeSensor::new("sim")
//!     .look(100.0, 200.0)
//!     .blink_for(100.0, 200.0, 3);
//!
//! sensor.start().expect("sim start must succeed");
//! let mut frames = 0;
//! while let Some(_reading) = sensor.next_reading().unwrap() {
//!     frames += 1;
//! }
//! assert_eq!(frames, 4);
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use gazeos_types::{NavError, Point};
use tracing::debug;

use crate::pointer::PointerOverlay;
use crate::sensor::{GazeReading, GazeSensor, SensorInfo};

// ────────────────────────────────────────────────────────────────────────────
// Scripted sensor
// ────────────────────────────────────────────────────────────────────────────

/// A simulated gaze sensor that replays a fixed script of readings.
#[derive(Debug, Clone)]
pub struct SimGazeSensor {
    id: String,
    supported: bool,
    running: bool,
    script: VecDeque<GazeReading>,
}

impl SimGazeSensor {
    /// A supported sensor with an empty script.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            supported: true,
            running: false,
            script: VecDeque::new(),
        }
    }

    /// Mark the sensor as lacking gaze-tracking support.
    pub fn unsupported(mut self) -> Self {
        self.supported = false;
        self
    }

    /// Append one open-eye reading.
    pub fn look(mut self, x: f64, y: f64) -> Self {
        self.script.push_back(GazeReading::look(x, y));
        self
    }

    /// Append `frames` closed-eye readings at `(x, y)`.
    pub fn blink_for(mut self, x: f64, y: f64, frames: usize) -> Self {
        self.script
            .extend(std::iter::repeat_n(GazeReading::blink(x, y), frames));
        self
    }

    /// Append arbitrary readings.
    pub fn with_readings(mut self, readings: impl IntoIterator<Item = GazeReading>) -> Self {
        self.script.extend(readings);
        self
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

impl GazeSensor for SimGazeSensor {
    fn info(&self) -> SensorInfo {
        SensorInfo {
            id: self.id.clone(),
            model: "sim".to_string(),
            supported: self.supported,
        }
    }

    fn start(&mut self) -> Result<(), NavError> {
        if !self.supported {
            return Err(NavError::TrackingUnsupported {
                sensor: self.id.clone(),
            });
        }
        debug!(sensor = %self.id, frames = self.script.len(), "sim sensor started");
        self.running = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.running = false;
    }

    fn next_reading(&mut self) -> Result<Option<GazeReading>, NavError> {
        if !self.running {
            return Err(NavError::Sensor {
                sensor: self.id.clone(),
                details: "sensor is not running".to_string(),
            });
        }
        Ok(self.script.pop_front())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Recording pointer
// ────────────────────────────────────────────────────────────────────────────

/// Snapshot of what a [`SimPointer`] was asked to do.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointerTrace {
    pub visible: bool,
    pub positions: Vec<Point>,
}

/// Pointer overlay that records calls.  Clones share the same trace, so a
/// test can keep one clone while the runtime owns another.
#[derive(Debug, Clone, Default)]
pub struct SimPointer {
    trace: Arc<Mutex<PointerTrace>>,
}

impl SimPointer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trace(&self) -> PointerTrace {
        self.trace
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn update(&self, f: impl FnOnce(&mut PointerTrace)) {
        f(&mut self.trace.lock().unwrap_or_else(PoisonError::into_inner));
    }
}

impl PointerOverlay for SimPointer {
    fn show(&mut self) {
        self.update(|t| t.visible = true);
    }

    fn hide(&mut self) {
        self.update(|t| t.visible = false);
    }

    fn move_to(&mut self, point: Point) {
        self.update(|t| t.positions.push(point));
    }
}
