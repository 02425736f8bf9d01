//! Sensor capture thread.
//!
//! [`spawn_capture`] starts a [`GazeSensor`] and moves it onto its own OS
//! thread, which polls readings and pushes them into the hand-off queue.
//! The thread stops when the feed ends, the sensor faults, the queue closes
//! or [`CaptureHandle::stop`] is called; it always pauses the sensor on the
//! way out.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;

use gazeos_hal::GazeSensor;
use gazeos_middleware::HandoffSender;
use gazeos_types::NavError;
use tracing::{debug, info, warn};

use crate::driver::SessionMessage;

/// Owner handle of a running capture thread.
#[derive(Debug)]
pub struct CaptureHandle {
    sensor_id: String,
    stop: Arc<AtomicBool>,
    thread: JoinHandle<Result<usize, NavError>>,
}

impl CaptureHandle {
    pub fn sensor_id(&self) -> &str {
        &self.sensor_id
    }

    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Ask the thread to stop and wait for it.
    ///
    /// Returns the number of readings forwarded.
    ///
    /// # Errors
    ///
    /// The sensor fault that ended capture, or [`NavError::Sensor`] when the
    /// thread panicked.
    pub fn stop(self) -> Result<usize, NavError> {
        self.stop.store(true, Ordering::SeqCst);
        self.join()
    }

    /// Wait for the feed to end on its own.
    ///
    /// # Errors
    ///
    /// See [`stop`][Self::stop].
    pub fn join(self) -> Result<usize, NavError> {
        let sensor = self.sensor_id;
        self.thread.join().map_err(|_| NavError::Sensor {
            sensor,
            details: "capture thread panicked".to_string(),
        })?
    }
}

/// Start `sensor`, announce it to the session and stream its readings.
///
/// # Errors
///
/// Whatever [`GazeSensor::start`] returns (the sensor is not moved to a
/// thread in that case), or [`NavError::Channel`] when the queue is closed.
pub fn spawn_capture(
    mut sensor: Box<dyn GazeSensor>,
    tx: HandoffSender<SessionMessage>,
) -> Result<CaptureHandle, NavError> {
    let info = sensor.info();
    sensor.start()?;
    if let Err(e) = tx.send(SessionMessage::Start(info.clone())) {
        sensor.pause();
        return Err(e);
    }

    let stop = Arc::new(AtomicBool::new(false));
    let flag = stop.clone();
    let sensor_id = info.id.clone();
    let thread = std::thread::Builder::new()
        .name(format!("gazeos-capture-{}", info.id))
        .spawn(move || capture_loop(sensor, &tx, &flag))
        .map_err(|e| NavError::Sensor {
            sensor: info.id.clone(),
            details: format!("cannot spawn capture thread: {e}"),
        })?;

    info!(sensor = %sensor_id, "capture started");
    Ok(CaptureHandle {
        sensor_id,
        stop,
        thread,
    })
}

fn capture_loop(
    mut sensor: Box<dyn GazeSensor>,
    tx: &HandoffSender<SessionMessage>,
    stop: &AtomicBool,
) -> Result<usize, NavError> {
    let mut forwarded = 0usize;
    let outcome = loop {
        if stop.load(Ordering::SeqCst) {
            break Ok(());
        }
        match sensor.next_reading() {
            Ok(Some(reading)) => {
                if tx.send(SessionMessage::Reading(reading)).is_err() {
                    debug!("hand-off closed; capture stopping");
                    break Ok(());
                }
                forwarded += 1;
            }
            Ok(None) => break Ok(()),
            Err(e) => {
                warn!(error = %e, "sensor fault; capture stopping");
                break Err(e);
            }
        }
    };
    sensor.pause();
    debug!(forwarded, "capture thread exiting");
    outcome.map(|()| forwarded)
}
