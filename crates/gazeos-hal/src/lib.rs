//! `gazeos-hal` – Capture hardware boundary.
//!
//! Face/eye capture itself lives outside gazeos.  This crate fixes the shape
//! of what a capture driver hands over (one [`GazeReading`] per frame) and of
//! the on-screen pointer it may drive, and ships simulated drivers for tests
//! and headless runs.
//!
//! # Modules
//!
//! - [`sensor`] – [`GazeSensor`] trait, [`GazeReading`], [`SensorInfo`].
//! - [`pointer`] – [`PointerOverlay`] trait for the gaze pointer dot.
//! - [`sim`] – [`SimGazeSensor`][sim::SimGazeSensor] scripted sensor and
//!   [`SimPointer`][sim::SimPointer] recording overlay.

pub mod pointer;
pub mod sensor;
pub mod sim;

pub use pointer::{NoPointer, PointerOverlay};
pub use sensor::{GazeReading, GazeSensor, SensorInfo};
pub use sim::{SimGazeSensor, SimPointer};
