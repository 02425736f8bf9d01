//! `gazeos-perception` – Gaze signal conditioning and interpretation.
//!
//! Turns the noisy 2-D gaze point delivered by a capture collaborator into
//! the discrete inputs the navigation engine understands.
//!
//! # Modules
//!
//! - [`filter`] – [`EyeFilter`][filter::EyeFilter] and
//!   [`PointerFilter`][filter::PointerFilter]: per-axis exponential smoothing
//!   of the raw gaze point.
//! - [`interpreter`] – [`GazeInterpreter`][interpreter::GazeInterpreter]:
//!   maps a filtered point onto one of N horizontal bands and decodes the
//!   out-of-bounds sentinels into [`EyeAction`][gazeos_types::EyeAction]s.
//! - [`blink`] – [`BlinkAccumulator`][blink::BlinkAccumulator]: counts
//!   positive blink readings and decides when a `select` must be scheduled.

pub mod blink;
pub mod filter;
pub mod interpreter;

pub use blink::BlinkAccumulator;
pub use filter::{EyeFilter, PointerFilter};
pub use interpreter::{GazeInterpreter, action_for, section_for};
