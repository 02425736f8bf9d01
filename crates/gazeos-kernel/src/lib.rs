//! `gazeos-kernel` – Command dispatch & rate control
//!
//! Decides what runs when a gaze gesture lands on a leaf, and how often
//! outward requests may be forwarded.
//!
//! # Modules
//!
//! - [`command_bus`] – [`CommandBus`][command_bus::CommandBus]:
//!   maps opaque event identifiers onto [`CommandHandler`]s and executes
//!   them against a caller-supplied context.  Unknown identifiers are a
//!   silent no-op.
//! - [`throttle`] – [`Throttle`][throttle::Throttle]:
//!   leading-edge rate limiter used to damp repeated go-back requests.

pub mod command_bus;
pub mod throttle;

pub use command_bus::{CommandBus, CommandHandler};
pub use throttle::Throttle;
