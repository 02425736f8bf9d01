//! `gazeos-middleware` – Signal routing
//!
//! Moves data between the capture side, the navigation runtime and the host
//! application without caring about its meaning.
//!
//! # Modules
//!
//! - [`bus`] – Topic-based publish/subscribe [`EventBus`] for outbound
//!   [`NavEvent`][gazeos_types::NavEvent]s, built on Tokio broadcast channels.
//! - [`handoff`] – Single-consumer queue that carries sensor readings from a
//!   capture thread to the thread that owns the navigation engine.

pub mod bus;
pub mod handoff;

pub use bus::{EventBus, Topic, TopicReceiver};
pub use handoff::{HandoffReceiver, HandoffSender, handoff};
