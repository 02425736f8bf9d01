//! `gazeos-runtime` – Navigation engine and tracking session.
//!
//! Turns filtered gaze points into hierarchical navigation over a region
//! tree.
//!
//! # Modules
//!
//! - [`engine`] – [`NavigationEngine`][engine::NavigationEngine]: the
//!   depth-path state machine.  Interprets `(section, action)` pairs,
//!   descends into branches, fires leaf commands through the
//!   [`CommandBus`][gazeos_kernel::CommandBus] and redraws focus after every
//!   transition.
//! - [`host`] – [`NavigationHost`][host::NavigationHost]: where go-back
//!   requests go.  [`ThrottledHost`][host::ThrottledHost] rate-limits them,
//!   [`BusNavigationHost`][host::BusNavigationHost] publishes them.
//! - [`adapter`] – [`GazeAdapter`][adapter::GazeAdapter]: binds the gaze
//!   interpreter to the engine's live section count.
//! - [`session`] – [`TrackingSession`][session::TrackingSession]: session
//!   lifecycle, mirroring, smoothing, pointer overlay and blink detection.
//! - [`driver`] – [`SessionDriver`][driver::SessionDriver]: async single
//!   consumer of the capture hand-off queue.
//! - [`capture`] – [`spawn_capture`][capture::spawn_capture]: runs a
//!   [`GazeSensor`][gazeos_hal::GazeSensor] on its own thread.
//! - [`telemetry`] – [`init_tracing`][telemetry::init_tracing]: `tracing`
//!   subscriber with an optional OTLP span exporter.

pub mod adapter;
pub mod capture;
pub mod driver;
pub mod engine;
pub mod host;
pub mod session;
pub mod telemetry;

pub use adapter::GazeAdapter;
pub use capture::{CaptureHandle, spawn_capture};
pub use driver::{NavigationSnapshot, SessionDriver, SessionMessage};
pub use engine::{Commands, ContextRequest, NavigationContext, NavigationEngine};
pub use host::{BusNavigationHost, DEFAULT_GO_BACK_WINDOW, NavigationHost, ThrottledHost};
pub use session::{TrackerConfig, TrackingSession};
pub use telemetry::{TracerProviderGuard, init_tracing};
