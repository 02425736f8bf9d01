//! On-screen gaze pointer.

use gazeos_types::Point;

/// The dot that follows the filtered gaze point.
pub trait PointerOverlay: Send {
    fn show(&mut self);
    fn hide(&mut self);
    fn move_to(&mut self, point: Point);
}

/// Overlay for hosts that draw no pointer.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPointer;

impl PointerOverlay for NoPointer {
    fn show(&mut self) {}
    fn hide(&mut self) {}
    fn move_to(&mut self, _point: Point) {}
}
