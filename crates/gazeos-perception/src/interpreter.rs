//! Gaze Interpreter.
//!
//! Two independent mappings over the same filtered point:
//!
//! | Mapping | Input | Output |
//! |---|---|---|
//! | [`section_for`] | point, screen height, section count | band index |
//! | [`action_for`] | point | optional [`EyeAction`] |
//!
//! The screen is cut into `count` equal horizontal bands.  A point belongs to
//! the first band whose lower boundary lies strictly below it.  A point at or
//! past the bottom edge matches no band and falls back to band 0.
//!
//! `select` is never produced here: it only comes from the blink channel.

use gazeos_types::{EyeAction, Point, ScreenGeometry, SectionCounter};

/// Index of the horizontal band containing `point.y`.
///
/// A `count` of zero is treated as one band.
pub fn section_for(point: Point, screen_height: f64, count: usize) -> usize {
    let count = count.max(1);
    let band = screen_height / count as f64;
    (1..=count)
        .map(|k| k as f64 * band)
        .position(|boundary| point.y < boundary)
        .unwrap_or(0)
}

/// Decode the out-of-bounds sentinels carried by `point`.
///
/// `y < 0` means the user looked above the screen (`Deselect`) and wins over
/// `x < 0`, looking left of the screen (`Pop`).
pub fn action_for(point: Point) -> Option<EyeAction> {
    if point.y < 0.0 {
        return Some(EyeAction::Deselect);
    }
    if point.x < 0.0 {
        return Some(EyeAction::Pop);
    }
    None
}

/// Interpreter bound to a screen and to the live section count of the
/// navigation engine.
#[derive(Debug, Clone)]
pub struct GazeInterpreter {
    screen: ScreenGeometry,
    sections: SectionCounter,
}

impl GazeInterpreter {
    pub fn new(screen: ScreenGeometry, sections: SectionCounter) -> Self {
        Self { screen, sections }
    }

    /// Band index for `point` under the current section count.
    pub fn interpret_movement(&self, point: Point) -> usize {
        section_for(point, self.screen.height, self.sections.get())
    }

    pub fn interpret_action(&self, point: Point) -> Option<EyeAction> {
        action_for(point)
    }

    /// Overwrite the shared section count.
    pub fn set_section_count(&self, count: usize) {
        self.sections.set(count);
    }

    pub fn section_count(&self) -> usize {
        self.sections.get()
    }

    pub fn screen(&self) -> ScreenGeometry {
        self.screen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEIGHT: f64 = 800.0;

    #[test]
    fn single_section_always_zero() {
        assert_eq!(section_for(Point::new(0.0, 10.0), HEIGHT, 1), 0);
        assert_eq!(section_for(Point::new(0.0, 799.0), HEIGHT, 1), 0);
    }

    #[test]
    fn points_map_to_their_band() {
        for n in 1..=8usize {
            let band = HEIGHT / n as f64;
            for k in 0..n {
                let y = k as f64 * band + band / 2.0;
                assert_eq!(section_for(Point::new(50.0, y), HEIGHT, n), k, "n={n} k={k}");
            }
        }
    }

    #[test]
    fn band_start_belongs_to_that_band() {
        assert_eq!(section_for(Point::new(0.0, 200.0), HEIGHT, 4), 1);
        assert_eq!(section_for(Point::new(0.0, 199.999), HEIGHT, 4), 0);
    }

    #[test]
    fn bottom_edge_and_beyond_fall_back_to_zero() {
        assert_eq!(section_for(Point::new(0.0, HEIGHT), HEIGHT, 4), 0);
        assert_eq!(section_for(Point::new(0.0, HEIGHT + 250.0), HEIGHT, 4), 0);
    }

    #[test]
    fn zero_count_is_one_band() {
        assert_eq!(section_for(Point::new(0.0, 700.0), HEIGHT, 0), 0);
    }

    #[test]
    fn deselect_whenever_y_negative() {
        assert_eq!(action_for(Point::new(10.0, -1.0)), Some(EyeAction::Deselect));
        assert_eq!(action_for(Point::new(-10.0, -1.0)), Some(EyeAction::Deselect));
    }

    #[test]
    fn pop_when_x_negative_and_y_not() {
        assert_eq!(action_for(Point::new(-0.5, 0.0)), Some(EyeAction::Pop));
        assert_eq!(action_for(Point::new(-30.0, 400.0)), Some(EyeAction::Pop));
    }

    #[test]
    fn no_action_inside_screen() {
        assert_eq!(action_for(Point::new(0.0, 0.0)), None);
        assert_eq!(action_for(Point::new(200.0, 900.0)), None);
    }

    #[test]
    fn interpreter_tracks_shared_count() {
        let counter = SectionCounter::new(2);
        let interpreter = GazeInterpreter::new(ScreenGeometry::new(400.0, HEIGHT), counter.clone());
        let p = Point::new(10.0, 500.0);
        assert_eq!(interpreter.interpret_movement(p), 1);

        counter.set(4);
        assert_eq!(interpreter.interpret_movement(p), 2);

        interpreter.set_section_count(1);
        assert_eq!(counter.get(), 1);
        assert_eq!(interpreter.interpret_movement(p), 0);
    }
}
