//! Gaze Smoothing Filter.
//!
//! Raw gaze projections jitter by tens of points between frames.  Each axis
//! is stabilised independently with an exponential moving average:
//!
//! ```text
//! position' = c * position + (1 − c) * sample
//! ```
//!
//! where `c ∈ (0, 1)` is the smoothing coefficient.  Higher values trust the
//! accumulated position more and react more slowly to new samples.  The
//! bounds are open: `c = 1` would freeze the pointer on its first sample.
//!
//! # Example
//!
//! ```rust
//! use gazeos_perception::filter::PointerFilter;
//! use gazeos_types::Point;
//!
//! let mut filter = PointerFilter::new(0.5);
//!
//! // First sample seeds the filter and passes straight through.
//! assert_eq!(filter.filter(Point::new(100.0, 200.0)), Point::new(100.0, 200.0));
//!
//! // Later samples are blended with the running position.
//! let p = filter.filter(Point::new(200.0, 200.0));
//! assert!((p.x - 150.0).abs() < 1e-9);
//! ```

use gazeos_types::Point;

/// Keep `coefficient` strictly inside `(0, 1)`.  NaN falls back to the
/// lower bound (raw samples).
fn open_unit(coefficient: f64) -> f64 {
    const MIN: f64 = f64::EPSILON;
    const MAX: f64 = 1.0 - f64::EPSILON;
    if coefficient.is_nan() {
        return MIN;
    }
    coefficient.clamp(MIN, MAX)
}

// ────────────────────────────────────────────────────────────────────────────
// EyeFilter
// ────────────────────────────────────────────────────────────────────────────

/// Exponential smoothing of a single scalar coordinate stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EyeFilter {
    position: f64,
    coefficient: f64,
}

impl EyeFilter {
    /// Create a filter seeded at `position`.
    ///
    /// `coefficient` is clamped into `(0, 1)` and never changes afterwards.
    pub fn new(position: f64, coefficient: f64) -> Self {
        Self {
            position,
            coefficient: open_unit(coefficient),
        }
    }

    /// Blend `sample` into the running position and return the new position.
    pub fn filter(&mut self, sample: f64) -> f64 {
        self.position = self.coefficient * self.position + (1.0 - self.coefficient) * sample;
        self.position
    }

    /// Current smoothed position.
    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn coefficient(&self) -> f64 {
        self.coefficient
    }
}

// ────────────────────────────────────────────────────────────────────────────
// PointerFilter
// ────────────────────────────────────────────────────────────────────────────

/// Two uncoupled [`EyeFilter`]s, one per axis, created lazily on the first
/// sample of a tracking session.
#[derive(Debug, Clone)]
pub struct PointerFilter {
    coefficient: f64,
    axes: Option<(EyeFilter, EyeFilter)>,
}

impl PointerFilter {
    pub fn new(coefficient: f64) -> Self {
        Self {
            coefficient: open_unit(coefficient),
            axes: None,
        }
    }

    /// Filter one gaze point.
    ///
    /// The first point after construction or [`reset`][Self::reset] seeds
    /// both axes and is returned unchanged.
    pub fn filter(&mut self, sample: Point) -> Point {
        match &mut self.axes {
            Some((x, y)) => Point::new(x.filter(sample.x), y.filter(sample.y)),
            None => {
                self.axes = Some((
                    EyeFilter::new(sample.x, self.coefficient),
                    EyeFilter::new(sample.y, self.coefficient),
                ));
                sample
            }
        }
    }

    /// Current smoothed point, `None` before the first sample.
    pub fn position(&self) -> Option<Point> {
        self.axes
            .as_ref()
            .map(|(x, y)| Point::new(x.position(), y.position()))
    }

    /// Drop all smoothing state; the next sample starts cold.
    pub fn reset(&mut self) {
        self.axes = None;
    }

    pub fn is_seeded(&self) -> bool {
        self.axes.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eye_filter_applies_convex_combination() {
        let mut f = EyeFilter::new(10.0, 0.85);
        let out = f.filter(20.0);
        assert!((out - (0.85 * 10.0 + 0.15 * 20.0)).abs() < 1e-9);
        assert!((f.position() - out).abs() < 1e-9);
    }

    #[test]
    fn coefficient_stays_inside_open_unit_interval() {
        for c in [-0.5, 0.0, 1.0, 3.0, f64::INFINITY, f64::NAN] {
            let k = EyeFilter::new(0.0, c).coefficient();
            assert!(k > 0.0 && k < 1.0, "{c} stored as {k}");
        }
    }

    #[test]
    fn saturated_coefficient_still_follows_the_gaze() {
        for c in [1.0, 5.0] {
            let mut filter = PointerFilter::new(c);
            filter.filter(Point::new(0.0, 0.0));
            let mut p = Point::new(0.0, 0.0);
            for _ in 0..1000 {
                p = filter.filter(Point::new(400.0, 800.0));
            }
            assert!(p.x > 0.0 && p.y > 0.0, "pointer frozen at {p:?} for {c}");
        }
    }

    #[test]
    fn first_sample_passes_through() {
        for c in [0.1, 0.5, 0.85, 0.99] {
            let mut filter = PointerFilter::new(c);
            let first = Point::new(123.0, -7.5);
            assert_eq!(filter.filter(first), first);
        }
    }

    #[test]
    fn output_stays_between_previous_and_sample() {
        let samples = [0.0, 300.0, -40.0, 812.0, 812.0, 5.0, 640.0];
        for c in [0.2, 0.5, 0.85] {
            let mut filter = PointerFilter::new(c);
            let mut prev = filter.filter(Point::new(samples[0], samples[0]));
            for &s in &samples[1..] {
                let out = filter.filter(Point::new(s, s));
                let (lo, hi) = if prev.y <= s { (prev.y, s) } else { (s, prev.y) };
                assert!(out.y >= lo - 1e-9 && out.y <= hi + 1e-9);
                prev = out;
            }
        }
    }

    #[test]
    fn axes_are_independent() {
        let mut filter = PointerFilter::new(0.5);
        filter.filter(Point::new(0.0, 0.0));
        let p = filter.filter(Point::new(100.0, 0.0));
        assert!((p.x - 50.0).abs() < 1e-9);
        assert!(p.y.abs() < 1e-9);
    }

    #[test]
    fn order_of_samples_matters() {
        let mut a = PointerFilter::new(0.5);
        a.filter(Point::new(0.0, 0.0));
        a.filter(Point::new(100.0, 0.0));
        let pa = a.filter(Point::new(0.0, 0.0));

        let mut b = PointerFilter::new(0.5);
        b.filter(Point::new(0.0, 0.0));
        b.filter(Point::new(0.0, 0.0));
        let pb = b.filter(Point::new(100.0, 0.0));

        assert!((pa.x - pb.x).abs() > 1.0);
    }

    #[test]
    fn reset_starts_cold() {
        let mut filter = PointerFilter::new(0.85);
        filter.filter(Point::new(10.0, 10.0));
        filter.filter(Point::new(500.0, 500.0));
        assert!(filter.is_seeded());

        filter.reset();
        assert!(filter.position().is_none());
        let p = Point::new(42.0, 24.0);
        assert_eq!(filter.filter(p), p);
    }
}
