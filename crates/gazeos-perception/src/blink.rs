//! [`BlinkAccumulator`] – blink gesture detector.
//!
//! A single closed-eye frame is not a gesture: sensors report blink scores
//! on every frame and involuntary blinks are common.  The accumulator counts
//! readings whose score is above a threshold and reports when the count
//! exceeds a frame limit.  Counting is cumulative; open-eye frames do not
//! reset it.
//!
//! Firing is two-phase.  [`record`][BlinkAccumulator::record] reports that a
//! `select` must be scheduled; the counter is only cleared when the scheduled
//! work runs [`complete`][BlinkAccumulator::complete].  Until then no second
//! dispatch is reported.
//!
//! # Example
//!
//! ```rust
//! use gazeos_perception::blink::BlinkAccumulator;
//!
//! let mut blinks = BlinkAccumulator::new(0.9, 2);
//!
//! assert!(!blinks.record(0.95));
//! assert!(!blinks.record(0.95));
//! assert!(blinks.record(0.95)); // third positive frame → schedule select
//! assert!(!blinks.record(0.95)); // already scheduled
//!
//! blinks.complete();
//! assert_eq!(blinks.count(), 0);
//! ```

/// Default score above which a frame counts as a positive blink.
pub const DEFAULT_SCORE_THRESHOLD: f32 = 0.9;

/// Default number of positive frames that must be exceeded.
pub const DEFAULT_FRAME_THRESHOLD: usize = 20;

#[derive(Debug, Clone)]
pub struct BlinkAccumulator {
    score_threshold: f32,
    frame_threshold: usize,
    count: usize,
    pending: bool,
}

impl BlinkAccumulator {
    pub fn new(score_threshold: f32, frame_threshold: usize) -> Self {
        Self {
            score_threshold,
            frame_threshold,
            count: 0,
            pending: false,
        }
    }

    /// Feed the blink score of one reading.
    ///
    /// Returns `true` exactly once per gesture: when the positive count first
    /// exceeds the frame threshold and no dispatch is already pending.
    pub fn record(&mut self, score: f32) -> bool {
        if score > self.score_threshold {
            self.count += 1;
        }
        if self.count > self.frame_threshold && !self.pending {
            self.pending = true;
            return true;
        }
        false
    }

    /// Mark the scheduled dispatch as done and clear the counter.
    pub fn complete(&mut self) {
        self.count = 0;
        self.pending = false;
    }

    /// Forget everything, including a pending dispatch.
    pub fn reset(&mut self) {
        self.complete();
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

impl Default for BlinkAccumulator {
    fn default() -> Self {
        Self::new(DEFAULT_SCORE_THRESHOLD, DEFAULT_FRAME_THRESHOLD)
    }
}
