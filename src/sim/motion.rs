//! Fractional speed to whole-cell steps

use serde::{Deserialize, Serialize};

/// Carries unspent sub-cell motion between updates.
///
/// Each call yields at most one cell, so collision checks only ever have to
/// look one cell ahead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MotionAccumulator {
    carry: f32,
}

impl MotionAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `speed * dt` and return the step for this update (0 or 1)
    pub fn advance(&mut self, speed: f32, dt: f32) -> i32 {
        self.carry += speed * dt;
        if self.carry < 1.0 {
            return 0;
        }
        if self.carry >= 2.0 {
            // Too far behind: take one step and drop the rest
            self.carry = 0.0;
            return 1;
        }
        self.carry -= 1.0;
        1
    }

    pub fn reset(&mut self) {
        self.carry = 0.0;
    }

    #[inline]
    pub fn carry(&self) -> f32 {
        self.carry
    }
}
