//! Angular layout of segments around the wheel.
//!
//! Angles are degrees in the wheel's own frame. Angle 0 is the fixed pointer
//! at the top; positive angles run clockwise. Segment 0 is centered on the
//! pointer, so its edges sit half a segment either side of 0.

use crate::constants::FULL_TURN_DEG;
use crate::error::ConfigError;

/// Wrap any angle into `[0, 360)`.
#[inline]
pub fn normalize_degrees(angle: f64) -> f64 {
    let a = angle.rem_euclid(FULL_TURN_DEG);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if a >= FULL_TURN_DEG {
        0.0
    } else {
        a
    }
}

/// Wrap any angle into `(-180, 180]`.
#[inline]
pub fn wrap_signed_degrees(angle: f64) -> f64 {
    let a = normalize_degrees(angle);
    if a > FULL_TURN_DEG / 2.0 {
        a - FULL_TURN_DEG
    } else {
        a
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentGeometry {
    count: usize,
}

impl SegmentGeometry {
    pub fn new(count: usize) -> Result<Self, ConfigError> {
        if count == 0 {
            return Err(ConfigError::NoSegments);
        }
        Ok(Self { count })
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn segment_angle(&self) -> f64 {
        FULL_TURN_DEG / self.count as f64
    }

    pub fn segment_offset(&self) -> f64 {
        -self.segment_angle() / 2.0
    }

    pub fn start_angle(&self, index: usize) -> f64 {
        index as f64 * self.segment_angle() + self.segment_offset()
    }

    pub fn end_angle(&self, index: usize) -> f64 {
        self.start_angle(index) + self.segment_angle()
    }

    pub fn center_angle(&self, index: usize) -> f64 {
        self.start_angle(index) + self.segment_angle() / 2.0
    }

    /// Index of the segment whose bounds contain `angle` (wheel frame).
    pub fn segment_at(&self, angle: f64) -> usize {
        let seg = self.segment_angle();
        let shifted = normalize_degrees(angle - self.segment_offset());
        let index = (shifted / seg).floor() as usize;
        index.min(self.count - 1)
    }

    /// Segment under the fixed pointer once the wheel has turned clockwise by
    /// `rotation` degrees.
    pub fn landed_index(&self, rotation: f64) -> usize {
        self.segment_at(FULL_TURN_DEG - rotation)
    }
}
