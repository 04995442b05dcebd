//! Where the wheel has to stop so the promised segment ends under the pointer.

use crate::config::SpinRange;
use crate::constants::{FULL_TURN_DEG, MAX_JITTER_FACTOR};
use crate::geometry::{normalize_degrees, SegmentGeometry};
use crate::rng::{unit_draw, RandomSource};

/// A computed landing, kept in parts so callers can inspect each term.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RotationTarget {
    pub index: usize,
    /// Rotation the animation starts from.
    pub start: f64,
    /// Forward rotation in `[0, 360)` that brings the segment center to the pointer.
    pub alignment: f64,
    pub extra_turns: u32,
    pub jitter: f64,
    /// Absolute final rotation.
    pub rotation: f64,
}

impl RotationTarget {
    /// Total distance the wheel travels.
    pub fn travel(&self) -> f64 {
        self.rotation - self.start
    }
}

/// Clamp the configured jitter factor into `[0, MAX_JITTER_FACTOR]`.
#[inline]
pub fn effective_jitter_factor(k: f64) -> f64 {
    if k.is_nan() {
        return 0.0;
    }
    k.clamp(0.0, MAX_JITTER_FACTOR)
}

/// Whole turns drawn uniformly from `min..=max`.
pub fn draw_extra_turns(range: SpinRange, rng: &mut dyn RandomSource) -> u32 {
    let SpinRange {
        min_rotations: min,
        max_rotations: max,
    } = range;
    let draw = unit_draw(rng);
    if max <= min {
        return min;
    }
    let span = f64::from(max - min + 1);
    let turns = min + (draw * span).floor() as u32;
    turns.min(max)
}

/// Offset from the segment center, strictly inside half a segment.
pub fn draw_jitter(segment_angle: f64, jitter_factor: f64, rng: &mut dyn RandomSource) -> f64 {
    let k = effective_jitter_factor(jitter_factor);
    (unit_draw(rng) - 0.5) * segment_angle * k
}

/// Target for a spin of segment `index` starting from rotation `start`.
///
/// For `start == 0` this is `(360 - center) + turns * 360 + jitter`. From any
/// other start the result is congruent to that modulo 360 and still moves
/// forward by at least the drawn whole turns. Draws turns, then jitter.
pub fn compute_target(
    geometry: &SegmentGeometry,
    index: usize,
    start: f64,
    range: SpinRange,
    jitter_factor: f64,
    rng: &mut dyn RandomSource,
) -> RotationTarget {
    let base = normalize_degrees(FULL_TURN_DEG - geometry.center_angle(index));
    let alignment = normalize_degrees(base - start);
    let extra_turns = draw_extra_turns(range, rng);
    let jitter = draw_jitter(geometry.segment_angle(), jitter_factor, rng);
    let rotation = start + alignment + f64::from(extra_turns) * FULL_TURN_DEG + jitter;
    RotationTarget {
        index,
        start,
        alignment,
        extra_turns,
        jitter,
        rotation,
    }
}
