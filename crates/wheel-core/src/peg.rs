//! Cosmetic pointer wobble as segment boundaries pass the fixed pointer.
//!
//! Everything here is read-only with respect to rotation: the signal is
//! derived from the current angle and is never fed back into the spin.
//!
//! Segment 0 is centered on the pointer, so boundaries sit under it when
//! `rotation ≡ segment_angle / 2 (mod segment_angle)`. Both functions shift
//! by that half segment before taking the remainder.

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PegFeedback {
    /// A boundary is under the pointer on this frame.
    pub bump: bool,
    /// How hard the pointer should deflect, 1 at a boundary down to 0 at epsilon.
    pub deflection: f64,
}

#[inline]
fn boundary_phase(rotation: f64, segment_angle: f64) -> f64 {
    rotation + segment_angle / 2.0
}

/// Feedback for `rotation`, given the segment angle and bump epsilon (degrees).
pub fn peg_feedback(rotation: f64, segment_angle: f64, epsilon: f64) -> PegFeedback {
    if segment_angle <= 0.0 || !segment_angle.is_finite() || !rotation.is_finite() {
        return PegFeedback::default();
    }
    let r = boundary_phase(rotation, segment_angle).rem_euclid(segment_angle);
    let distance = r.min(segment_angle - r).max(0.0);
    if epsilon <= 0.0 || distance >= epsilon {
        return PegFeedback::default();
    }
    PegFeedback {
        bump: true,
        deflection: 1.0 - distance / epsilon,
    }
}

/// True when a segment boundary lies between two frames' rotations.
///
/// Catches fast frames that step clean over the epsilon window.
pub fn boundary_crossed(previous: f64, current: f64, segment_angle: f64) -> bool {
    if segment_angle <= 0.0
        || !segment_angle.is_finite()
        || !previous.is_finite()
        || !current.is_finite()
    {
        return false;
    }
    let a = (boundary_phase(previous, segment_angle) / segment_angle).floor();
    let b = (boundary_phase(current, segment_angle) / segment_angle).floor();
    a != b
}
