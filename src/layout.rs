//! Pure drawing geometry: where the wheel sits on the canvas and how wheel
//! angles map to canvas radians. No DOM access, so it runs in host tests.

use std::borrow::Cow;

use glam::DVec2;

use crate::constants::*;

/// Wheel position within a canvas backing store, in canvas px.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WheelLayout {
    pub center: DVec2,
    pub radius: f64,
}

impl WheelLayout {
    /// Largest wheel that fits with room for the pointer above it.
    pub fn fit(width: f64, height: f64) -> Self {
        let w = width.max(1.0);
        let h = height.max(1.0);
        let half = w.min(h) / 2.0;
        // the pointer sticks out by part of its length above the rim
        let radius = (half * (1.0 - WHEEL_MARGIN_FRAC)).max(1.0);
        Self {
            center: DVec2::new(w / 2.0, h / 2.0),
            radius,
        }
    }

    pub fn hub_radius(&self) -> f64 {
        self.radius * HUB_RADIUS_FRAC
    }

    pub fn rim_width(&self) -> f64 {
        (self.radius * RIM_WIDTH_FRAC).max(1.0)
    }

    pub fn label_radius(&self) -> f64 {
        self.radius * LABEL_RADIUS_FRAC
    }

    pub fn label_font_px(&self) -> f64 {
        (self.radius * LABEL_FONT_FRAC).round().max(8.0)
    }

    /// Where the pointer's tip touches the wheel face.
    pub fn pointer_tip(&self) -> DVec2 {
        DVec2::new(self.center.x, self.center.y - self.radius + self.pointer_length() * 0.5)
    }

    pub fn pointer_length(&self) -> f64 {
        self.radius * POINTER_LENGTH_FRAC
    }

    pub fn pointer_half_width(&self) -> f64 {
        self.radius * POINTER_HALF_WIDTH_FRAC
    }
}

/// Canvas radians for a wheel-frame angle (degrees clockwise from 12
/// o'clock) once the wheel has turned by `rotation` degrees.
#[inline]
pub fn canvas_radians(angle_deg: f64, rotation_deg: f64) -> f64 {
    (angle_deg + rotation_deg - 90.0).to_radians()
}

/// Fill color for segment `index` of `count`.
///
/// Cycles the palette, except that the last wedge skips the color of the
/// first when the cycle would put them side by side.
pub fn segment_color(index: usize, count: usize) -> &'static str {
    let n = SEGMENT_PALETTE.len();
    let mut slot = index % n;
    if count > 1 && index == count - 1 && slot == 0 {
        slot = 1 % n;
    }
    SEGMENT_PALETTE[slot]
}

/// Exponential decay of the pointer kick over `dt_sec`.
#[inline]
pub fn decay_kick(kick: f64, dt_sec: f64) -> f64 {
    let dt = dt_sec.clamp(0.0, MAX_FRAME_DT_SEC);
    let k = kick * (-KICK_DECAY_PER_SEC * dt).exp();
    if k < KICK_FLOOR {
        0.0
    } else {
        k
    }
}

/// Pointer tilt for a kick in [0, 1]; negative leans against clockwise travel.
#[inline]
pub fn pointer_tilt_deg(kick: f64) -> f64 {
    -kick.clamp(0.0, 1.0) * POINTER_MAX_TILT_DEG
}

/// Shorten labels that would run off their wedge.
pub fn fit_label(label: &str) -> Cow<'_, str> {
    if label.chars().count() <= LABEL_MAX_CHARS {
        return Cow::Borrowed(label);
    }
    let mut s: String = label.chars().take(LABEL_MAX_CHARS - 1).collect();
    s.push('…');
    Cow::Owned(s)
}
