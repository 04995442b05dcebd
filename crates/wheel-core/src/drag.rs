//! Pointer tracking for drag-to-spin.
//!
//! The controller never reads platform geometry: screen points are turned
//! into angles by an injected `AngleSource`, and timestamps come from the
//! engine's clock.

use std::time::Duration;

use glam::DVec2;
use smallvec::SmallVec;

use crate::config::DragTuning;
use crate::constants::DRAG_HISTORY_INLINE;
use crate::geometry::wrap_signed_degrees;

/// Converts a screen-space point into an angle around the wheel center.
pub trait AngleSource {
    /// Degrees, clockwise from straight up.
    fn angle_to(&self, x: f64, y: f64) -> f64;
}

impl<F: Fn(f64, f64) -> f64> AngleSource for F {
    fn angle_to(&self, x: f64, y: f64) -> f64 {
        self(x, y)
    }
}

/// `atan2` around a fixed center, for screen spaces where y grows downward.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CenterAngle {
    pub center: DVec2,
}

impl CenterAngle {
    pub fn new(cx: f64, cy: f64) -> Self {
        Self {
            center: DVec2::new(cx, cy),
        }
    }
}

impl AngleSource for CenterAngle {
    fn angle_to(&self, x: f64, y: f64) -> f64 {
        let d = DVec2::new(x, y) - self.center;
        if d.length_squared() <= f64::EPSILON {
            return 0.0;
        }
        d.x.atan2(-d.y).to_degrees()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSample {
    /// Unwrapped pointer angle in degrees.
    pub angle: f64,
    pub at: Duration,
}

#[derive(Clone, Debug)]
pub struct DragController {
    tuning: DragTuning,
    active: bool,
    initial_offset: f64,
    last_raw: f64,
    unwrapped: f64,
    history: SmallVec<[DragSample; DRAG_HISTORY_INLINE]>,
}

impl DragController {
    pub fn new(tuning: DragTuning) -> Self {
        Self {
            tuning,
            active: false,
            initial_offset: 0.0,
            last_raw: 0.0,
            unwrapped: 0.0,
            history: SmallVec::new(),
        }
    }

    pub fn set_tuning(&mut self, tuning: DragTuning) {
        self.tuning = tuning;
        self.trim();
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn history(&self) -> &[DragSample] {
        &self.history
    }

    /// Grab the wheel at `angle` while it sits at `rotation`.
    pub fn begin(&mut self, angle: f64, rotation: f64, at: Duration) {
        self.active = true;
        self.initial_offset = angle - rotation;
        self.last_raw = angle;
        self.unwrapped = angle;
        self.history.clear();
        self.push(DragSample { angle, at });
    }

    /// Follow the pointer 1:1; returns the rotation the wheel should show.
    pub fn update(&mut self, angle: f64, at: Duration) -> Option<f64> {
        if !self.active {
            return None;
        }
        // atan2 jumps at ±180; accumulate the short way round instead
        self.unwrapped += wrap_signed_degrees(angle - self.last_raw);
        self.last_raw = angle;
        self.push(DragSample {
            angle: self.unwrapped,
            at,
        });
        Some(self.rotation())
    }

    pub fn rotation(&self) -> f64 {
        self.unwrapped - self.initial_offset
    }

    /// Let go at `at`; returns the release velocity in degrees per frame.
    pub fn release(&mut self, at: Duration) -> f64 {
        if !self.active {
            return 0.0;
        }
        // a pointer held still before release must read as slow
        self.push(DragSample {
            angle: self.unwrapped,
            at,
        });
        let v = self.velocity();
        self.active = false;
        self.history.clear();
        v
    }

    pub fn cancel(&mut self) {
        self.active = false;
        self.history.clear();
    }

    /// Δangle / Δtime across the whole history, normalised to frames.
    pub fn velocity(&self) -> f64 {
        let (Some(oldest), Some(newest)) = (self.history.first(), self.history.last()) else {
            return 0.0;
        };
        let dt = newest.at.saturating_sub(oldest.at).as_secs_f64();
        if dt <= 0.0 {
            return 0.0;
        }
        let deg_per_sec = (newest.angle - oldest.angle) / dt;
        deg_per_sec / self.tuning.frame_rate_basis
    }

    fn push(&mut self, sample: DragSample) {
        self.history.push(sample);
        self.trim();
    }

    fn trim(&mut self) {
        let depth = self.tuning.history_depth.max(2);
        if self.history.len() > depth {
            let excess = self.history.len() - depth;
            self.history.drain(0..excess);
        }
    }
}
