//! The validated configuration a wheel is built from.
//!
//! Upstream configuration UI constructs a `WheelConfig` once; every field
//! except `segments` has a default from `constants`, applied by serde when
//! the config arrives as JSON and by `WheelConfig::new` in code.

use std::time::Duration;

use fnv::FnvHashSet;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::easing::Easing;
use crate::error::ConfigError;

/// One wedge of the wheel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub id: String,
    #[serde(default)]
    pub label: String,
    /// Opaque payload handed back to the caller on a win.
    #[serde(default)]
    pub value: String,
    #[serde(default = "default_weight")]
    pub weight: f64,
}

fn default_weight() -> f64 {
    DEFAULT_SEGMENT_WEIGHT
}

impl Segment {
    pub fn new(id: impl Into<String>, label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            value: value.into(),
            weight: DEFAULT_SEGMENT_WEIGHT,
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Weight as used for selection: negative and NaN weights count as 0.
    #[inline]
    pub fn effective_weight(&self) -> f64 {
        self.weight.max(0.0)
    }
}

/// Extra whole turns added to every spin, purely for show.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpinRange {
    pub min_rotations: u32,
    pub max_rotations: u32,
}

impl Default for SpinRange {
    fn default() -> Self {
        Self {
            min_rotations: DEFAULT_MIN_ROTATIONS,
            max_rotations: DEFAULT_MAX_ROTATIONS,
        }
    }
}

impl SpinRange {
    pub fn fixed(rotations: u32) -> Self {
        Self {
            min_rotations: rotations,
            max_rotations: rotations,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragTuning {
    /// Release speed (degrees per normalised frame) above which a drag flings.
    pub velocity_threshold: f64,
    /// Frames per second used to normalise release velocity.
    pub frame_rate_basis: f64,
    /// Samples kept for the release velocity estimate.
    pub history_depth: usize,
}

impl Default for DragTuning {
    fn default() -> Self {
        Self {
            velocity_threshold: DEFAULT_VELOCITY_THRESHOLD,
            frame_rate_basis: DEFAULT_FRAME_RATE_BASIS,
            history_depth: DEFAULT_DRAG_HISTORY_DEPTH,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResetPolicy {
    /// Ease the wheel back to 0 after the hold; otherwise it rests where it landed.
    pub enabled: bool,
    pub delay_secs: f64,
    pub duration_secs: f64,
}

impl Default for ResetPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            delay_secs: DEFAULT_RESET_DELAY_SEC,
            duration_secs: DEFAULT_RESET_DURATION_SEC,
        }
    }
}

impl ResetPolicy {
    pub fn delay(&self) -> Duration {
        secs_to_duration(self.delay_secs).unwrap_or_default()
    }

    pub fn duration(&self) -> Duration {
        secs_to_duration(self.duration_secs).unwrap_or_default()
    }
}

/// Seconds as a `Duration`, or `None` when negative, NaN or too large to hold.
fn secs_to_duration(secs: f64) -> Option<Duration> {
    Duration::try_from_secs_f64(secs).ok()
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WheelConfig {
    pub segments: Vec<Segment>,
    #[serde(default)]
    pub spin_range: SpinRange,
    #[serde(default = "default_duration_secs")]
    pub duration_secs: f64,
    #[serde(default)]
    pub easing: Easing,
    #[serde(default = "default_allow_drag")]
    pub allow_drag: bool,
    #[serde(default = "default_jitter_factor")]
    pub jitter_factor: f64,
    #[serde(default = "default_peg_epsilon")]
    pub peg_epsilon_deg: f64,
    #[serde(default)]
    pub drag: DragTuning,
    #[serde(default)]
    pub reset: ResetPolicy,
}

fn default_duration_secs() -> f64 {
    DEFAULT_SPIN_DURATION_SEC
}

fn default_allow_drag() -> bool {
    true
}

fn default_jitter_factor() -> f64 {
    DEFAULT_JITTER_FACTOR
}

fn default_peg_epsilon() -> f64 {
    DEFAULT_PEG_EPSILON_DEG
}

impl WheelConfig {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self {
            segments,
            spin_range: SpinRange::default(),
            duration_secs: DEFAULT_SPIN_DURATION_SEC,
            easing: Easing::default(),
            allow_drag: true,
            jitter_factor: DEFAULT_JITTER_FACTOR,
            peg_epsilon_deg: DEFAULT_PEG_EPSILON_DEG,
            drag: DragTuning::default(),
            reset: ResetPolicy::default(),
        }
    }

    pub fn with_spin_range(mut self, min_rotations: u32, max_rotations: u32) -> Self {
        self.spin_range = SpinRange {
            min_rotations,
            max_rotations,
        };
        self
    }

    pub fn with_duration_secs(mut self, secs: f64) -> Self {
        self.duration_secs = secs;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_allow_drag(mut self, allow: bool) -> Self {
        self.allow_drag = allow;
        self
    }

    pub fn with_jitter_factor(mut self, k: f64) -> Self {
        self.jitter_factor = k;
        self
    }

    pub fn with_drag(mut self, drag: DragTuning) -> Self {
        self.drag = drag;
        self
    }

    pub fn with_reset(mut self, reset: ResetPolicy) -> Self {
        self.reset = reset;
        self
    }

    /// Spin length; zero only for a config that failed validation.
    pub fn duration(&self) -> Duration {
        secs_to_duration(self.duration_secs).unwrap_or_default()
    }

    /// Check every contract the engine relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.segments.is_empty() {
            return Err(ConfigError::NoSegments);
        }
        if !(self.duration_secs > 0.0 && secs_to_duration(self.duration_secs).is_some()) {
            return Err(ConfigError::NonPositiveDuration(self.duration_secs));
        }
        let SpinRange {
            min_rotations,
            max_rotations,
        } = self.spin_range;
        if min_rotations > max_rotations {
            return Err(ConfigError::InvalidSpinRange {
                min: min_rotations,
                max: max_rotations,
            });
        }

        let mut seen = FnvHashSet::default();
        for seg in &self.segments {
            if !seen.insert(seg.id.as_str()) {
                return Err(ConfigError::DuplicateSegmentId(seg.id.clone()));
            }
            if seg.weight.is_infinite() {
                return Err(ConfigError::InvalidWeight { id: seg.id.clone() });
            }
        }

        if !(self.jitter_factor.is_finite() && self.jitter_factor >= 0.0) {
            return Err(ConfigError::InvalidJitterFactor(self.jitter_factor));
        }
        if !(self.peg_epsilon_deg.is_finite() && self.peg_epsilon_deg >= 0.0) {
            return Err(ConfigError::InvalidPegEpsilon(self.peg_epsilon_deg));
        }
        if !(self.drag.velocity_threshold.is_finite() && self.drag.velocity_threshold >= 0.0) {
            return Err(ConfigError::InvalidDragTuning(
                "velocity_threshold must be finite and non-negative",
            ));
        }
        if !(self.drag.frame_rate_basis.is_finite() && self.drag.frame_rate_basis > 0.0) {
            return Err(ConfigError::InvalidDragTuning(
                "frame_rate_basis must be positive",
            ));
        }
        if self.drag.history_depth < 2 {
            return Err(ConfigError::InvalidDragTuning(
                "history_depth needs at least two samples",
            ));
        }
        let reset = &self.reset;
        if secs_to_duration(reset.delay_secs).is_none() {
            return Err(ConfigError::InvalidResetPolicy(
                "delay_secs must be a non-negative number of seconds",
            ));
        }
        if secs_to_duration(reset.duration_secs).is_none() {
            return Err(ConfigError::InvalidResetPolicy(
                "duration_secs must be a non-negative number of seconds",
            ));
        }
        Ok(())
    }
}
