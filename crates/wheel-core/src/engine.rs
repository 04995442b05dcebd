//! The spin state machine.
//!
//! `SpinEngine` owns the wheel's rotation and the single in-flight spin.
//! A host drives it by calling `tick()` once per display refresh and by
//! forwarding taps and pointer drags. The winning segment is fixed before
//! the animation starts; frames only ever move toward the stored target.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::clock::{Clock, InstantClock};
use crate::config::{Segment, WheelConfig};
use crate::drag::{AngleSource, CenterAngle, DragController};
use crate::easing::Easing;
use crate::error::{ConfigError, WheelError};
use crate::geometry::{normalize_degrees, wrap_signed_degrees, SegmentGeometry};
use crate::peg::{boundary_crossed, peg_feedback};
use crate::rng::RandomSource;
use crate::selector::select_weighted;
use crate::target::{compute_target, RotationTarget};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpinState {
    Idle,
    Dragging,
    Spinning,
    Complete,
}

/// Handed to the result collaborator once per finished spin.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SpinResult {
    pub segment: Segment,
    pub index: usize,
    /// The target rotation the animation ended on.
    pub rotation: f64,
    /// Serialized as `duration_secs`, a float, for page listeners.
    #[serde(rename = "duration_secs", serialize_with = "serialize_secs")]
    pub duration: Duration,
}

fn serialize_secs<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(d.as_secs_f64())
}

/// What the rendering layer sees each frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameEvent {
    pub rotation: f64,
    pub peg_bump: bool,
    pub deflection: f64,
    pub state: SpinState,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SpinOutcome {
    Started { index: usize, target: f64 },
    /// A spin or drag is already in progress; nothing changed.
    Busy(SpinState),
    NoSegments,
    TornDown,
}

impl SpinOutcome {
    pub fn is_started(&self) -> bool {
        matches!(self, SpinOutcome::Started { .. })
    }
}

#[derive(Clone, Copy, Debug)]
struct SpinSession {
    target: RotationTarget,
    started_at: Duration,
    duration: Duration,
    easing: Easing,
}

#[derive(Clone, Copy, Debug)]
struct Settle {
    completed_at: Duration,
    // rotation the reset eases from, fixed once the hold delay has passed
    from: Option<f64>,
}

type FrameObserver = Box<dyn FnMut(&FrameEvent)>;
type CompleteObserver = Box<dyn FnMut(&SpinResult)>;

pub struct SpinEngine {
    config: WheelConfig,
    geometry: SegmentGeometry,
    state: SpinState,
    rotation: f64,
    last_frame_rotation: f64,
    session: Option<SpinSession>,
    settle: Option<Settle>,
    last_result: Option<SpinResult>,
    drag: DragController,
    rng: Box<dyn RandomSource>,
    clock: Box<dyn Clock>,
    angle_source: Box<dyn AngleSource>,
    frame_observer: Option<FrameObserver>,
    complete_observer: Option<CompleteObserver>,
    alive: bool,
}

impl SpinEngine {
    /// Build an engine; the config is validated here and nowhere else.
    pub fn new(config: WheelConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let geometry = SegmentGeometry::new(config.segments.len())?;
        let drag = DragController::new(config.drag);
        log::debug!(
            "[config] wheel with {} segments, {:.2}s {:?} spins",
            geometry.count(),
            config.duration_secs,
            config.easing
        );
        Ok(Self {
            config,
            geometry,
            state: SpinState::Idle,
            rotation: 0.0,
            last_frame_rotation: 0.0,
            session: None,
            settle: None,
            last_result: None,
            drag,
            rng: Box::new(StdRng::from_entropy()),
            clock: Box::new(InstantClock::new()),
            angle_source: Box::new(CenterAngle::default()),
            frame_observer: None,
            complete_observer: None,
            alive: true,
        })
    }

    pub fn with_rng(mut self, rng: impl RandomSource + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_angle_source(mut self, source: impl AngleSource + 'static) -> Self {
        self.angle_source = Box::new(source);
        self
    }

    /// Swap the angle source, e.g. after the canvas moved or resized.
    pub fn set_angle_source(&mut self, source: impl AngleSource + 'static) {
        self.angle_source = Box::new(source);
    }

    pub fn on_frame(&mut self, observer: impl FnMut(&FrameEvent) + 'static) {
        self.frame_observer = Some(Box::new(observer));
    }

    pub fn on_spin_complete(&mut self, observer: impl FnMut(&SpinResult) + 'static) {
        self.complete_observer = Some(Box::new(observer));
    }

    pub fn config(&self) -> &WheelConfig {
        &self.config
    }

    pub fn geometry(&self) -> &SegmentGeometry {
        &self.geometry
    }

    pub fn state(&self) -> SpinState {
        self.state
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Target of the current spin, held until the wheel is idle again.
    pub fn target_rotation(&self) -> Option<f64> {
        self.session.map(|s| s.target.rotation)
    }

    /// Segment promised by the current spin.
    pub fn pending_index(&self) -> Option<usize> {
        self.session.map(|s| s.target.index)
    }

    pub fn last_result(&self) -> Option<&SpinResult> {
        self.last_result.as_ref()
    }

    /// Replace the configuration; only allowed while idle.
    pub fn reconfigure(&mut self, config: WheelConfig) -> Result<(), WheelError> {
        if self.state != SpinState::Idle {
            return Err(WheelError::Busy(self.state));
        }
        config.validate()?;
        self.geometry = SegmentGeometry::new(config.segments.len())?;
        self.drag.set_tuning(config.drag);
        self.config = config;
        self.rotation = normalize_degrees(self.rotation);
        self.last_frame_rotation = self.rotation;
        log::debug!("[config] reconfigured, {} segments", self.geometry.count());
        Ok(())
    }

    /// Tap-to-spin with the engine's own random source.
    pub fn spin(&mut self) -> SpinOutcome {
        if let Some(refused) = self.refuse_spin() {
            return refused;
        }
        let plan = plan_spin(&self.config, &self.geometry, 0.0, self.rng.as_mut());
        self.start_session(plan)
    }

    /// Tap-to-spin drawing from `rng` instead of the engine's source.
    pub fn spin_with(&mut self, rng: &mut dyn RandomSource) -> SpinOutcome {
        if let Some(refused) = self.refuse_spin() {
            return refused;
        }
        let plan = plan_spin(&self.config, &self.geometry, 0.0, rng);
        self.start_session(plan)
    }

    fn refuse_spin(&self) -> Option<SpinOutcome> {
        if !self.alive {
            return Some(SpinOutcome::TornDown);
        }
        if self.state != SpinState::Idle {
            log::debug!("[spin] ignored, wheel is {:?}", self.state);
            return Some(SpinOutcome::Busy(self.state));
        }
        if self.config.segments.is_empty() {
            return Some(SpinOutcome::NoSegments);
        }
        None
    }

    fn start_session(&mut self, plan: Option<RotationTarget>) -> SpinOutcome {
        let Some(target) = plan else {
            return SpinOutcome::NoSegments;
        };
        self.session = Some(SpinSession {
            target,
            started_at: self.clock.now(),
            duration: self.config.duration(),
            easing: self.config.easing,
        });
        self.settle = None;
        self.state = SpinState::Spinning;
        self.rotation = target.start;
        self.last_frame_rotation = target.start;
        log::debug!(
            "[spin] start index={} from={:.2} target={:.2} turns={} jitter={:.2}",
            target.index,
            target.start,
            target.rotation,
            target.extra_turns,
            target.jitter
        );
        SpinOutcome::Started {
            index: target.index,
            target: target.rotation,
        }
    }

    /// Advance the animation to the clock's current time.
    pub fn tick(&mut self) -> Option<FrameEvent> {
        if !self.alive {
            return None;
        }
        let now = self.clock.now();
        match self.state {
            SpinState::Spinning => self.tick_spinning(now),
            SpinState::Complete => self.tick_settling(now),
            SpinState::Idle | SpinState::Dragging => None,
        }
    }

    fn tick_spinning(&mut self, now: Duration) -> Option<FrameEvent> {
        let session = self.session?;
        let elapsed = now.saturating_sub(session.started_at);
        let t = if session.duration.is_zero() {
            1.0
        } else {
            elapsed.as_secs_f64() / session.duration.as_secs_f64()
        };
        let done = t >= 1.0;
        self.rotation = if done {
            session.target.rotation
        } else {
            session.target.start + session.easing.apply(t) * session.target.travel()
        };
        let frame = self.emit_frame();
        if done {
            self.finish(session, now);
        }
        Some(frame)
    }

    fn finish(&mut self, session: SpinSession, now: Duration) {
        self.state = SpinState::Complete;
        self.settle = Some(Settle {
            completed_at: now,
            from: None,
        });
        let index = session.target.index;
        let result = SpinResult {
            segment: self.config.segments[index].clone(),
            index,
            rotation: session.target.rotation,
            duration: session.duration,
        };
        log::info!(
            "[spin] landed on {:?} ({}) at {:.2}",
            result.segment.id,
            result.segment.label,
            result.rotation
        );
        self.last_result = Some(result.clone());
        if self.alive {
            if let Some(observer) = self.complete_observer.as_mut() {
                observer(&result);
            }
        }
    }

    fn tick_settling(&mut self, now: Duration) -> Option<FrameEvent> {
        let mut settle = self.settle?;
        let reset = self.config.reset;
        let since = now.saturating_sub(settle.completed_at);
        let delay = reset.delay();
        if since < delay {
            return None;
        }
        if !reset.enabled {
            self.rotation = normalize_degrees(self.rotation);
            self.last_frame_rotation = self.rotation;
            let frame = self.emit_frame();
            self.go_idle();
            return Some(frame);
        }

        // same picture, smaller number: ease back the short way round
        let from = match settle.from {
            Some(from) => from,
            None => {
                let from = wrap_signed_degrees(self.rotation);
                self.rotation = from;
                self.last_frame_rotation = from;
                settle.from = Some(from);
                self.settle = Some(settle);
                from
            }
        };
        let reset_for = reset.duration();
        let t = if reset_for.is_zero() {
            1.0
        } else {
            (since - delay).as_secs_f64() / reset_for.as_secs_f64()
        };
        let done = t >= 1.0;
        self.rotation = if done {
            0.0
        } else {
            from * (1.0 - Easing::EaseInOut.apply(t))
        };
        let frame = self.emit_frame();
        if done {
            self.go_idle();
        }
        Some(frame)
    }

    fn go_idle(&mut self) {
        self.state = SpinState::Idle;
        self.session = None;
        self.settle = None;
        log::debug!("[spin] idle at {:.2}", self.rotation);
    }

    fn emit_frame(&mut self) -> FrameEvent {
        let seg = self.geometry.segment_angle();
        let peg = peg_feedback(self.rotation, seg, self.config.peg_epsilon_deg);
        let crossed = boundary_crossed(self.last_frame_rotation, self.rotation, seg);
        self.last_frame_rotation = self.rotation;
        let frame = FrameEvent {
            rotation: self.rotation,
            peg_bump: peg.bump || crossed,
            deflection: if peg.bump { peg.deflection } else if crossed { 1.0 } else { 0.0 },
            state: self.state,
        };
        if self.alive {
            if let Some(observer) = self.frame_observer.as_mut() {
                observer(&frame);
            }
        }
        frame
    }

    /// Grab the wheel at screen point `(x, y)`. Refused unless dragging is
    /// enabled and the wheel is idle.
    pub fn begin_drag(&mut self, x: f64, y: f64) -> bool {
        if !self.alive || !self.config.allow_drag || self.state != SpinState::Idle {
            return false;
        }
        let angle = self.angle_source.angle_to(x, y);
        self.drag.begin(angle, self.rotation, self.clock.now());
        self.state = SpinState::Dragging;
        self.last_frame_rotation = self.rotation;
        log::debug!("[drag] begin at {:.1}°", angle);
        true
    }

    /// Track the pointer; returns the new rotation while a drag is active.
    pub fn update_drag(&mut self, x: f64, y: f64) -> Option<f64> {
        if !self.alive || self.state != SpinState::Dragging {
            return None;
        }
        let angle = self.angle_source.angle_to(x, y);
        let rotation = self.drag.update(angle, self.clock.now())?;
        self.rotation = rotation;
        self.emit_frame();
        Some(rotation)
    }

    /// Release the pointer. Returns the release velocity (degrees per frame);
    /// above the threshold the wheel spins on from where it was let go.
    pub fn end_drag(&mut self) -> f64 {
        if !self.alive || self.state != SpinState::Dragging {
            return 0.0;
        }
        let velocity = self.drag.release(self.clock.now());
        if velocity.abs() > self.config.drag.velocity_threshold {
            log::debug!("[drag] fling at {:.2}°/frame", velocity);
            let plan = plan_spin(
                &self.config,
                &self.geometry,
                self.rotation,
                self.rng.as_mut(),
            );
            self.state = SpinState::Idle;
            self.start_session(plan);
        } else {
            log::debug!("[drag] released at {:.2}°/frame, staying put", velocity);
            self.state = SpinState::Idle;
        }
        velocity
    }

    /// Abandon a drag (pointer cancelled); the wheel stays where it was dragged.
    pub fn cancel_drag(&mut self) {
        if self.state == SpinState::Dragging {
            self.drag.cancel();
            self.state = SpinState::Idle;
            log::debug!("[drag] cancelled");
        }
    }

    /// Stop for good: drop the spin and observers so nothing fires against a
    /// host that has gone away.
    pub fn teardown(&mut self) {
        if !self.alive {
            return;
        }
        self.alive = false;
        self.session = None;
        self.settle = None;
        self.drag.cancel();
        self.state = SpinState::Idle;
        self.frame_observer = None;
        self.complete_observer = None;
        log::debug!("[spin] engine torn down");
    }
}

/// Select the winner, then compute where to stop, from rotation `start`.
fn plan_spin(
    config: &WheelConfig,
    geometry: &SegmentGeometry,
    start: f64,
    rng: &mut dyn RandomSource,
) -> Option<RotationTarget> {
    let index = select_weighted(&config.segments, rng)?;
    Some(compute_target(
        geometry,
        index,
        start,
        config.spin_range,
        config.jitter_factor,
        rng,
    ))
}
