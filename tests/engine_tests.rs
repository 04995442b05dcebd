// Host-side tests for the spin state machine, driven by a manual clock.

use std::cell::RefCell;
use std::rc::Rc;

use wheel_core::{
    ConfigError, Easing, FnSource, FrameEvent, ManualClock, ResetPolicy, ScriptedSource, Segment,
    SpinEngine, SpinOutcome, SpinResult, SpinState, WheelConfig, WheelError,
};

const FRAME: f64 = 1.0 / 60.0;

fn prizes(n: usize) -> Vec<Segment> {
    (0..n)
        .map(|i| Segment::new(format!("p{i}"), format!("Prize {i}"), format!("V{i}")))
        .collect()
}

struct Rig {
    engine: SpinEngine,
    clock: ManualClock,
    results: Rc<RefCell<Vec<SpinResult>>>,
    frames: Rc<RefCell<Vec<FrameEvent>>>,
}

fn rig(config: WheelConfig, draws: &[f64]) -> Rig {
    let clock = ManualClock::new();
    let results: Rc<RefCell<Vec<SpinResult>>> = Rc::default();
    let frames: Rc<RefCell<Vec<FrameEvent>>> = Rc::default();
    let mut engine = SpinEngine::new(config)
        .unwrap()
        .with_clock(clock.clone())
        .with_rng(ScriptedSource::new(draws.to_vec()));
    let r = results.clone();
    engine.on_spin_complete(move |res| r.borrow_mut().push(res.clone()));
    let f = frames.clone();
    engine.on_frame(move |ev| f.borrow_mut().push(*ev));
    Rig {
        engine,
        clock,
        results,
        frames,
    }
}

impl Rig {
    fn run_until(&mut self, state: SpinState, max_frames: usize) {
        for _ in 0..max_frames {
            if self.engine.state() == state {
                return;
            }
            self.clock.advance_secs(FRAME);
            self.engine.tick();
        }
        panic!("never reached {:?}, stuck in {:?}", state, self.engine.state());
    }
}

#[test]
fn invalid_configs_are_refused() {
    assert_eq!(
        SpinEngine::new(WheelConfig::new(vec![])).err(),
        Some(ConfigError::NoSegments)
    );
    assert!(matches!(
        SpinEngine::new(WheelConfig::new(prizes(3)).with_duration_secs(0.0)).err(),
        Some(ConfigError::NonPositiveDuration(_))
    ));
    assert_eq!(
        SpinEngine::new(WheelConfig::new(prizes(3)).with_spin_range(9, 2)).err(),
        Some(ConfigError::InvalidSpinRange { min: 9, max: 2 })
    );
    let mut dup = prizes(3);
    dup[2].id = "p0".into();
    assert_eq!(
        SpinEngine::new(WheelConfig::new(dup)).err(),
        Some(ConfigError::DuplicateSegmentId("p0".into()))
    );
    // longer than a Duration can hold
    assert!(matches!(
        SpinEngine::new(WheelConfig::new(prizes(3)).with_duration_secs(1e20)).err(),
        Some(ConfigError::NonPositiveDuration(_))
    ));
    let endless_hold = WheelConfig::new(prizes(3)).with_reset(ResetPolicy {
        delay_secs: 1e20,
        ..ResetPolicy::default()
    });
    assert!(matches!(
        SpinEngine::new(endless_hold).err(),
        Some(ConfigError::InvalidResetPolicy(_))
    ));
}

#[test]
fn spin_lands_on_the_promised_segment() {
    let mut rig = rig(WheelConfig::new(prizes(5)), &[0.7, 0.4, 0.9]);
    let outcome = rig.engine.spin();
    let SpinOutcome::Started { index, target } = outcome else {
        panic!("spin did not start: {outcome:?}");
    };
    assert_eq!(rig.engine.state(), SpinState::Spinning);
    assert_eq!(rig.engine.pending_index(), Some(index));
    assert_eq!(rig.engine.target_rotation(), Some(target));

    rig.run_until(SpinState::Complete, 600);
    assert_eq!(rig.engine.rotation(), target);

    let results = rig.results.borrow();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].index, index);
    assert_eq!(results[0].segment.id, format!("p{index}"));
    assert_eq!(results[0].rotation, target);
    assert_eq!(rig.engine.geometry().landed_index(target), index);
    assert_eq!(rig.engine.last_result(), Some(&results[0]));
}

#[test]
fn scripted_four_segment_spin() {
    let config = WheelConfig::new(prizes(4)).with_spin_range(3, 3);
    let mut rig = rig(config, &[0.1, 0.5]);
    let outcome = rig.engine.spin();
    // draws: select 0.1 -> index 0, turns 0.5 -> 3, jitter wraps to 0.1
    let jitter = (0.1 - 0.5) * 90.0 * 0.3;
    assert_eq!(
        outcome,
        SpinOutcome::Started {
            index: 0,
            target: 1080.0 + jitter
        }
    );
    rig.run_until(SpinState::Complete, 600);
    assert_eq!(rig.results.borrow()[0].segment.id, "p0");
}

#[test]
fn second_spin_while_busy_is_ignored() {
    let mut rig = rig(WheelConfig::new(prizes(6)), &[0.2, 0.6, 0.3, 0.8]);
    let first = rig.engine.spin();
    assert!(first.is_started());
    let target = rig.engine.target_rotation();

    rig.clock.advance_secs(0.5);
    rig.engine.tick();
    assert_eq!(rig.engine.spin(), SpinOutcome::Busy(SpinState::Spinning));
    assert_eq!(rig.engine.target_rotation(), target);

    rig.run_until(SpinState::Complete, 600);
    assert_eq!(rig.engine.spin(), SpinOutcome::Busy(SpinState::Complete));
    assert_eq!(rig.results.borrow().len(), 1);
}

#[test]
fn rotation_never_runs_backwards_during_a_spin() {
    let mut rig = rig(WheelConfig::new(prizes(8)), &[0.33, 0.77, 0.05]);
    rig.engine.spin();
    rig.run_until(SpinState::Complete, 600);
    let frames = rig.frames.borrow();
    let spinning: Vec<f64> = frames
        .iter()
        .filter(|f| f.state == SpinState::Spinning)
        .map(|f| f.rotation)
        .collect();
    assert!(spinning.len() > 100);
    assert!(spinning.windows(2).all(|w| w[1] >= w[0]));
}

#[test]
fn wheel_eases_back_to_zero_after_the_hold() {
    let mut rig = rig(WheelConfig::new(prizes(4)), &[0.6, 0.2, 0.7]);
    rig.engine.spin();
    rig.run_until(SpinState::Complete, 600);
    let landed = rig.engine.rotation();

    // still holding
    rig.clock.advance_secs(1.0);
    assert!(rig.engine.tick().is_none());
    assert_eq!(rig.engine.rotation(), landed);

    rig.run_until(SpinState::Idle, 600);
    assert_eq!(rig.engine.rotation(), 0.0);
    assert_eq!(rig.engine.target_rotation(), None);
    assert_eq!(rig.results.borrow().len(), 1);

    // ready to go again
    assert!(rig.engine.spin().is_started());
}

#[test]
fn without_reset_the_wheel_rests_where_it_landed() {
    let config = WheelConfig::new(prizes(4)).with_reset(ResetPolicy {
        enabled: false,
        ..ResetPolicy::default()
    });
    let mut rig = rig(config, &[0.9, 0.4, 0.6]);
    let SpinOutcome::Started { index, .. } = rig.engine.spin() else {
        panic!("spin did not start");
    };
    rig.run_until(SpinState::Idle, 1200);
    let rotation = rig.engine.rotation();
    assert!((0.0..360.0).contains(&rotation));
    assert_eq!(rig.engine.geometry().landed_index(rotation), index);
}

#[test]
fn spins_make_peg_noise_without_moving_the_target() {
    let mut rig = rig(WheelConfig::new(prizes(12)), &[0.5, 0.5, 0.5]);
    let SpinOutcome::Started { target, .. } = rig.engine.spin() else {
        panic!("spin did not start");
    };
    rig.run_until(SpinState::Complete, 600);
    let bumps = rig
        .frames
        .borrow()
        .iter()
        .filter(|f| f.peg_bump && f.state == SpinState::Spinning)
        .count();
    assert!(bumps > 12, "only {bumps} bumps");
    assert_eq!(rig.results.borrow()[0].rotation, target);
}

#[test]
fn teardown_silences_everything() {
    let mut rig = rig(WheelConfig::new(prizes(4)), &[0.3, 0.3, 0.3]);
    rig.engine.spin();
    rig.clock.advance_secs(1.0);
    rig.engine.tick();
    let seen = rig.frames.borrow().len();

    rig.engine.teardown();
    rig.engine.teardown();
    assert!(!rig.engine.is_alive());
    rig.clock.advance_secs(10.0);
    assert!(rig.engine.tick().is_none());
    assert_eq!(rig.frames.borrow().len(), seen);
    assert!(rig.results.borrow().is_empty());
    assert_eq!(rig.engine.spin(), SpinOutcome::TornDown);
    assert!(!rig.engine.begin_drag(1.0, 1.0));
}

#[test]
fn reconfigure_only_while_idle() {
    let mut rig = rig(WheelConfig::new(prizes(4)), &[0.3, 0.3, 0.3]);
    rig.engine.spin();
    assert_eq!(
        rig.engine.reconfigure(WheelConfig::new(prizes(6))),
        Err(WheelError::Busy(SpinState::Spinning))
    );
    rig.run_until(SpinState::Idle, 1200);

    assert_eq!(
        rig.engine.reconfigure(WheelConfig::new(vec![])),
        Err(WheelError::Config(ConfigError::NoSegments))
    );
    assert_eq!(rig.engine.geometry().count(), 4);
    rig.engine.reconfigure(WheelConfig::new(prizes(6))).unwrap();
    assert_eq!(rig.engine.geometry().count(), 6);
}

#[test]
fn spin_with_uses_the_given_source() {
    let mut rig = rig(WheelConfig::new(prizes(4)), &[0.0]);
    let mut rng = ScriptedSource::new([0.8, 0.0, 0.5]);
    let outcome = rig.engine.spin_with(&mut rng);
    assert!(matches!(outcome, SpinOutcome::Started { index: 3, .. }));
    assert_eq!(rng.draws(), 3);
}

#[test]
fn closure_source_drives_the_draws() {
    let config = WheelConfig::new(prizes(4))
        .with_spin_range(2, 2)
        .with_easing(Easing::Linear);
    let clock = ManualClock::new();
    let mut engine = SpinEngine::new(config)
        .unwrap()
        .with_clock(clock.clone())
        .with_rng(FnSource(|| 0.1));

    // select 0.1 -> index 0, jitter draw 0.1 -> (0.1 - 0.5) * 90 * 0.3
    let target = 720.0 + (0.1 - 0.5) * 90.0 * 0.3;
    assert_eq!(engine.spin(), SpinOutcome::Started { index: 0, target });

    // linear easing: half the time, half the travel
    clock.advance_secs(2.0);
    let frame = engine.tick().unwrap();
    assert!((frame.rotation - target / 2.0).abs() < 1e-9);
}

#[test]
fn result_serializes_duration_as_seconds() {
    let mut rig = rig(WheelConfig::new(prizes(4)).with_duration_secs(2.5), &[0.1, 0.5]);
    rig.engine.spin();
    rig.run_until(SpinState::Complete, 600);
    let json = serde_json::to_value(&rig.results.borrow()[0]).unwrap();
    assert_eq!(json["duration_secs"], serde_json::json!(2.5));
    assert_eq!(json["segment"]["id"], "p0");
    assert!(json.get("duration").is_none());
}
