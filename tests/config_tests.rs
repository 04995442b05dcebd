// Host-side tests for configuration defaults, JSON loading and validation.

use wheel_core::{
    ConfigError, DragTuning, Easing, ResetPolicy, Segment, SpinRange, WheelConfig,
    DEFAULT_JITTER_FACTOR, DEFAULT_SPIN_DURATION_SEC,
};

fn three() -> Vec<Segment> {
    vec![
        Segment::new("a", "A", "1"),
        Segment::new("b", "B", "2"),
        Segment::new("c", "C", "3"),
    ]
}

#[test]
fn minimal_json_takes_defaults() {
    let config: WheelConfig =
        serde_json::from_str(r#"{ "segments": [ { "id": "x" }, { "id": "y", "weight": 3 } ] }"#)
            .unwrap();
    assert_eq!(config.segments.len(), 2);
    assert_eq!(config.segments[0].weight, 1.0);
    assert_eq!(config.segments[1].weight, 3.0);
    assert_eq!(config.spin_range, SpinRange::default());
    assert_eq!(config.duration_secs, DEFAULT_SPIN_DURATION_SEC);
    assert_eq!(config.easing, Easing::EaseOut);
    assert!(config.allow_drag);
    assert_eq!(config.jitter_factor, DEFAULT_JITTER_FACTOR);
    assert_eq!(config.drag, DragTuning::default());
    assert_eq!(config.reset, ResetPolicy::default());
    assert_eq!(config.validate(), Ok(()));
}

#[test]
fn json_overrides_nested_fields() {
    let config: WheelConfig = serde_json::from_str(
        r#"{
            "segments": [ { "id": "x", "label": "X" } ],
            "easing": "ease-in-out",
            "allow_drag": false,
            "spin_range": { "min_rotations": 2, "max_rotations": 3 },
            "drag": { "velocity_threshold": 4.5 },
            "reset": { "enabled": false }
        }"#,
    )
    .unwrap();
    assert_eq!(config.easing, Easing::EaseInOut);
    assert!(!config.allow_drag);
    assert_eq!(config.spin_range, SpinRange { min_rotations: 2, max_rotations: 3 });
    assert_eq!(config.drag.velocity_threshold, 4.5);
    assert_eq!(config.drag.history_depth, DragTuning::default().history_depth);
    assert!(!config.reset.enabled);
    assert_eq!(config.reset.delay_secs, ResetPolicy::default().delay_secs);
}

#[test]
fn negative_weights_are_allowed_but_count_as_zero() {
    let config = WheelConfig::new(vec![
        Segment::new("a", "A", "").with_weight(-2.0),
        Segment::new("b", "B", ""),
    ]);
    assert_eq!(config.validate(), Ok(()));
    assert_eq!(config.segments[0].effective_weight(), 0.0);
}

#[test]
fn validation_names_the_broken_field() {
    let base = || WheelConfig::new(three());

    assert_eq!(WheelConfig::new(vec![]).validate(), Err(ConfigError::NoSegments));
    assert!(matches!(
        base().with_duration_secs(-1.0).validate(),
        Err(ConfigError::NonPositiveDuration(_))
    ));
    assert!(matches!(
        base().with_duration_secs(f64::NAN).validate(),
        Err(ConfigError::NonPositiveDuration(_))
    ));
    assert!(matches!(
        base().with_jitter_factor(-0.1).validate(),
        Err(ConfigError::InvalidJitterFactor(_))
    ));

    let mut infinite = three();
    infinite[1].weight = f64::INFINITY;
    assert_eq!(
        WheelConfig::new(infinite).validate(),
        Err(ConfigError::InvalidWeight { id: "b".into() })
    );

    let shallow = base().with_drag(DragTuning {
        history_depth: 1,
        ..DragTuning::default()
    });
    assert!(matches!(shallow.validate(), Err(ConfigError::InvalidDragTuning(_))));

    let no_basis = base().with_drag(DragTuning {
        frame_rate_basis: 0.0,
        ..DragTuning::default()
    });
    assert!(matches!(no_basis.validate(), Err(ConfigError::InvalidDragTuning(_))));

    let bad_reset = base().with_reset(ResetPolicy {
        delay_secs: -1.0,
        ..ResetPolicy::default()
    });
    assert!(matches!(bad_reset.validate(), Err(ConfigError::InvalidResetPolicy(_))));

    let mut bad_peg = base();
    bad_peg.peg_epsilon_deg = -1.0;
    assert!(matches!(bad_peg.validate(), Err(ConfigError::InvalidPegEpsilon(_))));
}

#[test]
fn durations_must_fit_in_a_duration() {
    let base = || WheelConfig::new(three());

    let forever = base().with_duration_secs(1e20);
    assert!(matches!(forever.validate(), Err(ConfigError::NonPositiveDuration(_))));
    assert!(matches!(
        base().with_duration_secs(f64::INFINITY).validate(),
        Err(ConfigError::NonPositiveDuration(_))
    ));

    let too_long = 1e20;
    for reset in [
        ResetPolicy {
            delay_secs: too_long,
            ..ResetPolicy::default()
        },
        ResetPolicy {
            duration_secs: too_long,
            ..ResetPolicy::default()
        },
        ResetPolicy {
            duration_secs: f64::NAN,
            ..ResetPolicy::default()
        },
    ] {
        let refused = base().with_reset(reset).validate();
        assert!(
            matches!(refused, Err(ConfigError::InvalidResetPolicy(_))),
            "{reset:?} accepted"
        );
    }

    // a zero-length reset snaps straight back
    let instant = base().with_reset(ResetPolicy {
        duration_secs: 0.0,
        ..ResetPolicy::default()
    });
    assert_eq!(instant.validate(), Ok(()));
    assert_eq!(base().with_duration_secs(2.5).duration().as_secs_f64(), 2.5);
}

#[test]
fn errors_read_well() {
    assert_eq!(
        ConfigError::InvalidSpinRange { min: 8, max: 5 }.to_string(),
        "spin range is inverted: min_rotations 8 > max_rotations 5"
    );
    assert_eq!(
        ConfigError::DuplicateSegmentId("gift".into()).to_string(),
        "segment id \"gift\" appears more than once"
    );
}
