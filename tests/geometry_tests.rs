// Host-side tests for segment layout and angle wrapping.

use wheel_core::{normalize_degrees, wrap_signed_degrees, ConfigError, SegmentGeometry};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn normalize_wraps_into_half_open_turn() {
    assert!(approx(normalize_degrees(-30.0), 330.0));
    assert!(approx(normalize_degrees(720.0), 0.0));
    assert!(approx(normalize_degrees(725.5), 5.5));
    // tiny negatives must not come back as 360
    let a = normalize_degrees(-1e-20);
    assert!((0.0..360.0).contains(&a));
}

#[test]
fn wrap_signed_prefers_short_way_round() {
    assert!(approx(wrap_signed_degrees(270.0), -90.0));
    assert!(approx(wrap_signed_degrees(180.0), 180.0));
    assert!(approx(wrap_signed_degrees(-190.0), 170.0));
    assert!(approx(wrap_signed_degrees(1080.0 + 10.0), 10.0));
}

#[test]
fn zero_segments_are_rejected() {
    assert_eq!(SegmentGeometry::new(0), Err(ConfigError::NoSegments));
}

#[test]
fn segment_zero_is_centered_on_the_pointer() {
    let g = SegmentGeometry::new(4).unwrap();
    assert!(approx(g.segment_angle(), 90.0));
    assert!(approx(g.segment_offset(), -45.0));
    assert!(approx(g.start_angle(0), -45.0));
    assert!(approx(g.end_angle(0), 45.0));
    assert!(approx(g.center_angle(0), 0.0));
    assert!(approx(g.center_angle(1), 90.0));
    assert!(approx(g.center_angle(3), 270.0));
}

#[test]
fn segment_at_uses_half_open_bounds() {
    let g = SegmentGeometry::new(4).unwrap();
    assert_eq!(g.segment_at(0.0), 0);
    assert_eq!(g.segment_at(44.9), 0);
    assert_eq!(g.segment_at(45.0), 1);
    assert_eq!(g.segment_at(-45.0), 0);
    assert_eq!(g.segment_at(359.0), 0);
    assert_eq!(g.segment_at(315.0), 0);
    assert_eq!(g.segment_at(314.9), 3);
}

#[test]
fn landed_index_reads_the_segment_under_the_pointer() {
    let g = SegmentGeometry::new(4).unwrap();
    assert_eq!(g.landed_index(0.0), 0);
    // turning clockwise by 90 brings the segment at 270 to the top
    assert_eq!(g.landed_index(90.0), 3);
    assert_eq!(g.landed_index(180.0), 2);
    assert_eq!(g.landed_index(270.0), 1);
    assert_eq!(g.landed_index(360.0 * 5.0 + 270.0), 1);
}

#[test]
fn single_segment_covers_the_whole_wheel() {
    let g = SegmentGeometry::new(1).unwrap();
    for a in [0.0, 90.0, 179.9, 180.0, 359.9, -720.0] {
        assert_eq!(g.segment_at(a), 0);
    }
}

#[test]
fn segments_partition_the_circle() {
    for n in 1..=64 {
        let g = SegmentGeometry::new(n).unwrap();
        let total: f64 = (0..n).map(|i| g.end_angle(i) - g.start_angle(i)).sum();
        assert!((total - 360.0).abs() < 1e-9, "n={n} total={total}");
        for i in 0..n - 1 {
            assert!(approx(g.end_angle(i), g.start_angle(i + 1)), "gap after {i} of {n}");
        }
        assert!(approx(g.end_angle(n - 1) - 360.0, g.start_angle(0)), "n={n} does not close");
        // every center reads back as its own segment
        for i in 0..n {
            assert_eq!(g.segment_at(g.center_angle(i)), i, "n={n} i={i}");
        }
    }
}
