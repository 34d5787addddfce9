use approx::assert_relative_eq;
use chart_viewport::core::{Interval, pan_interval, zoom_factor_from_wheel_delta, zoom_interval};
use proptest::prelude::*;

#[test]
fn pan_moves_by_interval_widths() {
    let panned = pan_interval(Interval::new(10.0, 20.0), 0.5);
    assert_eq!(panned, Interval::new(15.0, 25.0));

    let back = pan_interval(Interval::new(10.0, 20.0), -1.0);
    assert_eq!(back, Interval::new(0.0, 10.0));
}

#[test]
fn zoom_keeps_the_anchor_fixed() {
    let zoomed = zoom_interval(Interval::new(0.0, 100.0), 0.5, 0.25);
    assert_relative_eq!(zoomed.min, 12.5);
    assert_relative_eq!(zoomed.max, 62.5);
}

#[test]
fn zoom_out_from_the_center() {
    let zoomed = zoom_interval(Interval::new(40.0, 60.0), 2.0, 0.5);
    assert_eq!(zoomed, Interval::new(30.0, 70.0));
}

#[test]
fn zero_width_intervals_stay_put() {
    let point = Interval::new(5.0, 5.0);
    assert_eq!(pan_interval(point, 3.0), point);
    assert_eq!(zoom_interval(point, 4.0, 0.5), point);
}

#[test]
fn wheel_factor_is_exponential() {
    assert_relative_eq!(zoom_factor_from_wheel_delta(0.0, 0.05), 1.0);
    assert_relative_eq!(zoom_factor_from_wheel_delta(-20.0, 0.05), std::f64::consts::E);
    assert!(zoom_factor_from_wheel_delta(100.0, 0.05) < 1.0);
    assert!(zoom_factor_from_wheel_delta(1e6, 0.05) >= 0.0);
}

proptest! {
    #[test]
    fn pan_round_trips_with_dyadic_values(
        min in -1_000i32..1_000,
        width in 1i32..1_000,
        units in -64i32..64
    ) {
        let interval = Interval::new(f64::from(min), f64::from(min + width));
        let logical = f64::from(units) / 8.0;
        let there_and_back = pan_interval(pan_interval(interval, logical), -logical);
        prop_assert_eq!(there_and_back, interval);
    }

    #[test]
    fn zoom_factor_one_is_identity(
        min in -1_000.0f64..1_000.0,
        width in 0.001f64..1_000.0,
        anchor in 0.0f64..=1.0
    ) {
        let interval = Interval::new(min, min + width);
        let zoomed = zoom_interval(interval, 1.0, anchor);
        prop_assert!((zoomed.min - interval.min).abs() <= 1e-9);
        prop_assert!((zoomed.max - interval.max).abs() <= 1e-9);
    }

    #[test]
    fn opposite_wheel_deltas_undo_each_other(
        min in -1_000.0f64..1_000.0,
        width in 0.001f64..1_000.0,
        delta in -100.0f64..100.0,
        anchor in 0.0f64..=1.0
    ) {
        let interval = Interval::new(min, min + width);
        let zoom_in = zoom_factor_from_wheel_delta(delta, 0.05);
        let zoom_out = zoom_factor_from_wheel_delta(-delta, 0.05);
        prop_assert!((zoom_in * zoom_out - 1.0).abs() <= 1e-12);

        let restored = zoom_interval(zoom_interval(interval, zoom_in, anchor), zoom_out, anchor);
        let tolerance = 1e-6 * (1.0 + min.abs() + width);
        prop_assert!((restored.min - interval.min).abs() <= tolerance);
        prop_assert!((restored.max - interval.max).abs() <= tolerance);
    }
}
