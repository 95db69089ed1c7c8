#![allow(clippy::float_cmp)]

use super::*;

fn lp(time: f64, price: f64) -> LogicalPoint {
    LogicalPoint::new(time, price)
}

// =============================================================
// LogicalPoint arithmetic
// =============================================================

#[test]
fn logical_point_add_and_sub_are_componentwise() {
    let a = lp(1.0, 10.0);
    let b = lp(3.0, 4.0);
    assert_eq!(a + b, lp(4.0, 14.0));
    assert_eq!(b - a, lp(2.0, -6.0));
}

#[test]
fn with_price_and_with_time_replace_one_axis() {
    let p = lp(5.0, 50.0);
    assert_eq!(p.with_price(7.0), lp(5.0, 7.0));
    assert_eq!(p.with_time(7.0), lp(7.0, 50.0));
}

#[test]
fn screen_distance_is_euclidean() {
    let a = ScreenPoint::new(0.0, 0.0);
    let b = ScreenPoint::new(3.0, 4.0);
    assert_eq!(a.distance(b), 5.0);
}

// =============================================================
// Tick rounding
// =============================================================

#[test]
fn round_to_tick_snaps_to_nearest_multiple() {
    assert!((round_to_tick(100.004, 0.01) - 100.0).abs() < 1e-9);
    assert!((round_to_tick(100.006, 0.01) - 100.01).abs() < 1e-9);
    assert_eq!(round_to_tick(7.4, 0.5), 7.5);
}

#[test]
fn round_to_tick_ignores_zero_tick() {
    assert_eq!(round_to_tick(1.2345, 0.0), 1.2345);
}

#[test]
fn round_to_tick_ignores_sub_epsilon_and_negative_tick() {
    assert_eq!(round_to_tick(1.2345, 1e-15), 1.2345);
    assert_eq!(round_to_tick(1.2345, -0.5), 1.2345);
    assert_eq!(round_to_tick(1.2345, f64::NAN), 1.2345);
}

// =============================================================
// Line
// =============================================================

#[test]
fn line_through_two_points_interpolates_price() {
    let line = Line::through(lp(0.0, 100.0), lp(10.0, 200.0)).unwrap();
    assert_eq!(line.price_at(5.0), 150.0);
    assert_eq!(line.price_at(20.0), 300.0);
}

#[test]
fn line_through_coincident_points_is_none() {
    assert!(Line::through(lp(3.0, 3.0), lp(3.0, 3.0)).is_none());
}

#[test]
fn line_through_vertical_points_is_none() {
    assert!(Line::through(lp(3.0, 1.0), lp(3.0, 9.0)).is_none());
}

// =============================================================
// Bounds / midpoint
// =============================================================

#[test]
fn bounds_of_empty_is_none() {
    assert!(Bounds::of(Vec::new()).is_none());
}

#[test]
fn bounds_cover_all_points() {
    let b = Bounds::of([lp(5.0, 1.0), lp(-2.0, 8.0), lp(3.0, -4.0)]).unwrap();
    assert_eq!(b.time_min, -2.0);
    assert_eq!(b.time_max, 5.0);
    assert_eq!(b.price_min, -4.0);
    assert_eq!(b.price_max, 8.0);
}

#[test]
fn midpoint_averages_both_axes() {
    assert_eq!(midpoint(lp(0.0, 100.0), lp(10.0, 200.0)), lp(5.0, 150.0));
}

#[test]
fn near_zero_threshold() {
    assert!(is_near_zero(1e-12));
    assert!(!is_near_zero(1e-3));
}
