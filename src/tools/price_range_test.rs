#![allow(clippy::float_cmp)]

use serde_json::json;

use super::*;
use crate::config::EngineConfig;
use crate::mapper::LinearMapper;

// =============================================================
// Helpers
// =============================================================

fn lp(time: f64, price: f64) -> LogicalPoint {
    LogicalPoint::new(time, price)
}

fn range() -> PointStore {
    PointStore::from_points(PointsCount::Fixed(2), vec![lp(0.0, 100.0), lp(10.0, 200.0)])
}

fn run<R>(f: impl FnOnce(&RuleContext<'_>) -> R) -> R {
    let mapper = LinearMapper::new(800.0, 600.0);
    let options = json!({});
    let config = EngineConfig::default();
    f(&RuleContext { mapper: &mapper, options: &options, config: &config })
}

fn drag(store: &mut PointStore, index: usize, to: LogicalPoint) {
    run(|ctx| (RULES.set_point)(store, &mut ToolState::default(), index, to, ctx));
}

// =============================================================
// Anchors
// =============================================================

#[test]
fn derived_corners_and_midpoints() {
    let s = range();
    let all: Vec<_> = (0..8).filter_map(|i| run(|ctx| RULES.resolve(&s, i, ctx))).collect();
    assert_eq!(
        all,
        vec![
            lp(0.0, 100.0),
            lp(10.0, 200.0),
            lp(0.0, 200.0),
            lp(10.0, 100.0),
            lp(5.0, 100.0),
            lp(5.0, 200.0),
            lp(0.0, 150.0),
            lp(10.0, 150.0),
        ]
    );
}

// =============================================================
// Edits
// =============================================================

#[test]
fn derived_corner_writes_mixed_update() {
    let mut s = range();
    drag(&mut s, 2, lp(-5.0, 250.0));
    assert_eq!(s.as_slice(), &[lp(-5.0, 100.0), lp(10.0, 250.0)]);
    let mut s = range();
    drag(&mut s, 3, lp(20.0, 50.0));
    assert_eq!(s.as_slice(), &[lp(0.0, 50.0), lp(20.0, 200.0)]);
}

#[test]
fn edge_midpoints_change_one_axis_of_one_point() {
    let cases = [
        (4, lp(0.0, 90.0), [lp(0.0, 90.0), lp(10.0, 200.0)]),
        (5, lp(0.0, 210.0), [lp(0.0, 100.0), lp(10.0, 210.0)]),
        (6, lp(-3.0, 0.0), [lp(-3.0, 100.0), lp(10.0, 200.0)]),
        (7, lp(13.0, 0.0), [lp(0.0, 100.0), lp(13.0, 200.0)]),
    ];
    for (index, to, want) in cases {
        let mut s = range();
        drag(&mut s, index, to);
        assert_eq!(s.as_slice(), &want, "anchor {index}");
    }
}

#[test]
fn corners_may_cross_and_are_not_resorted() {
    let mut s = range();
    drag(&mut s, 0, lp(20.0, 300.0));
    (RULES.normalize)(&mut s, &mut ToolState::default());
    assert_eq!(s.as_slice(), &[lp(20.0, 300.0), lp(10.0, 200.0)]);
}

#[test]
fn unknown_index_is_ignored() {
    let mut s = range();
    drag(&mut s, 9, lp(1.0, 1.0));
    assert_eq!(s.as_slice(), range().as_slice());
}

// =============================================================
// Locks, stats
// =============================================================

#[test]
fn edge_handles_are_pre_locked() {
    assert!(matches!(lock_rule(4, InteractionPhase::Editing), LockRule::Axis { axis: LockedAxis::Time, .. }));
    assert!(matches!(lock_rule(7, InteractionPhase::Editing), LockRule::Axis { axis: LockedAxis::Price, .. }));
    assert_eq!(lock_rule(2, InteractionPhase::Editing), LockRule::Corner { opposing: 3 });
}

#[test]
fn stats_read_out() {
    let got = stats(&[lp(0.0, 100.0), lp(10.0, 110.0)], 0.5);
    assert_eq!(got, Some(RangeStats { price_delta: 10.0, percent: Some(10.0), ticks: Some(20.0) }));
}

#[test]
fn stats_guards_zero_base_and_tick() {
    let got = stats(&[lp(0.0, 0.0), lp(10.0, 5.0)], 0.0);
    assert_eq!(got, Some(RangeStats { price_delta: 5.0, percent: None, ticks: None }));
    assert!(stats(&[lp(0.0, 0.0)], 0.01).is_none());
}
