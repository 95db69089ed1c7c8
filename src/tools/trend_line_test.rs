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

fn store(a: LogicalPoint, b: LogicalPoint) -> PointStore {
    PointStore::from_points(PointsCount::Fixed(2), vec![a, b])
}

fn with_ctx<R>(mapper: &LinearMapper, options: &serde_json::Value, f: impl FnOnce(&RuleContext<'_>) -> R) -> R {
    let config = EngineConfig::default();
    let ctx = RuleContext { mapper, options, config: &config };
    f(&ctx)
}

// =============================================================
// Anchors
// =============================================================

#[test]
fn midpoint_interpolates_price_at_snapped_time() {
    let mapper = LinearMapper::new(800.0, 600.0).with_time_step(2.0);
    let s = store(lp(0.0, 100.0), lp(5.0, 150.0));
    let mid = with_ctx(&mapper, &json!({}), |ctx| RULES.resolve(&s, 2, ctx));
    // Raw midpoint time 2.5 snaps to the sample at 2.
    assert_eq!(mid, Some(lp(2.0, 120.0)));
}

#[test]
fn midpoint_of_vertical_line_uses_average_price() {
    let mapper = LinearMapper::new(800.0, 600.0);
    let s = store(lp(4.0, 100.0), lp(4.0, 200.0));
    let mid = with_ctx(&mapper, &json!({}), |ctx| RULES.resolve(&s, 2, ctx));
    assert_eq!(mid, Some(lp(4.0, 150.0)));
}

#[test]
fn midpoint_missing_until_both_points_placed() {
    let mapper = LinearMapper::new(800.0, 600.0);
    let s = PointStore::from_points(PointsCount::Fixed(2), vec![lp(0.0, 1.0)]);
    let mid = with_ctx(&mapper, &json!({}), |ctx| RULES.resolve(&s, 2, ctx));
    assert!(mid.is_none());
}

#[test]
fn index_past_max_is_none() {
    let mapper = LinearMapper::new(800.0, 600.0);
    let s = store(lp(0.0, 1.0), lp(2.0, 3.0));
    let got = with_ctx(&mapper, &json!({}), |ctx| RULES.resolve(&s, 3, ctx));
    assert!(got.is_none());
}

// =============================================================
// Edits
// =============================================================

#[test]
fn dragging_endpoint_moves_only_that_point() {
    let mapper = LinearMapper::new(800.0, 600.0);
    let mut s = store(lp(0.0, 100.0), lp(10.0, 200.0));
    let mut state = ToolState::default();
    with_ctx(&mapper, &json!({}), |ctx| (RULES.set_point)(&mut s, &mut state, 1, lp(20.0, 50.0), ctx));
    assert_eq!(s.as_slice(), &[lp(0.0, 100.0), lp(20.0, 50.0)]);
}

#[test]
fn dragging_midpoint_translates_both_points() {
    let mapper = LinearMapper::new(800.0, 600.0);
    let mut s = store(lp(0.0, 100.0), lp(10.0, 200.0));
    let mut state = ToolState::default();
    with_ctx(&mapper, &json!({}), |ctx| (RULES.set_point)(&mut s, &mut state, 2, lp(15.0, 160.0), ctx));
    assert_eq!(s.as_slice(), &[lp(10.0, 110.0), lp(20.0, 210.0)]);
}

// =============================================================
// Normalize, locks, culling
// =============================================================

#[test]
fn normalize_sorts_left_to_right_and_is_idempotent() {
    let mut s = store(lp(10.0, 200.0), lp(0.0, 100.0));
    let mut state = ToolState::default();
    (RULES.normalize)(&mut s, &mut state);
    assert_eq!(s.as_slice(), &[lp(0.0, 100.0), lp(10.0, 200.0)]);
    (RULES.normalize)(&mut s, &mut state);
    assert_eq!(s.as_slice(), &[lp(0.0, 100.0), lp(10.0, 200.0)]);
}

#[test]
fn lock_rules_pair_the_endpoints() {
    assert_eq!(lock_rule(1, InteractionPhase::Creation), LockRule::Corner { opposing: 0 });
    assert_eq!(lock_rule(0, InteractionPhase::Editing), LockRule::Corner { opposing: 1 });
    assert_eq!(lock_rule(1, InteractionPhase::Editing), LockRule::Corner { opposing: 0 });
    assert_eq!(lock_rule(2, InteractionPhase::Editing), LockRule::Origin);
    assert_eq!(lock_rule(0, InteractionPhase::Creation), LockRule::Free);
}

#[test]
fn culling_carries_extend_flags() {
    let mapper = LinearMapper::new(800.0, 600.0);
    let s = store(lp(0.0, 100.0), lp(10.0, 200.0));
    let info = with_ctx(&mapper, &json!({ "extend_right": true }), |ctx| (RULES.culling)(&s, ctx));
    assert_eq!(info.segments.len(), 1);
    assert!(info.segments[0].extend.right);
    assert!(!info.segments[0].extend.left);
    assert_eq!(info.points.len(), 2);
}
