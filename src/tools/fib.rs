//! Fibonacci retracement grid over a two-point trend.
//!
//! Level `l` sits at `P1.price + (P0.price - P1.price) * l`, so level 0 is the trend's end and
//! level 1 its start. Each level is a horizontal line across the trend's time span and is culled
//! on its own.

#[cfg(test)]
#[path = "fib_test.rs"]
mod fib_test;

use super::trend_line::{MIDPOINT, lock_rule, midpoint_anchor, set_point_or_translate};
use super::{CreationRules, RuleContext, ToolGeometry, ToolRules, keep_order, no_restore};
use crate::culling::{CullingInfo, SubSegment};
use crate::geometry::LogicalPoint;
use crate::store::{PointStore, PointsCount};

pub(crate) static RULES: ToolRules = ToolRules {
    geometry: ToolGeometry {
        points_count: PointsCount::Fixed(2),
        max_anchor_index: Some(MIDPOINT),
        supports_click_click_creation: true,
        supports_click_drag_creation: true,
        supports_shift_constraint: true,
    },
    anchor: midpoint_anchor,
    set_point: set_point_or_translate,
    lock_rule,
    culling,
    normalize: keep_order,
    restore: no_restore,
    creation: CreationRules::VERBATIM,
};

/// `(level, price)` for every level, in the order given.
///
/// Empty until both points are placed.
#[must_use]
pub fn level_prices(points: &[LogicalPoint], levels: &[f64]) -> Vec<(f64, f64)> {
    let (Some(start), Some(end)) = (points.first(), points.get(1)) else {
        return Vec::new();
    };
    let span = start.price - end.price;
    levels.iter().map(|&l| (l, end.price + span * l)).collect()
}

fn culling(store: &PointStore, ctx: &RuleContext<'_>) -> CullingInfo {
    let options = ctx.options();
    let points = store.as_slice();
    let (Some(a), Some(b)) = (points.first(), points.get(1)) else {
        return CullingInfo::default();
    };
    let (t_min, t_max) = (a.time.min(b.time), a.time.max(b.time));
    let extend = options.extend();

    let mut info = CullingInfo::default();
    for (i, (_, price)) in level_prices(points, &options.levels()).into_iter().enumerate() {
        info.points.push(LogicalPoint::new(t_min, price));
        info.points.push(LogicalPoint::new(t_max, price));
        info.segments.push(SubSegment::new(vec![2 * i, 2 * i + 1], extend));
    }
    info
}
