//! Price range box: two real corners and six derived handles.
//!
//! The corners may cross freely; the box is never re-sorted in the point model, and renderers
//! take min/max themselves.
//!
//! | Index | Anchor | Drag writes |
//! |-------|--------|-------------|
//! | 0, 1 | real corners | the point |
//! | 2 | (P0.time, P1.price) | P0.time, P1.price |
//! | 3 | (P1.time, P0.price) | P1.time, P0.price |
//! | 4 | top-center (mid time, P0.price) | P0.price |
//! | 5 | bottom-center (mid time, P1.price) | P1.price |
//! | 6 | left-center (P0.time, mid price) | P0.time |
//! | 7 | right-center (P1.time, mid price) | P1.time |

#[cfg(test)]
#[path = "price_range_test.rs"]
mod price_range_test;

use serde::{Deserialize, Serialize};

use super::{CreationRules, RuleContext, ToolGeometry, ToolRules, ToolState, keep_order, no_restore};
use crate::culling::{CullingInfo, SubSegment};
use crate::geometry::{LogicalPoint, is_near_zero, midpoint};
use crate::shift::{InteractionPhase, LockRule, LockedAxis};
use crate::store::{PointStore, PointsCount};

pub(crate) static RULES: ToolRules = ToolRules {
    geometry: ToolGeometry {
        points_count: PointsCount::Fixed(2),
        max_anchor_index: Some(7),
        supports_click_click_creation: true,
        supports_click_drag_creation: true,
        supports_shift_constraint: true,
    },
    anchor,
    set_point,
    lock_rule,
    culling,
    normalize: keep_order,
    restore: no_restore,
    creation: CreationRules::VERBATIM,
};

fn anchor(store: &PointStore, index: usize, _ctx: &RuleContext<'_>) -> Option<LogicalPoint> {
    let (p0, p1) = (store.get(0)?, store.get(1)?);
    let LogicalPoint { time: mid_time, price: mid_price } = midpoint(p0, p1);
    match index {
        2 => Some(LogicalPoint::new(p0.time, p1.price)),
        3 => Some(LogicalPoint::new(p1.time, p0.price)),
        4 => Some(LogicalPoint::new(mid_time, p0.price)),
        5 => Some(LogicalPoint::new(mid_time, p1.price)),
        6 => Some(LogicalPoint::new(p0.time, mid_price)),
        7 => Some(LogicalPoint::new(p1.time, mid_price)),
        _ => None,
    }
}

fn set_point(store: &mut PointStore, _state: &mut ToolState, index: usize, c: LogicalPoint, _ctx: &RuleContext<'_>) {
    let (Some(p0), Some(p1)) = (store.get(0), store.get(1)) else {
        return;
    };
    let (p0, p1) = match index {
        0 => (c, p1),
        1 => (p0, c),
        2 => (p0.with_time(c.time), p1.with_price(c.price)),
        3 => (p0.with_price(c.price), p1.with_time(c.time)),
        4 => (p0.with_price(c.price), p1),
        5 => (p0, p1.with_price(c.price)),
        6 => (p0.with_time(c.time), p1),
        7 => (p0, p1.with_time(c.time)),
        _ => return,
    };
    store.set(0, p0);
    store.set(1, p1);
}

fn lock_rule(index: usize, phase: InteractionPhase) -> LockRule {
    match (phase, index) {
        (InteractionPhase::Creation | InteractionPhase::Editing, 1) => LockRule::Corner { opposing: 0 },
        (InteractionPhase::Editing, 0) => LockRule::Corner { opposing: 1 },
        (InteractionPhase::Editing, 2) => LockRule::Corner { opposing: 3 },
        (InteractionPhase::Editing, 3) => LockRule::Corner { opposing: 2 },
        (InteractionPhase::Editing, 4 | 5) => LockRule::Axis { axis: LockedAxis::Time, reference: index },
        (InteractionPhase::Editing, 6 | 7) => LockRule::Axis { axis: LockedAxis::Price, reference: index },
        _ => LockRule::Free,
    }
}

fn culling(store: &PointStore, _ctx: &RuleContext<'_>) -> CullingInfo {
    CullingInfo { points: store.snapshot(), segments: vec![SubSegment::finite(vec![0, 1])] }
}

/// Measured read-out of a price range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeStats {
    /// `P1.price - P0.price`.
    pub price_delta: f64,
    /// Change relative to P0, in percent. `None` when P0's price is zero.
    pub percent: Option<f64>,
    /// Change in ticks. `None` for a zero tick size.
    pub ticks: Option<f64>,
}

/// Read-out for a placed range.
#[must_use]
pub fn stats(points: &[LogicalPoint], min_move: f64) -> Option<RangeStats> {
    let (p0, p1) = (points.first()?, points.get(1)?);
    let price_delta = p1.price - p0.price;
    let percent = (!is_near_zero(p0.price)).then(|| price_delta / p0.price * 100.0);
    let ticks = (!is_near_zero(min_move)).then(|| (price_delta / min_move).round());
    Some(RangeStats { price_delta, percent, ticks })
}
