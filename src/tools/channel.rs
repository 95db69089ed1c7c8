//! Parallel channel: a rigid parallelogram.
//!
//! P0–P1 is the base line. P2 sits on the opposite side, directly above or below P0, and the
//! fourth corner P3 = P2 + (P1 − P0) is always derived, so both sides stay parallel by
//! construction.
//!
//! | Index | Anchor |
//! |-------|--------|
//! | 0, 1 | base line (real) |
//! | 2 | far side over P0 (real) |
//! | 3 | far side over P1 (derived) |
//! | 4 | base midpoint |
//! | 5 | far-side midpoint |

#[cfg(test)]
#[path = "channel_test.rs"]
mod channel_test;

use super::{
    CreationRules, RuleContext, ToolGeometry, ToolRules, ToolState, no_restore, snapped_midpoint, translate_one,
};
use crate::creation::CreationGesture;
use crate::culling::{CullingInfo, SubSegment};
use crate::geometry::LogicalPoint;
use crate::shift::{InteractionPhase, LockRule, LockedAxis};
use crate::store::{PointStore, PointsCount};

const FAR_CORNER: usize = 3;
const BASE_MID: usize = 4;
const FAR_MID: usize = 5;

pub(crate) static RULES: ToolRules = ToolRules {
    geometry: ToolGeometry {
        points_count: PointsCount::Fixed(3),
        max_anchor_index: Some(FAR_MID),
        supports_click_click_creation: true,
        supports_click_drag_creation: true,
        supports_shift_constraint: true,
    },
    anchor,
    set_point,
    lock_rule,
    culling,
    normalize,
    restore: no_restore,
    creation: CreationRules { clicks_needed, place, synthesize },
};

/// P3 = P2 + (P1 − P0).
fn far_corner(store: &PointStore) -> Option<LogicalPoint> {
    Some(store.get(2)? + (store.get(1)? - store.get(0)?))
}

fn anchor(store: &PointStore, index: usize, ctx: &RuleContext<'_>) -> Option<LogicalPoint> {
    match index {
        FAR_CORNER => far_corner(store),
        BASE_MID => Some(snapped_midpoint(store.get(0)?, store.get(1)?, ctx.mapper)),
        FAR_MID => Some(snapped_midpoint(store.get(2)?, far_corner(store)?, ctx.mapper)),
        _ => None,
    }
}

fn set_point(store: &mut PointStore, _state: &mut ToolState, index: usize, candidate: LogicalPoint, ctx: &RuleContext<'_>) {
    let Some(current) = anchor_or_real(store, index, ctx) else {
        return;
    };
    let delta = candidate - current;
    match index {
        0 => {
            store.set(0, candidate);
            translate_one(store, 2, delta);
        }
        1 => {
            store.set(1, candidate);
        }
        2 => {
            store.set(2, candidate);
            translate_one(store, 0, delta);
        }
        FAR_CORNER => translate_one(store, 1, delta),
        BASE_MID => {
            let shift = LogicalPoint::new(0.0, delta.price);
            translate_one(store, 0, shift);
            translate_one(store, 1, shift);
        }
        FAR_MID => translate_one(store, 2, LogicalPoint::new(0.0, delta.price)),
        _ => {}
    }
}

fn anchor_or_real(store: &PointStore, index: usize, ctx: &RuleContext<'_>) -> Option<LogicalPoint> {
    if index < 3 { store.get(index) } else { anchor(store, index, ctx) }
}

fn lock_rule(index: usize, phase: InteractionPhase) -> LockRule {
    match phase {
        InteractionPhase::Creation => match index {
            1 => LockRule::Corner { opposing: 0 },
            2 => LockRule::Axis { axis: LockedAxis::Time, reference: 0 },
            _ => LockRule::Free,
        },
        InteractionPhase::Editing => match index {
            0..=FAR_CORNER => LockRule::Corner { opposing: FAR_CORNER - index },
            BASE_MID | FAR_MID => LockRule::Axis { axis: LockedAxis::Time, reference: index },
            _ => LockRule::Free,
        },
    }
}

fn culling(store: &PointStore, ctx: &RuleContext<'_>) -> CullingInfo {
    let points: Vec<LogicalPoint> = (0..=FAR_CORNER).filter_map(|i| anchor_or_real(store, i, ctx)).collect();
    let indices = (0..points.len()).collect();
    CullingInfo { points, segments: vec![SubSegment::new(indices, ctx.options().extend())] }
}

/// A base drawn right to left is swapped, and P2 moves to the old far corner so the drawn
/// parallelogram is unchanged.
fn normalize(store: &mut PointStore, _state: &mut ToolState) {
    let (Some(p0), Some(p1)) = (store.get(0), store.get(1)) else {
        return;
    };
    if p1.time >= p0.time {
        return;
    }
    let old_far = far_corner(store);
    store.swap(0, 1);
    if let Some(p3) = old_far {
        store.set(2, p3);
    }
    tracing::debug!("normalize: reversed channel base");
}

// =============================================================
// Creation
// =============================================================

fn clicks_needed(gesture: CreationGesture) -> usize {
    match gesture {
        CreationGesture::ClickClick => 3,
        CreationGesture::ClickDrag => 2,
    }
}

/// The far side is placed directly over P0: its time is forced, its price is the pointer's.
fn place(store: &PointStore, candidate: LogicalPoint, _ctx: &RuleContext<'_>) -> LogicalPoint {
    match (store.len(), store.get(0)) {
        (2, Some(p0)) => candidate.with_time(p0.time),
        _ => candidate,
    }
}

/// A drag-created channel gets its far side a fixed pixel height above the base.
fn synthesize(store: &mut PointStore, _state: &mut ToolState, ctx: &RuleContext<'_>) {
    if store.len() != 2 {
        return;
    }
    let Some(p0) = store.get(0) else {
        return;
    };
    let y = ctx.mapper.price_to_y(p0.price) - ctx.config.channel_height_px;
    store.push(LogicalPoint::new(p0.time, ctx.mapper.y_to_price(y)));
}
