//! Two-point trend line.
//!
//! Anchors 0 and 1 are the endpoints; anchor 2 is the midpoint handle, whose time snaps to the
//! nearest time sample so it does not jitter between bars. Dragging it moves the whole line.

#[cfg(test)]
#[path = "trend_line_test.rs"]
mod trend_line_test;

use super::{
    CreationRules, RuleContext, ToolGeometry, ToolRules, ToolState, no_restore, snapped_midpoint,
    sort_left_to_right, translate_all,
};
use crate::culling::{CullingInfo, SubSegment};
use crate::geometry::LogicalPoint;
use crate::shift::{InteractionPhase, LockRule};
use crate::store::{PointStore, PointsCount};

pub(super) const MIDPOINT: usize = 2;

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
    normalize: sort_left_to_right,
    restore: no_restore,
    creation: CreationRules::VERBATIM,
};

/// Anchor 2 for any tool defined by a two-point segment.
pub(super) fn midpoint_anchor(store: &PointStore, index: usize, ctx: &RuleContext<'_>) -> Option<LogicalPoint> {
    if index != MIDPOINT {
        return None;
    }
    Some(snapped_midpoint(store.get(0)?, store.get(1)?, ctx.mapper))
}

/// Endpoints move freely; the midpoint handle translates both endpoints.
pub(super) fn set_point_or_translate(
    store: &mut PointStore,
    _state: &mut ToolState,
    index: usize,
    candidate: LogicalPoint,
    ctx: &RuleContext<'_>,
) {
    if index < MIDPOINT {
        store.set(index, candidate);
        return;
    }
    if let Some(mid) = midpoint_anchor(store, index, ctx) {
        translate_all(store, candidate - mid);
    }
}

pub(super) fn lock_rule(index: usize, phase: InteractionPhase) -> LockRule {
    match (phase, index) {
        (InteractionPhase::Creation | InteractionPhase::Editing, 1) => LockRule::Corner { opposing: 0 },
        (InteractionPhase::Editing, 0) => LockRule::Corner { opposing: 1 },
        (InteractionPhase::Editing, MIDPOINT) => LockRule::Origin,
        _ => LockRule::Free,
    }
}

fn culling(store: &PointStore, ctx: &RuleContext<'_>) -> CullingInfo {
    CullingInfo {
        points: store.snapshot(),
        segments: vec![SubSegment::new(vec![0, 1], ctx.options().extend())],
    }
}
