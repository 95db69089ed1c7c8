//! Freehand brush stroke. Every stored point is an anchor; the stroke only grows while the
//! pointer is down and is finished on release.

#[cfg(test)]
#[path = "brush_test.rs"]
mod brush_test;

use super::{
    CreationRules, RuleContext, ToolGeometry, ToolRules, ToolState, keep_order, no_derived_anchor, no_restore,
};
use crate::culling::{CullingInfo, SubSegment};
use crate::geometry::LogicalPoint;
use crate::shift::{InteractionPhase, LockRule};
use crate::store::{PointStore, PointsCount};

pub(crate) static RULES: ToolRules = ToolRules {
    geometry: ToolGeometry {
        points_count: PointsCount::Unbounded,
        max_anchor_index: None,
        supports_click_click_creation: false,
        supports_click_drag_creation: true,
        supports_shift_constraint: false,
    },
    anchor: no_derived_anchor,
    set_point,
    lock_rule,
    culling,
    normalize: keep_order,
    restore: no_restore,
    creation: CreationRules::VERBATIM,
};

fn set_point(store: &mut PointStore, _state: &mut ToolState, index: usize, candidate: LogicalPoint, _ctx: &RuleContext<'_>) {
    store.set(index, candidate);
}

fn lock_rule(_index: usize, _phase: InteractionPhase) -> LockRule {
    LockRule::Free
}

fn culling(store: &PointStore, _ctx: &RuleContext<'_>) -> CullingInfo {
    CullingInfo {
        points: store.snapshot(),
        segments: vec![SubSegment::finite((0..store.len()).collect())],
    }
}
