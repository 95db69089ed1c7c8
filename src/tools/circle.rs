//! Circle defined by a center and a point on its rim.
//!
//! Time and price share no unit, so the radius only exists in screen pixels. Every derived
//! anchor is laid out around the center's screen position and projected back through the mapper.
//!
//! | Index | Anchor |
//! |-------|--------|
//! | 0 | center (real) |
//! | 1 | radius point (real) |
//! | 2..=5 | bounding-box corners TL, TR, BL, BR |
//! | 6, 7 | top, bottom |

#[cfg(test)]
#[path = "circle_test.rs"]
mod circle_test;

use super::{CreationRules, RuleContext, ToolGeometry, ToolRules, ToolState, keep_order, no_restore, translate_all};
use crate::culling::{CullingInfo, SubSegment};
use crate::geometry::{LogicalPoint, ScreenPoint, is_near_zero};
use crate::mapper::CoordinateMapper;
use crate::shift::{InteractionPhase, LockRule};
use crate::store::{PointStore, PointsCount};

const CENTER: usize = 0;
const BOTTOM: usize = 7;

/// Unit offsets from the center for anchors 2..=7. Screen y grows downward.
const BOX_OFFSETS: [(f64, f64); 6] = [(-1.0, -1.0), (1.0, -1.0), (-1.0, 1.0), (1.0, 1.0), (0.0, -1.0), (0.0, 1.0)];

pub(crate) static RULES: ToolRules = ToolRules {
    geometry: ToolGeometry {
        points_count: PointsCount::Fixed(2),
        max_anchor_index: Some(BOTTOM),
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

/// Center and radius in screen pixels.
fn screen_circle(store: &PointStore, mapper: &dyn CoordinateMapper) -> Option<(ScreenPoint, f64)> {
    let center = mapper.to_screen(store.get(CENTER)?);
    let rim = mapper.to_screen(store.get(1)?);
    Some((center, center.distance(rim)))
}

/// Screen radius of a placed circle.
#[must_use]
pub fn radius_px(points: &[LogicalPoint], mapper: &dyn CoordinateMapper) -> Option<f64> {
    let (center, rim) = (points.first()?, points.get(1)?);
    Some(mapper.to_screen(*center).distance(mapper.to_screen(*rim)))
}

fn anchor(store: &PointStore, index: usize, ctx: &RuleContext<'_>) -> Option<LogicalPoint> {
    let (dx, dy) = *BOX_OFFSETS.get(index.checked_sub(2)?)?;
    let (center, r) = screen_circle(store, ctx.mapper)?;
    Some(ctx.mapper.to_logical(ScreenPoint::new(center.x + dx * r, center.y + dy * r)))
}

fn set_point(store: &mut PointStore, _state: &mut ToolState, index: usize, candidate: LogicalPoint, ctx: &RuleContext<'_>) {
    if index == CENTER {
        if let Some(center) = store.get(CENTER) {
            translate_all(store, candidate - center);
        }
        return;
    }
    let mapper = ctx.mapper;
    let (Some(center), Some(rim)) = (store.get(CENTER), store.get(1)) else {
        return;
    };
    let c = mapper.to_screen(center);
    let rim = mapper.to_screen(rim);
    let (vx, vy) = (rim.x - c.x, rim.y - c.y);
    let old_r = vx.hypot(vy);
    if is_near_zero(old_r) {
        tracing::trace!(index, "circle: degenerate radius, placing rim at candidate");
        store.set(1, candidate);
        return;
    }
    let scale = c.distance(mapper.to_screen(candidate)) / old_r;
    store.set(1, mapper.to_logical(ScreenPoint::new(c.x + vx * scale, c.y + vy * scale)));
}

fn lock_rule(index: usize, phase: InteractionPhase) -> LockRule {
    match (phase, index) {
        (InteractionPhase::Creation, 1) | (InteractionPhase::Editing, 1..=BOTTOM) => LockRule::Corner { opposing: CENTER },
        (InteractionPhase::Editing, CENTER) => LockRule::Origin,
        _ => LockRule::Free,
    }
}

fn culling(store: &PointStore, ctx: &RuleContext<'_>) -> CullingInfo {
    let points: Vec<LogicalPoint> = (2..=5).filter_map(|i| anchor(store, i, ctx)).collect();
    if points.is_empty() {
        return CullingInfo::default();
    }
    let indices = (0..points.len()).collect();
    CullingInfo { points, segments: vec![SubSegment::finite(indices)] }
}
