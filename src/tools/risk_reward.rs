//! Long/short position tool: entry, stop and a synthesized profit target.
//!
//! Direction comes from entry vs stop. The target is never clicked; it is derived once the stop
//! is placed and re-derived on every entry or stop edit:
//!
//! * in auto mode it sits `3 × risk` beyond entry, away from the stop;
//! * otherwise it keeps the reward distance the user last dragged it to.
//!
//! Auto mode holds while risk is under half a tick, while no reward distance is known, and for
//! the rest of any gesture in which the direction flipped. Every price is tick-rounded before
//! anything is derived from it, and the target never comes closer than one tick to entry.
//!
//! | Index | Anchor |
//! |-------|--------|
//! | 0 | entry (real) |
//! | 1 | stop (real) |
//! | 2 | target (real, synthesized) |
//! | 3 | right edge (stop time, entry price) |

#[cfg(test)]
#[path = "risk_reward_test.rs"]
mod risk_reward_test;

use serde::{Deserialize, Serialize};

use super::{CreationRules, RuleContext, ToolGeometry, ToolRules, ToolState};
use crate::consts::AUTO_REWARD_RATIO;
use crate::creation::CreationGesture;
use crate::culling::{CullingInfo, SubSegment};
use crate::geometry::{LogicalPoint, is_near_zero, round_to_tick};
use crate::shift::{InteractionPhase, LockRule, LockedAxis};
use crate::store::{PointStore, PointsCount};

const ENTRY: usize = 0;
const STOP: usize = 1;
const TARGET: usize = 2;
const RIGHT_EDGE: usize = 3;

pub(crate) static RULES: ToolRules = ToolRules {
    geometry: ToolGeometry {
        points_count: PointsCount::Fixed(3),
        max_anchor_index: Some(RIGHT_EDGE),
        supports_click_click_creation: true,
        supports_click_drag_creation: true,
        supports_shift_constraint: true,
    },
    anchor,
    set_point,
    lock_rule,
    culling,
    normalize,
    restore,
    creation: CreationRules { clicks_needed, place, synthesize },
};

/// Long when entry is above stop. With entry on the stop, the target's side decides, and a tool
/// without a target counts as long.
#[must_use]
pub fn is_long(entry: LogicalPoint, stop: LogicalPoint, target: Option<LogicalPoint>) -> bool {
    if entry.price > stop.price {
        true
    } else if entry.price < stop.price {
        false
    } else {
        target.is_none_or(|t| t.price >= entry.price)
    }
}

fn tick_rounded(point: LogicalPoint, ctx: &RuleContext<'_>) -> LogicalPoint {
    point.with_price(round_to_tick(point.price, ctx.mapper.min_move()))
}

fn anchor(store: &PointStore, index: usize, _ctx: &RuleContext<'_>) -> Option<LogicalPoint> {
    if index != RIGHT_EDGE {
        return None;
    }
    Some(LogicalPoint::new(store.get(STOP)?.time, store.get(ENTRY)?.price))
}

/// Recompute the target from entry and stop.
fn rederive(store: &mut PointStore, state: &mut ToolState, ctx: &RuleContext<'_>) {
    let (Some(entry), Some(stop)) = (store.get(ENTRY), store.get(STOP)) else {
        return;
    };
    let tick = ctx.mapper.min_move();
    let long = is_long(entry, stop, store.get(TARGET));
    if state.was_long.is_some_and(|was| was != long) {
        tracing::trace!(long, "risk/reward: direction flipped");
        state.flip_pending = true;
    }
    state.was_long = Some(long);

    let risk = (entry.price - stop.price).abs();
    let trivial_risk = is_near_zero(risk) || risk < tick * 0.5;
    let distance = match state.reward_distance {
        Some(custom) if !trivial_risk && !state.flip_pending => custom.max(tick),
        _ => {
            let auto = round_to_tick(AUTO_REWARD_RATIO * risk, tick).max(tick);
            if !trivial_risk {
                state.reward_distance = Some(auto);
            }
            auto
        }
    };

    let price = if long { entry.price + distance } else { entry.price - distance };
    let target = LogicalPoint::new(stop.time, round_to_tick(price, tick));
    if !store.set(TARGET, target) {
        store.push(target);
    }
}

fn set_point(store: &mut PointStore, state: &mut ToolState, index: usize, candidate: LogicalPoint, ctx: &RuleContext<'_>) {
    match index {
        ENTRY | STOP => {
            store.set(index, tick_rounded(candidate, ctx));
            rederive(store, state, ctx);
        }
        TARGET => set_target(store, state, tick_rounded(candidate, ctx), ctx),
        RIGHT_EDGE => {
            for i in [STOP, TARGET] {
                if let Some(p) = store.get(i) {
                    store.set(i, p.with_time(candidate.time));
                }
            }
        }
        _ => {}
    }
}

/// A target drag sets a custom reward distance, clamped to one tick on the reward side, and
/// carries the stop's time with it.
fn set_target(store: &mut PointStore, state: &mut ToolState, candidate: LogicalPoint, ctx: &RuleContext<'_>) {
    let (Some(entry), Some(stop)) = (store.get(ENTRY), store.get(STOP)) else {
        return;
    };
    let tick = ctx.mapper.min_move();
    let long = is_long(entry, stop, store.get(TARGET));
    let signed = if long { candidate.price - entry.price } else { entry.price - candidate.price };
    let distance = signed.max(tick);
    state.reward_distance = Some(distance);

    let price = if long { entry.price + distance } else { entry.price - distance };
    store.set(TARGET, LogicalPoint::new(candidate.time, round_to_tick(price, tick)));
    store.set(STOP, stop.with_time(candidate.time));
}

fn lock_rule(index: usize, phase: InteractionPhase) -> LockRule {
    match (phase, index) {
        (InteractionPhase::Creation, STOP) => LockRule::Corner { opposing: ENTRY },
        (InteractionPhase::Editing, ENTRY) => LockRule::Corner { opposing: STOP },
        (InteractionPhase::Editing, STOP | TARGET) => LockRule::Axis { axis: LockedAxis::Time, reference: index },
        (InteractionPhase::Editing, RIGHT_EDGE) => LockRule::Axis { axis: LockedAxis::Price, reference: index },
        _ => LockRule::Free,
    }
}

/// Risk and reward zones are tested separately.
fn culling(store: &PointStore, _ctx: &RuleContext<'_>) -> CullingInfo {
    CullingInfo {
        points: store.snapshot(),
        segments: vec![SubSegment::finite(vec![ENTRY, STOP]), SubSegment::finite(vec![ENTRY, TARGET])],
    }
}

fn normalize(_store: &mut PointStore, state: &mut ToolState) {
    state.flip_pending = false;
}

fn restore(store: &PointStore, state: &mut ToolState) {
    let (Some(entry), Some(stop)) = (store.get(ENTRY), store.get(STOP)) else {
        return;
    };
    let target = store.get(TARGET);
    *state = ToolState {
        was_long: Some(is_long(entry, stop, target)),
        flip_pending: false,
        reward_distance: target.map(|t| (t.price - entry.price).abs()),
    };
}

// =============================================================
// Creation
// =============================================================

fn clicks_needed(_gesture: CreationGesture) -> usize {
    2
}

fn place(_store: &PointStore, candidate: LogicalPoint, ctx: &RuleContext<'_>) -> LogicalPoint {
    tick_rounded(candidate, ctx)
}

fn synthesize(store: &mut PointStore, state: &mut ToolState, ctx: &RuleContext<'_>) {
    if store.len() == 2 {
        rederive(store, state, ctx);
    }
}

// =============================================================
// Read-out
// =============================================================

/// Measured read-out of a position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionStats {
    pub is_long: bool,
    /// `|entry − stop|`.
    pub risk: f64,
    /// `|target − entry|`.
    pub reward: f64,
    /// Reward over risk. `None` at zero risk.
    pub ratio: Option<f64>,
}

/// Read-out for a placed position.
#[must_use]
pub fn stats(points: &[LogicalPoint]) -> Option<PositionStats> {
    let (entry, stop, target) = (*points.first()?, *points.get(STOP)?, *points.get(TARGET)?);
    let risk = (entry.price - stop.price).abs();
    let reward = (target.price - entry.price).abs();
    Some(PositionStats {
        is_long: is_long(entry, stop, Some(target)),
        risk,
        reward,
        ratio: (!is_near_zero(risk)).then(|| reward / risk),
    })
}
