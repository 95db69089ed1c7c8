//! Creation state machine: placing a new tool's points.
//!
//! Bounded tools finish on the click that fills their store; some of them synthesize real
//! points the user never clicked once enough placements exist. Unbounded tools grow until the
//! pointer is released, dropping candidates that sit within a few pixels of the previous point.
//!
//! Nothing is committed until the controller reports [`CreationOutcome::Finished`]; cancelling
//! before that simply discards the store.

#[cfg(test)]
#[path = "creation_test.rs"]
mod creation_test;

use serde::{Deserialize, Serialize};

use crate::geometry::LogicalPoint;
use crate::store::{PointStore, PointsCount};
use crate::tools::{RuleContext, ToolRules, ToolState};

/// How the user is placing a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreationGesture {
    /// One discrete click per point.
    #[default]
    ClickClick,
    /// Press on the first point, drag, release on the second.
    ClickDrag,
}

/// Result of one creation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreationOutcome {
    /// A point was stored; more are needed.
    Placed,
    /// Nothing changed: already finished, or the candidate was filtered out.
    Ignored,
    /// The tool is complete.
    Finished,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CreationController {
    gesture: CreationGesture,
    finished: bool,
    ghost: Option<LogicalPoint>,
}

impl CreationController {
    #[must_use]
    pub fn new(gesture: CreationGesture) -> Self {
        Self { gesture, finished: false, ghost: None }
    }

    /// A controller for a tool that is already complete.
    #[must_use]
    pub fn finished() -> Self {
        Self { gesture: CreationGesture::ClickClick, finished: true, ghost: None }
    }

    #[must_use]
    pub fn gesture(&self) -> CreationGesture {
        self.gesture
    }

    /// Switch gesture mid-placement, e.g. once a press turns into a drag. Ignored once finished.
    pub fn set_gesture(&mut self, gesture: CreationGesture) {
        if !self.finished {
            self.gesture = gesture;
        }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    #[must_use]
    pub fn ghost(&self) -> Option<LogicalPoint> {
        self.ghost
    }

    /// Track the pointer between placements. Ignored once finished.
    pub fn set_ghost(&mut self, ghost: Option<LogicalPoint>) {
        if !self.finished {
            self.ghost = ghost;
        }
    }

    /// Advance the state machine with one placed point.
    pub(crate) fn add_point(
        &mut self,
        rules: &ToolRules,
        store: &mut PointStore,
        state: &mut ToolState,
        candidate: LogicalPoint,
        ctx: &RuleContext<'_>,
    ) -> CreationOutcome {
        if self.finished {
            return CreationOutcome::Ignored;
        }
        self.ghost = None;

        if rules.geometry.points_count == PointsCount::Unbounded {
            if !passes_freehand_filter(store, candidate, ctx) {
                return CreationOutcome::Ignored;
            }
            store.push(candidate);
            return CreationOutcome::Placed;
        }

        let placed = (rules.creation.place)(store, candidate, ctx);
        if !store.push(placed) {
            return CreationOutcome::Ignored;
        }
        if store.len() >= (rules.creation.clicks_needed)(self.gesture) {
            (rules.creation.synthesize)(store, state, ctx);
        }
        if store.is_full() {
            self.finished = true;
            tracing::debug!(points = store.len(), gesture = ?self.gesture, "creation finished");
            return CreationOutcome::Finished;
        }
        CreationOutcome::Placed
    }

    /// Pointer released. Finishes an unbounded stroke with at least two points.
    pub(crate) fn release(&mut self, rules: &ToolRules, store: &PointStore) -> CreationOutcome {
        if self.finished || rules.geometry.points_count != PointsCount::Unbounded || store.len() < 2 {
            return CreationOutcome::Ignored;
        }
        self.finished = true;
        self.ghost = None;
        tracing::debug!(points = store.len(), "stroke finished");
        CreationOutcome::Finished
    }

    /// Points to draw right now: the store plus the ghost, and any point the tool would
    /// synthesize if the ghost were placed.
    pub(crate) fn preview(
        &self,
        rules: &ToolRules,
        store: &PointStore,
        state: &ToolState,
        ctx: &RuleContext<'_>,
    ) -> Vec<LogicalPoint> {
        let Some(ghost) = self.ghost.filter(|_| !self.finished) else {
            return store.snapshot();
        };
        let mut look_ahead = store.clone();
        if rules.geometry.points_count == PointsCount::Unbounded {
            look_ahead.push(ghost);
            return look_ahead.snapshot();
        }
        if !look_ahead.push((rules.creation.place)(store, ghost, ctx)) {
            return store.snapshot();
        }
        if look_ahead.len() >= (rules.creation.clicks_needed)(self.gesture) {
            let mut scratch = *state;
            (rules.creation.synthesize)(&mut look_ahead, &mut scratch, ctx);
        }
        look_ahead.snapshot()
    }

    /// Abort placement.
    pub fn cancel(&mut self) {
        self.ghost = None;
    }
}

/// Whether `candidate` is far enough, in pixels, from the stroke's last point to be kept.
#[must_use]
pub fn passes_freehand_filter(store: &PointStore, candidate: LogicalPoint, ctx: &RuleContext<'_>) -> bool {
    let Some(last) = store.last() else {
        return true;
    };
    let d = ctx.mapper.to_screen(last).distance(ctx.mapper.to_screen(candidate));
    d >= ctx.config.freehand_min_distance_px
}
