//! A single drawing instance: its real points, transient state, creation progress and options.
//!
//! `Tool` is the model boundary the host talks to. Every method that reads or edits geometry
//! takes the coordinate mapper for the current update pass; nothing here caches a mapping or a
//! derived point between calls.

#[cfg(test)]
#[path = "tool_test.rs"]
mod tool_test;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::creation::{CreationController, CreationGesture, CreationOutcome};
use crate::culling::{CullingInfo, Visibility};
use crate::error::ToolError;
use crate::geometry::{LogicalPoint, ScreenPoint};
use crate::mapper::CoordinateMapper;
use crate::options::{ToolOptions, default_options, resolve_options};
use crate::shift::{InteractionPhase, ShiftResult, constrain};
use crate::store::{PointStore, PointsCount};
use crate::tools::{RuleContext, ToolKind, ToolRules, ToolState, fib, price_range, risk_reward};

/// Unique identifier for a tool instance.
pub type ToolId = Uuid;

/// Tool-specific measurements for labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Readout {
    Position(risk_reward::PositionStats),
    Range(price_range::RangeStats),
    Levels { levels: Vec<(f64, f64)> },
}

#[derive(Debug, Clone)]
pub struct Tool {
    id: ToolId,
    kind: ToolKind,
    store: PointStore,
    state: ToolState,
    creation: CreationController,
    options: Value,
    config: EngineConfig,
    /// Stacking order; lower values are drawn beneath higher values.
    pub z_index: i64,
}

impl Tool {
    /// An empty tool with default options, ready for placement.
    #[must_use]
    pub fn new(kind: ToolKind, config: EngineConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            store: PointStore::new(kind.geometry().points_count),
            state: ToolState::default(),
            creation: CreationController::new(CreationGesture::ClickClick),
            options: default_options(kind),
            config,
            z_index: 0,
        }
    }

    /// An empty tool with `overrides` deep-merged over the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::InvalidOptions`] if `overrides` is not an object.
    pub fn with_options(kind: ToolKind, overrides: &Value, config: EngineConfig) -> Result<Self, ToolError> {
        let mut tool = Self::new(kind, config);
        tool.options = resolve_options(kind, overrides)?;
        Ok(tool)
    }

    /// An already finished tool built from stored points.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::TooManyPoints`] or [`ToolError::NotEnoughPoints`] when `points`
    /// does not match the tool-type (a stroke needs at least two), or
    /// [`ToolError::InvalidOptions`] for bad overrides.
    pub fn with_points(
        kind: ToolKind,
        points: Vec<LogicalPoint>,
        overrides: &Value,
        config: EngineConfig,
    ) -> Result<Self, ToolError> {
        let capacity = kind.geometry().points_count;
        let got = points.len();
        match capacity {
            PointsCount::Fixed(n) if got > n => return Err(ToolError::TooManyPoints { kind, max: n, got }),
            PointsCount::Fixed(n) if got < n => return Err(ToolError::NotEnoughPoints { kind, min: n, got }),
            PointsCount::Unbounded if got < 2 => return Err(ToolError::NotEnoughPoints { kind, min: 2, got }),
            _ => {}
        }
        let mut tool = Self::with_options(kind, overrides, config)?;
        tool.store = PointStore::from_points(capacity, points);
        tool.creation = CreationController::finished();
        (tool.rules().restore)(&tool.store, &mut tool.state);
        Ok(tool)
    }

    fn rules(&self) -> &'static ToolRules {
        self.kind.rules()
    }

    // --- Identity ---

    #[must_use]
    pub fn id(&self) -> ToolId {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> ToolKind {
        self.kind
    }

    #[must_use]
    pub fn options(&self) -> &Value {
        &self.options
    }

    #[must_use]
    pub fn store(&self) -> &PointStore {
        &self.store
    }

    #[must_use]
    pub fn state(&self) -> ToolState {
        self.state
    }

    // --- Capabilities ---

    #[must_use]
    pub fn points_count(&self) -> PointsCount {
        self.rules().geometry.points_count
    }

    /// Highest valid anchor index right now (a stroke grows with its points).
    #[must_use]
    pub fn max_anchor_index(&self) -> usize {
        self.rules().max_anchor_index(&self.store)
    }

    #[must_use]
    pub fn supports_click_click_creation(&self) -> bool {
        self.rules().geometry.supports_click_click_creation
    }

    #[must_use]
    pub fn supports_click_drag_creation(&self) -> bool {
        self.rules().geometry.supports_click_drag_creation
    }

    #[must_use]
    pub fn supports_shift_constraint(&self) -> bool {
        self.rules().geometry.supports_shift_constraint
    }

    // --- Creation ---

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.creation.is_finished()
    }

    #[must_use]
    pub fn gesture(&self) -> CreationGesture {
        self.creation.gesture()
    }

    pub fn set_gesture(&mut self, gesture: CreationGesture) {
        self.creation.set_gesture(gesture);
    }

    /// Place the next point. A no-op once finished.
    pub fn add_point(&mut self, candidate: LogicalPoint, mapper: &dyn CoordinateMapper) -> CreationOutcome {
        let ctx = RuleContext { mapper, options: &self.options, config: &self.config };
        self.creation
            .add_point(self.kind.rules(), &mut self.store, &mut self.state, candidate, &ctx)
    }

    /// Pointer released during placement.
    pub fn release(&mut self) -> CreationOutcome {
        self.creation.release(self.kind.rules(), &self.store)
    }

    /// Show an uncommitted point under the pointer while placing.
    pub fn set_ghost(&mut self, ghost: Option<LogicalPoint>) {
        self.creation.set_ghost(ghost);
    }

    /// Abort an unfinished placement, discarding every placed point.
    pub fn cancel(&mut self) {
        if self.is_finished() {
            return;
        }
        self.creation.cancel();
        self.store.clear();
        self.state = ToolState::default();
        tracing::debug!(id = %self.id, kind = ?self.kind, "creation cancelled");
    }

    // --- Editing ---

    /// Drag anchor `index` to `candidate`. Returns false when nothing was applied.
    pub fn set_point(&mut self, index: usize, candidate: LogicalPoint, mapper: &dyn CoordinateMapper) -> bool {
        if !self.is_finished() {
            tracing::warn!(id = %self.id, index, "set_point on unfinished tool ignored");
            return false;
        }
        if index > self.max_anchor_index() {
            tracing::trace!(id = %self.id, index, "set_point: anchor out of range");
            return false;
        }
        let ctx = RuleContext { mapper, options: &self.options, config: &self.config };
        (self.kind.rules().set_point)(&mut self.store, &mut self.state, index, candidate, &ctx);
        tracing::trace!(id = %self.id, index, time = candidate.time, price = candidate.price, "anchor moved");
        true
    }

    /// Any anchor, real or derived. `None` when out of range or not yet computable.
    #[must_use]
    pub fn get_point(&self, index: usize, mapper: &dyn CoordinateMapper) -> Option<LogicalPoint> {
        let ctx = RuleContext { mapper, options: &self.options, config: &self.config };
        self.rules().resolve(&self.store, index, &ctx)
    }

    /// Every anchor in index order.
    #[must_use]
    pub fn anchors(&self, mapper: &dyn CoordinateMapper) -> Vec<LogicalPoint> {
        let ctx = RuleContext { mapper, options: &self.options, config: &self.config };
        self.rules().resolve_all(&self.store, &ctx)
    }

    /// Real points to draw, including a ghost and its look-ahead while placing.
    #[must_use]
    pub fn points(&self, mapper: &dyn CoordinateMapper) -> Vec<LogicalPoint> {
        let ctx = RuleContext { mapper, options: &self.options, config: &self.config };
        self.creation.preview(self.rules(), &self.store, &self.state, &ctx)
    }

    /// Axis-lock a raw pointer position for anchor `index`.
    ///
    /// `all_original` is the gesture-start snapshot of the real points; derived anchors used as
    /// lock references are resolved from it, never from live state.
    #[must_use]
    pub fn shift_constrained_point(
        &self,
        index: usize,
        raw: ScreenPoint,
        phase: InteractionPhase,
        original: Option<LogicalPoint>,
        all_original: &[LogicalPoint],
        mapper: &dyn CoordinateMapper,
    ) -> ShiftResult {
        if !self.supports_shift_constraint() {
            return ShiftResult::free(raw);
        }
        let rules = self.rules();
        let rule = (rules.lock_rule)(index, phase);
        let snapshot = PointStore::from_points(rules.geometry.points_count, all_original.to_vec());
        let ctx = RuleContext { mapper, options: &self.options, config: &self.config };
        let lookup = |i: usize| rules.resolve(&snapshot, i, &ctx);
        constrain(rule, raw, original, &lookup, mapper)
    }

    /// End-of-gesture cleanup.
    pub fn normalize(&mut self) {
        (self.kind.rules().normalize)(&mut self.store, &mut self.state);
    }

    // --- Culling and read-outs ---

    /// Geometry for the culling pass. While placing, the previewed points are used.
    #[must_use]
    pub fn culling_info(&self, mapper: &dyn CoordinateMapper) -> CullingInfo {
        let ctx = RuleContext { mapper, options: &self.options, config: &self.config };
        if self.is_finished() {
            return (self.rules().culling)(&self.store, &ctx);
        }
        let preview = PointStore::from_points(self.points_count(), self.points(mapper));
        (self.rules().culling)(&preview, &ctx)
    }

    #[must_use]
    pub fn visibility(&self, mapper: &dyn CoordinateMapper) -> Visibility {
        self.culling_info(mapper).classify(&mapper.viewport())
    }

    /// Label measurements, for tool-types that have them.
    #[must_use]
    pub fn readout(&self, mapper: &dyn CoordinateMapper) -> Option<Readout> {
        let points = self.store.as_slice();
        match self.kind {
            ToolKind::RiskReward => risk_reward::stats(points).map(Readout::Position),
            ToolKind::PriceRange => price_range::stats(points, mapper.min_move()).map(Readout::Range),
            ToolKind::FibRetracement => {
                let levels = fib::level_prices(points, &ToolOptions::new(&self.options).levels());
                (!levels.is_empty()).then_some(Readout::Levels { levels })
            }
            _ => None,
        }
    }
}
