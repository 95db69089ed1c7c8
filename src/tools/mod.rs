//! Tool-types and their strategy records.
//!
//! Every tool-type is one small [`ToolRules`] record of plain functions: how derived anchors
//! are computed, how a drag on any anchor rewrites the real points, which axis a shift-drag
//! locks, what the culling pass tests, how the tool is created and normalized. [`ToolKind::rules`]
//! is the single dispatcher; there is no per-shape type hierarchy.
//!
//! | Module | Tool |
//! |--------|------|
//! | [`trend_line`] | Two-point line with extension flags and a snapped midpoint handle |
//! | [`circle`] | Center + radius point, six bounding-box handles |
//! | [`channel`] | Rigid parallelogram (parallel channel) |
//! | [`price_range`] | Two-corner box with eight handles |
//! | [`risk_reward`] | Entry / stop / synthesized target |
//! | [`fib`] | Retracement grid over a two-point trend |
//! | [`brush`] | Freehand stroke |

pub mod brush;
pub mod channel;
pub mod circle;
pub mod fib;
pub mod price_range;
pub mod risk_reward;
pub mod trend_line;


use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::EngineConfig;
use crate::creation::CreationGesture;
use crate::culling::CullingInfo;
use crate::geometry::{Line, LogicalPoint};
use crate::mapper::CoordinateMapper;
use crate::options::ToolOptions;
use crate::shift::{InteractionPhase, LockRule};
use crate::store::{PointStore, PointsCount};

/// Which tool-type a tool instance is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    TrendLine,
    Circle,
    ParallelChannel,
    PriceRange,
    RiskReward,
    FibRetracement,
    Brush,
}

impl ToolKind {
    pub const ALL: [Self; 7] = [
        Self::TrendLine,
        Self::Circle,
        Self::ParallelChannel,
        Self::PriceRange,
        Self::RiskReward,
        Self::FibRetracement,
        Self::Brush,
    ];

    /// The strategy record for this tool-type.
    #[must_use]
    pub(crate) fn rules(self) -> &'static ToolRules {
        match self {
            Self::TrendLine => &trend_line::RULES,
            Self::Circle => &circle::RULES,
            Self::ParallelChannel => &channel::RULES,
            Self::PriceRange => &price_range::RULES,
            Self::RiskReward => &risk_reward::RULES,
            Self::FibRetracement => &fib::RULES,
            Self::Brush => &brush::RULES,
        }
    }

    /// Static shape of this tool-type.
    #[must_use]
    pub fn geometry(self) -> ToolGeometry {
        self.rules().geometry
    }
}

/// Static description of a tool-type.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolGeometry {
    pub points_count: PointsCount,
    /// Highest anchor index; `None` when every stored point is its own anchor.
    pub max_anchor_index: Option<usize>,
    pub supports_click_click_creation: bool,
    pub supports_click_drag_creation: bool,
    pub supports_shift_constraint: bool,
}

/// Transient per-instance state shared by the rules of one tool.
///
/// Only tools with a direction use it; the flip flag is cleared on normalize.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ToolState {
    /// Direction seen on the previous edit.
    pub was_long: Option<bool>,
    /// A direction flip happened during the current gesture.
    pub flip_pending: bool,
    /// Last committed reward distance (absolute price units).
    pub reward_distance: Option<f64>,
}

/// Read-only inputs shared by every rule call within one update pass.
#[derive(Clone, Copy)]
pub struct RuleContext<'a> {
    pub mapper: &'a dyn CoordinateMapper,
    pub options: &'a Value,
    pub config: &'a EngineConfig,
}

impl<'a> RuleContext<'a> {
    #[must_use]
    pub fn options(&self) -> ToolOptions<'a> {
        ToolOptions::new(self.options)
    }
}

/// How a tool-type is placed.
pub(crate) struct CreationRules {
    /// Explicit placements needed before synthesis runs, per gesture.
    pub clicks_needed: fn(CreationGesture) -> usize,
    /// Constrain a candidate before it is stored as the next real point.
    pub place: fn(&PointStore, LogicalPoint, &RuleContext<'_>) -> LogicalPoint,
    /// Add real points the user never placed.
    pub synthesize: fn(&mut PointStore, &mut ToolState, &RuleContext<'_>),
}

impl CreationRules {
    /// Every point is placed explicitly and stored as-is.
    pub const VERBATIM: Self = Self { clicks_needed: all_points, place: place_verbatim, synthesize: no_synthesis };
}

/// The strategy record of one tool-type.
pub(crate) struct ToolRules {
    pub geometry: ToolGeometry,
    /// Derived anchor at an index past the real points.
    pub anchor: fn(&PointStore, usize, &RuleContext<'_>) -> Option<LogicalPoint>,
    /// Apply a drag of any anchor to the real points.
    pub set_point: fn(&mut PointStore, &mut ToolState, usize, LogicalPoint, &RuleContext<'_>),
    pub lock_rule: fn(usize, InteractionPhase) -> LockRule,
    pub culling: fn(&PointStore, &RuleContext<'_>) -> CullingInfo,
    /// End-of-gesture cleanup.
    pub normalize: fn(&mut PointStore, &mut ToolState),
    /// Rebuild transient state for points loaded from elsewhere.
    pub restore: fn(&PointStore, &mut ToolState),
    pub creation: CreationRules,
}

impl ToolRules {
    /// Number of indices that address real points.
    pub fn real_count(&self, store: &PointStore) -> usize {
        match self.geometry.points_count {
            PointsCount::Fixed(n) => n,
            PointsCount::Unbounded => store.len(),
        }
    }

    /// Highest valid anchor index for `store`.
    pub fn max_anchor_index(&self, store: &PointStore) -> usize {
        self.geometry
            .max_anchor_index
            .unwrap_or_else(|| store.len().saturating_sub(1))
    }

    /// Resolve any anchor: real indices verbatim, derived ones through the tool rule.
    pub fn resolve(&self, store: &PointStore, index: usize, ctx: &RuleContext<'_>) -> Option<LogicalPoint> {
        if index < self.real_count(store) {
            return store.get(index);
        }
        if index > self.max_anchor_index(store) {
            return None;
        }
        (self.anchor)(store, index, ctx)
    }

    /// Every resolvable anchor in index order.
    pub fn resolve_all(&self, store: &PointStore, ctx: &RuleContext<'_>) -> Vec<LogicalPoint> {
        if store.is_empty() {
            return Vec::new();
        }
        (0..=self.max_anchor_index(store))
            .filter_map(|i| self.resolve(store, i, ctx))
            .collect()
    }
}

// =============================================================
// Shared rule pieces
// =============================================================

fn all_points(_gesture: CreationGesture) -> usize {
    usize::MAX
}

pub(crate) fn place_verbatim(_store: &PointStore, candidate: LogicalPoint, _ctx: &RuleContext<'_>) -> LogicalPoint {
    candidate
}

pub(crate) fn no_synthesis(_store: &mut PointStore, _state: &mut ToolState, _ctx: &RuleContext<'_>) {}

pub(crate) fn no_derived_anchor(_store: &PointStore, _index: usize, _ctx: &RuleContext<'_>) -> Option<LogicalPoint> {
    None
}

pub(crate) fn keep_order(_store: &mut PointStore, _state: &mut ToolState) {}

pub(crate) fn no_restore(_store: &PointStore, _state: &mut ToolState) {}

/// Sort two real points left to right by time.
pub(crate) fn sort_left_to_right(store: &mut PointStore, _state: &mut ToolState) {
    let (Some(a), Some(b)) = (store.get(0), store.get(1)) else {
        return;
    };
    if b.time < a.time {
        store.swap(0, 1);
        tracing::debug!("normalize: swapped points to left-to-right order");
    }
}

/// Move every real point by `delta`.
pub(crate) fn translate_all(store: &mut PointStore, delta: LogicalPoint) {
    for i in 0..store.len() {
        if let Some(p) = store.get(i) {
            store.set(i, p + delta);
        }
    }
}

/// Move the real point at `index` by `delta`.
pub(crate) fn translate_one(store: &mut PointStore, index: usize, delta: LogicalPoint) {
    if let Some(p) = store.get(index) {
        store.set(index, p + delta);
    }
}

/// Midpoint of segment `a`–`b` with its time snapped to the nearest time sample and the price
/// read off the segment at that time.
///
/// A vertical or degenerate segment falls back to the average price.
pub(crate) fn snapped_midpoint(a: LogicalPoint, b: LogicalPoint, mapper: &dyn CoordinateMapper) -> LogicalPoint {
    let time = mapper.snap_time((a.time + b.time) * 0.5);
    let price = match Line::through(a, b) {
        Some(line) => line.price_at(time),
        None => (a.price + b.price) * 0.5,
    };
    LogicalPoint::new(time, price)
}
