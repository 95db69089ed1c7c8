//! Shift-key axis locking.
//!
//! While shift is held, a dragged or newly placed anchor moves along one axis only. Edge
//! handles are pre-locked to the single axis they can move along; corner handles pick the axis
//! from where the pointer sits relative to the opposing corner. All reference positions come
//! from the gesture-start snapshot, so the decision cannot drift as the shape changes under the
//! pointer.

#[cfg(test)]
#[path = "shift_test.rs"]
mod shift_test;

use serde::{Deserialize, Serialize};

use crate::geometry::{LogicalPoint, ScreenPoint};
use crate::mapper::CoordinateMapper;

/// Whether a tool is being placed or edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionPhase {
    Creation,
    Editing,
}

/// The logical coordinate held fixed by a shift lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LockedAxis {
    /// Time is held: the anchor moves vertically.
    Time,
    /// Price is held: the anchor moves horizontally.
    Price,
}

/// How a tool-type locks one anchor in one phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockRule {
    /// Shift has no effect.
    Free,
    /// Always hold `axis`. The held value is the anchor's own start position, or anchor
    /// `reference` while the anchor is still being placed.
    Axis { axis: LockedAxis, reference: usize },
    /// Pick the axis from the pointer's pixel offset to anchor `opposing`.
    Corner { opposing: usize },
    /// Pick the axis from the pointer's pixel offset to the anchor's own start position.
    Origin,
}

/// An axis-locked screen point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShiftResult {
    pub point: ScreenPoint,
    pub locked_axis: Option<LockedAxis>,
}

impl ShiftResult {
    /// The raw point, unlocked.
    #[must_use]
    pub fn free(point: ScreenPoint) -> Self {
        Self { point, locked_axis: None }
    }
}

/// Apply `rule` to a raw pointer position.
///
/// `original` is the dragged anchor's position at gesture start (absent while placing a new
/// point); `lookup` resolves other anchors from the same snapshot.
#[must_use]
pub fn constrain(
    rule: LockRule,
    raw: ScreenPoint,
    original: Option<LogicalPoint>,
    lookup: &dyn Fn(usize) -> Option<LogicalPoint>,
    mapper: &dyn CoordinateMapper,
) -> ShiftResult {
    match rule {
        LockRule::Free => ShiftResult::free(raw),
        LockRule::Axis { axis, reference } => match original.or_else(|| lookup(reference)) {
            Some(pivot) => hold(axis, raw, pivot, mapper),
            None => ShiftResult::free(raw),
        },
        LockRule::Corner { opposing } => {
            let Some(corner) = lookup(opposing) else {
                return ShiftResult::free(raw);
            };
            let axis = axis_from_offset(mapper.to_screen(corner), raw);
            hold(axis, raw, original.unwrap_or(corner), mapper)
        }
        LockRule::Origin => {
            let Some(start) = original else {
                return ShiftResult::free(raw);
            };
            let axis = axis_from_offset(mapper.to_screen(start), raw);
            hold(axis, raw, start, mapper)
        }
    }
}

/// Larger horizontal travel locks price; larger vertical travel locks time. Ties lock price.
#[must_use]
pub fn axis_from_offset(from: ScreenPoint, to: ScreenPoint) -> LockedAxis {
    if (to.x - from.x).abs() >= (to.y - from.y).abs() {
        LockedAxis::Price
    } else {
        LockedAxis::Time
    }
}

fn hold(axis: LockedAxis, raw: ScreenPoint, pivot: LogicalPoint, mapper: &dyn CoordinateMapper) -> ShiftResult {
    let point = match axis {
        LockedAxis::Price => ScreenPoint::new(raw.x, mapper.price_to_y(pivot.price)),
        LockedAxis::Time => ScreenPoint::new(mapper.time_to_x(pivot.time), raw.y),
    };
    ShiftResult { point, locked_axis: Some(axis) }
}
