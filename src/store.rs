//! Point storage: the ordered real anchors owned by one tool instance.
//!
//! A `PointStore` only ever holds real points. Derived anchors are computed on demand by the
//! tool rules and are never written back here, so there is nothing to invalidate when a real
//! point changes.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use serde::{Deserialize, Serialize};

use crate::geometry::LogicalPoint;

/// How many real points a tool-type holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointsCount {
    /// Exactly this many once finished.
    Fixed(usize),
    /// Grows for as long as the creation gesture lasts.
    Unbounded,
}

impl PointsCount {
    /// The fixed count, if any.
    #[must_use]
    pub fn fixed(self) -> Option<usize> {
        match self {
            Self::Fixed(n) => Some(n),
            Self::Unbounded => None,
        }
    }
}

/// Ordered real points of one tool.
#[derive(Debug, Clone, PartialEq)]
pub struct PointStore {
    points: Vec<LogicalPoint>,
    capacity: PointsCount,
}

impl PointStore {
    /// Create an empty store.
    #[must_use]
    pub fn new(capacity: PointsCount) -> Self {
        let points = match capacity {
            PointsCount::Fixed(n) => Vec::with_capacity(n),
            PointsCount::Unbounded => Vec::new(),
        };
        Self { points, capacity }
    }

    /// Build a store from a point list that has already been validated against `capacity`.
    #[must_use]
    pub fn from_points(capacity: PointsCount, points: Vec<LogicalPoint>) -> Self {
        let mut store = Self::new(capacity);
        for p in points {
            if !store.push(p) {
                break;
            }
        }
        store
    }

    #[must_use]
    pub fn capacity(&self) -> PointsCount {
        self.capacity
    }

    /// Append a point. Returns false when the store is already full.
    pub fn push(&mut self, point: LogicalPoint) -> bool {
        if self.is_full() {
            return false;
        }
        self.points.push(point);
        true
    }

    /// The point at `index`, if placed.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<LogicalPoint> {
        self.points.get(index).copied()
    }

    /// Overwrite an already-placed point. Returns false for an index that was never placed.
    pub fn set(&mut self, index: usize, point: LogicalPoint) -> bool {
        let Some(slot) = self.points.get_mut(index) else {
            return false;
        };
        *slot = point;
        true
    }

    /// Exchange two placed points. Returns false if either index is out of range.
    pub fn swap(&mut self, a: usize, b: usize) -> bool {
        if a >= self.points.len() || b >= self.points.len() {
            return false;
        }
        self.points.swap(a, b);
        true
    }

    #[must_use]
    pub fn last(&self) -> Option<LogicalPoint> {
        self.points.last().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether a fixed-count store holds all of its points. Unbounded stores are never full.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.capacity.fixed().is_some_and(|n| self.points.len() >= n)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[LogicalPoint] {
        &self.points
    }

    /// Copy of the current points, e.g. the baseline for a drag gesture.
    #[must_use]
    pub fn snapshot(&self) -> Vec<LogicalPoint> {
        self.points.clone()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}
