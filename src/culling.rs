//! Render culling: does a tool's (possibly infinite) geometry touch the viewport?
//!
//! A tool hands over a flat point list plus a partition into sub-segments. Each sub-segment is
//! tested on its own bounding box; extension flags only ever rescue a miss along the time axis.

#[cfg(test)]
#[path = "culling_test.rs"]
mod culling_test;

use serde::{Deserialize, Serialize};

use crate::geometry::{Bounds, LogicalPoint};
use crate::mapper::Viewport;

/// Whether a linear component continues forever toward either end of the time axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExtendFlags {
    pub left: bool,
    pub right: bool,
}

impl ExtendFlags {
    pub const NONE: Self = Self { left: false, right: false };
}

/// An independently tested part of a tool's geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubSegment {
    /// Indices into the accompanying point list.
    pub indices: Vec<usize>,
    pub extend: ExtendFlags,
}

impl SubSegment {
    #[must_use]
    pub fn new(indices: Vec<usize>, extend: ExtendFlags) -> Self {
        Self { indices, extend }
    }

    /// A finite segment over `indices`.
    #[must_use]
    pub fn finite(indices: Vec<usize>) -> Self {
        Self::new(indices, ExtendFlags::NONE)
    }
}

/// Everything the culling pass needs from one tool.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CullingInfo {
    pub points: Vec<LogicalPoint>,
    pub segments: Vec<SubSegment>,
}

/// Verdict for a tool or one of its sub-segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Visible,
    OffScreenLeft,
    OffScreenRight,
    OffScreenTop,
    OffScreenBottom,
    FullyOffScreen,
}

impl Visibility {
    #[must_use]
    pub fn is_visible(self) -> bool {
        self == Self::Visible
    }
}

impl CullingInfo {
    /// Classify this geometry against `viewport`.
    #[must_use]
    pub fn classify(&self, viewport: &Viewport) -> Visibility {
        classify(&self.points, &self.segments, viewport)
    }
}

/// Classify a tool's geometry against `viewport`.
///
/// The tool is visible if any sub-segment is. Otherwise the common direction of every miss is
/// reported, or `FullyOffScreen` when they disagree or there is nothing to test.
#[must_use]
pub fn classify(points: &[LogicalPoint], segments: &[SubSegment], viewport: &Viewport) -> Visibility {
    let mut verdict: Option<Visibility> = None;
    for segment in segments {
        let v = classify_segment(points, segment, viewport);
        if v.is_visible() {
            return Visibility::Visible;
        }
        verdict = match verdict {
            None => Some(v),
            Some(prev) if prev == v => Some(prev),
            Some(_) => Some(Visibility::FullyOffScreen),
        };
    }
    verdict.unwrap_or(Visibility::FullyOffScreen)
}

/// Classify one sub-segment's bounding box.
///
/// Indices outside `points` are ignored; a segment with no resolvable points is fully off-screen.
#[must_use]
pub fn classify_segment(points: &[LogicalPoint], segment: &SubSegment, viewport: &Viewport) -> Visibility {
    let Some(b) = Bounds::of(segment.indices.iter().filter_map(|&i| points.get(i).copied())) else {
        return Visibility::FullyOffScreen;
    };

    // Price misses first: extension is a time-axis concept and never rescues them.
    if b.price_min > viewport.price_max {
        return Visibility::OffScreenTop;
    }
    if b.price_max < viewport.price_min {
        return Visibility::OffScreenBottom;
    }
    if b.time_max < viewport.time_min && !segment.extend.right {
        return Visibility::OffScreenLeft;
    }
    if b.time_min > viewport.time_max && !segment.extend.left {
        return Visibility::OffScreenRight;
    }
    Visibility::Visible
}
