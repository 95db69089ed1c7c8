//! Point types and the small geometric helpers every tool rule leans on.
//!
//! Logical points live in chart data-space (`time`, `price`); screen points live in CSS pixels.
//! The two axes of a logical point are not commensurable, so anything "round" is measured on
//! screen points and projected back through a [`crate::mapper::CoordinateMapper`].

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

use crate::consts::NEAR_ZERO;

/// A (time, price) coordinate in chart data-space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LogicalPoint {
    pub time: f64,
    pub price: f64,
}

impl LogicalPoint {
    #[must_use]
    pub fn new(time: f64, price: f64) -> Self {
        Self { time, price }
    }

    /// Same time, different price.
    #[must_use]
    pub fn with_price(self, price: f64) -> Self {
        Self { price, ..self }
    }

    /// Same price, different time.
    #[must_use]
    pub fn with_time(self, time: f64) -> Self {
        Self { time, ..self }
    }
}

impl Add for LogicalPoint {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self { time: self.time + rhs.time, price: self.price + rhs.price }
    }
}

impl Sub for LogicalPoint {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self { time: self.time - rhs.time, price: self.price - rhs.price }
    }
}

/// A point in screen space (CSS pixels, y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean pixel distance to `other`.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Whether `value` is indistinguishable from zero.
#[must_use]
pub fn is_near_zero(value: f64) -> bool {
    value.abs() < NEAR_ZERO
}

/// Round `value` to the nearest multiple of `tick`.
///
/// A zero, negative or sub-epsilon tick returns `value` unrounded.
#[must_use]
pub fn round_to_tick(value: f64, tick: f64) -> f64 {
    if !tick.is_finite() || tick < NEAR_ZERO {
        return value;
    }
    (value / tick).round() * tick
}

/// Plain midpoint on both axes.
#[must_use]
pub fn midpoint(a: LogicalPoint, b: LogicalPoint) -> LogicalPoint {
    LogicalPoint::new((a.time + b.time) * 0.5, (a.price + b.price) * 0.5)
}

/// A non-vertical line in logical space, `price = slope * time + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub slope: f64,
    pub intercept: f64,
}

impl Line {
    /// Line through `a` and `b`.
    ///
    /// Returns `None` when the points share a time (coincident or vertical), since price is then
    /// not a function of time.
    #[must_use]
    pub fn through(a: LogicalPoint, b: LogicalPoint) -> Option<Self> {
        let dt = b.time - a.time;
        if is_near_zero(dt) {
            return None;
        }
        let slope = (b.price - a.price) / dt;
        Some(Self { slope, intercept: a.price - slope * a.time })
    }

    #[must_use]
    pub fn price_at(&self, time: f64) -> f64 {
        self.slope * time + self.intercept
    }
}

/// Axis-aligned bounds of a set of logical points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub time_min: f64,
    pub time_max: f64,
    pub price_min: f64,
    pub price_max: f64,
}

impl Bounds {
    /// Bounds of `points`, or `None` for an empty set.
    #[must_use]
    pub fn of<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = LogicalPoint>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let init = Self {
            time_min: first.time,
            time_max: first.time,
            price_min: first.price,
            price_max: first.price,
        };
        Some(iter.fold(init, |b, p| Self {
            time_min: b.time_min.min(p.time),
            time_max: b.time_max.max(p.time),
            price_min: b.price_min.min(p.price),
            price_max: b.price_max.max(p.price),
        }))
    }
}
