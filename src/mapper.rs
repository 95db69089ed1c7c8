//! Logical ↔ screen coordinate mapping.
//!
//! The engine never owns the chart's scales; it borrows a [`CoordinateMapper`] for the length of
//! one update pass so every anchor resolved in that pass sees the same mapping.
//! [`LinearMapper`] is a plain linear implementation for hosts without their own scales, tests
//! and the replay CLI.

#[cfg(test)]
#[path = "mapper_test.rs"]
mod mapper_test;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_MIN_MOVE, NEAR_ZERO};
use crate::geometry::{LogicalPoint, ScreenPoint};

/// The visible window in logical coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub time_min: f64,
    pub time_max: f64,
    pub price_min: f64,
    pub price_max: f64,
}

/// Read-only chart state converting between logical points and pixels.
pub trait CoordinateMapper {
    /// Time to horizontal pixel position.
    fn time_to_x(&self, time: f64) -> f64;

    /// Horizontal pixel position to time.
    fn x_to_time(&self, x: f64) -> f64;

    /// Price to vertical pixel position (y grows downward).
    fn price_to_y(&self, price: f64) -> f64;

    /// Vertical pixel position to price.
    fn y_to_price(&self, y: f64) -> f64;

    /// Nearest discrete time-axis sample (bar) to `time`.
    fn snap_time(&self, time: f64) -> f64 {
        time
    }

    /// Smallest valid price increment of the instrument.
    fn min_move(&self) -> f64 {
        DEFAULT_MIN_MOVE
    }

    /// The visible window.
    fn viewport(&self) -> Viewport;

    /// Logical point to screen coordinates.
    fn to_screen(&self, point: LogicalPoint) -> ScreenPoint {
        ScreenPoint::new(self.time_to_x(point.time), self.price_to_y(point.price))
    }

    /// Screen point to logical coordinates.
    fn to_logical(&self, point: ScreenPoint) -> LogicalPoint {
        LogicalPoint::new(self.x_to_time(point.x), self.y_to_price(point.y))
    }
}

/// Linear time and price scales over a fixed pixel area.
///
/// `time_from..time_to` spans `0..width` left to right; `price_from..price_to` spans
/// `height..0` bottom to top. A zero span maps everything onto the first edge rather than
/// dividing by zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearMapper {
    pub width: f64,
    pub height: f64,
    pub time_from: f64,
    pub time_to: f64,
    pub price_from: f64,
    pub price_to: f64,
    /// Spacing of time samples; zero means a continuous time axis.
    #[serde(default)]
    pub time_step: f64,
    #[serde(default = "default_min_move")]
    pub min_move: f64,
}

fn default_min_move() -> f64 {
    DEFAULT_MIN_MOVE
}

impl Default for LinearMapper {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

impl LinearMapper {
    /// One time unit and one price unit per pixel, price increasing upward from the bottom edge.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            time_from: 0.0,
            time_to: width,
            price_from: 0.0,
            price_to: height,
            time_step: 0.0,
            min_move: DEFAULT_MIN_MOVE,
        }
    }

    /// Replace the visible time range.
    #[must_use]
    pub fn with_time_range(mut self, from: f64, to: f64) -> Self {
        self.time_from = from;
        self.time_to = to;
        self
    }

    /// Replace the visible price range.
    #[must_use]
    pub fn with_price_range(mut self, from: f64, to: f64) -> Self {
        self.price_from = from;
        self.price_to = to;
        self
    }

    /// Use discrete time samples every `step` units.
    #[must_use]
    pub fn with_time_step(mut self, step: f64) -> Self {
        self.time_step = step;
        self
    }

    #[must_use]
    pub fn with_min_move(mut self, min_move: f64) -> Self {
        self.min_move = min_move;
        self
    }

    fn time_span(&self) -> f64 {
        self.time_to - self.time_from
    }

    fn price_span(&self) -> f64 {
        self.price_to - self.price_from
    }
}

impl CoordinateMapper for LinearMapper {
    fn time_to_x(&self, time: f64) -> f64 {
        let span = self.time_span();
        if span.abs() < NEAR_ZERO {
            return 0.0;
        }
        (time - self.time_from) / span * self.width
    }

    fn x_to_time(&self, x: f64) -> f64 {
        if self.width.abs() < NEAR_ZERO {
            return self.time_from;
        }
        self.time_from + x / self.width * self.time_span()
    }

    fn price_to_y(&self, price: f64) -> f64 {
        let span = self.price_span();
        if span.abs() < NEAR_ZERO {
            return self.height;
        }
        self.height - (price - self.price_from) / span * self.height
    }

    fn y_to_price(&self, y: f64) -> f64 {
        if self.height.abs() < NEAR_ZERO {
            return self.price_from;
        }
        self.price_from + (self.height - y) / self.height * self.price_span()
    }

    fn snap_time(&self, time: f64) -> f64 {
        if self.time_step < NEAR_ZERO {
            return time;
        }
        (time / self.time_step).round() * self.time_step
    }

    fn min_move(&self) -> f64 {
        self.min_move
    }

    fn viewport(&self) -> Viewport {
        Viewport {
            time_min: self.time_from.min(self.time_to),
            time_max: self.time_from.max(self.time_to),
            price_min: self.price_from.min(self.price_to),
            price_max: self.price_from.max(self.price_to),
        }
    }
}
