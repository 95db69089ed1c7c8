//! Shared numeric constants for the drawing engine.

// ── Math ────────────────────────────────────────────────────────

/// Below this magnitude a length, span or tick size is treated as zero.
pub const NEAR_ZERO: f64 = 1e-9;

// ── Trade risk ──────────────────────────────────────────────────

/// Reward distance as a multiple of risk while the target is auto-derived.
pub const AUTO_REWARD_RATIO: f64 = 3.0;

/// Fallback price increment when the instrument reports none.
pub const DEFAULT_MIN_MOVE: f64 = 0.01;

// ── Creation ────────────────────────────────────────────────────

/// Default freehand noise filter, in screen pixels.
pub const FREEHAND_MIN_DISTANCE_PX: f64 = 3.0;

/// Default height of the synthesized side of a drag-created channel, in screen pixels.
pub const CHANNEL_HEIGHT_PX: f64 = 40.0;

/// Pointer travel that turns a press into a drag, in screen pixels.
pub const DRAG_THRESHOLD_PX: f64 = 4.0;

// ── Retracement ─────────────────────────────────────────────────

/// Retracement levels drawn when the options bundle carries none.
pub const DEFAULT_FIB_LEVELS: [f64; 7] = [0.0, 0.236, 0.382, 0.5, 0.618, 0.786, 1.0];
