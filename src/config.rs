//! Engine configuration parsed from environment variables.

use crate::consts::{CHANNEL_HEIGHT_PX, DRAG_THRESHOLD_PX, FREEHAND_MIN_DISTANCE_PX};
use crate::error::ToolError;

pub const ENV_FREEHAND_MIN_PX: &str = "CHART_DRAWINGS_FREEHAND_MIN_PX";
pub const ENV_CHANNEL_HEIGHT_PX: &str = "CHART_DRAWINGS_CHANNEL_HEIGHT_PX";
pub const ENV_DRAG_THRESHOLD_PX: &str = "CHART_DRAWINGS_DRAG_THRESHOLD_PX";

/// Pixel thresholds shared by every tool instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Freehand candidates closer than this to the previous stroke point are dropped.
    pub freehand_min_distance_px: f64,
    /// Height of the side synthesized for a drag-created channel.
    pub channel_height_px: f64,
    /// Pointer travel that turns a press into a drag.
    pub drag_threshold_px: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            freehand_min_distance_px: FREEHAND_MIN_DISTANCE_PX,
            channel_height_px: CHANNEL_HEIGHT_PX,
            drag_threshold_px: DRAG_THRESHOLD_PX,
        }
    }
}

impl EngineConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `CHART_DRAWINGS_FREEHAND_MIN_PX`: default 3.0
    /// - `CHART_DRAWINGS_CHANNEL_HEIGHT_PX`: default 40.0
    /// - `CHART_DRAWINGS_DRAG_THRESHOLD_PX`: default 4.0
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::Config`] when a variable is set but is not a finite, non-negative
    /// number.
    pub fn from_env() -> Result<Self, ToolError> {
        let defaults = Self::default();
        Ok(Self {
            freehand_min_distance_px: env_parse_px(ENV_FREEHAND_MIN_PX, defaults.freehand_min_distance_px)?,
            channel_height_px: env_parse_px(ENV_CHANNEL_HEIGHT_PX, defaults.channel_height_px)?,
            drag_threshold_px: env_parse_px(ENV_DRAG_THRESHOLD_PX, defaults.drag_threshold_px)?,
        })
    }
}

fn env_parse_px(key: &str, default: f64) -> Result<f64, ToolError> {
    match std::env::var(key) {
        Ok(raw) => parse_px(key, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_px(key: &str, raw: &str) -> Result<f64, ToolError> {
    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|e| ToolError::Config(format!("{key}={raw:?}: {e}")))?;
    if !value.is_finite() || value < 0.0 {
        return Err(ToolError::Config(format!("{key}={raw:?}: expected a non-negative pixel distance")));
    }
    Ok(value)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
