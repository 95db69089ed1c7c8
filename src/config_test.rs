#![allow(clippy::float_cmp)]

use super::*;

/// # Safety
/// Tests must run with `--test-threads=1` to avoid env races.
unsafe fn clear_engine_env() {
    unsafe {
        std::env::remove_var(ENV_FREEHAND_MIN_PX);
        std::env::remove_var(ENV_CHANNEL_HEIGHT_PX);
        std::env::remove_var(ENV_DRAG_THRESHOLD_PX);
    }
}

#[test]
fn from_env_defaults_when_unset() {
    unsafe { clear_engine_env() };

    let cfg = EngineConfig::from_env().unwrap();
    assert_eq!(cfg, EngineConfig::default());
    assert_eq!(cfg.freehand_min_distance_px, FREEHAND_MIN_DISTANCE_PX);
    assert_eq!(cfg.channel_height_px, CHANNEL_HEIGHT_PX);
    assert_eq!(cfg.drag_threshold_px, DRAG_THRESHOLD_PX);
}

#[test]
fn parse_px_accepts_trimmed_numbers() {
    assert_eq!(parse_px("K", " 12.5 ").unwrap(), 12.5);
    assert_eq!(parse_px("K", "0").unwrap(), 0.0);
}

#[test]
fn parse_px_rejects_garbage() {
    let err = parse_px(ENV_CHANNEL_HEIGHT_PX, "tall").unwrap_err().to_string();
    assert!(err.contains("config parse failed"));
    assert!(err.contains(ENV_CHANNEL_HEIGHT_PX));
}

#[test]
fn parse_px_rejects_negative_and_non_finite() {
    assert!(matches!(parse_px("K", "-1"), Err(ToolError::Config(_))));
    assert!(matches!(parse_px("K", "inf"), Err(ToolError::Config(_))));
    assert!(matches!(parse_px("K", "NaN"), Err(ToolError::Config(_))));
}
