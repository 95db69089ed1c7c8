//! Per-tool option bundles: the default catalog, override merging and typed access.
//!
//! Styling is opaque to the geometry engine apart from a handful of keys that change geometry
//! (`extend_left`, `extend_right`, `levels`). Everything else is carried through for the renderer.

#[cfg(test)]
#[path = "options_test.rs"]
mod options_test;

use serde_json::{Value, json};

use crate::consts::DEFAULT_FIB_LEVELS;
use crate::culling::ExtendFlags;
use crate::error::ToolError;
use crate::tools::ToolKind;

/// Default option bundle for a tool-type.
#[must_use]
pub fn default_options(kind: ToolKind) -> Value {
    match kind {
        ToolKind::TrendLine => json!({
            "line_color": "#2962FF",
            "line_width": 2.0,
            "extend_left": false,
            "extend_right": false,
        }),
        ToolKind::Circle => json!({
            "line_color": "#FF9800",
            "line_width": 2.0,
            "fill_color": "rgba(255, 152, 0, 0.2)",
        }),
        ToolKind::ParallelChannel => json!({
            "line_color": "#2962FF",
            "line_width": 2.0,
            "fill_color": "rgba(41, 98, 255, 0.2)",
            "extend_left": false,
            "extend_right": false,
            "show_middle_line": true,
        }),
        ToolKind::PriceRange => json!({
            "line_color": "#2962FF",
            "line_width": 1.0,
            "fill_color": "rgba(41, 98, 255, 0.2)",
            "label": { "visible": true, "font_size": 12 },
        }),
        ToolKind::RiskReward => json!({
            "line_color": "#787B86",
            "line_width": 1.0,
            "profit_color": "rgba(8, 153, 129, 0.2)",
            "stop_color": "rgba(242, 54, 69, 0.2)",
            "label": { "visible": true, "font_size": 12 },
        }),
        ToolKind::FibRetracement => json!({
            "line_color": "#787B86",
            "line_width": 1.0,
            "extend_left": false,
            "extend_right": false,
            "levels": DEFAULT_FIB_LEVELS.to_vec(),
        }),
        ToolKind::Brush => json!({
            "line_color": "#2962FF",
            "line_width": 2.0,
        }),
    }
}

/// Defaults for `kind` deep-merged with `overrides`.
///
/// # Errors
///
/// Returns [`ToolError::InvalidOptions`] if `overrides` is neither an object nor null.
pub fn resolve_options(kind: ToolKind, overrides: &Value) -> Result<Value, ToolError> {
    if !overrides.is_object() && !overrides.is_null() {
        return Err(ToolError::InvalidOptions(format!("expected an object, got {overrides}")));
    }
    let mut options = default_options(kind);
    merge_options(&mut options, overrides);
    Ok(options)
}

/// Deep-merge `overrides` into `base`.
///
/// Objects merge key by key and the override wins; arrays and scalars are replaced wholesale;
/// a `null` override removes the key.
pub fn merge_options(base: &mut Value, overrides: &Value) {
    let Some(incoming) = overrides.as_object() else {
        return;
    };
    if !base.is_object() {
        *base = json!({});
    }
    let Some(existing) = base.as_object_mut() else {
        return;
    };
    for (k, v) in incoming {
        if v.is_null() {
            existing.remove(k);
        } else if v.is_object() {
            match existing.get_mut(k) {
                Some(slot) if slot.is_object() => merge_options(slot, v),
                _ => {
                    existing.insert(k.clone(), v.clone());
                }
            }
        } else {
            existing.insert(k.clone(), v.clone());
        }
    }
}

/// Typed access to the option keys the engine understands.
pub struct ToolOptions<'a> {
    value: &'a Value,
}

impl<'a> ToolOptions<'a> {
    /// Wrap a reference to a resolved options value for typed access.
    #[must_use]
    pub fn new(value: &'a Value) -> Self {
        Self { value }
    }

    fn flag(&self, key: &str) -> bool {
        self.value.get(key).and_then(Value::as_bool).unwrap_or(false)
    }

    /// Infinite-extension flags. Both false when absent.
    #[must_use]
    pub fn extend(&self) -> ExtendFlags {
        ExtendFlags { left: self.flag("extend_left"), right: self.flag("extend_right") }
    }

    /// Retracement levels. Non-numeric entries are skipped; the default set when absent.
    #[must_use]
    pub fn levels(&self) -> Vec<f64> {
        match self.value.get("levels").and_then(Value::as_array) {
            Some(levels) => levels.iter().filter_map(Value::as_f64).collect(),
            None => DEFAULT_FIB_LEVELS.to_vec(),
        }
    }

    /// Line color as a CSS color string. Defaults to `"#2962FF"` when absent.
    #[must_use]
    pub fn line_color(&self) -> &str {
        self.value
            .get("line_color")
            .and_then(|v| v.as_str())
            .unwrap_or("#2962FF")
    }

    /// Line width in screen pixels. Defaults to `1.0` when absent.
    #[must_use]
    pub fn line_width(&self) -> f64 {
        self.value
            .get("line_width")
            .and_then(Value::as_f64)
            .unwrap_or(1.0)
    }
}
