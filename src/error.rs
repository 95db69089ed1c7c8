//! Errors for the fallible edges of the crate: configuration and tool construction.
//!
//! Interactive operations never produce these; they report "no point" or "not applied" instead.

use crate::tools::ToolKind;

/// Errors produced while configuring the engine or building a tool.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    Config(String),

    /// More points were supplied than the tool-type stores.
    #[error("{kind:?} holds at most {max} points, got {got}")]
    TooManyPoints { kind: ToolKind, max: usize, got: usize },

    /// Too few points were supplied for a finished tool.
    #[error("{kind:?} needs at least {min} points, got {got}")]
    NotEnoughPoints { kind: ToolKind, min: usize, got: usize },

    /// A user option override was not a JSON object.
    #[error("invalid options: {0}")]
    InvalidOptions(String),
}
