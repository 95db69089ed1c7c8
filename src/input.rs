//! Input model: modifier keys, mouse buttons, and the gesture state machine.
//!
//! `Modifiers` captures the user's intent at the time of a pointer event. `InputState` is the
//! active gesture tracked between pointer-down and pointer-up, carrying the gesture-start
//! snapshot that shift locking reads for the whole drag.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::geometry::{LogicalPoint, ScreenPoint};
use crate::tool::ToolId;

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self { shift: false, ctrl: false, alt: false, meta: false };
    pub const SHIFT: Self = Self { shift: true, ctrl: false, alt: false, meta: false };
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    #[default]
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// A keyboard key as reported by the host (e.g. `"Escape"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn is_escape(&self) -> bool {
        self.0 == "Escape"
    }
}

/// Internal state for the input state machine.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// A new tool is being placed.
    Creating {
        /// Id of the tool being placed.
        id: ToolId,
        /// Where the pointer went down, while it is still down.
        pressed_at: Option<ScreenPoint>,
        /// The press travelled past the drag threshold.
        dragging: bool,
    },
    /// An anchor of a finished tool is being dragged.
    DraggingAnchor {
        /// Id of the tool being edited.
        id: ToolId,
        /// Anchor index under the pointer.
        anchor: usize,
        /// The anchor's position at gesture start.
        original: Option<LogicalPoint>,
        /// Real points at gesture start.
        snapshot: Vec<LogicalPoint>,
    },
}

impl InputState {
    /// The tool the current gesture acts on.
    #[must_use]
    pub fn tool_id(&self) -> Option<ToolId> {
        match self {
            Self::Idle => None,
            Self::Creating { id, .. } | Self::DraggingAnchor { id, .. } => Some(*id),
        }
    }
}
