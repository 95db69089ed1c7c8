//! Event-driven drawing engine.
//!
//! `EngineCore` turns pointer and key events into creation steps and anchor drags on the tools in
//! its [`Scene`], returning [`Action`]s for the host to persist or redraw. Every handler takes
//! the coordinate mapper of the current frame. Hit-testing belongs to the host, which starts an
//! edit with [`EngineCore::begin_anchor_drag`].

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::EngineConfig;
use crate::creation::{CreationGesture, CreationOutcome};
use crate::culling::Visibility;
use crate::geometry::{LogicalPoint, ScreenPoint};
use crate::input::{Button, InputState, Key, Modifiers};
use crate::mapper::CoordinateMapper;
use crate::options::ToolOptions;
use crate::scene::Scene;
use crate::shift::InteractionPhase;
use crate::tool::{Readout, Tool, ToolId};
use crate::tools::ToolKind;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    ToolCreated { id: ToolId, kind: ToolKind },
    ToolUpdated { id: ToolId },
    ToolFinished { id: ToolId },
    ToolCancelled { id: ToolId },
    RenderNeeded,
}

/// One visible tool, fully resolved against a single mapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderItem {
    pub id: ToolId,
    pub kind: ToolKind,
    pub finished: bool,
    /// Real points plus any ghost or look-ahead point.
    pub points: Vec<LogicalPoint>,
    /// Every anchor handle, real and derived.
    pub anchors: Vec<LogicalPoint>,
    pub line_color: String,
    pub line_width: f64,
    pub options: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub readout: Option<Readout>,
}

/// Core engine state.
#[derive(Debug, Clone, Default)]
pub struct EngineCore {
    pub scene: Scene,
    pub input: InputState,
    pub config: EngineConfig,
    /// Tool-type placed by the next press on empty space, if any.
    pub active_kind: Option<ToolKind>,
}

impl EngineCore {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self { config, ..Self::default() }
    }

    // --- Tool / data inputs ---

    /// Select the tool-type placed by the next press, or `None` for editing only.
    pub fn set_active_kind(&mut self, kind: Option<ToolKind>) {
        self.active_kind = kind;
    }

    /// Add a finished tool, e.g. restored by the host.
    pub fn insert_tool(&mut self, mut tool: Tool) -> ToolId {
        tool.z_index = self.scene.next_z_index();
        let id = tool.id();
        self.scene.insert(tool);
        id
    }

    pub fn remove_tool(&mut self, id: &ToolId) -> Option<Tool> {
        if self.input.tool_id().as_ref() == Some(id) {
            self.input = InputState::Idle;
        }
        self.scene.remove(id)
    }

    #[must_use]
    pub fn tool(&self, id: &ToolId) -> Option<&Tool> {
        self.scene.get(id)
    }

    // --- Input events ---

    pub fn on_pointer_down(
        &mut self,
        screen_pt: ScreenPoint,
        button: Button,
        modifiers: Modifiers,
        mapper: &dyn CoordinateMapper,
    ) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        match self.input {
            InputState::Idle => self.start_creation(screen_pt, mapper),
            InputState::Creating { id, .. } => {
                let logical = self.creation_candidate(id, screen_pt, modifiers, mapper);
                self.input = InputState::Creating { id, pressed_at: Some(screen_pt), dragging: false };
                let outcome = match self.scene.get_mut(&id) {
                    Some(tool) => tool.add_point(logical, mapper),
                    None => return self.lost_tool(id),
                };
                self.after_placement(id, outcome)
            }
            InputState::DraggingAnchor { .. } => Vec::new(),
        }
    }

    pub fn on_pointer_move(
        &mut self,
        screen_pt: ScreenPoint,
        modifiers: Modifiers,
        mapper: &dyn CoordinateMapper,
    ) -> Vec<Action> {
        match self.input.clone() {
            InputState::Idle => Vec::new(),
            InputState::Creating { id, pressed_at, dragging } => {
                self.creation_move(id, pressed_at, dragging, screen_pt, modifiers, mapper)
            }
            InputState::DraggingAnchor { id, anchor, original, snapshot } => {
                let Some(tool) = self.scene.get_mut(&id) else {
                    return self.lost_tool(id);
                };
                let pt = if modifiers.shift {
                    tool.shift_constrained_point(anchor, screen_pt, InteractionPhase::Editing, original, &snapshot, mapper)
                        .point
                } else {
                    screen_pt
                };
                if tool.set_point(anchor, mapper.to_logical(pt), mapper) {
                    vec![Action::ToolUpdated { id }, Action::RenderNeeded]
                } else {
                    Vec::new()
                }
            }
        }
    }

    pub fn on_pointer_up(
        &mut self,
        screen_pt: ScreenPoint,
        button: Button,
        modifiers: Modifiers,
        mapper: &dyn CoordinateMapper,
    ) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        match self.input {
            InputState::Idle => Vec::new(),
            InputState::Creating { id, dragging, .. } => {
                let Some(kind) = self.scene.get(&id).map(Tool::kind) else {
                    return self.lost_tool(id);
                };
                if kind.geometry().points_count.fixed().is_none() {
                    return self.finish_stroke(id);
                }
                self.input = InputState::Creating { id, pressed_at: None, dragging: false };
                if !dragging {
                    return Vec::new();
                }
                let logical = self.creation_candidate(id, screen_pt, modifiers, mapper);
                let outcome = match self.scene.get_mut(&id) {
                    Some(tool) => tool.add_point(logical, mapper),
                    None => return self.lost_tool(id),
                };
                self.after_placement(id, outcome)
            }
            InputState::DraggingAnchor { id, .. } => {
                self.input = InputState::Idle;
                match self.scene.get_mut(&id) {
                    Some(tool) => {
                        tool.normalize();
                        vec![Action::ToolUpdated { id }, Action::RenderNeeded]
                    }
                    None => self.lost_tool(id),
                }
            }
        }
    }

    /// Escape aborts an unfinished placement.
    pub fn on_key_down(&mut self, key: &Key, _modifiers: Modifiers) -> Vec<Action> {
        if !key.is_escape() {
            return Vec::new();
        }
        match self.input {
            InputState::Creating { id, .. } => self.cancel_creation(id),
            _ => Vec::new(),
        }
    }

    /// Start dragging anchor `anchor` of a finished tool. Returns false if the tool is unknown,
    /// unfinished, or has no such anchor, or another gesture is in progress.
    pub fn begin_anchor_drag(&mut self, id: ToolId, anchor: usize, mapper: &dyn CoordinateMapper) -> bool {
        if self.input != InputState::Idle {
            return false;
        }
        let Some(tool) = self.scene.get(&id) else {
            tracing::warn!(%id, "begin_anchor_drag: unknown tool");
            return false;
        };
        if !tool.is_finished() || anchor > tool.max_anchor_index() {
            return false;
        }
        self.input = InputState::DraggingAnchor {
            id,
            anchor,
            original: tool.get_point(anchor, mapper),
            snapshot: tool.store().snapshot(),
        };
        tracing::trace!(%id, anchor, "anchor drag started");
        true
    }

    // --- Render ---

    /// Resolve every visible tool against one mapper, in draw order.
    #[must_use]
    pub fn frame(&self, mapper: &dyn CoordinateMapper) -> Vec<RenderItem> {
        self.scene
            .sorted_tools()
            .into_iter()
            .filter(|tool| tool.visibility(mapper) == Visibility::Visible)
            .map(|tool| {
                let style = ToolOptions::new(tool.options());
                RenderItem {
                    id: tool.id(),
                    kind: tool.kind(),
                    finished: tool.is_finished(),
                    points: tool.points(mapper),
                    anchors: tool.anchors(mapper),
                    line_color: style.line_color().to_owned(),
                    line_width: style.line_width(),
                    options: tool.options().clone(),
                    readout: tool.readout(mapper),
                }
            })
            .collect()
    }

    // --- Internals ---

    fn start_creation(&mut self, screen_pt: ScreenPoint, mapper: &dyn CoordinateMapper) -> Vec<Action> {
        let Some(kind) = self.active_kind else {
            return Vec::new();
        };
        let mut tool = Tool::new(kind, self.config);
        if !tool.supports_click_click_creation() {
            tool.set_gesture(CreationGesture::ClickDrag);
        }
        tool.add_point(mapper.to_logical(screen_pt), mapper);
        let id = self.insert_tool(tool);
        self.input = InputState::Creating { id, pressed_at: Some(screen_pt), dragging: false };
        tracing::debug!(%id, ?kind, "tool created");
        vec![Action::ToolCreated { id, kind }, Action::RenderNeeded]
    }

    fn creation_move(
        &mut self,
        id: ToolId,
        pressed_at: Option<ScreenPoint>,
        dragging: bool,
        screen_pt: ScreenPoint,
        modifiers: Modifiers,
        mapper: &dyn CoordinateMapper,
    ) -> Vec<Action> {
        let logical = self.creation_candidate(id, screen_pt, modifiers, mapper);
        let threshold = self.config.drag_threshold_px;
        let Some(tool) = self.scene.get_mut(&id) else {
            return self.lost_tool(id);
        };

        if tool.points_count().fixed().is_none() {
            if pressed_at.is_some() && tool.add_point(logical, mapper) == CreationOutcome::Placed {
                return vec![Action::ToolUpdated { id }, Action::RenderNeeded];
            }
            return Vec::new();
        }

        let starts_drag = !dragging
            && tool.supports_click_drag_creation()
            && tool.store().len() == 1
            && pressed_at.is_some_and(|p| p.distance(screen_pt) > threshold);
        if starts_drag {
            tool.set_gesture(CreationGesture::ClickDrag);
            self.input = InputState::Creating { id, pressed_at, dragging: true };
            tracing::trace!(%id, "press became a drag");
        }
        tool.set_ghost(Some(logical));
        vec![Action::RenderNeeded]
    }

    /// The logical point a creation event places, shift-locked when asked.
    fn creation_candidate(
        &self,
        id: ToolId,
        screen_pt: ScreenPoint,
        modifiers: Modifiers,
        mapper: &dyn CoordinateMapper,
    ) -> LogicalPoint {
        let Some(tool) = self.scene.get(&id).filter(|_| modifiers.shift) else {
            return mapper.to_logical(screen_pt);
        };
        let placed = tool.store().snapshot();
        let locked = tool.shift_constrained_point(placed.len(), screen_pt, InteractionPhase::Creation, None, &placed, mapper);
        mapper.to_logical(locked.point)
    }

    fn after_placement(&mut self, id: ToolId, outcome: CreationOutcome) -> Vec<Action> {
        match outcome {
            CreationOutcome::Finished => self.finish_creation(id),
            CreationOutcome::Placed => vec![Action::ToolUpdated { id }, Action::RenderNeeded],
            CreationOutcome::Ignored => Vec::new(),
        }
    }

    fn finish_creation(&mut self, id: ToolId) -> Vec<Action> {
        self.input = InputState::Idle;
        if let Some(tool) = self.scene.get_mut(&id) {
            tool.normalize();
        }
        vec![Action::ToolFinished { id }, Action::RenderNeeded]
    }

    fn finish_stroke(&mut self, id: ToolId) -> Vec<Action> {
        let outcome = self.scene.get_mut(&id).map(Tool::release);
        if outcome == Some(CreationOutcome::Finished) {
            return self.finish_creation(id);
        }
        self.cancel_creation(id)
    }

    fn cancel_creation(&mut self, id: ToolId) -> Vec<Action> {
        self.input = InputState::Idle;
        if let Some(mut tool) = self.scene.remove(&id) {
            tool.cancel();
        }
        vec![Action::ToolCancelled { id }, Action::RenderNeeded]
    }

    fn lost_tool(&mut self, id: ToolId) -> Vec<Action> {
        tracing::warn!(%id, "gesture target no longer in scene");
        self.input = InputState::Idle;
        Vec::new()
    }
}
