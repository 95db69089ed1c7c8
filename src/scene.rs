//! The in-memory store of every drawing on a chart.
//!
//! Tools are keyed by id. Draw order is `(z_index, id)`, so ties between equal z-indices are
//! stable across frames.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use std::collections::HashMap;

use crate::tool::{Tool, ToolId};

#[derive(Debug, Clone, Default)]
pub struct Scene {
    tools: HashMap<ToolId, Tool>,
}

impl Scene {
    /// Create an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self { tools: HashMap::new() }
    }

    /// Insert or replace a tool. A tool with the same id is overwritten.
    pub fn insert(&mut self, tool: Tool) {
        self.tools.insert(tool.id(), tool);
    }

    /// Remove a tool by id, returning it if it was present.
    pub fn remove(&mut self, id: &ToolId) -> Option<Tool> {
        self.tools.remove(id)
    }

    #[must_use]
    pub fn get(&self, id: &ToolId) -> Option<&Tool> {
        self.tools.get(id)
    }

    pub fn get_mut(&mut self, id: &ToolId) -> Option<&mut Tool> {
        self.tools.get_mut(id)
    }

    /// Z-index that places a new tool above everything present.
    #[must_use]
    pub fn next_z_index(&self) -> i64 {
        self.tools.values().map(|t| t.z_index).max().map_or(0, |z| z + 1)
    }

    /// All tools sorted by `(z_index, id)` for draw order.
    #[must_use]
    pub fn sorted_tools(&self) -> Vec<&Tool> {
        let mut tools: Vec<&Tool> = self.tools.values().collect();
        tools.sort_by(|a, b| a.z_index.cmp(&b.z_index).then_with(|| a.id().cmp(&b.id())));
        tools
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
