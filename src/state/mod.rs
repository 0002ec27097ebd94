//! View state for the workflow viewer.
//!
//! `ViewState` is an immutable value. The [`Controller`] is the only thing
//! that produces new ones; renderers read it alongside the graph.

mod controller;
mod mode;
mod selection;
mod zoom;

pub use controller::{Controller, Intent};
pub use mode::ViewMode;
pub use selection::SelectionState;
pub use zoom::ZoomLevel;

use crate::workflow::{data::DEFAULT_EXPANDED_PHASES, WorkflowGraph};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewState {
    selection: SelectionState,
    mode: ViewMode,
    zoom: ZoomLevel,
    /// Set once the first-team auto-selection has run.
    initialized: bool,
}

impl ViewState {
    /// Starting state for `graph`: nothing selected, the first declared
    /// phases expanded, interactive mode at 100%.
    pub fn initial(graph: &WorkflowGraph) -> Self {
        Self::default().with_expanded_phases(
            graph
                .phases()
                .iter()
                .take(DEFAULT_EXPANDED_PHASES)
                .cloned(),
        )
    }

    pub fn with_mode(mut self, mode: ViewMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_zoom(mut self, zoom: ZoomLevel) -> Self {
        self.zoom = zoom;
        self
    }

    pub fn with_expanded_phases<I, S>(mut self, phases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selection.expanded_phases = phases.into_iter().map(Into::into).collect();
        self
    }

    /// Preset a selection without validation, e.g. to restore a snapshot.
    pub fn with_selection(mut self, team_id: Option<&str>, task_id: Option<&str>) -> Self {
        self.selection.selected_team = team_id.map(str::to_string);
        self.selection.selected_task = task_id.map(str::to_string);
        self
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn selected_team(&self) -> Option<&str> {
        self.selection.selected_team()
    }

    pub fn selected_task(&self) -> Option<&str> {
        self.selection.selected_task()
    }

    pub fn is_expanded(&self, phase: &str) -> bool {
        self.selection.is_expanded(phase)
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn zoom(&self) -> ZoomLevel {
        self.zoom
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}
