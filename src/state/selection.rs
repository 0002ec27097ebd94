use std::collections::BTreeSet;

/// Which team and task are selected, and which phases are expanded.
///
/// Holds ids only. An id that no longer resolves renders as "nothing
/// selected" rather than failing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionState {
    pub(super) selected_team: Option<String>,
    pub(super) selected_task: Option<String>,
    pub(super) expanded_phases: BTreeSet<String>,
}

impl SelectionState {
    pub fn selected_team(&self) -> Option<&str> {
        self.selected_team.as_deref()
    }

    pub fn selected_task(&self) -> Option<&str> {
        self.selected_task.as_deref()
    }

    pub fn expanded_phases(&self) -> &BTreeSet<String> {
        &self.expanded_phases
    }

    pub fn is_expanded(&self, phase: &str) -> bool {
        self.expanded_phases.contains(phase)
    }
}
