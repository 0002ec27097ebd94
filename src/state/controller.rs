//! Selection controller: user intents in, new view state out.
//!
//! Every operation is total. Unknown ids leave the state as it was and zoom
//! requests past a bound are absorbed by clamping.

use crate::alog_debug;
use crate::workflow::WorkflowGraph;

use super::{ViewMode, ViewState};

/// A discrete user intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// One-time startup selection of the first team
    Initialize,
    SelectTeam(String),
    SelectTask(String),
    /// Select a task, or jump to its linked team if it has one
    ActivateTask(String),
    TogglePhase(String),
    SwitchViewMode(ViewMode),
    /// Grid card click: select the team and return to interactive mode
    OpenTeamFromGrid(String),
    ZoomIn,
    ZoomOut,
}

#[derive(Debug, Clone, Copy)]
pub struct Controller<'g> {
    graph: &'g WorkflowGraph,
}

impl<'g> Controller<'g> {
    pub fn new(graph: &'g WorkflowGraph) -> Self {
        Self { graph }
    }

    pub fn apply(&self, state: &ViewState, intent: Intent) -> ViewState {
        alog_debug!("Controller::apply {:?}", intent);
        match intent {
            Intent::Initialize => self.initialize(state),
            Intent::SelectTeam(id) => self.select_team(state, &id),
            Intent::SelectTask(id) => self.select_task(state, &id),
            Intent::ActivateTask(id) => self.activate_task(state, &id),
            Intent::TogglePhase(phase) => self.toggle_phase(state, &phase),
            Intent::SwitchViewMode(mode) => self.switch_view_mode(state, mode),
            Intent::OpenTeamFromGrid(id) => self.open_team_from_grid(state, &id),
            Intent::ZoomIn => self.zoom_in(state),
            Intent::ZoomOut => self.zoom_out(state),
        }
    }

    /// Select the first team, once. Later calls never touch the selection.
    pub fn initialize(&self, state: &ViewState) -> ViewState {
        let mut next = state.clone();
        if next.initialized {
            return next;
        }
        next.initialized = true;
        if next.selection.selected_team.is_none() {
            if let Some(first) = self.graph.first_team() {
                alog_debug!("Initial selection: {}", first.id);
                next.selection.selected_team = Some(first.id.clone());
                next.selection.selected_task = None;
            }
        }
        next
    }

    /// Select `team_id` if it exists. Changing team clears the task selection.
    pub fn select_team(&self, state: &ViewState, team_id: &str) -> ViewState {
        let mut next = state.clone();
        let Some(team) = self.graph.find_team(team_id) else {
            alog_debug!("select_team ignored unknown id '{}'", team_id);
            return next;
        };
        if next.selection.selected_team.as_deref() != Some(team.id.as_str()) {
            next.selection.selected_team = Some(team.id.clone());
            next.selection.selected_task = None;
        }
        next
    }

    /// Record `task_id` as selected. Membership in the selected team is
    /// resolved at render time.
    pub fn select_task(&self, state: &ViewState, task_id: &str) -> ViewState {
        let mut next = state.clone();
        next.selection.selected_task = Some(task_id.to_string());
        next
    }

    /// Follow the task's link when it points at another known team,
    /// otherwise select the task.
    pub fn activate_task(&self, state: &ViewState, task_id: &str) -> ViewState {
        let current = state.selected_team();
        let link = current
            .and_then(|id| self.graph.find_team(id))
            .and_then(|team| team.find_task(task_id))
            .and_then(|task| task.link.as_deref())
            .filter(|&target| Some(target) != current)
            .filter(|target| self.graph.find_team(target).is_some());

        match link {
            Some(target) => {
                alog_debug!("Task '{}' links to team '{}'", task_id, target);
                self.select_team(state, target)
            }
            None => self.select_task(state, task_id),
        }
    }

    /// Expand a collapsed phase or collapse an expanded one.
    pub fn toggle_phase(&self, state: &ViewState, phase: &str) -> ViewState {
        let mut next = state.clone();
        if !next.selection.expanded_phases.remove(phase) {
            next.selection.expanded_phases.insert(phase.to_string());
        }
        next
    }

    pub fn switch_view_mode(&self, state: &ViewState, mode: ViewMode) -> ViewState {
        let mut next = state.clone();
        next.mode = mode;
        next
    }

    /// Select `team_id` and switch to interactive mode in a single step.
    /// Unknown ids leave the state unchanged, grid included.
    pub fn open_team_from_grid(&self, state: &ViewState, team_id: &str) -> ViewState {
        if self.graph.find_team(team_id).is_none() {
            alog_debug!("open_team_from_grid ignored unknown id '{}'", team_id);
            return state.clone();
        }
        let mut next = self.select_team(state, team_id);
        next.mode = ViewMode::Interactive;
        next
    }

    pub fn zoom_in(&self, state: &ViewState) -> ViewState {
        let mut next = state.clone();
        next.zoom = next.zoom.stepped_in();
        next
    }

    pub fn zoom_out(&self, state: &ViewState) -> ViewState {
        let mut next = state.clone();
        next.zoom = next.zoom.stepped_out();
        next
    }
}
