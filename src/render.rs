//! Immutable view snapshots.
//!
//! [`render`] turns (graph, view state) into a [`WorkflowView`] tree with
//! every lookup already resolved. [`RenderState`] wraps that tree with a
//! version number and keyboard-focus data for the render thread.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::state::{ViewMode, ViewState, ZoomLevel};
use crate::tea::{Focus, Notification};
use crate::workflow::{ColorToken, Icon, TaskStatus, Team, WorkflowGraph};

/// Unscaled width of a grid card, border included.
pub const GRID_CARD_WIDTH: u16 = 34;
/// Unscaled height of a grid card, border included.
pub const GRID_CARD_HEIGHT: u16 = 7;
/// Horizontal gap between grid cards.
pub const GRID_GAP: u16 = 2;
/// A card needs this many rows to show all of its lines.
const GRID_CARD_MIN_HEIGHT: u16 = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskView {
    pub id: String,
    pub title: String,
    pub description: Vec<String>,
    pub status: TaskStatus,
    pub warning: Option<String>,
    pub icon: Icon,
    /// Name of the team this task hands over to.
    pub link: Option<String>,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamCardView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub phase: String,
    pub icon: Icon,
    pub color: ColorToken,
    pub task_count: usize,
    pub completed_count: usize,
    pub warning_count: usize,
    pub selected: bool,
}

impl TeamCardView {
    fn new(team: &Team, selected: bool) -> Self {
        Self {
            id: team.id.clone(),
            name: team.name.clone(),
            description: team.description.clone(),
            phase: team.phase.clone(),
            icon: team.icon.clone(),
            color: team.color,
            task_count: team.tasks.len(),
            completed_count: team.completed_count(),
            warning_count: team.warning_count(),
            selected,
        }
    }

    /// "1 task" / "3 tasks".
    pub fn task_label(&self) -> String {
        let plural = if self.task_count == 1 { "" } else { "s" };
        format!("{} task{}", self.task_count, plural)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseGroupView {
    pub name: String,
    pub expanded: bool,
    pub teams: Vec<TeamCardView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamDetailView {
    pub team: TeamCardView,
    pub tasks: Vec<TaskView>,
}

impl TeamDetailView {
    pub fn selected_task_index(&self) -> Option<usize> {
        self.tasks.iter().position(|t| t.selected)
    }
}

/// One selectable line of the sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarRow {
    Phase(String),
    Team(String),
}

/// Fully resolved visual tree for one (graph, state) pair.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WorkflowView {
    pub title: String,
    pub subtitle: String,
    pub mode: ViewMode,
    pub zoom: ZoomLevel,
    pub phases: Vec<PhaseGroupView>,
    /// Every team in dataset order, for the grid.
    pub cards: Vec<TeamCardView>,
    /// `None` when no team is selected or the selected id does not resolve.
    pub detail: Option<TeamDetailView>,
}

impl WorkflowView {
    /// Phase headers plus the teams of expanded phases, top to bottom.
    pub fn sidebar_rows(&self) -> Vec<SidebarRow> {
        let mut rows = Vec::new();
        for group in &self.phases {
            rows.push(SidebarRow::Phase(group.name.clone()));
            if group.expanded {
                rows.extend(group.teams.iter().map(|t| SidebarRow::Team(t.id.clone())));
            }
        }
        rows
    }

    pub fn selected_card_index(&self) -> Option<usize> {
        self.cards.iter().position(|c| c.selected)
    }
}

/// Build the visual tree. Pure: reads the graph and state, touches nothing.
pub fn render(graph: &WorkflowGraph, state: &ViewState) -> WorkflowView {
    let selected_team = state.selected_team();
    let is_selected = |team: &Team| selected_team == Some(team.id.as_str());

    let phases = graph
        .group_by_phase()
        .groups()
        .iter()
        .map(|group| PhaseGroupView {
            name: group.phase.to_string(),
            expanded: state.is_expanded(group.phase),
            teams: group
                .teams
                .iter()
                .map(|&t| TeamCardView::new(t, is_selected(t)))
                .collect(),
        })
        .collect();

    let cards = graph
        .teams()
        .iter()
        .map(|t| TeamCardView::new(t, is_selected(t)))
        .collect();

    let detail = selected_team
        .and_then(|id| graph.find_team(id))
        .map(|team| TeamDetailView {
            team: TeamCardView::new(team, true),
            tasks: team
                .tasks
                .iter()
                .map(|task| TaskView {
                    id: task.id.clone(),
                    title: task.title.clone(),
                    description: task
                        .description_lines()
                        .into_iter()
                        .map(str::to_string)
                        .collect(),
                    status: task.status,
                    warning: task.warning_text().map(str::to_string),
                    icon: task.icon.clone(),
                    link: task
                        .link
                        .as_deref()
                        .and_then(|id| graph.find_team(id))
                        .map(|t| t.name.clone()),
                    selected: state.selected_task() == Some(task.id.as_str()),
                })
                .collect(),
        });

    WorkflowView {
        title: graph.title().to_string(),
        subtitle: graph.subtitle().to_string(),
        mode: state.mode(),
        zoom: state.zoom(),
        phases,
        cards,
        detail,
    }
}

/// Columns of grid cards that fit in `width` at `zoom`.
pub fn grid_columns(width: u16, zoom: ZoomLevel) -> usize {
    let cell = zoom.scale(GRID_CARD_WIDTH) + GRID_GAP;
    usize::from((width / cell).max(1))
}

/// Height of one grid card at `zoom`.
pub fn grid_card_height(zoom: ZoomLevel) -> u16 {
    zoom.scale(GRID_CARD_HEIGHT).max(GRID_CARD_MIN_HEIGHT)
}

static VERSION_COUNTER: AtomicU64 = AtomicU64::new(1);

pub fn next_version() -> u64 {
    VERSION_COUNTER.fetch_add(1, Ordering::Relaxed)
}

#[derive(Debug, Clone, Default)]
pub struct RenderState {
    pub version: u64,
    pub view: WorkflowView,
    pub focus: Focus,
    /// Index into `view.sidebar_rows()`.
    pub sidebar_cursor: usize,
    /// Index into `view.cards`.
    pub grid_cursor: usize,
    /// Grid columns the logic thread used for vertical cursor moves.
    pub grid_columns: usize,
    pub notification: Option<Notification>,
    /// Whether the keymap legend is expanded (toggled by '?')
    pub show_keymap: bool,
}
