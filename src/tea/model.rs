//! Model for the TEA (The Elm Architecture) pattern.
//!
//! The Model is pure application state - no channels, no handles, no runtime
//! infrastructure. View state proper lives in [`ViewState`]; the Model adds
//! keyboard bookkeeping (focus and cursors) on top of it.

use std::sync::Arc;

use crate::render::{self, next_version, RenderState, SidebarRow, WorkflowView};
use crate::state::{Controller, Intent, ViewMode, ViewState};
use crate::workflow::WorkflowGraph;

/// A transient message shown in the status bar until the next key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
}

/// Which interactive pane receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Teams,
    Tasks,
}

/// Pure application state - the single source of truth.
pub struct Model {
    pub graph: Arc<WorkflowGraph>,
    pub state: ViewState,

    // Keyboard bookkeeping
    pub focus: Focus,
    /// Index into the sidebar rows of the current view.
    pub sidebar_cursor: usize,
    /// Index into the grid cards.
    pub grid_cursor: usize,
    /// Last known terminal size (columns, rows).
    pub viewport: (u16, u16),

    pub notification: Option<Notification>,
    /// Whether the keymap legend is expanded (toggled by '?')
    pub show_keymap: bool,

    // Dirty flag - set when state changes and render is needed
    pub dirty: bool,
}

impl Model {
    pub fn new(graph: Arc<WorkflowGraph>, state: ViewState) -> Self {
        Self {
            graph,
            state,
            focus: Focus::default(),
            sidebar_cursor: 0,
            grid_cursor: 0,
            viewport: (80, 24),
            notification: None,
            show_keymap: false,
            dirty: true,
        }
    }

    /// Run an intent through the controller and keep the cursors on the
    /// selection when it moves.
    pub fn apply(&mut self, intent: Intent) {
        let before_team = self.state.selected_team().map(str::to_string);
        let before_mode = self.state.mode();

        self.state = Controller::new(&self.graph).apply(&self.state, intent);

        if self.state.selected_team() != before_team.as_deref() || self.state.mode() != before_mode
        {
            self.follow_selection();
        }
        self.clamp_cursors();
        self.dirty = true;
    }

    /// Resolved view of the current state.
    pub fn view(&self) -> WorkflowView {
        render::render(&self.graph, &self.state)
    }

    pub fn sidebar_rows(&self) -> Vec<SidebarRow> {
        self.view().sidebar_rows()
    }

    pub fn mode(&self) -> ViewMode {
        self.state.mode()
    }

    pub fn grid_columns(&self) -> usize {
        render::grid_columns(self.viewport.0, self.state.zoom())
    }

    /// Move cursors onto the selected team, where it is visible.
    pub fn follow_selection(&mut self) {
        let Some(selected) = self.state.selected_team().map(str::to_string) else {
            return;
        };
        let view = self.view();
        if let Some(row) = view
            .sidebar_rows()
            .iter()
            .position(|r| matches!(r, SidebarRow::Team(id) if *id == selected))
        {
            self.sidebar_cursor = row;
        }
        if let Some(card) = view.selected_card_index() {
            self.grid_cursor = card;
        }
    }

    fn clamp_cursors(&mut self) {
        let rows = self.sidebar_rows().len();
        self.sidebar_cursor = self.sidebar_cursor.min(rows.saturating_sub(1));
        let cards = self.graph.teams().len();
        self.grid_cursor = self.grid_cursor.min(cards.saturating_sub(1));
    }

    /// Create an immutable snapshot for the render thread.
    ///
    /// Each snapshot gets a monotonically increasing version number so the
    /// render thread can skip redundant draws.
    pub fn snapshot(&self) -> RenderState {
        RenderState {
            version: next_version(),
            view: self.view(),
            focus: self.focus,
            sidebar_cursor: self.sidebar_cursor,
            grid_cursor: self.grid_cursor,
            grid_columns: self.grid_columns(),
            notification: self.notification.clone(),
            show_keymap: self.show_keymap,
        }
    }
}
