//! Update function for the TEA (The Elm Architecture) pattern.
//!
//! Takes a model and a message, maps keys to controller intents or cursor
//! moves, and returns the commands the runtime must execute.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::alog_debug;
use crate::render::SidebarRow;
use crate::state::{Intent, ViewMode};

use super::command::Command;
use super::message::Message;
use super::model::{Focus, Model, Notification};

/// Model + Message → Commands
///
/// Mutates the model (setting the dirty flag when a render is needed) and
/// returns side effects for the runtime. Performs no I/O itself.
pub fn update(model: &mut Model, msg: Message) -> Vec<Command> {
    let mut cmds = Vec::new();

    match msg {
        Message::Init => {
            model.apply(Intent::Initialize);
        }

        Message::Key(key) => {
            if key.kind == KeyEventKind::Release {
                return cmds;
            }
            model.notification = None; // Clear notification on any key press
            model.dirty = true; // Keyboard input always triggers render
            if !update_global(model, key, &mut cmds) {
                match (model.mode(), model.focus) {
                    (ViewMode::Grid, _) => update_grid_mode(model, key, &mut cmds),
                    (ViewMode::Interactive, Focus::Teams) => {
                        update_teams_pane(model, key, &mut cmds)
                    }
                    (ViewMode::Interactive, Focus::Tasks) => update_tasks_pane(model, key),
                }
            }
        }

        Message::Resize(width, height) => {
            model.viewport = (width, height);
            model.dirty = true; // Resize triggers re-render
        }

        Message::Intent(intent) => {
            model.apply(intent);
        }
    }

    cmds
}

/// Keys that behave the same everywhere. Returns true when handled.
fn update_global(model: &mut Model, key: KeyEvent, cmds: &mut Vec<Command>) -> bool {
    match key.code {
        KeyCode::Char('q') => cmds.push(Command::Quit),
        KeyCode::Char('?') => model.show_keymap = !model.show_keymap,
        KeyCode::Char('g') => {
            let mode = model.mode().toggled();
            alog_debug!("Switching view mode to {:?}", mode);
            model.apply(Intent::SwitchViewMode(mode));
            model.focus = Focus::Teams;
        }
        KeyCode::Char('+') | KeyCode::Char('=') => model.apply(Intent::ZoomIn),
        KeyCode::Char('-') => model.apply(Intent::ZoomOut),
        _ => return false,
    }
    true
}

fn update_teams_pane(model: &mut Model, key: KeyEvent, cmds: &mut Vec<Command>) {
    let rows = model.sidebar_rows();

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            if !rows.is_empty() {
                model.sidebar_cursor = (model.sidebar_cursor + 1) % rows.len();
            }
        }

        KeyCode::Char('k') | KeyCode::Up => {
            if !rows.is_empty() {
                model.sidebar_cursor = model
                    .sidebar_cursor
                    .checked_sub(1)
                    .unwrap_or(rows.len() - 1);
            }
        }

        KeyCode::Enter | KeyCode::Char(' ') => match rows.get(model.sidebar_cursor) {
            Some(SidebarRow::Phase(phase)) => model.apply(Intent::TogglePhase(phase.clone())),
            Some(SidebarRow::Team(id)) => model.apply(Intent::SelectTeam(id.clone())),
            None => {}
        },

        KeyCode::Tab | KeyCode::Char('l') | KeyCode::Right => {
            if model.view().detail.is_some() {
                model.focus = Focus::Tasks;
            }
        }

        KeyCode::Esc => cmds.push(Command::Quit),

        _ => {}
    }
}

fn update_tasks_pane(model: &mut Model, key: KeyEvent) {
    let Some(detail) = model.view().detail else {
        model.focus = Focus::Teams;
        return;
    };
    let current = detail.selected_task_index();
    let count = detail.tasks.len();

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            if count > 0 {
                let next = current.map_or(0, |i| (i + 1) % count);
                model.apply(Intent::SelectTask(detail.tasks[next].id.clone()));
            }
        }

        KeyCode::Char('k') | KeyCode::Up => {
            if count > 0 {
                let prev = current.map_or(count - 1, |i| i.checked_sub(1).unwrap_or(count - 1));
                model.apply(Intent::SelectTask(detail.tasks[prev].id.clone()));
            }
        }

        KeyCode::Enter | KeyCode::Char(' ') => {
            if let Some(task) = current.map(|i| &detail.tasks[i]) {
                model.apply(Intent::ActivateTask(task.id.clone()));
                if let Some(target) = &task.link {
                    if model.state.selected_team() != Some(detail.team.id.as_str()) {
                        model.notification = Some(Notification {
                            message: format!("{} → {}", task.title, target),
                        });
                    }
                }
            }
        }

        KeyCode::Tab | KeyCode::Char('h') | KeyCode::Left | KeyCode::Esc => {
            model.focus = Focus::Teams;
        }

        _ => {}
    }
}

fn update_grid_mode(model: &mut Model, key: KeyEvent, cmds: &mut Vec<Command>) {
    let cards = model.graph.teams().len();
    if cards == 0 {
        if key.code == KeyCode::Esc {
            cmds.push(Command::Quit);
        }
        return;
    }
    let last = cards - 1;
    let columns = model.grid_columns();

    match key.code {
        KeyCode::Char('l') | KeyCode::Right => {
            model.grid_cursor = (model.grid_cursor + 1).min(last);
        }
        KeyCode::Char('h') | KeyCode::Left => {
            model.grid_cursor = model.grid_cursor.saturating_sub(1);
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if model.grid_cursor + columns <= last {
                model.grid_cursor += columns;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            if model.grid_cursor >= columns {
                model.grid_cursor -= columns;
            }
        }

        KeyCode::Enter | KeyCode::Char(' ') => {
            if let Some(team) = model.graph.teams().get(model.grid_cursor) {
                let id = team.id.clone();
                model.apply(Intent::OpenTeamFromGrid(id));
                model.focus = Focus::Teams;
            }
        }

        KeyCode::Esc => cmds.push(Command::Quit),

        _ => {}
    }
}
