//! Key sequences through the TEA update loop.
//!
//! These mirror what the logic thread does with terminal events: every key
//! becomes a `Message::Key`, and the resulting model is what the next
//! snapshot shows.

use crossterm::event::KeyCode;

use ambattur::render::SidebarRow;
use ambattur::state::{Intent, ViewMode};
use ambattur::tea::{update, Command, Focus, Message};

use crate::fixtures::{apply_all, builtin, press_all, started_model, two_team_graph};

/// Test: Startup selects the first team and parks the cursor on it
#[test]
fn test_startup_selects_first_team() {
    let model = started_model(builtin());

    assert_eq!(model.state.selected_team(), Some("buyer"));
    assert_eq!(
        model.sidebar_rows().get(model.sidebar_cursor),
        Some(&SidebarRow::Team("buyer".to_string()))
    );
    let snapshot = model.snapshot();
    assert_eq!(snapshot.view.detail.unwrap().team.name, "Buyer");
}

/// Test: Walk the sidebar down to a team and open it
/// Given the built-in dataset after startup
/// When the cursor moves down once and Enter is pressed
/// Then the next team in the first phase is selected
#[test]
fn test_sidebar_walk_selects_team() {
    let mut model = started_model(builtin());

    press_all(&mut model, &[KeyCode::Char('j'), KeyCode::Enter]);

    assert_eq!(model.state.selected_team(), Some("merchandising"));
}

/// Test: Expanding a collapsed phase from the keyboard
/// Given Phase 3 starts collapsed
/// When the cursor reaches its header and Space is pressed
/// Then its teams appear in the sidebar
#[test]
fn test_expand_phase_from_keyboard() {
    let mut model = started_model(builtin());
    let phase = "Phase 3: Commercial & LC".to_string();
    let header = model
        .sidebar_rows()
        .iter()
        .position(|r| *r == SidebarRow::Phase(phase.clone()))
        .unwrap();
    let teams_before = model.sidebar_rows().len();

    model.sidebar_cursor = header;
    press_all(&mut model, &[KeyCode::Char(' ')]);

    assert!(model.state.is_expanded(&phase));
    assert_eq!(model.sidebar_rows().len(), teams_before + 2);
    assert_eq!(
        model.sidebar_rows()[header + 1],
        SidebarRow::Team("commercial-lc".to_string())
    );
}

/// Test: Following a hand-off from the tasks pane
/// Given team X with a linked last task
/// When focus moves to tasks, the last task is selected and activated
/// Then Y is selected with no task and a notification names the jump
#[test]
fn test_follow_link_from_tasks_pane() {
    let mut model = started_model(two_team_graph());

    press_all(&mut model, &[KeyCode::Tab, KeyCode::Up, KeyCode::Enter]);

    assert_eq!(model.state.selected_team(), Some("Y"));
    assert_eq!(model.state.selected_task(), None);
    assert_eq!(model.focus, Focus::Tasks);
    assert_eq!(
        model.notification.as_ref().map(|n| n.message.as_str()),
        Some("Hand off → Team Y")
    );

    press_all(&mut model, &[KeyCode::Char('j')]);
    assert_eq!(model.state.selected_task(), Some("receive"));
    assert!(model.notification.is_none());
}

/// Test: Grid round trip
/// Given interactive mode with X selected
/// When g switches to the grid, the cursor moves right and Enter is pressed
/// Then the app is back in interactive mode with Y selected
#[test]
fn test_grid_round_trip() {
    let mut model = started_model(two_team_graph());

    press_all(&mut model, &[KeyCode::Char('g')]);
    assert_eq!(model.mode(), ViewMode::Grid);
    assert_eq!(model.grid_cursor, 0);

    press_all(&mut model, &[KeyCode::Char('l'), KeyCode::Enter]);

    assert_eq!(model.mode(), ViewMode::Interactive);
    assert_eq!(model.state.selected_team(), Some("Y"));
}

/// Test: Zoom changes the grid column count
#[test]
fn test_zoom_changes_grid_columns() {
    let mut model = started_model(builtin());
    update(&mut model, Message::Resize(144, 40));
    press_all(&mut model, &[KeyCode::Char('g')]);
    let normal = model.grid_columns();

    press_all(&mut model, &[KeyCode::Char('+'); 5]);
    let zoomed = model.grid_columns();
    press_all(&mut model, &[KeyCode::Char('-'); 8]);
    let shrunk = model.grid_columns();

    assert_eq!(normal, 4);
    assert!(zoomed < normal);
    assert!(shrunk > normal);
    assert_eq!(model.state.zoom().percent(), 70);
}

/// Test: Quit keys
#[test]
fn test_quit_keys() {
    let mut model = started_model(builtin());
    assert_eq!(press_all(&mut model, &[KeyCode::Char('q')]), vec![Command::Quit]);

    let mut model = started_model(builtin());
    press_all(&mut model, &[KeyCode::Tab]);
    assert!(press_all(&mut model, &[KeyCode::Esc]).is_empty());
    assert_eq!(press_all(&mut model, &[KeyCode::Esc]), vec![Command::Quit]);
}

/// Test: Intents sent as messages behave like key presses
#[test]
fn test_intent_messages() {
    let mut model = started_model(builtin());

    apply_all(
        &mut model,
        vec![
            Intent::SwitchViewMode(ViewMode::Grid),
            Intent::OpenTeamFromGrid("production".to_string()),
        ],
    );

    assert_eq!(model.mode(), ViewMode::Interactive);
    assert_eq!(model.state.selected_team(), Some("production"));
    // Production sits in a collapsed phase, so only the grid cursor follows.
    assert_eq!(model.grid_cursor, model.graph.teams().len() - 1);
}
