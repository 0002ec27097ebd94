//! Controller transitions over whole graphs.
//!
//! Each test walks a ViewState through the controller the way a user
//! session would and checks the resolved selection afterwards.

use ambattur::render::render;
use ambattur::state::{Controller, Intent, ViewMode, ViewState, ZoomLevel};
use ambattur::workflow::group_by_phase;

use crate::fixtures::{builtin, shared_phase_graph, two_team_graph};

/// Test: Grouping keeps dataset order
/// Given A (P1, [t1, t2]) and B (P1, [t3])
/// When teams are grouped by phase
/// Then P1 → [A, B] and A keeps its task order
#[test]
fn test_grouping_scenario() {
    let graph = shared_phase_graph();

    let index = group_by_phase(graph.phases(), graph.teams());

    let p1 = index.get("P1").unwrap();
    let ids: Vec<&str> = p1.teams.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["A", "B"]);
    let tasks: Vec<&str> = p1.teams[0].tasks.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(tasks, vec!["t1", "t2"]);
    assert_eq!(p1.task_count(), 3);
}

/// Test: Grouping preserves the total task count of the built-in dataset
#[test]
fn test_grouping_preserves_task_total() {
    let graph = builtin();
    let index = graph.group_by_phase();

    let expected: usize = graph.teams().iter().map(|t| t.tasks.len()).sum();
    assert_eq!(index.total_tasks(), expected);
    assert_eq!(index.team_count(), graph.teams().len());
}

/// Test: Initialize runs once
/// Given teams [X, Y] and no selection
/// When initialize runs
/// Then X is selected, and a later initialize with Y selected keeps Y
#[test]
fn test_initialize_scenario() {
    let graph = two_team_graph();
    let ctl = Controller::new(&graph);

    let state = ctl.initialize(&ViewState::initial(&graph));
    assert_eq!(state.selected_team(), Some("X"));

    let state = ctl.select_team(&state, "Y");
    let state = ctl.initialize(&state);
    assert_eq!(state.selected_team(), Some("Y"));
}

/// Test: Opening a card from the grid
/// Given grid mode with X selected
/// When Y is opened from the grid
/// Then the next state is interactive with Y selected
#[test]
fn test_grid_open_scenario() {
    let graph = two_team_graph();
    let ctl = Controller::new(&graph);
    let state = ctl.initialize(&ViewState::initial(&graph));
    let state = ctl.switch_view_mode(&state, ViewMode::Grid);

    let next = ctl.open_team_from_grid(&state, "Y");

    assert_eq!(next.mode(), ViewMode::Interactive);
    assert_eq!(next.selected_team(), Some("Y"));
}

/// Test: Every built-in team is selectable, unknown ids are ignored
#[test]
fn test_select_every_builtin_team() {
    let graph = builtin();
    let ctl = Controller::new(&graph);
    let mut state = ViewState::initial(&graph);

    for team in graph.teams() {
        state = ctl.select_team(&state, &team.id);
        assert_eq!(state.selected_team(), Some(team.id.as_str()));
        assert_eq!(
            render(&graph, &state).detail.map(|d| d.team.id),
            Some(team.id.clone())
        );
    }

    let before = state.clone();
    let after = ctl.select_team(&state, "not-a-team");
    assert_eq!(after, before);
}

/// Test: Following the built-in hand-off chain
/// Given merchandising is selected
/// When the linked tasks are activated in turn
/// Then the selection walks merchandising → planning, and fabric → import
///      → commercial → supplier
#[test]
fn test_builtin_link_chain() {
    let graph = builtin();
    let ctl = Controller::new(&graph);
    let state = ctl.select_team(&ViewState::initial(&graph), "merchandising");

    let state = ctl.activate_task(&state, "planning");
    assert_eq!(state.selected_team(), Some("planning"));
    assert_eq!(state.selected_task(), None);

    let state = ctl.select_team(&state, "fabric");
    let state = ctl.activate_task(&state, "material-requirement");
    assert_eq!(state.selected_team(), Some("import"));
    let state = ctl.activate_task(&state, "send-to-commercial");
    assert_eq!(state.selected_team(), Some("commercial"));
    let state = ctl.activate_task(&state, "forward-to-supplier");
    assert_eq!(state.selected_team(), Some("supplier"));
}

/// Test: Activating an unlinked task only selects it
#[test]
fn test_activate_unlinked_task() {
    let graph = two_team_graph();
    let ctl = Controller::new(&graph);
    let state = ctl.initialize(&ViewState::initial(&graph));

    let state = ctl.activate_task(&state, "prepare");

    assert_eq!(state.selected_team(), Some("X"));
    assert_eq!(state.selected_task(), Some("prepare"));
}

/// Test: Phase toggles are an involution over every declared phase
#[test]
fn test_toggle_every_phase_twice() {
    let graph = builtin();
    let ctl = Controller::new(&graph);
    let start = ViewState::initial(&graph);

    for phase in graph.phases() {
        let once = ctl.toggle_phase(&start, phase);
        assert_ne!(once.is_expanded(phase), start.is_expanded(phase));
        let twice = ctl.toggle_phase(&once, phase);
        assert_eq!(twice, start);
    }
}

/// Test: Zoom stays inside its bounds under repeated steps
#[test]
fn test_zoom_bounds_through_apply() {
    let graph = two_team_graph();
    let ctl = Controller::new(&graph);
    let mut state = ViewState::initial(&graph);

    for _ in 0..12 {
        state = ctl.apply(&state, Intent::ZoomIn);
        assert!(state.zoom() <= ZoomLevel::MAX);
    }
    assert_eq!(state.zoom().factor(), 1.5);

    for _ in 0..12 {
        state = ctl.apply(&state, Intent::ZoomOut);
        assert!(state.zoom() >= ZoomLevel::MIN);
    }
    assert_eq!(state.zoom().factor(), 0.7);
}

/// Test: Dangling selections degrade to the placeholder
#[test]
fn test_dangling_selection_renders_placeholder() {
    let graph = two_team_graph();
    let state = ViewState::initial(&graph).with_selection(Some("gone"), None);

    let view = render(&graph, &state);

    assert!(view.detail.is_none());
    assert!(view.cards.iter().all(|c| !c.selected));
}
