//! Loader, validation and export against files on disk.

use ambattur::config::Config;
use ambattur::workflow::{DataFormat, TaskStatus, WorkflowGraph};
use ambattur::Error;

use crate::fixtures::{builtin, DatasetFile};

const SMALL_TOML: &str = r#"
title = "Cutting Room"
subtitle = "Bundle flow"
phases = ["Prepare", "Cut"]

[[teams]]
id = "marker"
name = "Marker Team"
phase = "Prepare"

[[teams.tasks]]
id = "plan"
title = "Plan marker"
description = "Width check\nEfficiency check"
link = "cutter"

[[teams]]
id = "cutter"
name = "Cutting Team"
phase = "Cut"
color = "warning"

[[teams.tasks]]
id = "cut"
title = "Cut bundles"
status = "critical"
warning = "Manual count"
"#;

/// Test: A TOML dataset loads with all optional fields resolved
#[test]
fn test_load_toml_dataset() {
    let file = DatasetFile::new("cutting.toml", SMALL_TOML);

    let graph = WorkflowGraph::load(&file.path).unwrap();

    assert_eq!(graph.title(), "Cutting Room");
    assert_eq!(graph.phases(), ["Prepare".to_string(), "Cut".to_string()]);
    let plan = graph.find_team("marker").unwrap().find_task("plan").unwrap();
    assert_eq!(plan.description_lines(), vec!["Width check", "Efficiency check"]);
    assert_eq!(plan.link.as_deref(), Some("cutter"));
    let cut = graph.find_team("cutter").unwrap().find_task("cut").unwrap();
    assert_eq!(cut.status, TaskStatus::Critical);
    assert_eq!(cut.warning_text(), Some("Manual count"));
}

/// Test: JSON export of a loaded file loads back to the same graph
#[test]
fn test_json_export_reloads() {
    let source = DatasetFile::new("cutting.toml", SMALL_TOML);
    let graph = WorkflowGraph::load(&source.path).unwrap();

    let json = graph.export(DataFormat::Json).unwrap();
    let copy = DatasetFile::new("cutting.json", &json);

    assert_eq!(WorkflowGraph::load(&copy.path).unwrap(), graph);
}

/// Test: The built-in dataset survives a TOML export
#[test]
fn test_builtin_toml_export_reloads() {
    let graph = builtin();
    let toml = graph.export(DataFormat::Toml).unwrap();
    assert_eq!(WorkflowGraph::from_toml_str(&toml).unwrap(), graph);
}

/// Test: Validation failures are reported, not panicked on
#[test]
fn test_invalid_datasets_are_rejected() {
    let cases = [
        (
            "dup-team.json",
            r#"{"phases": ["P"], "teams": [
                {"id": "a", "name": "A", "phase": "P"},
                {"id": "a", "name": "A again", "phase": "P"}]}"#,
        ),
        (
            "dup-task.json",
            r#"{"phases": ["P"], "teams": [
                {"id": "a", "name": "A", "phase": "P",
                 "tasks": [{"id": "t", "title": "T"}, {"id": "t", "title": "T2"}]}]}"#,
        ),
        (
            "undeclared.json",
            r#"{"phases": ["P"], "teams": [{"id": "a", "name": "A", "phase": "Q"}]}"#,
        ),
        (
            "dangling.json",
            r#"{"phases": ["P"], "teams": [
                {"id": "a", "name": "A", "phase": "P",
                 "tasks": [{"id": "t", "title": "T", "link": "nowhere"}]}]}"#,
        ),
    ];

    for (name, contents) in cases {
        let file = DatasetFile::new(name, contents);
        let result = WorkflowGraph::load(&file.path);
        assert!(
            matches!(result, Err(Error::Validation(_))),
            "{name} should fail validation, got {result:?}"
        );
    }
}

/// Test: Syntax errors surface as parse errors of the right format
#[test]
fn test_parse_errors_by_format() {
    let toml = DatasetFile::new("broken.toml", "phases = [");
    assert!(matches!(
        WorkflowGraph::load(&toml.path),
        Err(Error::TomlParse(_))
    ));

    let json = DatasetFile::new("broken.json", "{\"phases\": ");
    assert!(matches!(WorkflowGraph::load(&json.path), Err(Error::Json(_))));
}

/// Test: Unknown status tags are rejected by the parser
#[test]
fn test_unknown_status_is_rejected() {
    let file = DatasetFile::new(
        "status.toml",
        r#"
phases = ["P"]

[[teams]]
id = "a"
name = "A"
phase = "P"

[[teams.tasks]]
id = "t"
title = "T"
status = "urgent"
"#,
    );
    assert!(WorkflowGraph::load(&file.path).is_err());
}

/// Test: Missing files are IO errors
#[test]
fn test_missing_file() {
    let file = DatasetFile::new("present.toml", SMALL_TOML);
    let missing = file.path.with_file_name("absent.toml");
    assert!(matches!(WorkflowGraph::load(&missing), Err(Error::Io(_))));
}

/// Test: Config points the app at a dataset file and shapes the first view
#[test]
fn test_config_drives_startup() {
    let file = DatasetFile::new("cutting.toml", SMALL_TOML);
    let config_file = DatasetFile::new(
        "config.toml",
        &format!(
            "data = {:?}\nview = \"grid\"\nzoom = 1.3\nexpanded_phases = [\"Cut\"]\n",
            file.path.to_string_lossy()
        ),
    );

    let config = Config::load_from(&config_file.path).unwrap();
    let graph = config.load_graph().unwrap();
    let state = config.initial_state(&graph);

    assert_eq!(graph.title(), "Cutting Room");
    assert_eq!(state.mode(), ambattur::state::ViewMode::Grid);
    assert_eq!(state.zoom().percent(), 130);
    assert!(state.is_expanded("Cut"));
    assert!(!state.is_expanded("Prepare"));
}

/// Test: Without a configured file the built-in dataset is used
#[test]
fn test_default_config_uses_builtin() {
    let graph = Config::default().load_graph().unwrap();
    assert_eq!(graph, builtin());
}
