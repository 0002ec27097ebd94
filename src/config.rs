use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::{ViewMode, ViewState, ZoomLevel};
use crate::workflow::WorkflowGraph;
use crate::{alog_debug, alog_warn, Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Dataset file to load instead of the built-in one.
    pub data: Option<String>,
    /// Presentation mode on startup.
    pub view: Option<ViewMode>,
    /// Zoom factor on startup, clamped to the supported range.
    pub zoom: Option<f64>,
    /// Phases expanded on startup. Defaults to the first two declared phases.
    pub expanded_phases: Option<Vec<String>>,
}

impl Config {
    pub fn app_dir() -> Result<PathBuf> {
        Ok(dirs::home_dir().ok_or(Error::NoHomeDir)?.join(".ambattur"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::app_dir()?.join("config.toml"))
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        alog_debug!("Config::load path={}", path.display());
        if !path.exists() {
            alog_debug!("Config file not found, using defaults");
            return Ok(Self::default());
        }
        let config: Self = toml::from_str(&fs::read_to_string(path)?)?;
        alog_debug!(
            "Config loaded: data={:?}, view={:?}, zoom={:?}, expanded_phases={:?}",
            config.data,
            config.view,
            config.zoom,
            config.expanded_phases
        );
        Ok(config)
    }

    /// Dataset path with `~/` expanded.
    pub fn data_path(&self) -> Option<PathBuf> {
        self.data.as_deref().map(expand_tilde)
    }

    /// Load the configured dataset, or the built-in one.
    pub fn load_graph(&self) -> Result<WorkflowGraph> {
        match self.data_path() {
            Some(path) => WorkflowGraph::load(&path),
            None => WorkflowGraph::builtin(),
        }
    }

    /// Starting view state for `graph` with configured overrides applied.
    pub fn initial_state(&self, graph: &WorkflowGraph) -> ViewState {
        let mut state = ViewState::initial(graph);
        if let Some(mode) = self.view {
            state = state.with_mode(mode);
        }
        if let Some(zoom) = self.zoom {
            let level = ZoomLevel::from_factor(zoom);
            if (level.factor() - zoom).abs() > f64::EPSILON {
                alog_warn!("Config zoom {} adjusted to {}", zoom, level);
            }
            state = state.with_zoom(level);
        }
        if let Some(phases) = &self.expanded_phases {
            for phase in phases {
                if !graph.phases().contains(phase) {
                    alog_warn!("Config expands unknown phase '{}'", phase);
                }
            }
            state = state.with_expanded_phases(phases.iter().cloned());
        }
        state
    }
}

fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}
