//! The immutable workflow graph and its loader.
//!
//! A graph is built once at startup, either from the embedded dataset or
//! from a TOML/JSON file, and validated before anything reads it. After that
//! it is only enumerated and looked up by id.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{alog, alog_debug, Error, Result};

use super::phase_index::{group_by_phase, PhaseIndex};
use super::Team;

/// On-disk shape of a dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Dataset {
    #[serde(default)]
    title: String,
    #[serde(default)]
    subtitle: String,
    #[serde(default)]
    phases: Vec<String>,
    #[serde(default)]
    teams: Vec<Team>,
}

/// Dataset file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Toml,
    Json,
}

impl DataFormat {
    /// `.json` files are JSON; anything else is read as TOML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => DataFormat::Json,
            _ => DataFormat::Toml,
        }
    }
}

impl std::str::FromStr for DataFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "toml" => Ok(DataFormat::Toml),
            "json" => Ok(DataFormat::Json),
            other => Err(Error::UnsupportedFormat(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowGraph {
    title: String,
    subtitle: String,
    phases: Vec<String>,
    teams: Vec<Team>,
}

impl WorkflowGraph {
    /// Build a graph from declared phases and teams, validating it.
    pub fn new(phases: Vec<String>, teams: Vec<Team>) -> Result<Self> {
        let graph = Self {
            title: String::new(),
            subtitle: String::new(),
            phases,
            teams,
        };
        graph.validate()?;
        Ok(graph)
    }

    pub fn with_title(mut self, title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        self.title = title.into();
        self.subtitle = subtitle.into();
        self
    }

    /// The dataset shipped with the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(super::data::BUILTIN_DATASET)
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        Self::from_dataset(toml::from_str(s)?)
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        Self::from_dataset(serde_json::from_str(s)?)
    }

    /// Load and validate a dataset file.
    pub fn load(path: &Path) -> Result<Self> {
        alog_debug!("WorkflowGraph::load path={}", path.display());
        let content = fs::read_to_string(path)?;
        let graph = match DataFormat::from_path(path) {
            DataFormat::Json => Self::from_json_str(&content)?,
            DataFormat::Toml => Self::from_toml_str(&content)?,
        };
        alog!(
            "Loaded dataset {}: {} phases, {} teams",
            path.display(),
            graph.phases.len(),
            graph.teams.len()
        );
        Ok(graph)
    }

    fn from_dataset(dataset: Dataset) -> Result<Self> {
        Ok(Self::new(dataset.phases, dataset.teams)?.with_title(dataset.title, dataset.subtitle))
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(&self.to_dataset())?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_dataset())?)
    }

    pub fn export(&self, format: DataFormat) -> Result<String> {
        match format {
            DataFormat::Toml => self.to_toml_string(),
            DataFormat::Json => self.to_json_string(),
        }
    }

    fn to_dataset(&self) -> Dataset {
        Dataset {
            title: self.title.clone(),
            subtitle: self.subtitle.clone(),
            phases: self.phases.clone(),
            teams: self.teams.clone(),
        }
    }

    fn validate(&self) -> Result<()> {
        let declared: HashSet<&str> = self.phases.iter().map(String::as_str).collect();
        if declared.len() != self.phases.len() {
            return Err(Error::Validation("duplicate phase name".to_string()));
        }

        let mut team_ids = HashSet::new();
        for team in &self.teams {
            if team.id.trim().is_empty() {
                return Err(Error::Validation(format!(
                    "team '{}' has an empty id",
                    team.name
                )));
            }
            if !team_ids.insert(team.id.as_str()) {
                return Err(Error::Validation(format!("duplicate team id '{}'", team.id)));
            }
            if !declared.contains(team.phase.as_str()) {
                return Err(Error::Validation(format!(
                    "team '{}' references undeclared phase '{}'",
                    team.id, team.phase
                )));
            }

            let mut task_ids = HashSet::new();
            for task in &team.tasks {
                if task.id.trim().is_empty() {
                    return Err(Error::Validation(format!(
                        "task '{}' in team '{}' has an empty id",
                        task.title, team.id
                    )));
                }
                if !task_ids.insert(task.id.as_str()) {
                    return Err(Error::Validation(format!(
                        "duplicate task id '{}' in team '{}'",
                        task.id, team.id
                    )));
                }
            }
        }

        for team in &self.teams {
            for task in &team.tasks {
                if let Some(link) = &task.link {
                    if !team_ids.contains(link.as_str()) {
                        return Err(Error::Validation(format!(
                            "task '{}' in team '{}' links to unknown team '{}'",
                            task.id, team.id, link
                        )));
                    }
                }
            }
        }

        Ok(())
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn subtitle(&self) -> &str {
        &self.subtitle
    }

    pub fn phases(&self) -> &[String] {
        &self.phases
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn find_team(&self, id: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    pub fn team_position(&self, id: &str) -> Option<usize> {
        self.teams.iter().position(|t| t.id == id)
    }

    pub fn first_team(&self) -> Option<&Team> {
        self.teams.first()
    }

    pub fn task_count(&self) -> usize {
        self.teams.iter().map(|t| t.tasks.len()).sum()
    }

    pub fn group_by_phase(&self) -> PhaseIndex<'_> {
        group_by_phase(&self.phases, &self.teams)
    }
}
