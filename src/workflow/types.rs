//! Core workflow type definitions: teams, tasks and their presentation handles.

use serde::{Deserialize, Serialize};

/// Status of a task within the process flow.
///
/// Drives presentation only (colour, glyph, badge); the mapping from tag to
/// attributes lives in the UI layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Ordinary step with nothing to flag
    #[default]
    Normal,
    /// Step with a known pain point (manual tracking, email-only updates)
    Warning,
    /// Milestone step (order confirmed, LC approved, dispatch)
    Success,
    /// Step that blocks the flow
    Critical,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::Normal,
        TaskStatus::Warning,
        TaskStatus::Success,
        TaskStatus::Critical,
    ];
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskStatus::Normal => write!(f, "normal"),
            TaskStatus::Warning => write!(f, "warning"),
            TaskStatus::Success => write!(f, "success"),
            TaskStatus::Critical => write!(f, "critical"),
        }
    }
}

/// Opaque icon handle. The presentation layer decides what it looks like.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Icon(pub String);

impl Icon {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Icon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Accent colour token for a team lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ColorToken {
    #[default]
    Primary,
    Accent,
    Success,
    Warning,
    Info,
    Muted,
}

/// A discrete activity owned by a team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique within the owning team only.
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub status: TaskStatus,
    /// Warning annotation; present means the warning flag is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(default)]
    pub icon: Icon,
    /// Team this step hands over to. Activating the task opens that team.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl Task {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            status: TaskStatus::Normal,
            warning: None,
            icon: Icon::default(),
            link: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_warning(mut self, text: impl Into<String>) -> Self {
        self.warning = Some(text.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Icon::new(icon);
        self
    }

    pub fn with_link(mut self, team_id: impl Into<String>) -> Self {
        self.link = Some(team_id.into());
        self
    }

    /// Warning text, if the warning flag is set and the text is non-empty.
    pub fn warning_text(&self) -> Option<&str> {
        self.warning.as_deref().filter(|w| !w.trim().is_empty())
    }

    /// Description split into display lines.
    pub fn description_lines(&self) -> Vec<&str> {
        self.description
            .as_deref()
            .map(|d| d.lines().map(str::trim).filter(|l| !l.is_empty()).collect())
            .unwrap_or_default()
    }
}

/// An organizational unit performing an ordered sequence of tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Phase name; must be declared by the owning graph.
    pub phase: String,
    #[serde(default)]
    pub icon: Icon,
    #[serde(default)]
    pub color: ColorToken,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Team {
    pub fn new(id: impl Into<String>, name: impl Into<String>, phase: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            phase: phase.into(),
            icon: Icon::default(),
            color: ColorToken::default(),
            tasks: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_tasks(mut self, tasks: Vec<Task>) -> Self {
        self.tasks = tasks;
        self
    }

    pub fn find_task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    pub fn task_position(&self, task_id: &str) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == task_id)
    }

    /// Number of tasks with `Success` status.
    pub fn completed_count(&self) -> usize {
        self.count_status(TaskStatus::Success)
    }

    /// Number of tasks carrying a warning annotation.
    pub fn warning_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.warning_text().is_some()).count()
    }

    pub fn count_status(&self, status: TaskStatus) -> usize {
        self.tasks.iter().filter(|t| t.status == status).count()
    }
}
