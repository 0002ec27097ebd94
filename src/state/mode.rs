use serde::{Deserialize, Serialize};

/// Presentation mode. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    /// Phase sidebar plus the selected team's process flow
    #[default]
    Interactive,
    /// Overview of every team as a card
    Grid,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Interactive => ViewMode::Grid,
            ViewMode::Grid => ViewMode::Interactive,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ViewMode::Interactive => "Interactive",
            ViewMode::Grid => "Grid",
        }
    }
}
