//! Static workflow data: teams, their ordered tasks, and phase grouping.

pub mod data;
mod graph;
mod phase_index;
mod types;

pub use graph::{DataFormat, WorkflowGraph};
pub use phase_index::{group_by_phase, PhaseGroup, PhaseIndex};
pub use types::{ColorToken, Icon, Task, TaskStatus, Team};
