//! Built-in dataset: the Ambattur garment-manufacturing process.

/// Embedded TOML source for [`WorkflowGraph::builtin`](super::WorkflowGraph::builtin).
pub const BUILTIN_DATASET: &str = include_str!("ambattur.toml");

/// Phases expanded in the sidebar when nothing else is configured.
pub const DEFAULT_EXPANDED_PHASES: usize = 2;
