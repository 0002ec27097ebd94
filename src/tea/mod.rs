//! The Elm Architecture (TEA) implementation for the workflow TUI.
//!
//! This module provides a clean separation of concerns:
//! - `Model`: View state plus keyboard bookkeeping
//! - `Message`: Inputs to the update function
//! - `Command`: Outputs (side effects) from the update function
//! - `update`: Maps messages to controller intents and cursor moves

pub mod command;
pub mod message;
pub mod model;
pub mod update;

pub use command::Command;
pub use message::Message;
pub use model::{Focus, Model, Notification};
pub use update::update;
