//! Messages for the TEA (The Elm Architecture) pattern.
//!
//! Messages are inputs to the update function: terminal events, the one-time
//! startup message, and intents delivered directly by an embedding caller.

use crossterm::event::KeyEvent;

use crate::state::Intent;

/// Input messages to the update function.
#[derive(Debug)]
pub enum Message {
    /// Sent once before the first snapshot is published
    Init,

    // Keyboard/terminal events
    Key(KeyEvent),
    Resize(u16, u16),

    /// A controller intent that bypasses key mapping
    Intent(Intent),
}
