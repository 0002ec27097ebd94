use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::Sender;
use crossterm::event::{self, Event};

use crate::render::RenderState;
use crate::tea::{update, Command, Message, Model};
use crate::{alog_debug, Result};

/// How long one poll for terminal input may block.
const POLL_INTERVAL: Duration = Duration::from_millis(8);

pub struct LogicThread;

impl LogicThread {
    /// Own the model, turn terminal events into messages, and publish
    /// snapshots until a quit command or the shutdown flag.
    pub fn run(
        mut model: Model,
        state_tx: Sender<RenderState>,
        shutdown: Arc<AtomicBool>,
    ) -> Result<()> {
        alog_debug!(
            "LogicThread::run teams={} viewport={:?}",
            model.graph.teams().len(),
            model.viewport
        );

        if dispatch(&mut model, Message::Init) {
            shutdown.store(true, Ordering::Relaxed);
            return Ok(());
        }
        flush(&state_tx, &mut model);

        loop {
            if shutdown.load(Ordering::Relaxed) {
                break;
            }

            // Keyboard input (priority)
            while event::poll(POLL_INTERVAL)? {
                let msg = match event::read()? {
                    Event::Key(key) => Message::Key(key),
                    Event::Resize(width, height) => Message::Resize(width, height),
                    _ => continue,
                };
                if dispatch(&mut model, msg) {
                    alog_debug!("Quit requested");
                    shutdown.store(true, Ordering::Relaxed);
                    return Ok(());
                }
                flush(&state_tx, &mut model);
            }

            // A snapshot rejected by a full channel is retried here
            flush(&state_tx, &mut model);
        }
        Ok(())
    }
}

/// Run one message through `update`. Returns true when the app should quit.
fn dispatch(model: &mut Model, msg: Message) -> bool {
    update(model, msg)
        .into_iter()
        .any(|cmd| execute_command(model, cmd))
}

/// Execute a command. Returns true if the app should quit.
fn execute_command(_model: &mut Model, cmd: Command) -> bool {
    match cmd {
        Command::Quit => true,
    }
}

/// Publish a snapshot if the model changed. The dirty flag stays set while
/// the render thread has not taken the previous snapshot.
fn flush(state_tx: &Sender<RenderState>, model: &mut Model) {
    if model.dirty && send_state(state_tx, model) {
        model.dirty = false;
    }
}

fn send_state(state_tx: &Sender<RenderState>, model: &Model) -> bool {
    state_tx.try_send(model.snapshot()).is_ok()
}
