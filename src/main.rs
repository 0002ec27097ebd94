use std::io::{self, stdout, Stdout};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};
use crossbeam_channel::{Receiver, TryRecvError};
use crossterm::execute;
use crossterm::terminal::{
    self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::{backend::CrosstermBackend, Terminal};

use ambattur::app::LogicThread;
use ambattur::config::Config;
use ambattur::render::RenderState;
use ambattur::state::ViewMode;
use ambattur::tea::Model;
use ambattur::workflow::{DataFormat, WorkflowGraph};
use ambattur::{alog, alog_debug, ui, Error, Result};

const FRAME_DURATION: Duration = Duration::from_micros(16_666); // 60fps

/// Ambattur - terminal viewer for the garment production workflow
#[derive(Parser, Debug)]
#[command(name = "ambattur")]
#[command(version, about, long_about = None)]
#[command(
    after_help = "ENVIRONMENT:\n    AMBATTUR_DEBUG=1     Enable debug logging (alternative to --debug)"
)]
pub struct Cli {
    /// Dataset file (TOML or JSON) to load instead of the built-in workflow
    #[arg(long, global = true, value_name = "PATH")]
    pub data: Option<PathBuf>,

    /// Start in the grid overview
    #[arg(short = 'g', long)]
    pub grid: bool,

    /// Initial zoom factor (0.7 - 1.5)
    #[arg(short = 'z', long, value_name = "F")]
    pub zoom: Option<f64>,

    /// Enable debug logging (writes to ~/.ambattur/ambattur.log)
    #[arg(short = 'd', long)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Headless commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// List phases with their teams and task counts
    List,

    /// Print a team's process flow
    Show {
        /// Team id, e.g. "merchandising"
        team_id: String,
    },

    /// Write the dataset to stdout
    Export {
        /// Output format
        #[arg(long, short = 'f', default_value = "toml")]
        format: DataFormat,
    },

    /// Load and validate a dataset file
    Check {
        /// Dataset file to validate
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on debug flag
    ambattur::log::init_with_debug(cli.debug);

    // `check` validates only the file it is given
    if let Some(Command::Check { path }) = &cli.command {
        print!("{}", format_check(path)?);
        return Ok(());
    }

    let mut config = Config::load()?;
    apply_overrides(&mut config, &cli);

    match &cli.command {
        Some(Command::List) => {
            print!("{}", format_list(&config.load_graph()?));
            return Ok(());
        }
        Some(Command::Show { team_id }) => {
            print!("{}", format_team(&config.load_graph()?, team_id)?);
            return Ok(());
        }
        Some(Command::Export { format }) => {
            println!("{}", config.load_graph()?.export(*format)?.trim_end());
            return Ok(());
        }
        Some(Command::Check { .. }) | None => {
            // No subcommand: launch TUI
        }
    }

    if cli.debug {
        alog!("Ambattur starting (debug mode enabled)");
    } else {
        alog!("Ambattur starting");
    }

    let graph = config.load_graph()?;
    let state = config.initial_state(&graph);
    let mut model = Model::new(Arc::new(graph), state);
    if let Ok(size) = terminal::size() {
        model.viewport = size;
    }

    let shutdown = Arc::new(AtomicBool::new(false));
    let (state_tx, state_rx) = crossbeam_channel::bounded::<RenderState>(1);

    let shutdown_clone = shutdown.clone();
    let logic_handle = thread::spawn(move || LogicThread::run(model, state_tx, shutdown_clone));

    let mut terminal = setup_terminal()?;
    let result = render_loop(&mut terminal, state_rx, &shutdown);

    shutdown.store(true, Ordering::SeqCst);
    let logic_result = logic_handle.join();
    restore_terminal(&mut terminal)?;
    result?;
    match logic_result {
        Ok(r) => r,
        Err(_) => Err(Error::Io(io::Error::other("logic thread panicked"))),
    }
}

/// CLI flags win over the config file.
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(path) = &cli.data {
        config.data = Some(path.to_string_lossy().into_owned());
    }
    if cli.grid {
        config.view = Some(ViewMode::Grid);
    }
    if let Some(zoom) = cli.zoom {
        config.zoom = Some(zoom);
    }
    alog_debug!("Effective config: {:?}", config);
}

fn format_list(graph: &WorkflowGraph) -> String {
    let mut out = format!("{}\n", graph.title());
    for group in graph.group_by_phase().groups() {
        out.push_str(&format!("\n{}\n", group.phase));
        if group.is_empty() {
            out.push_str("  (no teams)\n");
        }
        for team in &group.teams {
            out.push_str(&format!(
                "  {:<24} {:<40} {} tasks\n",
                team.id,
                team.name,
                team.tasks.len()
            ));
        }
    }
    out
}

fn format_team(graph: &WorkflowGraph, team_id: &str) -> Result<String> {
    let team = graph
        .find_team(team_id)
        .ok_or_else(|| Error::TeamNotFound(team_id.to_string()))?;

    let mut out = format!("{} ({})\n", team.name, team.phase);
    if !team.description.is_empty() {
        out.push_str(&format!("{}\n", team.description));
    }
    for (i, task) in team.tasks.iter().enumerate() {
        let status = ui::status_style(task.status);
        out.push_str(&format!(
            "\n{:>2}. {} {} [{}]\n",
            i + 1,
            status.glyph,
            task.title,
            status.label
        ));
        for line in task.description_lines() {
            out.push_str(&format!("      {line}\n"));
        }
        if let Some(warning) = task.warning_text() {
            out.push_str(&format!("      ! {warning}\n"));
        }
        if let Some(target) = task.link.as_deref().and_then(|id| graph.find_team(id)) {
            out.push_str(&format!("      → {}\n", target.name));
        }
    }
    Ok(out)
}

fn format_check(path: &Path) -> Result<String> {
    let graph = WorkflowGraph::load(path)?;
    let index = graph.group_by_phase();
    Ok(format!(
        "{}: ok ({} phases, {} teams, {} tasks)\n",
        path.display(),
        index.len(),
        index.team_count(),
        index.total_tasks()
    ))
}

fn render_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    state_rx: Receiver<RenderState>,
    shutdown: &AtomicBool,
) -> Result<()> {
    let mut state = RenderState::default();
    let mut last_version: u64 = 0;
    let mut last_frame = Instant::now();
    let mut dirty = false;

    loop {
        if shutdown.load(Ordering::Relaxed) {
            break;
        }

        match state_rx.try_recv() {
            Ok(s) => {
                dirty = dirty || s.version != last_version;
                state = s;
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => break,
        }

        if last_frame.elapsed() < FRAME_DURATION {
            thread::sleep(Duration::from_micros(500));
            continue;
        }
        last_frame = Instant::now();

        if dirty {
            terminal.draw(|f| ui::draw(f, &state))?;
            last_version = state.version;
            dirty = false;
        }
    }
    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    terminal.hide_cursor()?;
    terminal.clear()?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    terminal.show_cursor()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(disable_raw_mode()?)
}
