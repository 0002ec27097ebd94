//! Terminal UI rendering for the workflow viewer.
//!
//! Layout, top to bottom: header (title and subtitle), mode bar, body,
//! status bar. The body is either the interactive split (phase sidebar on
//! the left, process flow of the selected team on the right) or the grid
//! overview of every team card.
//!
//! This module renders from RenderState (immutable snapshot) - it never
//! mutates application state.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::render::{
    grid_card_height, PhaseGroupView, RenderState, TeamCardView, TeamDetailView, GRID_CARD_WIDTH,
    GRID_GAP,
};
use crate::state::ViewMode;
use crate::tea::{Focus, Notification};
use crate::workflow::{ColorToken, Icon, TaskStatus};

// Color tokens (cursor uses REVERSED modifier to adapt to terminal theme)
const COLOR_TEXT_DIMMED: Color = Color::Gray;
const COLOR_TEXT_MUTED: Color = Color::DarkGray;
const COLOR_SEPARATOR: Color = Color::White;
const COLOR_LINK: Color = Color::Cyan;
const COLOR_WARNING_TEXT: Color = Color::Yellow;

// Layout constants
const HEADER_HEIGHT: u16 = 2;
const SIDEBAR_WIDTH: u16 = 38;

const PLACEHOLDER: &str = "Select a team to view its process flow";

/// Presentation attributes of a task status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusStyle {
    pub color: Color,
    pub glyph: &'static str,
    pub label: &'static str,
}

/// Status → colour, glyph and badge label. Every status has an entry.
pub fn status_style(status: TaskStatus) -> StatusStyle {
    let (color, glyph, label) = match status {
        TaskStatus::Normal => (Color::Blue, "●", "Step"),
        TaskStatus::Warning => (Color::Yellow, "▲", "Attention"),
        TaskStatus::Success => (Color::Green, "✓", "Milestone"),
        TaskStatus::Critical => (Color::Red, "✖", "Blocked"),
    };
    StatusStyle {
        color,
        glyph,
        label,
    }
}

/// Icon name → single-width glyph. Unknown names fall back to a bullet.
pub fn icon_glyph(icon: &Icon) -> &'static str {
    match icon.as_str() {
        "users" => "☻",
        "layout" => "▦",
        "clipboard-list" => "☰",
        "file-text" => "≡",
        "package" | "package-check" => "▣",
        "dollar-sign" => "$",
        "building" => "⌂",
        "ship" => "≈",
        "truck" => "⇶",
        "factory" => "▤",
        "check-circle" => "✓",
        "alert-circle" => "!",
        "alert-triangle" => "▲",
        "clock" => "◷",
        "mail" => "✉",
        "refresh" => "↻",
        _ => "•",
    }
}

pub fn token_color(token: ColorToken) -> Color {
    match token {
        ColorToken::Primary => Color::Blue,
        ColorToken::Accent => Color::Magenta,
        ColorToken::Success => Color::Green,
        ColorToken::Warning => Color::Yellow,
        ColorToken::Info => Color::Cyan,
        ColorToken::Muted => COLOR_TEXT_MUTED,
    }
}

// -----------------------------------------------------------------------------
// Context-sensitive keymap system
// -----------------------------------------------------------------------------

/// Context for determining which keybindings to display.
/// Derived from RenderState - this is the "view model" for the statusbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeymapContext {
    /// Sidebar navigation in interactive mode
    Teams { has_detail: bool },
    /// Task navigation in the process flow pane
    Tasks,
    /// Grid overview
    Grid,
}

impl KeymapContext {
    pub fn from_render_state(state: &RenderState) -> Self {
        match (state.view.mode, state.focus) {
            (ViewMode::Grid, _) => KeymapContext::Grid,
            (ViewMode::Interactive, Focus::Tasks) => KeymapContext::Tasks,
            (ViewMode::Interactive, Focus::Teams) => KeymapContext::Teams {
                has_detail: state.view.detail.is_some(),
            },
        }
    }
}

/// A single keybinding entry for display.
struct Keybinding(&'static str, &'static str);

/// A group of related keybindings (separated by │).
struct KeybindingGroup(Vec<Keybinding>);

fn keybindings_for_context(ctx: KeymapContext) -> Vec<KeybindingGroup> {
    let navigation = match ctx {
        KeymapContext::Teams { has_detail } => {
            let mut keys = vec![
                Keybinding("j/k", "move"),
                Keybinding("Enter", "expand/select"),
            ];
            if has_detail {
                keys.push(Keybinding("Tab", "tasks"));
            }
            keys
        }
        KeymapContext::Tasks => vec![
            Keybinding("j/k", "task"),
            Keybinding("Enter", "follow"),
            Keybinding("Esc", "teams"),
        ],
        KeymapContext::Grid => vec![Keybinding("hjkl", "move"), Keybinding("Enter", "open")],
    };
    let toggle_label = match ctx {
        KeymapContext::Grid => "list",
        _ => "grid",
    };

    vec![
        KeybindingGroup(navigation),
        KeybindingGroup(vec![
            Keybinding("g", toggle_label),
            Keybinding("+/-", "zoom"),
        ]),
        KeybindingGroup(vec![Keybinding("q", "quit")]),
    ]
}

/// Main render function - entry point for all UI drawing.
/// Takes an immutable RenderState snapshot.
pub fn draw(frame: &mut Frame, state: &RenderState) {
    render_main_layout(frame, state);

    if let Some(ref notification) = state.notification {
        render_notification(frame, notification, frame.area());
    }
}

/// Render the main layout: header + mode bar + separator + body + status bar.
fn render_main_layout(frame: &mut Frame, state: &RenderState) {
    let area = frame.area();

    if area.height < 6 {
        render_body(frame, state, area);
        return;
    }

    let chunks = Layout::vertical([
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .split(area);

    render_header(frame, state, chunks[0]);
    render_mode_bar(frame, state, chunks[1]);
    render_separator(frame, chunks[2]);
    render_body(frame, state, chunks[3]);
    render_statusbar(frame, state, chunks[4]);
}

fn render_header(frame: &mut Frame, state: &RenderState, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            state.view.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            state.view.subtitle.clone(),
            Style::default().fg(COLOR_TEXT_DIMMED),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

/// Mode switcher with the active mode highlighted, zoom on the right.
fn render_mode_bar(frame: &mut Frame, state: &RenderState, area: Rect) {
    let active = Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
    let inactive = Style::default().fg(COLOR_TEXT_MUTED);

    let mut spans = Vec::new();
    for (i, mode) in [ViewMode::Interactive, ViewMode::Grid].into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" │ ", inactive));
        }
        let style = if mode == state.view.mode { active } else { inactive };
        spans.push(Span::styled(mode.label(), style));
    }

    // The +/- hints dim at the bound they can no longer move past
    let zoom = state.view.zoom;
    let hint = |at_bound: bool| {
        Style::default().fg(if at_bound {
            COLOR_TEXT_MUTED
        } else {
            COLOR_TEXT_DIMMED
        })
    };
    let zoom_spans = [
        Span::styled("- ", hint(zoom.is_min())),
        Span::styled(format!("zoom {zoom}"), Style::default().fg(COLOR_TEXT_DIMMED)),
        Span::styled(" +", hint(zoom.is_max())),
    ];

    let content_width: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let zoom_width: usize = zoom_spans.iter().map(|s| s.content.chars().count()).sum();
    let spacer = (area.width as usize)
        .saturating_sub(content_width)
        .saturating_sub(zoom_width);
    if spacer > 0 {
        spans.push(Span::raw(" ".repeat(spacer)));
    }
    spans.extend(zoom_spans);

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the separator - solid divider line between chrome and body.
fn render_separator(frame: &mut Frame, area: Rect) {
    let solid = "─".repeat(area.width as usize);
    let line = Line::from(Span::styled(solid, Style::default().fg(COLOR_SEPARATOR)));
    frame.render_widget(Paragraph::new(line), area);
}

fn render_body(frame: &mut Frame, state: &RenderState, area: Rect) {
    match state.view.mode {
        ViewMode::Interactive => render_interactive(frame, state, area),
        ViewMode::Grid => render_grid(frame, state, area),
    }
}

// -----------------------------------------------------------------------------
// Interactive mode
// -----------------------------------------------------------------------------

fn render_interactive(frame: &mut Frame, state: &RenderState, area: Rect) {
    let sidebar_width = SIDEBAR_WIDTH.min(area.width / 2);
    let chunks = Layout::horizontal([
        Constraint::Length(sidebar_width),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .split(area);

    render_sidebar(frame, state, chunks[0]);
    render_flow(frame, state, chunks[2]);
}

/// Sidebar lines plus the display line that holds the cursor.
fn sidebar_lines(state: &RenderState, width: u16) -> (Vec<Line<'static>>, usize) {
    let width = width as usize;
    let cursor_style = if state.focus == Focus::Teams {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default().add_modifier(Modifier::UNDERLINED)
    };

    let mut lines = Vec::new();
    let mut cursor_line = 0;
    let mut row = 0;
    let mut push = |line: Line<'static>, selectable: bool, lines: &mut Vec<Line<'static>>| {
        if selectable {
            if row == state.sidebar_cursor {
                cursor_line = lines.len();
                lines.push(line.patch_style(cursor_style));
            } else {
                lines.push(line);
            }
            row += 1;
        } else {
            lines.push(line);
        }
    };

    for group in &state.view.phases {
        push(phase_line(group, width), true, &mut lines);
        if !group.expanded {
            continue;
        }
        if group.teams.is_empty() {
            push(
                Line::from(Span::styled(
                    "    no teams",
                    Style::default().fg(COLOR_TEXT_MUTED),
                )),
                false,
                &mut lines,
            );
        }
        for team in &group.teams {
            push(team_line(team, width), true, &mut lines);
        }
    }

    (lines, cursor_line)
}

fn phase_line(group: &PhaseGroupView, width: usize) -> Line<'static> {
    let marker = if group.expanded { "▾" } else { "▸" };
    let count = format!(" ({})", group.teams.len());
    let name = truncate(
        &group.name,
        width.saturating_sub(2 + count.chars().count()),
    );
    Line::from(vec![
        Span::styled(
            format!("{marker} {name}"),
            Style::default()
                .fg(COLOR_TEXT_DIMMED)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(count, Style::default().fg(COLOR_TEXT_MUTED)),
    ])
}

fn team_line(team: &TeamCardView, width: usize) -> Line<'static> {
    let name_style = if team.selected {
        Style::default()
            .fg(token_color(team.color))
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let warnings = if team.warning_count > 0 {
        format!(" !{}", team.warning_count)
    } else {
        String::new()
    };
    let name = truncate(&team.name, width.saturating_sub(6 + warnings.chars().count()));

    Line::from(vec![
        Span::raw("  "),
        Span::styled(
            icon_glyph(&team.icon),
            Style::default().fg(token_color(team.color)),
        ),
        Span::raw(" "),
        Span::styled(name, name_style),
        Span::styled(warnings, Style::default().fg(COLOR_WARNING_TEXT)),
    ])
}

/// Scrolloff: keep the cursor line centred once content overflows.
fn scroll_offset(cursor_line: usize, total: usize, height: usize) -> usize {
    let start = cursor_line.saturating_sub(height / 2);
    let end = (start + height).min(total);
    end.saturating_sub(height)
}

fn render_sidebar(frame: &mut Frame, state: &RenderState, area: Rect) {
    let (lines, cursor_line) = sidebar_lines(state, area.width);
    let start = scroll_offset(cursor_line, lines.len(), area.height as usize);
    let visible: Vec<Line> = lines
        .into_iter()
        .skip(start)
        .take(area.height as usize)
        .collect();
    frame.render_widget(Paragraph::new(visible), area);
}

/// Process flow lines plus the line of the selected task, if any.
fn flow_lines(detail: &TeamDetailView, width: u16) -> (Vec<Line<'static>>, Option<usize>) {
    let width = width as usize;
    let team = &detail.team;
    let accent = token_color(team.color);
    let muted = Style::default().fg(COLOR_TEXT_MUTED);
    let dimmed = Style::default().fg(COLOR_TEXT_DIMMED);
    let indent = "     ";

    let mut lines = vec![
        Line::from(vec![
            Span::styled(icon_glyph(&team.icon), Style::default().fg(accent)),
            Span::raw(" "),
            Span::styled(
                team.name.clone(),
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(truncate(&team.description, width), dimmed)),
        Line::from(Span::styled(
            format!(
                "{} · {} · {} done · {} warnings",
                team.phase,
                team.task_label(),
                team.completed_count,
                team.warning_count
            ),
            muted,
        )),
        Line::raw(""),
    ];

    if detail.tasks.is_empty() {
        lines.push(Line::from(Span::styled("No tasks defined for this team", dimmed)));
        return (lines, None);
    }

    let mut selected_line = None;
    for (i, task) in detail.tasks.iter().enumerate() {
        if i > 0 {
            lines.push(Line::from(Span::styled("   │", muted)));
        }

        let status = status_style(task.status);
        if task.selected {
            selected_line = Some(lines.len());
        }
        let title_style = if task.selected {
            Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        let badge = format!(" [{}]", status.label);
        let title = truncate(
            &task.title,
            width.saturating_sub(9 + badge.chars().count()),
        );
        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", status.glyph), Style::default().fg(status.color)),
            Span::styled(format!("{:>2}. ", i + 1), muted),
            Span::styled(icon_glyph(&task.icon), Style::default().fg(status.color)),
            Span::raw(" "),
            Span::styled(title, title_style),
            Span::styled(badge, Style::default().fg(status.color)),
        ]));

        for text in &task.description {
            lines.push(Line::from(Span::styled(
                format!("{indent}{}", truncate(text, width.saturating_sub(indent.len()))),
                dimmed,
            )));
        }
        if let Some(warning) = &task.warning {
            lines.push(Line::from(Span::styled(
                format!("{indent}! {warning}"),
                Style::default().fg(COLOR_WARNING_TEXT),
            )));
        }
        if let Some(target) = &task.link {
            lines.push(Line::from(Span::styled(
                format!("{indent}→ {target}"),
                Style::default().fg(COLOR_LINK),
            )));
        }
    }

    (lines, selected_line)
}

fn render_flow(frame: &mut Frame, state: &RenderState, area: Rect) {
    let Some(detail) = &state.view.detail else {
        let msg = Line::from(Span::styled(
            PLACEHOLDER,
            Style::default().fg(COLOR_TEXT_DIMMED),
        ));
        frame.render_widget(Paragraph::new(msg), area);
        return;
    };

    let (lines, selected_line) = flow_lines(detail, area.width);
    let start = selected_line
        .map(|line| scroll_offset(line, lines.len(), area.height as usize))
        .unwrap_or(0);
    let visible: Vec<Line> = lines
        .into_iter()
        .skip(start)
        .take(area.height as usize)
        .collect();
    frame.render_widget(Paragraph::new(visible), area);
}

// -----------------------------------------------------------------------------
// Grid mode
// -----------------------------------------------------------------------------

fn render_grid(frame: &mut Frame, state: &RenderState, area: Rect) {
    let cards = &state.view.cards;
    if cards.is_empty() {
        let msg = Line::from(Span::styled(
            "No teams in this workflow",
            Style::default().fg(COLOR_TEXT_DIMMED),
        ));
        frame.render_widget(Paragraph::new(msg), area);
        return;
    }

    let zoom = state.view.zoom;
    let card_width = zoom.scale(GRID_CARD_WIDTH).min(area.width);
    let card_height = grid_card_height(zoom);
    let columns = state.grid_columns.max(1);
    let visible_rows = usize::from((area.height / card_height).max(1));

    let cursor_row = state.grid_cursor / columns;
    let first_row = cursor_row.saturating_sub(visible_rows - 1);

    for (index, card) in cards.iter().enumerate() {
        let row = index / columns;
        if row < first_row || row >= first_row + visible_rows {
            continue;
        }
        let col = (index % columns) as u16;
        let x = area.x + col * (card_width + GRID_GAP);
        let y = area.y + (row - first_row) as u16 * card_height;
        if x >= area.right() || y >= area.bottom() {
            continue;
        }
        let rect = Rect {
            x,
            y,
            width: card_width.min(area.right() - x),
            height: card_height.min(area.bottom() - y),
        };
        render_card(frame, card, index == state.grid_cursor, rect);
    }
}

fn render_card(frame: &mut Frame, card: &TeamCardView, under_cursor: bool, area: Rect) {
    let accent = token_color(card.color);
    let border_style = if under_cursor {
        Style::default().fg(accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(COLOR_TEXT_MUTED)
    };
    let inner_width = area.width.saturating_sub(2) as usize;
    let title = format!(
        " {} {} ",
        icon_glyph(&card.icon),
        truncate(&card.name, inner_width.saturating_sub(4))
    );
    let title_style = if under_cursor {
        Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD)
    } else {
        Style::default().fg(accent).add_modifier(Modifier::BOLD)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title)
        .title_style(title_style);

    let mut counts = vec![
        Span::styled(card.task_label(), Style::default().fg(COLOR_TEXT_DIMMED)),
        Span::styled(
            format!("  ✓ {}", card.completed_count),
            Style::default().fg(Color::Green),
        ),
    ];
    if card.warning_count > 0 {
        counts.push(Span::styled(
            format!("  ! {}", card.warning_count),
            Style::default().fg(COLOR_WARNING_TEXT),
        ));
    }
    if card.selected {
        counts.push(Span::styled("  ● open", Style::default().fg(accent)));
    }

    let lines = vec![
        Line::from(Span::styled(
            truncate(&card.phase, inner_width),
            Style::default().fg(COLOR_TEXT_MUTED),
        )),
        Line::from(truncate(&card.description, inner_width)),
        Line::raw(""),
        Line::from(counts),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

// -----------------------------------------------------------------------------
// Status bar
// -----------------------------------------------------------------------------

fn render_statusbar(frame: &mut Frame, state: &RenderState, area: Rect) {
    frame.render_widget(Paragraph::new(render_keymap_line(state)), area);
}

/// Render keybindings legend for the bottom line.
/// When show_keymap is false: Shows just "?" (grayed out)
/// When show_keymap is true: Shows "? │ <full keymap legend>" with bright "?"
fn render_keymap_line(state: &RenderState) -> Line<'static> {
    let ctx = KeymapContext::from_render_state(state);
    let groups = keybindings_for_context(ctx);

    let key_style = Style::default().fg(COLOR_TEXT_DIMMED);
    let desc_style = Style::default().fg(COLOR_TEXT_MUTED);
    let sep_style = Style::default().fg(COLOR_TEXT_MUTED);

    let help_style = if state.show_keymap {
        Style::default()
    } else {
        Style::default().fg(COLOR_TEXT_MUTED)
    };
    let mut spans: Vec<Span> = vec![Span::styled("?", help_style)];

    if state.show_keymap {
        for group in groups.iter().filter(|g| !g.0.is_empty()) {
            spans.push(Span::styled(" │ ", sep_style));
            for (key_idx, keybinding) in group.0.iter().enumerate() {
                if key_idx > 0 {
                    spans.push(Span::styled(" • ", sep_style));
                }
                spans.push(Span::styled(keybinding.0, key_style));
                spans.push(Span::styled(format!(" {}", keybinding.1), desc_style));
            }
        }
    }

    Line::from(spans)
}

/// Render notification message on the bottom line of the screen.
fn render_notification(frame: &mut Frame, notification: &Notification, area: Rect) {
    let notification_area = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    frame.render_widget(Clear, notification_area);

    let line = Line::from(Span::styled(
        notification.message.clone(),
        Style::default().fg(Color::Green),
    ));
    frame.render_widget(Paragraph::new(line), notification_area);
}

fn truncate(s: &str, max_len: usize) -> String {
    if max_len == 0 {
        return String::new();
    }
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 1).collect();
        format!("{}~", truncated)
    }
}
