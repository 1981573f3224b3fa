//! Root layout widget

use crate::app::state::DisplayState;
use crate::tui::theme::{LoadingSpinner, get_theme};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::{greeting, lyrics, now_playing, previous};

/// ┌──────────── Greeting ─────────────┐
/// ├──── Now Playing ────┬── Lyrics ───┤
/// │                     │             │
/// ├───── Previous ──────┤             │
/// │                     │             │
/// └─────────────────────┴─────────────┘
///  status
pub fn render(frame: &mut Frame, state: &mut DisplayState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Greeting
            Constraint::Min(10),   // Main
            Constraint::Length(1), // Status
        ])
        .split(frame.area());

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(3)])
        .split(cols[0]);

    greeting::render(frame, state, rows[0]);
    now_playing::render(frame, state, left[0]);
    previous::render(frame, state, left[1]);
    lyrics::render(frame, state, cols[1]);
    render_status(frame, state, rows[2]);
}

fn render_status(frame: &mut Frame, state: &DisplayState, area: Rect) {
    let theme = get_theme();
    let icons = &theme.icons;
    let dim = Style::default().fg(theme.palette.fg_secondary);

    let mut spans = Vec::new();
    if state.in_flight {
        spans.push(Span::styled(format!("{} ", LoadingSpinner::frame(state.tick)), dim));
    }
    if let Some(err) = &state.last_error {
        spans.push(Span::styled(
            format!("{} {}  ", icons.error, err),
            Style::default().fg(theme.palette.fg_primary),
        ));
    } else if !state.status.is_empty() {
        spans.push(Span::styled(format!("{} {}  ", icons.info, state.status), dim));
    }
    spans.push(Span::styled("o open  r refresh  j/k scroll  q quit", dim));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
