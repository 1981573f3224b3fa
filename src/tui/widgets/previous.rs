//! Previously played list with fade-in/fade-out rows

use super::truncate_str;
use crate::app::state::{DisplayState, PreviousEntry};
use crate::tui::theme::{Palette, get_theme};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use time::OffsetDateTime;
use time::macros::format_description;

/// Each track takes two rows: title line, then its cover.
const ROW_HEIGHT: u16 = 2;

pub fn render(frame: &mut Frame, state: &mut DisplayState, area: Rect) {
    let theme = get_theme();

    let block = theme.panel(Some(format!(" {} Previously Played ", theme.icons.history)));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    state.previous_rows.clear();

    if state.previous.is_empty() && state.leaving.is_empty() {
        let empty = Line::from(Span::styled(
            " No recent tracks",
            Style::default().fg(theme.palette.fg_secondary),
        ));
        frame.render_widget(Paragraph::new(empty), inner);
        return;
    }

    let now = OffsetDateTime::now_utc();
    let width = inner.width as usize;
    let fits = (inner.height / ROW_HEIGHT) as usize;

    let mut lines: Vec<Line> = Vec::new();
    for (i, entry) in state.previous.iter().take(fits).enumerate() {
        let cover = state.previous_cover(&entry.track).unwrap_or("");
        lines.extend(entry_lines(entry, cover, now, width));
        state.previous_rows.push(Rect {
            x: inner.x,
            y: inner.y + i as u16 * ROW_HEIGHT,
            width: inner.width,
            height: ROW_HEIGHT,
        });
    }
    for entry in state.leaving.iter().take(fits.saturating_sub(state.previous.len())) {
        let cover = entry.track.thumbnail.as_deref().unwrap_or("");
        lines.extend(entry_lines(entry, cover, now, width));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn entry_lines(
    entry: &PreviousEntry,
    cover: &str,
    now: OffsetDateTime,
    width: usize,
) -> [Line<'static>; 2] {
    let theme = get_theme();
    let color = Palette::faded(entry.fade.opacity());
    let when = entry
        .track
        .timestamp
        .map(|ts| played_ago(ts, now))
        .unwrap_or_default();

    let label = format!("{} - {}", entry.track.title, entry.track.artist);
    let room = width.saturating_sub(when.chars().count() + 3);
    let label = truncate_str(&label, room);
    let pad = room.saturating_sub(label.chars().count());

    let art = truncate_str(cover, width.saturating_sub(5));
    [
        Line::from(vec![
            Span::styled(format!(" {label}{} ", " ".repeat(pad)), Style::default().fg(color)),
            Span::styled(when, Style::default().fg(color)),
        ]),
        Line::from(Span::styled(
            format!("   {} {art}", theme.icons.image),
            Style::default().fg(color).add_modifier(Modifier::DIM),
        )),
    ]
}

/// Relative play time: "just now", "5m ago", "3h ago", "2d ago", then a date.
pub fn played_ago(ts: i64, now: OffsetDateTime) -> String {
    let Ok(played) = OffsetDateTime::from_unix_timestamp(ts) else {
        return String::new();
    };
    let secs = (now - played).whole_seconds();
    match secs {
        s if s < 60 => "just now".to_string(),
        s if s < 3600 => format!("{}m ago", s / 60),
        s if s < 86_400 => format!("{}h ago", s / 3600),
        s if s < 7 * 86_400 => format!("{}d ago", s / 86_400),
        _ => played
            .format(format_description!("[month repr:short] [day padding:none]"))
            .unwrap_or_default(),
    }
}
