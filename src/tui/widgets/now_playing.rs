//! Now playing panel: song, artist, album and artwork source

use super::truncate_str;
use crate::app::state::DisplayState;
use crate::tui::theme::get_theme;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

pub fn render(frame: &mut Frame, state: &mut DisplayState, area: Rect) {
    let theme = get_theme();
    let icons = &theme.icons;

    let block = theme.panel(Some(format!(" {} Now Playing ", icons.music)));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    // The whole panel is the click target for opening the source page.
    state.artwork_area = area;

    let width = inner.width.saturating_sub(2) as usize;
    let primary = Style::default().fg(theme.palette.fg_primary);
    let secondary = Style::default().fg(theme.palette.fg_secondary);

    let Some(track) = &state.now else {
        let waiting = Line::from(Span::styled(" Waiting for history...", secondary));
        frame.render_widget(Paragraph::new(waiting), inner);
        return;
    };

    let album_line = if state.album_visible() {
        Line::from(vec![
            Span::styled(" in ", secondary),
            Span::styled(truncate_str(&track.album, width.saturating_sub(3)), primary),
        ])
    } else {
        Line::default()
    };

    let art = state.artwork_url.as_deref().unwrap_or("");
    let live = if track.is_now_playing {
        Span::styled(
            format!(" {} Now playing", icons.playing),
            Style::default().fg(theme.palette.playing),
        )
    } else {
        Span::styled(" Last played", secondary)
    };

    let lines = vec![
        Line::from(Span::styled(
            format!(" {}", truncate_str(&track.title, width)),
            primary.add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(format!(" {}", truncate_str(&track.artist, width)), primary)),
        album_line,
        Line::from(Span::styled(
            format!(" {} {}", icons.image, truncate_str(art, width.saturating_sub(2))),
            secondary,
        )),
        Line::from(live),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}
