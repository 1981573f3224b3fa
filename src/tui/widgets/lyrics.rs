use crate::app::state::{DisplayState, LYRICS_LOADING, LYRICS_NOT_FOUND, LyricsPanel};
use crate::tui::theme::get_theme;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Style,
    text::Line,
    widgets::Paragraph,
};

pub fn render(frame: &mut Frame, state: &DisplayState, area: Rect) {
    let theme = get_theme();

    let block = theme.panel(Some(format!(" {} Lyrics ", theme.icons.lyrics)));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let placeholder = match &state.lyrics {
        LyricsPanel::Lines(lines) => {
            let text: Vec<Line> = lines.iter().map(|l| Line::from(l.as_str())).collect();
            let max_scroll = u16::try_from(text.len()).unwrap_or(u16::MAX).saturating_sub(1);
            let paragraph = Paragraph::new(text)
                .style(Style::default().fg(theme.palette.fg_primary))
                .alignment(Alignment::Center)
                .scroll((state.lyrics_scroll.min(max_scroll), 0));
            frame.render_widget(paragraph, inner);
            return;
        }
        LyricsPanel::Loading => LYRICS_LOADING,
        LyricsPanel::NotFound => LYRICS_NOT_FOUND,
        LyricsPanel::Disabled => "Lyrics disabled",
    };

    let paragraph = Paragraph::new(placeholder)
        .style(Style::default().fg(theme.palette.fg_secondary))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, inner);
}
