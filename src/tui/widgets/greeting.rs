use crate::app::state::DisplayState;
use crate::tui::theme::get_theme;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

pub fn render(frame: &mut Frame, state: &DisplayState, area: Rect) {
    let theme = get_theme();
    let carousel = &state.greeting;

    let block = theme.panel(None);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(entry) = carousel.current() else {
        return;
    };

    // Positive offsets push right, negative ones eat into the left margin.
    let margin = (2 + carousel.offset()).max(0) as usize;
    let pad = " ".repeat(margin);

    let mut lines = vec![Line::from(vec![
        Span::raw(pad.clone()),
        Span::styled(
            format!("{} {}", theme.icons.greeting, entry.text),
            Style::default()
                .fg(theme.palette.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {}", entry.lang),
            Style::default().fg(theme.palette.fg_secondary),
        ),
    ])];
    if let Some(description) = carousel.description() {
        lines.push(Line::from(vec![
            Span::raw(pad),
            Span::styled(
                description.to_string(),
                Style::default().fg(theme.palette.fg_secondary),
            ),
        ]));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}
