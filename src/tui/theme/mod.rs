//! Monochrome theme shared by every panel

pub mod icons;
pub mod palette;

pub use icons::{Icons, LoadingSpinner};
pub use palette::Palette;

use ratatui::{
    style::Style,
    symbols::border,
    widgets::{Block, Borders},
};

#[derive(Debug, Clone, Default)]
pub struct Theme {
    pub palette: Palette,
    pub icons: Icons,
}

impl Theme {
    /// Rounded, bordered panel with an optional accent title.
    pub fn panel(&self, title: Option<String>) -> Block<'static> {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_set(border::ROUNDED)
            .border_style(Style::default().fg(self.palette.border));
        match title {
            Some(title) => block
                .title(title)
                .title_style(Style::default().fg(self.palette.accent)),
            None => block,
        }
    }
}

pub fn get_theme() -> Theme {
    Theme::default()
}
