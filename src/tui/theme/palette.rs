//! Color palette - Monochrome grayscale theme

use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub fg_primary: Color,
    pub fg_secondary: Color,
    pub accent: Color,
    pub border: Color,
    pub playing: Color,
}

impl Palette {
    pub const MONO: Self = Self {
        fg_primary: Color::Rgb(255, 255, 255),   // #ffffff white
        fg_secondary: Color::Rgb(136, 136, 136), // #888888 medium gray
        accent: Color::Rgb(255, 255, 255),       // #ffffff white
        border: Color::Rgb(64, 64, 64),          // #404040 dark gray
        playing: Color::Rgb(255, 255, 255),      // #ffffff white
    };

    /// Gray for a fading element; 0.0 blends into the background.
    pub fn faded(opacity: f32) -> Color {
        const FLOOR: f32 = 24.0;
        let v = FLOOR + (255.0 - FLOOR) * opacity.clamp(0.0, 1.0);
        let v = v.round() as u8;
        Color::Rgb(v, v, v)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::MONO
    }
}
