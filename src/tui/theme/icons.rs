//! Nerd Font icons for TUI display
//! Requires a Nerd Font to be installed (https://www.nerdfonts.com)

#[derive(Debug, Clone)]
pub struct Icons {
    pub music: &'static str,
    pub history: &'static str,
    pub lyrics: &'static str,
    pub playing: &'static str,
    pub error: &'static str,
    pub info: &'static str,
    pub image: &'static str,
    pub greeting: &'static str,
}

impl Icons {
    pub const fn nerd() -> Self {
        Self {
            music: "\u{f001}",    // nf-fa-music
            history: "\u{f1da}",  // nf-fa-history
            lyrics: "\u{f15c}",   // nf-fa-file_text_o
            playing: "\u{f04b}",  // nf-fa-play
            error: "\u{f00d}",    // nf-fa-times
            info: "\u{f05a}",     // nf-fa-info_circle
            image: "\u{f03e}",    // nf-fa-image
            greeting: "\u{f256}", // nf-fa-hand_paper_o
        }
    }
}

impl Default for Icons {
    fn default() -> Self {
        Self::nerd()
    }
}

/// Loading spinner frames
pub struct LoadingSpinner;

impl LoadingSpinner {
    pub const BRAILLE: [&'static str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];

    pub fn frame(tick: u64) -> &'static str {
        let idx = tick as usize % Self::BRAILLE.len();
        Self::BRAILLE[idx]
    }
}
