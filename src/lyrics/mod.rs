//! Lyrics lookup
//!
//! - LRCLIB client (`lrclib`)
//! - LRC timestamp stripping for display (`lrc`)

pub mod lrc;
pub mod lrclib;

pub use lrclib::LrclibClient;

use crate::http::BoxFuture;

/// Lyrics text as returned by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lyrics {
    pub text: String,
    /// `text` carries LRC timestamps.
    pub synced: bool,
}

impl Lyrics {
    /// Lines ready to show, with LRC tags removed.
    pub fn display_lines(&self) -> Vec<String> {
        if self.synced {
            lrc::strip_tags(&self.text)
        } else {
            self.text.lines().map(|l| l.trim_end().to_string()).collect()
        }
    }
}

pub trait LyricsSource: Send + Sync {
    /// `Ok(None)` when the provider has nothing for this track.
    fn lyrics<'a>(&'a self, artist: &'a str, title: &'a str)
    -> BoxFuture<'a, anyhow::Result<Option<Lyrics>>>;
}
