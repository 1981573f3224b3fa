//! Built-in configuration values written to a fresh config file.

use super::{
    ArtworkConfig, ArtworkStep, DedupBy, GreetingConfig, GreetingEntry, HistoryConfig, LogConfig,
    LyricsConfig, PollConfig,
};

pub const HISTORY_URL: &str = "https://ws.audioscrobbler.com/2.0/";
pub const ITUNES_SEARCH_URL: &str = "https://itunes.apple.com/search";
pub const LRCLIB_BASE_URL: &str = "https://lrclib.net/api";
pub const PLACEHOLDER_ART: &str = "assets/placeholder.png";

pub fn history() -> HistoryConfig {
    HistoryConfig {
        url: HISTORY_URL.to_string(),
        user: None,
        api_key: None,
        limit: 10,
    }
}

pub fn poll() -> PollConfig {
    PollConfig {
        interval_secs: 10,
        previous_max: 5,
        dedup: DedupBy::ArtistTitle,
    }
}

pub fn artwork() -> ArtworkConfig {
    ArtworkConfig {
        order: vec![ArtworkStep::Search, ArtworkStep::Itunes, ArtworkStep::Thumbnail],
        search_url: None,
        itunes_url: ITUNES_SEARCH_URL.to_string(),
        try_animated: true,
        placeholder: PLACEHOLDER_ART.to_string(),
        cache_size: 256,
    }
}

pub fn lyrics() -> LyricsConfig {
    LyricsConfig {
        enabled: true,
        base_url: LRCLIB_BASE_URL.to_string(),
    }
}

pub fn greeting() -> GreetingConfig {
    let entry = |text: &str, lang: &str, description: Option<&str>| GreetingEntry {
        text: text.to_string(),
        lang: lang.to_string(),
        description: description.map(str::to_string),
    };
    GreetingConfig {
        interval_ms: 3000,
        slide_ms: 500,
        entries: vec![
            entry("Wɔezon", "Ewe", Some("Welcome in Ewe")),
            entry("Hi", "English", None),
            entry("Hello", "English", None),
            entry("Salut", "French", Some("Hi in French")),
            entry("Bonjour", "French", Some("Hello in French")),
        ],
    }
}

pub fn log() -> LogConfig {
    let file = super::project_dirs()
        .map(|p| p.data_dir().join("nowplaying.log"))
        .unwrap_or_else(|_| std::env::temp_dir().join("nowplaying.log"));
    LogConfig {
        level: "info".to_string(),
        file,
    }
}
