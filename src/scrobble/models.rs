use serde::{Deserialize, Serialize};

/// Body of the history endpoint. Accepts the Last.fm `recenttracks` envelope
/// or a bare track array.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum HistoryResponse {
    Bare(Vec<RawTrack>),
    Wrapped { recenttracks: RecentTracks },
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecentTracks {
    #[serde(default)]
    pub track: OneOrMany<RawTrack>,
}

/// Last.fm collapses single-element lists into a bare object.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> Default for OneOrMany<T> {
    fn default() -> Self {
        OneOrMany::Many(Vec::new())
    }
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(v) => v,
            OneOrMany::One(t) => vec![t],
        }
    }
}

impl HistoryResponse {
    pub fn into_tracks(self) -> Vec<RawTrack> {
        match self {
            HistoryResponse::Wrapped { recenttracks } => recenttracks.track.into_vec(),
            HistoryResponse::Bare(tracks) => tracks,
        }
    }
}

/// Text that is either a plain string or a `{"#text": ...}` object.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TextField {
    Plain(String),
    Object {
        #[serde(rename = "#text", default)]
        text: Option<String>,
    },
}

impl TextField {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TextField::Plain(s) => Some(s.as_str()),
            TextField::Object { text } => text.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawImage {
    #[serde(default)]
    pub size: Option<String>,
    #[serde(rename = "#text", default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAttr {
    #[serde(default)]
    pub nowplaying: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawDate {
    #[serde(default)]
    pub uts: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawTrack {
    #[serde(alias = "title", default)]
    pub name: Option<String>,
    #[serde(default)]
    pub artist: Option<TextField>,
    #[serde(default)]
    pub album: Option<TextField>,
    #[serde(default)]
    pub image: Vec<RawImage>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub date: Option<RawDate>,
    #[serde(rename = "@attr", default)]
    pub attr: Option<RawAttr>,
    /// Flat flag used by proxies that pre-digest the Last.fm payload.
    #[serde(default)]
    pub nowplaying: Option<bool>,
}

/// Normalized history entry with fallbacks applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub title: String,
    pub artist: String,
    pub album: String,
    /// Unix seconds the track was scrobbled; absent while playing.
    pub timestamp: Option<i64>,
    pub is_now_playing: bool,
    pub source_url: String,
    /// Cover art URL supplied by the history payload itself.
    pub thumbnail: Option<String>,
}

/// Identity of a track for locking and deduplication: trimmed artist + title.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrackKey {
    pub artist: String,
    pub title: String,
}

impl TrackKey {
    pub fn new(artist: &str, title: &str) -> Self {
        Self {
            artist: artist.trim().to_string(),
            title: title.trim().to_string(),
        }
    }
}

impl std::fmt::Display for TrackKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}::{}", self.artist, self.title)
    }
}

impl Track {
    pub fn key(&self) -> TrackKey {
        TrackKey::new(&self.artist, &self.title)
    }
}
