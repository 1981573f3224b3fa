//! Turns raw history entries into [`Track`]s and splits them into the
//! now-playing track and a deduplicated list of previous tracks.

use super::models::{RawImage, RawTrack, Track, TrackKey};
use crate::config::DedupBy;
use std::collections::HashSet;

pub const FALLBACK_TITLE: &str = "Song";
pub const FALLBACK_ARTIST: &str = "Artist";
pub const FALLBACK_ALBUM: &str = " ";
pub const FALLBACK_URL: &str = "";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub now_playing: Track,
    pub previous: Vec<Track>,
}

pub fn normalize(raw: &RawTrack) -> Track {
    let text = |v: Option<&str>, fallback: &str| match v {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => fallback.to_string(),
    };

    let is_now_playing = raw.nowplaying.unwrap_or(false)
        || raw
            .attr
            .as_ref()
            .and_then(|a| a.nowplaying.as_deref())
            .is_some_and(|v| v == "true");

    Track {
        title: text(raw.name.as_deref(), FALLBACK_TITLE),
        artist: text(raw.artist.as_ref().and_then(|a| a.as_str()), FALLBACK_ARTIST),
        album: text(raw.album.as_ref().and_then(|a| a.as_str()), FALLBACK_ALBUM),
        timestamp: raw
            .date
            .as_ref()
            .and_then(|d| d.uts.as_deref())
            .and_then(|uts| uts.trim().parse().ok()),
        is_now_playing,
        source_url: text(raw.url.as_deref(), FALLBACK_URL),
        thumbnail: pick_thumbnail(&raw.image),
    }
}

/// The `extralarge` image when present, otherwise the last non-empty one.
pub fn pick_thumbnail(images: &[RawImage]) -> Option<String> {
    let non_empty = |img: &&RawImage| img.url.as_deref().is_some_and(|u| !u.trim().is_empty());
    images
        .iter()
        .filter(non_empty)
        .find(|img| img.size.as_deref() == Some("extralarge"))
        .or_else(|| images.iter().filter(non_empty).next_back())
        .and_then(|img| img.url.clone())
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum DedupKey {
    Pair(TrackKey),
    Stamp(i64),
}

fn dedup_key(track: &Track, by: DedupBy) -> DedupKey {
    match (by, track.timestamp) {
        (DedupBy::Timestamp, Some(ts)) => DedupKey::Stamp(ts),
        _ => DedupKey::Pair(track.key()),
    }
}

/// First entry is the now-playing track; the rest become previous tracks with
/// duplicates, stray now-playing entries and the current track removed.
pub fn split_history(raw: &[RawTrack], by: DedupBy, previous_max: usize) -> Snapshot {
    let mut tracks = raw.iter().map(normalize);
    let now_playing = tracks.next().unwrap_or_else(fallback_track);

    let mut seen = HashSet::new();
    seen.insert(dedup_key(&now_playing, by));
    // Timestamp mode still must not repeat the current track.
    let current = now_playing.key();

    let previous = tracks
        .filter(|t| !t.is_now_playing)
        .filter(|t| t.key() != current)
        .filter(|t| seen.insert(dedup_key(t, by)))
        .take(previous_max)
        .collect();

    Snapshot {
        now_playing,
        previous,
    }
}

fn fallback_track() -> Track {
    Track {
        title: FALLBACK_TITLE.to_string(),
        artist: FALLBACK_ARTIST.to_string(),
        album: FALLBACK_ALBUM.to_string(),
        timestamp: None,
        is_now_playing: false,
        source_url: FALLBACK_URL.to_string(),
        thumbnail: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrobble::models::HistoryResponse;

    fn parse(json: &str) -> Vec<RawTrack> {
        serde_json::from_str::<HistoryResponse>(json)
            .unwrap()
            .into_tracks()
    }

    #[test]
    fn test_lastfm_payload() {
        let raw = parse(
            r##"{"recenttracks":{"track":[
                {"name":"Song A","artist":{"mbid":"","#text":"Artist X"},
                 "album":{"#text":"Record"},"url":"https://last.fm/a",
                 "image":[{"size":"small","#text":"s.jpg"},{"size":"extralarge","#text":"xl.jpg"}],
                 "@attr":{"nowplaying":"true"}},
                {"name":"Song B","artist":{"#text":"Artist X"},"album":{"#text":""},
                 "date":{"uts":"1700000000","#text":"14 Nov 2023"}}
            ]}}"##,
        );
        let snap = split_history(&raw, DedupBy::ArtistTitle, 5);
        assert_eq!(snap.now_playing.title, "Song A");
        assert_eq!(snap.now_playing.artist, "Artist X");
        assert!(snap.now_playing.is_now_playing);
        assert_eq!(snap.now_playing.thumbnail.as_deref(), Some("xl.jpg"));
        assert_eq!(snap.previous.len(), 1);
        assert_eq!(snap.previous[0].title, "Song B");
        assert_eq!(snap.previous[0].album, FALLBACK_ALBUM);
        assert_eq!(snap.previous[0].timestamp, Some(1_700_000_000));
    }

    #[test]
    fn test_flat_payload() {
        let raw = parse(
            r#"[{"title":"Song A","artist":"Artist X","nowplaying":true},
                {"title":"Song B","artist":"Artist X","nowplaying":false}]"#,
        );
        let snap = split_history(&raw, DedupBy::ArtistTitle, 5);
        assert_eq!(snap.now_playing.title, "Song A");
        assert_eq!(snap.now_playing.artist, "Artist X");
        assert_eq!(snap.previous.len(), 1);
        assert_eq!(snap.previous[0].title, "Song B");
    }

    #[test]
    fn test_single_track_object() {
        let raw = parse(r##"{"recenttracks":{"track":{"name":"Only","artist":{"#text":"One"}}}}"##);
        assert_eq!(raw.len(), 1);
        let snap = split_history(&raw, DedupBy::ArtistTitle, 5);
        assert_eq!(snap.now_playing.title, "Only");
        assert!(!snap.now_playing.is_now_playing);
        assert!(snap.previous.is_empty());
    }

    #[test]
    fn test_missing_fields_fall_back() {
        let raw = parse(r#"[{}]"#);
        let t = normalize(&raw[0]);
        assert_eq!(t.title, FALLBACK_TITLE);
        assert_eq!(t.artist, FALLBACK_ARTIST);
        assert_eq!(t.album, FALLBACK_ALBUM);
        assert_eq!(t.source_url, FALLBACK_URL);
        assert_eq!(t.thumbnail, None);
    }

    #[test]
    fn test_empty_history_uses_fallback_track() {
        let snap = split_history(&[], DedupBy::ArtistTitle, 5);
        assert_eq!(snap.now_playing.title, FALLBACK_TITLE);
        assert!(snap.previous.is_empty());
    }

    #[test]
    fn test_dedup_by_artist_title_has_unique_keys() {
        let raw = parse(
            r#"[{"title":"Now","artist":"A","nowplaying":true},
                {"title":"Now","artist":"A"},
                {"title":"X","artist":"A"},
                {"title":" X ","artist":"A"},
                {"title":"Y","artist":"B"},
                {"title":"X","artist":"A"},
                {"title":"Z","artist":"B"}]"#,
        );
        let snap = split_history(&raw, DedupBy::ArtistTitle, 10);
        let titles: Vec<_> = snap.previous.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["X", "Y", "Z"]);

        let keys: HashSet<_> = snap.previous.iter().map(Track::key).collect();
        assert_eq!(keys.len(), snap.previous.len());
    }

    #[test]
    fn test_dedup_by_timestamp_keeps_replays() {
        let raw = parse(
            r#"[{"title":"Now","artist":"A","nowplaying":true},
                {"title":"X","artist":"A","date":{"uts":"100"}},
                {"title":"X","artist":"A","date":{"uts":"90"}},
                {"title":"X","artist":"A","date":{"uts":"90"}}]"#,
        );
        let snap = split_history(&raw, DedupBy::Timestamp, 10);
        let stamps: Vec<_> = snap.previous.iter().map(|t| t.timestamp).collect();
        assert_eq!(stamps, vec![Some(100), Some(90)]);
    }

    #[test]
    fn test_previous_capped() {
        let raw = parse(
            r#"[{"title":"0","artist":"A"},{"title":"1","artist":"A"},{"title":"2","artist":"A"},
                {"title":"3","artist":"A"},{"title":"4","artist":"A"}]"#,
        );
        let snap = split_history(&raw, DedupBy::ArtistTitle, 2);
        assert_eq!(snap.previous.len(), 2);
        assert_eq!(snap.previous[1].title, "2");
    }

    #[test]
    fn test_thumbnail_falls_back_to_last_non_empty() {
        let images = vec![
            RawImage { size: Some("small".into()), url: Some("s.jpg".into()) },
            RawImage { size: Some("large".into()), url: Some("l.jpg".into()) },
            RawImage { size: Some("extralarge".into()), url: Some("".into()) },
        ];
        assert_eq!(pick_thumbnail(&images).as_deref(), Some("l.jpg"));
        assert_eq!(pick_thumbnail(&[]), None);
    }
}
