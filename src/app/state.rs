use crate::greeting::Carousel;
use crate::poller::{LyricsOutcome, PassOutcome, Supplement};
use crate::reconcile::{self, ListOp};
use crate::scrobble::{Track, TrackKey};
use ratatui::layout::{Position, Rect};
use std::collections::HashMap;

pub const LYRICS_LOADING: &str = "Loading lyrics...";
pub const LYRICS_NOT_FOUND: &str = "No lyrics found.";

/// Frames a fade-in or fade-out lasts.
pub const FADE_STEPS: u8 = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LyricsPanel {
    Loading,
    Lines(Vec<String>),
    NotFound,
    Disabled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fade {
    Steady,
    /// Entering; waits `wait` frames before the fade starts.
    In { wait: u8, step: u8 },
    Out { step: u8 },
}

impl Fade {
    /// 0.0 invisible .. 1.0 fully shown.
    pub fn opacity(self) -> f32 {
        let f = |step: u8| f32::from(step) / f32::from(FADE_STEPS);
        match self {
            Fade::Steady => 1.0,
            Fade::In { wait, .. } if wait > 0 => 0.0,
            Fade::In { step, .. } => f(step),
            Fade::Out { step } => 1.0 - f(step),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviousEntry {
    pub track: Track,
    pub fade: Fade,
}

/// Everything the view shows. Created once, mutated in place by the App only.
#[derive(Debug, Clone)]
pub struct DisplayState {
    pub should_quit: bool,
    pub tick: u64,

    // Now playing
    pub now: Option<Track>,
    pub artwork_url: Option<String>,
    pub lyrics: LyricsPanel,
    pub lyrics_scroll: u16,

    // Previous tracks, plus entries still fading out
    pub previous: Vec<PreviousEntry>,
    pub leaving: Vec<PreviousEntry>,
    /// Resolved cover per previous track.
    pub previous_art: HashMap<TrackKey, String>,

    /// Track whose artwork and lyrics are committed.
    pub locked_key: Option<TrackKey>,
    /// Now-playing key of the last applied pass.
    pub last_head: Option<TrackKey>,

    pub in_flight: bool,
    pub last_error: Option<String>,
    pub status: String,

    pub greeting: Carousel,

    /// Where the artwork panel was last drawn, for mouse hits.
    pub artwork_area: Rect,
    /// Where each `previous` row was last drawn, in list order.
    pub previous_rows: Vec<Rect>,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self::new(Carousel::default())
    }
}

/// The album label and its "in" separator are hidden for a blank album or
/// one named exactly like the track.
pub fn album_hidden(album: &str, title: &str) -> bool {
    album.trim().is_empty() || album == title
}

impl DisplayState {
    pub fn new(greeting: Carousel) -> Self {
        Self {
            should_quit: false,
            tick: 0,
            now: None,
            artwork_url: None,
            lyrics: LyricsPanel::Loading,
            lyrics_scroll: 0,
            previous: Vec::new(),
            leaving: Vec::new(),
            previous_art: HashMap::new(),
            locked_key: None,
            last_head: None,
            in_flight: false,
            last_error: None,
            status: String::new(),
            greeting,
            artwork_area: Rect::default(),
            previous_rows: Vec::new(),
        }
    }

    /// Claim the single pass slot. Returns the locked key to hand to the pass,
    /// or `None` when a pass is already running.
    pub fn begin_pass(&mut self) -> Option<Option<TrackKey>> {
        if self.in_flight {
            return None;
        }
        self.in_flight = true;
        Some(self.locked_key.clone())
    }

    /// A pass is fetching art and lyrics for `key`. A new head drops the old
    /// lyrics in favor of the loading text.
    pub fn start_resolving(&mut self, key: &TrackKey) {
        if self.last_head.as_ref() != Some(key) {
            self.lyrics = LyricsPanel::Loading;
            self.lyrics_scroll = 0;
        }
    }

    pub fn fail_pass(&mut self, message: String) {
        self.in_flight = false;
        self.last_error = Some(message);
    }

    pub fn album_visible(&self) -> bool {
        self.now
            .as_ref()
            .is_some_and(|t| !album_hidden(&t.album, &t.title))
    }

    /// Track whose source a click at (column, row) opens: the now-playing
    /// panel or one of the previous rows.
    pub fn track_at(&self, column: u16, row: u16) -> Option<&Track> {
        let pos = Position::new(column, row);
        if self.artwork_area.contains(pos) {
            return self.now.as_ref();
        }
        let index = self.previous_rows.iter().position(|r| r.contains(pos))?;
        self.previous.get(index).map(|e| &e.track)
    }

    /// Cover for a previous track: the resolved one, else its payload thumbnail.
    pub fn previous_cover<'a>(&'a self, track: &'a Track) -> Option<&'a str> {
        self.previous_art
            .get(&track.key())
            .map(String::as_str)
            .or(track.thumbnail.as_deref())
    }

    pub fn previous_tracks(&self) -> Vec<Track> {
        self.previous.iter().map(|e| e.track.clone()).collect()
    }

    /// Commit a finished pass.
    pub fn apply_pass(&mut self, outcome: PassOutcome) {
        self.in_flight = false;
        self.last_error = None;

        let PassOutcome {
            snapshot,
            key,
            supplement,
        } = outcome;

        if self.locked_key.as_ref() != Some(&key) {
            self.locked_key = None;
        }
        let head_changed = self.last_head.as_ref() != Some(&key);
        self.last_head = Some(key.clone());

        if let Supplement::Refreshed {
            artwork,
            lyrics,
            previous_art,
        } = supplement
        {
            self.artwork_url = Some(artwork);
            self.previous_art.extend(previous_art);
            if head_changed {
                self.lyrics_scroll = 0;
            }
            match lyrics {
                LyricsOutcome::Found(lyrics) => {
                    self.lyrics = LyricsPanel::Lines(lyrics.display_lines());
                    self.locked_key = Some(key);
                }
                LyricsOutcome::NotFound => self.lyrics = LyricsPanel::NotFound,
                LyricsOutcome::Disabled => {
                    self.lyrics = LyricsPanel::Disabled;
                    self.locked_key = Some(key);
                }
            }
        }

        self.now = Some(snapshot.now_playing);
        self.reconcile_previous(snapshot.previous, head_changed);

        let shown: Vec<TrackKey> = self.previous.iter().map(|e| e.track.key()).collect();
        self.previous_art.retain(|k, _| shown.contains(k));
    }

    fn reconcile_previous(&mut self, new: Vec<Track>, head_changed: bool) {
        let old = self.previous_tracks();
        let ops = reconcile::reconcile(&old, &new, head_changed, |t: &Track| {
            (t.key(), t.timestamp)
        });
        if ops.is_empty() {
            return;
        }

        // Removes address the list as it was before any op ran.
        for op in &ops {
            if head_changed
                && let ListOp::Remove { index } = op
                && let Some(entry) = self.previous.get(*index)
            {
                self.leaving.push(PreviousEntry {
                    track: entry.track.clone(),
                    fade: Fade::Out { step: 0 },
                });
            }
        }

        let entry_ops = ops
            .into_iter()
            .map(|op| match op {
                ListOp::Insert {
                    index,
                    item,
                    stagger,
                } => ListOp::Insert {
                    index,
                    item: PreviousEntry {
                        track: item,
                        fade: Fade::In {
                            wait: u8::try_from(stagger * 2).unwrap_or(u8::MAX),
                            step: 0,
                        },
                    },
                    stagger,
                },
                ListOp::Remove { index } => ListOp::Remove { index },
                ListOp::Update { index, item } => ListOp::Update {
                    index,
                    item: PreviousEntry {
                        track: item,
                        fade: self.previous.get(index).map_or(Fade::Steady, |e| e.fade),
                    },
                },
            })
            .collect();
        reconcile::apply(&mut self.previous, entry_ops);
    }

    /// Step fades by one frame. Returns whether anything is still moving.
    pub fn advance_animations(&mut self) -> bool {
        let mut moving = false;
        for entry in &mut self.previous {
            entry.fade = match entry.fade {
                Fade::In { wait, step } if wait > 0 => Fade::In { wait: wait - 1, step },
                Fade::In { step, .. } if step + 1 >= FADE_STEPS => Fade::Steady,
                Fade::In { step, .. } => Fade::In { wait: 0, step: step + 1 },
                other => other,
            };
            moving |= entry.fade != Fade::Steady;
        }

        for entry in &mut self.leaving {
            if let Fade::Out { step } = entry.fade {
                entry.fade = Fade::Out { step: step + 1 };
            }
        }
        self.leaving
            .retain(|e| matches!(e.fade, Fade::Out { step } if step < FADE_STEPS));
        moving || !self.leaving.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artwork::tests::FakeArt;
    use crate::poller::tests::{FakeHistory, FakeLyrics, SCENARIO, poller};

    const SONG_C: &str = r#"[
        {"title":"Song C","artist":"Artist Y","nowplaying":true},
        {"title":"Song A","artist":"Artist X"},
        {"title":"Song B","artist":"Artist X"}
    ]"#;

    async fn tick(state: &mut DisplayState, p: &crate::poller::Poller) {
        let locked = state.begin_pass().expect("no pass in flight");
        match p.run_pass(locked.as_ref()).await {
            Ok(out) => state.apply_pass(out),
            Err(e) => state.fail_pass(format!("{e:#}")),
        }
    }

    fn titles(state: &DisplayState) -> Vec<String> {
        state.previous.iter().map(|e| e.track.title.clone()).collect()
    }

    #[test]
    fn test_album_hidden() {
        assert!(album_hidden("", "Song"));
        assert!(album_hidden(" ", "Song"));
        assert!(album_hidden("Song", "Song"));
        assert!(!album_hidden("song", "Song"));
        assert!(!album_hidden("Record", "Song"));
    }

    #[tokio::test]
    async fn test_scenario_song_a() {
        let p = poller(
            FakeHistory::json(&[SCENARIO]),
            FakeArt::new(Ok(Some("art.jpg"))),
            FakeLyrics::new(Some("words")),
        );
        let mut state = DisplayState::default();
        tick(&mut state, &p).await;

        let now = state.now.as_ref().unwrap();
        assert_eq!(now.title, "Song A");
        assert_eq!(now.artist, "Artist X");
        assert_eq!(titles(&state), vec!["Song B"]);
        assert_eq!(state.artwork_url.as_deref(), Some("art.jpg"));
        assert_eq!(state.lyrics, LyricsPanel::Lines(vec!["words".into()]));
        assert_eq!(state.locked_key, Some(TrackKey::new("Artist X", "Song A")));
        assert!(!state.album_visible());
    }

    #[tokio::test]
    async fn test_same_track_twice_does_not_refetch() {
        let art = FakeArt::new(Ok(Some("art.jpg")));
        let lyrics = FakeLyrics::new(Some("words"));
        let p = poller(FakeHistory::json(&[SCENARIO]), art.clone(), lyrics.clone());
        let mut state = DisplayState::default();

        tick(&mut state, &p).await;
        state.lyrics = LyricsPanel::Lines(vec!["kept".into()]);
        tick(&mut state, &p).await;

        assert_eq!(lyrics.calls(), 1);
        // Song A and the previous Song B, once each.
        assert_eq!(art.calls(), 2);
        assert_eq!(state.lyrics, LyricsPanel::Lines(vec!["kept".into()]));
        assert_eq!(state.locked_key, Some(TrackKey::new("Artist X", "Song A")));
    }

    #[tokio::test]
    async fn test_missing_lyrics_retry_next_tick() {
        let lyrics = FakeLyrics::new(None);
        let p = poller(
            FakeHistory::json(&[SCENARIO]),
            FakeArt::new(Err("404")),
            lyrics.clone(),
        );
        let mut state = DisplayState::default();

        tick(&mut state, &p).await;
        assert_eq!(state.lyrics, LyricsPanel::NotFound);
        assert_eq!(state.locked_key, None);
        assert_eq!(state.artwork_url.as_deref(), Some("placeholder.png"));

        tick(&mut state, &p).await;
        assert_eq!(lyrics.calls(), 2);
    }

    #[tokio::test]
    async fn test_new_track_clears_lock_and_shifts_list() {
        let lyrics = FakeLyrics::new(Some("words"));
        let p = poller(
            FakeHistory::json(&[SCENARIO, SONG_C]),
            FakeArt::new(Ok(None)),
            lyrics.clone(),
        );
        let mut state = DisplayState::default();

        tick(&mut state, &p).await;
        while state.advance_animations() {}
        tick(&mut state, &p).await;

        assert_eq!(state.now.as_ref().unwrap().title, "Song C");
        assert_eq!(state.locked_key, Some(TrackKey::new("Artist Y", "Song C")));
        assert_eq!(titles(&state), vec!["Song A", "Song B"]);
        assert_eq!(state.previous[0].fade, Fade::In { wait: 0, step: 0 });
        assert_eq!(state.previous[1].fade, Fade::Steady);
        assert_eq!(lyrics.calls(), 2);
    }

    #[tokio::test]
    async fn test_history_failure_keeps_display() {
        let p = poller(
            FakeHistory::json(&[SCENARIO]),
            FakeArt::new(Ok(None)),
            FakeLyrics::new(Some("words")),
        );
        let mut state = DisplayState::default();
        tick(&mut state, &p).await;

        let broken = poller(
            FakeHistory::failing(),
            FakeArt::new(Ok(None)),
            FakeLyrics::new(None),
        );
        tick(&mut state, &broken).await;

        assert!(state.last_error.is_some());
        assert!(!state.in_flight);
        assert_eq!(state.now.as_ref().unwrap().title, "Song A");
    }

    #[test]
    fn test_single_flight() {
        let mut state = DisplayState::default();
        assert_eq!(state.begin_pass(), Some(None));
        assert_eq!(state.begin_pass(), None);
        state.fail_pass("boom".into());
        assert!(state.begin_pass().is_some());
    }

    #[test]
    fn test_first_render_staggers_and_settles() {
        let mut state = DisplayState::default();
        let track = |title: &str| Track {
            title: title.into(),
            artist: "A".into(),
            album: " ".into(),
            timestamp: None,
            is_now_playing: false,
            source_url: String::new(),
            thumbnail: None,
        };
        state.reconcile_previous(vec![track("1"), track("2"), track("3")], true);
        let waits: Vec<_> = state
            .previous
            .iter()
            .map(|e| match e.fade {
                Fade::In { wait, .. } => wait,
                _ => u8::MAX,
            })
            .collect();
        assert_eq!(waits, vec![0, 2, 4]);

        let mut frames = 0;
        while state.advance_animations() {
            frames += 1;
            assert!(frames < 100);
        }
        assert!(state.previous.iter().all(|e| e.fade == Fade::Steady));

        // Leaving entry fades then disappears.
        state.reconcile_previous(vec![track("0"), track("1"), track("2")], true);
        assert_eq!(state.leaving.len(), 1);
        assert_eq!(state.leaving[0].track.title, "3");
        while state.advance_animations() {}
        assert!(state.leaving.is_empty());

        // A new head over an unchanged list keeps every row in place.
        state.reconcile_previous(vec![track("0"), track("1"), track("2")], true);
        assert!(state.leaving.is_empty());
        assert!(state.previous.iter().all(|e| e.fade == Fade::Steady));
    }

    #[tokio::test]
    async fn test_previous_art_follows_the_list() {
        let p = poller(
            FakeHistory::json(&[SCENARIO, SONG_C]),
            FakeArt::new(Ok(Some("art.jpg"))),
            FakeLyrics::new(Some("words")),
        );
        let mut state = DisplayState::default();

        tick(&mut state, &p).await;
        let song_b = state.previous[0].track.clone();
        assert_eq!(state.previous_cover(&song_b), Some("art.jpg"));

        tick(&mut state, &p).await;
        assert_eq!(titles(&state), vec!["Song A", "Song B"]);
        assert_eq!(state.previous_art.len(), 2);
        assert!(state.previous.iter().all(|e| state.previous_cover(&e.track) == Some("art.jpg")));
    }

    #[tokio::test]
    async fn test_click_finds_now_playing_or_previous_row() {
        let p = poller(
            FakeHistory::json(&[SONG_C]),
            FakeArt::new(Ok(None)),
            FakeLyrics::new(None),
        );
        let mut state = DisplayState::default();
        tick(&mut state, &p).await;

        state.artwork_area = Rect::new(0, 0, 20, 5);
        state.previous_rows = vec![Rect::new(0, 6, 20, 2), Rect::new(0, 8, 20, 2)];

        assert_eq!(state.track_at(3, 2).map(|t| t.title.as_str()), Some("Song C"));
        assert_eq!(state.track_at(3, 7).map(|t| t.title.as_str()), Some("Song A"));
        assert_eq!(state.track_at(3, 9).map(|t| t.title.as_str()), Some("Song B"));
        assert_eq!(state.track_at(30, 9), None);
        assert_eq!(state.track_at(3, 12), None);
    }

    #[tokio::test]
    async fn test_new_head_shows_loading_lyrics() {
        let p = poller(
            FakeHistory::json(&[SCENARIO]),
            FakeArt::new(Ok(None)),
            FakeLyrics::new(Some("words")),
        );
        let mut state = DisplayState::default();
        tick(&mut state, &p).await;
        state.lyrics_scroll = 3;

        state.start_resolving(&TrackKey::new("Artist X", "Song A"));
        assert_eq!(state.lyrics, LyricsPanel::Lines(vec!["words".into()]));
        assert_eq!(state.lyrics_scroll, 3);

        state.start_resolving(&TrackKey::new("Artist Y", "Song C"));
        assert_eq!(state.lyrics, LyricsPanel::Loading);
        assert_eq!(state.lyrics_scroll, 0);
    }
}
