//! One resolution pass: history → normalized snapshot → (maybe) artwork and
//! lyrics. The pass reads the locked key but never writes state; the App
//! commits the returned [`PassOutcome`].

use crate::app::events::{Event, PollEvent};
use crate::artwork::ArtworkResolver;
use crate::config::{Config, DedupBy};
use crate::lyrics::{LrclibClient, Lyrics, LyricsSource};
use crate::scrobble::{HistoryClient, HistorySource, Snapshot, TrackKey, split_history};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LyricsOutcome {
    Found(Lyrics),
    NotFound,
    Disabled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Supplement {
    /// Now-playing key equals the locked key; nothing was fetched.
    Unchanged,
    Refreshed {
        artwork: String,
        lyrics: LyricsOutcome,
        /// Cover per previous track, in list order.
        previous_art: Vec<(TrackKey, String)>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassOutcome {
    pub snapshot: Snapshot,
    pub key: TrackKey,
    pub supplement: Supplement,
}

#[derive(Clone)]
pub struct Poller {
    history: Arc<dyn HistorySource>,
    artwork: ArtworkResolver,
    lyrics: Option<Arc<dyn LyricsSource>>,
    dedup: DedupBy,
    previous_max: usize,
}

impl Poller {
    pub fn new(
        history: Arc<dyn HistorySource>,
        artwork: ArtworkResolver,
        lyrics: Option<Arc<dyn LyricsSource>>,
    ) -> Self {
        Self {
            history,
            artwork,
            lyrics,
            dedup: DedupBy::default(),
            previous_max: 5,
        }
    }

    pub fn from_config(cfg: &Config, http: &reqwest::Client) -> Self {
        let history = Arc::new(HistoryClient::new(http.clone(), cfg.history.request_url()));
        let artwork = ArtworkResolver::from_config(&cfg.artwork, http);
        let lyrics = cfg.lyrics.enabled.then(|| {
            Arc::new(LrclibClient::new(http.clone(), cfg.lyrics.base_url.clone()))
                as Arc<dyn LyricsSource>
        });
        Self::new(history, artwork, lyrics).with_previous(cfg.poll.dedup, cfg.poll.previous_max)
    }

    pub fn with_previous(mut self, dedup: DedupBy, previous_max: usize) -> Self {
        self.dedup = dedup;
        self.previous_max = previous_max;
        self
    }

    /// Run one pass. Only a failed history fetch is an error; artwork and
    /// lyrics failures degrade to fallbacks.
    pub async fn run_pass(&self, locked: Option<&TrackKey>) -> anyhow::Result<PassOutcome> {
        self.pass(locked, None).await
    }

    /// Like [`Poller::run_pass`], also sending [`PollEvent::Resolving`] before
    /// artwork and lyrics are fetched.
    pub async fn run_pass_reporting(
        &self,
        locked: Option<&TrackKey>,
        tx: &mpsc::Sender<Event>,
    ) -> anyhow::Result<PassOutcome> {
        self.pass(locked, Some(tx)).await
    }

    async fn pass(
        &self,
        locked: Option<&TrackKey>,
        tx: Option<&mpsc::Sender<Event>>,
    ) -> anyhow::Result<PassOutcome> {
        let raw = self.history.recent_tracks().await?;
        let snapshot = split_history(&raw, self.dedup, self.previous_max);
        let key = snapshot.now_playing.key();

        if locked == Some(&key) {
            tracing::debug!(track = %key, "now playing unchanged, skipping art and lyrics");
            return Ok(PassOutcome {
                snapshot,
                key,
                supplement: Supplement::Unchanged,
            });
        }

        if let Some(tx) = tx {
            let _ = tx.send(Event::Poll(PollEvent::Resolving(key.clone()))).await;
        }

        let artwork = self.artwork.resolve(&snapshot.now_playing).await;
        let lyrics = self.fetch_lyrics(&key).await;
        let mut previous_art = Vec::with_capacity(snapshot.previous.len());
        for track in &snapshot.previous {
            previous_art.push((track.key(), self.artwork.resolve(track).await));
        }
        tracing::info!(track = %key, %artwork, found_lyrics = matches!(lyrics, LyricsOutcome::Found(_)), "resolved now playing");

        Ok(PassOutcome {
            snapshot,
            key,
            supplement: Supplement::Refreshed {
                artwork,
                lyrics,
                previous_art,
            },
        })
    }

    async fn fetch_lyrics(&self, key: &TrackKey) -> LyricsOutcome {
        let Some(source) = &self.lyrics else {
            return LyricsOutcome::Disabled;
        };
        match source.lyrics(&key.artist, &key.title).await {
            Ok(Some(lyrics)) => LyricsOutcome::Found(lyrics),
            Ok(None) => LyricsOutcome::NotFound,
            Err(e) => {
                tracing::warn!(track = %key, "lyrics lookup failed: {e:#}");
                LyricsOutcome::NotFound
            }
        }
    }
}

/// Emit a poll tick now and then every `period`.
pub fn spawn_ticker(tx: mpsc::Sender<Event>, period: Duration) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period.max(Duration::from_secs(1)));
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            interval.tick().await;
            if tx.send(Event::Poll(PollEvent::Tick)).await.is_err() {
                break;
            }
        }
    });
}
