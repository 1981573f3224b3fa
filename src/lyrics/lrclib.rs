//! LRCLIB API client
//!
//! LRCLIB is a free lyrics API serving plain and synchronized (LRC) lyrics.
//! API Documentation: https://lrclib.net/docs

use super::{Lyrics, LyricsSource};
use crate::http::BoxFuture;
use serde::Deserialize;

/// LRCLIB record, as returned by both `/search` and `/get/{id}`
#[derive(Debug, Deserialize, Clone)]
pub struct LrclibRecord {
    pub id: Option<i64>,
    #[serde(rename = "plainLyrics")]
    pub plain_lyrics: Option<String>,
    #[serde(rename = "syncedLyrics")]
    pub synced_lyrics: Option<String>,
}

impl LrclibRecord {
    /// Plain text first, synced text otherwise.
    fn best(&self) -> Option<Lyrics> {
        let present = |s: &Option<String>| s.as_deref().is_some_and(|t| !t.trim().is_empty());
        if present(&self.plain_lyrics) {
            return self.plain_lyrics.clone().map(|text| Lyrics { text, synced: false });
        }
        if present(&self.synced_lyrics) {
            return self.synced_lyrics.clone().map(|text| Lyrics { text, synced: true });
        }
        None
    }
}

/// LRCLIB API client
#[derive(Debug, Clone)]
pub struct LrclibClient {
    client: reqwest::Client,
    base_url: String,
}

impl LrclibClient {
    pub fn new(client: reqwest::Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    /// Search by `artist title`; the first record wins. When it carries no
    /// text, its full record is fetched by id.
    pub async fn find(&self, artist: &str, title: &str) -> anyhow::Result<Option<Lyrics>> {
        let query = format!("{} {}", artist, title);
        let url = format!(
            "{}/search?q={}",
            self.base_url,
            urlencoding::encode(query.trim())
        );

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            tracing::debug!(status = %response.status(), "lrclib search miss");
            return Ok(None);
        }

        let results: Vec<LrclibRecord> = response.json().await?;
        let Some(first) = results.first() else {
            return Ok(None);
        };
        if let Some(lyrics) = first.best() {
            return Ok(Some(lyrics));
        }

        match first.id {
            Some(id) => Ok(self.get_by_id(id).await.unwrap_or_else(|e| {
                tracing::debug!("lrclib get {id} failed: {e:#}");
                None
            })),
            None => Ok(None),
        }
    }

    async fn get_by_id(&self, id: i64) -> anyhow::Result<Option<Lyrics>> {
        let url = format!("{}/get/{}", self.base_url, id);
        let response = self.client.get(&url).send().await?;

        if response.status().is_success() {
            let record: LrclibRecord = response.json().await?;
            Ok(record.best())
        } else if response.status() == reqwest::StatusCode::NOT_FOUND {
            Ok(None)
        } else {
            anyhow::bail!("LRCLIB API error: {}", response.status());
        }
    }
}

impl LyricsSource for LrclibClient {
    fn lyrics<'a>(
        &'a self,
        artist: &'a str,
        title: &'a str,
    ) -> BoxFuture<'a, anyhow::Result<Option<Lyrics>>> {
        Box::pin(self.find(artist, title))
    }
}
