use super::models::{HistoryResponse, RawTrack};
use crate::http::BoxFuture;
use anyhow::Context;
use std::sync::Arc;

/// Anything that can hand back the raw recent-tracks list, newest first.
pub trait HistorySource: Send + Sync {
    fn recent_tracks(&self) -> BoxFuture<'_, anyhow::Result<Vec<RawTrack>>>;
}

#[derive(Debug)]
struct Inner {
    http: reqwest::Client,
    url: String,
}

#[derive(Debug, Clone)]
pub struct HistoryClient {
    inner: Arc<Inner>,
}

impl HistoryClient {
    pub fn new(http: reqwest::Client, url: String) -> Self {
        Self {
            inner: Arc::new(Inner { http, url }),
        }
    }

    pub async fn fetch_raw(&self) -> anyhow::Result<serde_json::Value> {
        self.inner
            .http
            .get(&self.inner.url)
            .send()
            .await
            .context("send history request")?
            .error_for_status()
            .context("history http status")?
            .json()
            .await
            .context("parse history json")
    }
}

impl HistorySource for HistoryClient {
    fn recent_tracks(&self) -> BoxFuture<'_, anyhow::Result<Vec<RawTrack>>> {
        Box::pin(async move {
            let v = self.fetch_raw().await?;
            let parsed: HistoryResponse =
                serde_json::from_value(v).context("unexpected history payload shape")?;
            Ok(parsed.into_tracks())
        })
    }
}
