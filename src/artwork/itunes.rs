//! iTunes Search API artwork lookup.

use super::ArtworkSource;
use crate::http::BoxFuture;
use crate::scrobble::Track;
use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ItunesResponse {
    #[serde(default)]
    results: Vec<ItunesResult>,
}

#[derive(Debug, Deserialize)]
struct ItunesResult {
    #[serde(rename = "artworkUrl100")]
    artwork_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ItunesClient {
    http: reqwest::Client,
    search_url: String,
    try_animated: bool,
}

impl ItunesClient {
    pub fn new(http: reqwest::Client, search_url: String, try_animated: bool) -> Self {
        Self {
            http,
            search_url,
            try_animated,
        }
    }

    pub async fn fetch_artwork(&self, artist: &str, title: &str) -> anyhow::Result<Option<String>> {
        let term = format!("{} {}", artist, title);
        let url = format!(
            "{}?term={}&entity=song&limit=1",
            self.search_url,
            urlencoding::encode(term.trim())
        );

        let data: ItunesResponse = self
            .http
            .get(&url)
            .send()
            .await
            .context("send itunes search")?
            .error_for_status()
            .context("itunes http status")?
            .json()
            .await
            .context("parse itunes json")?;

        let Some(artwork) = data
            .results
            .into_iter()
            .next()
            .and_then(|r| r.artwork_url)
            .filter(|u| !u.is_empty())
        else {
            return Ok(None);
        };

        let base = upgrade_resolution(&artwork);
        if !self.try_animated {
            return Ok(Some(base));
        }

        for candidate in candidates(&base) {
            if self.is_image(&candidate).await {
                return Ok(Some(candidate));
            }
        }
        tracing::debug!(%base, "no itunes variant answered as an image");
        Ok(Some(base))
    }

    async fn is_image(&self, url: &str) -> bool {
        let Ok(resp) = self.http.get(url).send().await else {
            return false;
        };
        if !resp.status().is_success() {
            return false;
        }
        resp.headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.to_ascii_lowercase().starts_with("image/"))
    }
}

impl ArtworkSource for ItunesClient {
    fn lookup<'a>(&'a self, track: &'a Track) -> BoxFuture<'a, anyhow::Result<Option<String>>> {
        Box::pin(self.fetch_artwork(&track.artist, &track.title))
    }
}

/// Swap the 100px thumbnail size token for the 600px rendition.
pub fn upgrade_resolution(url: &str) -> String {
    const SMALL: &str = "100x100bb";
    match url.to_ascii_lowercase().find(SMALL) {
        Some(pos) => format!("{}600x600bb{}", &url[..pos], &url[pos + SMALL.len()..]),
        None => url.to_string(),
    }
}

/// Animated and plain variants to try, most desirable first.
pub fn candidates(base: &str) -> Vec<String> {
    let root = strip_extension(base);
    vec![
        format!("{root}.webp"),
        format!("{root}.gif"),
        format!("{root}.jpg"),
        base.to_string(),
    ]
}

fn strip_extension(url: &str) -> &str {
    let path = url.split('?').next().unwrap_or(url);
    let last_slash = path.rfind('/').map_or(0, |i| i + 1);
    match path[last_slash..].rfind('.') {
        Some(dot) => &path[..last_slash + dot],
        None => path,
    }
}
