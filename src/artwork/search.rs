//! Song search endpoint that answers with a direct cover URL.

use super::ArtworkSource;
use crate::http::BoxFuture;
use crate::scrobble::Track;

#[derive(Debug, Clone)]
pub struct SearchClient {
    http: reqwest::Client,
    base_url: String,
}

impl SearchClient {
    pub fn new(http: reqwest::Client, base_url: String) -> Self {
        Self { http, base_url }
    }

    /// `artist - title - album` with runs of whitespace collapsed and empty
    /// parts dropped.
    pub fn query(artist: &str, title: &str, album: Option<&str>) -> String {
        [Some(artist), Some(title), album]
            .into_iter()
            .flatten()
            .map(|part| part.split_whitespace().collect::<Vec<_>>().join(" "))
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" - ")
    }

    /// Album worth qualifying the query with: not blank and not a repeat of the title.
    fn album_qualifier(track: &Track) -> Option<&str> {
        let album = track.album.trim();
        (!album.is_empty() && track.album != track.title).then_some(album)
    }

    async fn fetch(&self, query: &str) -> anyhow::Result<Option<String>> {
        let url = format!("{}?q={}", self.base_url, urlencoding::encode(query));
        let response = self.http.get(&url).send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            anyhow::bail!("artwork search error: {}", response.status());
        }

        let body = response.text().await?;
        let art = body.trim();
        Ok((!art.is_empty()).then(|| art.to_string()))
    }

    pub async fn search(&self, track: &Track) -> anyhow::Result<Option<String>> {
        let album = Self::album_qualifier(track);
        let query = Self::query(&track.artist, &track.title, album);
        if let Some(art) = self.fetch(&query).await? {
            return Ok(Some(art));
        }

        // Retry without the album qualifier
        if album.is_some() {
            let query = Self::query(&track.artist, &track.title, None);
            return self.fetch(&query).await;
        }
        Ok(None)
    }
}

impl ArtworkSource for SearchClient {
    fn lookup<'a>(&'a self, track: &'a Track) -> BoxFuture<'a, anyhow::Result<Option<String>>> {
        Box::pin(self.search(track))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artwork::ArtworkResolver;
    use crate::config::ArtworkStep;
    use crate::http::tests::{local_client, route, serve};
    use std::sync::Arc;

    fn track(album: &str) -> Track {
        Track {
            title: "T".into(),
            artist: "A".into(),
            album: album.into(),
            timestamp: None,
            is_now_playing: true,
            source_url: String::new(),
            thumbnail: None,
        }
    }

    #[test]
    fn test_query_normalizes_spaces() {
        assert_eq!(
            SearchClient::query("  The   Band ", "Some\tSong", Some("Great  Album")),
            "The Band - Some Song - Great Album"
        );
    }

    #[test]
    fn test_query_drops_empty_parts() {
        assert_eq!(SearchClient::query("Artist", "Title", Some("   ")), "Artist - Title");
        assert_eq!(SearchClient::query("Artist", "Title", None), "Artist - Title");
    }

    #[test]
    fn test_album_qualifier() {
        let mut track = Track {
            title: "Single".into(),
            artist: "A".into(),
            album: "Single".into(),
            timestamp: None,
            is_now_playing: true,
            source_url: String::new(),
            thumbnail: None,
        };
        assert_eq!(SearchClient::album_qualifier(&track), None);
        track.album = " ".into();
        assert_eq!(SearchClient::album_qualifier(&track), None);
        track.album = "LP".into();
        assert_eq!(SearchClient::album_qualifier(&track), Some("LP"));
    }

    #[tokio::test]
    async fn test_album_404_retries_without_album() {
        let (base, seen) = serve(vec![
            route("/art?q=A%20-%20T%20-%20LP", 404, "not found"),
            route("/art?q=A%20-%20T", 200, "art.jpg\n"),
        ])
        .await;
        let client = SearchClient::new(local_client(), format!("{base}/art"));

        let art = client.search(&track("LP")).await.unwrap();
        assert_eq!(art.as_deref(), Some("art.jpg"));
        assert_eq!(
            *seen.lock().unwrap(),
            vec!["/art?q=A%20-%20T%20-%20LP", "/art?q=A%20-%20T"]
        );
    }

    #[tokio::test]
    async fn test_no_album_means_single_request() {
        let (base, seen) = serve(vec![]).await;
        let client = SearchClient::new(local_client(), format!("{base}/art"));

        assert_eq!(client.search(&track(" ")).await.unwrap(), None);
        assert_eq!(*seen.lock().unwrap(), vec!["/art?q=A%20-%20T"]);
    }

    #[tokio::test]
    async fn test_server_error_is_an_error() {
        let (base, _) = serve(vec![route("/art?q=A%20-%20T", 500, "")]).await;
        let client = SearchClient::new(local_client(), format!("{base}/art"));
        assert!(client.search(&track("")).await.is_err());
    }

    #[tokio::test]
    async fn test_404_everywhere_resolves_to_placeholder() {
        let (base, _) = serve(vec![]).await;
        let search = Arc::new(SearchClient::new(local_client(), format!("{base}/art")));
        let resolver = ArtworkResolver::new(
            vec![ArtworkStep::Search, ArtworkStep::Thumbnail],
            "placeholder.png".into(),
            8,
        )
        .with_source(ArtworkStep::Search, search);

        assert_eq!(resolver.resolve(&track("LP")).await, "placeholder.png");
    }
}
