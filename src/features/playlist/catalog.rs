//! # Remote Catalog
//!
//! The three read endpoints the pipeline needs, behind a trait so the
//! orchestrator can be driven by an in-memory catalog in tests.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Configurable base URL and request timeout
//! - 1.0.0: Initial release against the YouTube Data API v3

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::api::{
    PlaylistItemListResponse, PlaylistListResponse, VideoListResponse, MAX_PAGE_SIZE,
};
use crate::core::{Config, PipelineError, PipelineResult};

#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Playlist metadata; an empty `items` list means missing or private
    async fn playlist(&self, playlist_id: &str) -> PipelineResult<PlaylistListResponse>;

    /// One page of member references, starting at `page_token`
    async fn playlist_items(
        &self,
        playlist_id: &str,
        page_token: Option<&str>,
    ) -> PipelineResult<PlaylistItemListResponse>;

    /// Full details for a batch of item ids (at most one page worth)
    async fn videos(&self, video_ids: &[String]) -> PipelineResult<VideoListResponse>;
}

/// HTTP client for the YouTube Data API
#[derive(Clone)]
pub struct YouTubeCatalog {
    client: Client,
    base_url: String,
    api_key: String,
}

impl YouTubeCatalog {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>, timeout: Duration) -> PipelineResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let api_key = config.require_api_key()?;
        Ok(Self::new(&config.api_base_url, api_key, config.http_timeout)?)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> PipelineResult<T> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!("GET {} {:?}", url, query);

        let response = self
            .client
            .get(&url)
            .query(query)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PipelineError::fetch_failed(format!(
                "{} returned HTTP {}: {}",
                endpoint,
                status.as_u16(),
                body.chars().take(200).collect::<String>()
            )));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            PipelineError::fetch_failed(format!("{} returned malformed JSON: {}", endpoint, e))
        })
    }
}

#[async_trait]
impl CatalogApi for YouTubeCatalog {
    async fn playlist(&self, playlist_id: &str) -> PipelineResult<PlaylistListResponse> {
        self.get_json("playlists", &[("part", "snippet"), ("id", playlist_id)])
            .await
    }

    async fn playlist_items(
        &self,
        playlist_id: &str,
        page_token: Option<&str>,
    ) -> PipelineResult<PlaylistItemListResponse> {
        let max_results = MAX_PAGE_SIZE.to_string();
        let mut query = vec![
            ("part", "snippet"),
            ("maxResults", max_results.as_str()),
            ("playlistId", playlist_id),
        ];
        if let Some(token) = page_token {
            query.push(("pageToken", token));
        }
        self.get_json("playlistItems", &query).await
    }

    async fn videos(&self, video_ids: &[String]) -> PipelineResult<VideoListResponse> {
        let ids = video_ids.join(",");
        self.get_json(
            "videos",
            &[("part", "contentDetails,snippet,statistics"), ("id", ids.as_str())],
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serve one canned response per connection, in order, and hand back
    /// the request line of every request received.
    async fn serve(responses: Vec<(&'static str, &'static str)>) -> (String, JoinHandle<Vec<String>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}/v3", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let mut request_lines = Vec::new();
            for (status, body) in responses {
                let (mut socket, _) = listener.accept().await.unwrap();

                let mut head = Vec::new();
                let mut buf = [0u8; 1024];
                while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                    let n = socket.read(&mut buf).await.unwrap();
                    if n == 0 {
                        break;
                    }
                    head.extend_from_slice(&buf[..n]);
                }
                let head = String::from_utf8_lossy(&head).to_string();
                request_lines.push(head.lines().next().unwrap_or_default().to_string());

                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                socket.write_all(response.as_bytes()).await.unwrap();
                socket.shutdown().await.unwrap();
            }
            request_lines
        });

        (base_url, handle)
    }

    fn catalog(base_url: &str) -> YouTubeCatalog {
        // Local server, so keep any proxy settings from the environment out of the way
        YouTubeCatalog {
            client: Client::builder()
                .no_proxy()
                .timeout(Duration::from_secs(5))
                .build()
                .unwrap(),
            base_url: base_url.to_string(),
            api_key: "secret".to_string(),
        }
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let catalog =
            YouTubeCatalog::new("http://localhost:9/v3/", "key", Duration::from_secs(1)).unwrap();
        assert_eq!(catalog.base_url, "http://localhost:9/v3");
    }

    #[test]
    fn test_from_config_requires_key() {
        let config = Config::default();
        assert!(YouTubeCatalog::from_config(&config).is_err());

        let config = Config {
            youtube_api_key: Some("k".to_string()),
            ..Config::default()
        };
        assert!(YouTubeCatalog::from_config(&config).is_ok());
    }

    #[tokio::test]
    async fn test_transport_failure_is_fetch_failed() {
        // Nothing listens on port 9 (discard) on a test machine
        let catalog =
            YouTubeCatalog::new("http://127.0.0.1:9", "key", Duration::from_secs(2)).unwrap();
        let result = catalog.playlist("PL1").await;
        assert!(matches!(result, Err(PipelineError::FetchFailed(_))));
    }

    #[tokio::test]
    async fn test_error_status_is_fetch_failed() {
        let (base_url, server) = serve(vec![(
            "403 Forbidden",
            r#"{"error":{"code":403,"message":"quotaExceeded"}}"#,
        )])
        .await;

        let err = catalog(&base_url).playlist("PL1").await.unwrap_err();
        match err {
            PipelineError::FetchFailed(detail) => {
                assert!(detail.contains("HTTP 403"), "{}", detail);
                assert!(detail.contains("quotaExceeded"), "{}", detail);
            }
            other => panic!("unexpected error: {:?}", other),
        }
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_malformed_body_is_fetch_failed() {
        let (base_url, server) = serve(vec![("200 OK", "<html>not json</html>")]).await;

        let err = catalog(&base_url).videos(&["a".to_string()]).await.unwrap_err();
        match err {
            PipelineError::FetchFailed(detail) => assert!(detail.contains("malformed JSON"), "{}", detail),
            other => panic!("unexpected error: {:?}", other),
        }
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_request_query_parameters() {
        let (base_url, server) = serve(vec![
            ("200 OK", r#"{"items":[]}"#),
            ("200 OK", r#"{"items":[],"nextPageToken":"CAUQAA"}"#),
            ("200 OK", r#"{"items":[]}"#),
            ("200 OK", r#"{"items":[]}"#),
        ])
        .await;
        let catalog = catalog(&base_url);

        catalog.playlist("PL1").await.unwrap();
        let first = catalog.playlist_items("PL1", None).await.unwrap();
        assert_eq!(first.next_cursor(), Some("CAUQAA".to_string()));
        catalog.playlist_items("PL1", Some("CAUQAA")).await.unwrap();
        catalog
            .videos(&["a".to_string(), "b".to_string(), "c".to_string()])
            .await
            .unwrap();

        let lines = server.await.unwrap();
        assert_eq!(lines.len(), 4);
        for line in &lines {
            assert!(line.starts_with("GET /v3/"), "{}", line);
            assert!(line.contains("key=secret"), "{}", line);
        }

        assert!(lines[0].starts_with("GET /v3/playlists?"));
        assert!(lines[0].contains("part=snippet"));
        assert!(lines[0].contains("id=PL1"));

        assert!(lines[1].starts_with("GET /v3/playlistItems?"));
        assert!(lines[1].contains("maxResults=50"));
        assert!(lines[1].contains("playlistId=PL1"));
        assert!(!lines[1].contains("pageToken"));

        assert!(lines[2].contains("maxResults=50"));
        assert!(lines[2].contains("pageToken=CAUQAA"));

        assert!(lines[3].starts_with("GET /v3/videos?"));
        assert!(lines[3].contains("part=contentDetails%2Csnippet%2Cstatistics"));
        assert!(lines[3].contains("id=a%2Cb%2Cc"));
    }
}
