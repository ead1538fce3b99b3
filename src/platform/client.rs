//! HTTP client for disco-api requests

use crate::config::AppConfig;
use crate::error::LinksError;
use crate::platform::auth::AuthToken;
use crate::platform::types::{CatalogPageResponse, PlaybackResponse, TokenResponse};
use crate::platform::DiscoveryApi;
use reqwest::{Client, ClientBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

/// Side-loaded resources requested with every catalog page
const CATALOG_INCLUDE: &str =
    "primaryChannel,primaryChannel.images,show,show.images,genres,tags,images,contentPackages";

/// Newest season and episode first
const CATALOG_SORT: &str = "-seasonNumber,-episodeNumber";

/// disco-api HTTP client
///
/// Issues plain GET requests and classifies the outcome. It never retries;
/// callers decide what a [`LinksError::RateLimited`] means for them.
pub struct ApiClient {
    client: Client,
    api_base: String,
    playback_base: String,
    page_size: u32,
}

impl ApiClient {
    /// Create a new client from the run configuration
    pub fn new(config: &AppConfig) -> Result<Self, LinksError> {
        let client = ClientBuilder::new()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            playback_base: config.playback_base.trim_end_matches('/').to_string(),
            page_size: config.page_size,
        })
    }

    /// GET `url` and decode the JSON body into `T`
    ///
    /// The bearer header is only sent when a token is given.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        url: Url,
        token: Option<&AuthToken>,
    ) -> Result<T, LinksError> {
        debug!("GET {}", url);

        let mut request = self.client.get(url);
        if let Some(token) = token {
            request = request.bearer_auth(token.as_str());
        }

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(LinksError::RateLimited);
        }

        if status != StatusCode::OK {
            return Err(LinksError::Http {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Token endpoint for a realm
    pub fn token_url(&self, realm: &str) -> Result<Url, LinksError> {
        Ok(Url::parse_with_params(
            &format!("{}/token", self.api_base),
            &[("realm", realm)],
        )?)
    }

    /// Catalog endpoint for one page of a show
    pub fn catalog_url(&self, show_id: u64, page: u32) -> Result<Url, LinksError> {
        let show_id = show_id.to_string();
        let page = page.to_string();
        let page_size = self.page_size.to_string();

        Ok(Url::parse_with_params(
            &format!("{}/content/videos/", self.api_base),
            &[
                ("include", CATALOG_INCLUDE),
                ("sort", CATALOG_SORT),
                ("filter[show.id]", show_id.as_str()),
                ("filter[videoType]", "EPISODE"),
                ("page[number]", page.as_str()),
                ("page[size]", page_size.as_str()),
            ],
        )?)
    }

    /// Playback info endpoint for an episode
    pub fn playback_url(&self, episode_id: &str) -> Result<Url, LinksError> {
        let mut url = Url::parse(&format!(
            "{}/playback/videoPlaybackInfo",
            self.playback_base
        ))?;
        url.path_segments_mut()
            .map_err(|_| {
                LinksError::InvalidArgument(format!(
                    "cannot use '{}' as playback base URL",
                    self.playback_base
                ))
            })?
            .push(episode_id);
        Ok(url)
    }
}

#[async_trait::async_trait]
impl DiscoveryApi for ApiClient {
    async fn token(&self, realm: &str) -> Result<TokenResponse, LinksError> {
        let url = self.token_url(realm)?;
        self.fetch(url, None).await
    }

    async fn catalog_page(
        &self,
        show_id: u64,
        page: u32,
        token: &AuthToken,
    ) -> Result<CatalogPageResponse, LinksError> {
        let url = self.catalog_url(show_id, page)?;
        self.fetch(url, Some(token)).await
    }

    async fn playback_info(
        &self,
        episode_id: &str,
        token: &AuthToken,
    ) -> Result<PlaybackResponse, LinksError> {
        let url = self.playback_url(episode_id)?;
        self.fetch(url, Some(token)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_USER_AGENT;
    use mockito::Matcher;

    fn client_for(base: &str) -> ApiClient {
        ApiClient::new(&AppConfig::new().with_base_url(base)).unwrap()
    }

    #[test]
    fn test_token_url() {
        let client = ApiClient::new(&AppConfig::default()).unwrap();
        assert_eq!(
            client.token_url("hgtv").unwrap().as_str(),
            "https://eu1-prod.disco-api.com/token?realm=hgtv"
        );
    }

    #[test]
    fn test_catalog_url_query() {
        let client = ApiClient::new(&AppConfig::default()).unwrap();
        let url = client.catalog_url(1234, 2).unwrap();

        assert_eq!(url.path(), "/content/videos/");
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(pairs.contains(&("filter[show.id]".to_string(), "1234".to_string())));
        assert!(pairs.contains(&("filter[videoType]".to_string(), "EPISODE".to_string())));
        assert!(pairs.contains(&("page[number]".to_string(), "2".to_string())));
        assert!(pairs.contains(&("page[size]".to_string(), "100".to_string())));
        assert!(pairs.contains(&("sort".to_string(), CATALOG_SORT.to_string())));
    }

    #[test]
    fn test_playback_url() {
        let client = ApiClient::new(&AppConfig::default()).unwrap();
        assert_eq!(
            client.playback_url("98765").unwrap().as_str(),
            "https://sonic-eu1-prod.disco-api.com/playback/videoPlaybackInfo/98765"
        );
    }

    #[tokio::test]
    async fn test_token_request_has_no_bearer() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/token")
            .match_query(Matcher::UrlEncoded("realm".into(), "dmaxde".into()))
            .match_header("user-agent", DEFAULT_USER_AGENT)
            .match_header("authorization", Matcher::Missing)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data":{"attributes":{"token":"abc"}}}"#)
            .create_async()
            .await;

        let client = client_for(&server.url());
        let response = client.token("dmaxde").await.unwrap();

        assert_eq!(response.data.attributes.token.as_deref(), Some("abc"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_playback_request_sends_bearer() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/playback/videoPlaybackInfo/1001")
            .match_header("authorization", "Bearer secret")
            .match_header("user-agent", DEFAULT_USER_AGENT)
            .with_status(200)
            .with_body(r#"{"data":{"attributes":{"streaming":{"hls":{"url":"https://cdn/1001.m3u8"}}}}}"#)
            .create_async()
            .await;

        let client = client_for(&server.url());
        let token = AuthToken::new("secret");
        let response = client.playback_info("1001", &token).await.unwrap();

        assert_eq!(response.data.attributes.streaming.hls.url, "https://cdn/1001.m3u8");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_catalog_request_matches_query() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/content/videos/")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("filter[show.id]".into(), "77".into()),
                Matcher::UrlEncoded("filter[videoType]".into(), "EPISODE".into()),
                Matcher::UrlEncoded("page[number]".into(), "3".into()),
                Matcher::UrlEncoded("page[size]".into(), "100".into()),
            ]))
            .match_header("authorization", "Bearer tok")
            .with_status(200)
            .with_body(r#"{"data":[],"meta":{"totalPages":0}}"#)
            .create_async()
            .await;

        let client = client_for(&server.url());
        let page = client
            .catalog_page(77, 3, &AuthToken::new("tok"))
            .await
            .unwrap();

        assert_eq!(page.meta.total_pages, 0);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_catalog_page_with_null_numbers_and_blank_air_date() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/content/videos/")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(
                r#"{"data":[
                    {"id":"1","attributes":{"name":"Special","seasonNumber":null,"episodeNumber":null,"airDate":""}},
                    {"id":"2","attributes":{"name":"Folge 1","seasonNumber":1,"episodeNumber":1,"airDate":"2020-01-01T20:15:00Z"}}
                ],"meta":{"totalPages":1}}"#,
            )
            .create_async()
            .await;

        let client = client_for(&server.url());
        let page = client
            .catalog_page(77, 1, &AuthToken::new("tok"))
            .await
            .unwrap();

        assert_eq!(page.data.len(), 2);
        assert_eq!(page.data[0].attributes.season_number, 0);
        assert_eq!(page.data[0].attributes.episode_number, 0);
        assert_eq!(page.data[1].attributes.season_number, 1);
    }

    #[tokio::test]
    async fn test_status_429_is_rate_limited() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/playback/videoPlaybackInfo/1")
            .with_status(429)
            .create_async()
            .await;

        let client = client_for(&server.url());
        let err = client
            .playback_info("1", &AuthToken::new("t"))
            .await
            .unwrap_err();
        assert!(err.is_rate_limited());
    }

    #[tokio::test]
    async fn test_other_status_is_http_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/token")
            .match_query(Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let client = client_for(&server.url());
        let err = client.token("hgtv").await.unwrap_err();
        assert!(matches!(err, LinksError::Http { status: 500 }));
    }

    #[tokio::test]
    async fn test_created_status_is_not_success() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/token")
            .match_query(Matcher::Any)
            .with_status(201)
            .with_body(r#"{"data":{"attributes":{"token":"abc"}}}"#)
            .create_async()
            .await;

        let client = client_for(&server.url());
        let err = client.token("hgtv").await.unwrap_err();
        assert!(matches!(err, LinksError::Http { status: 201 }));
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/token")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html>maintenance</html>")
            .create_async()
            .await;

        let client = client_for(&server.url());
        let err = client.token("hgtv").await.unwrap_err();
        assert!(matches!(err, LinksError::Decode(_)));
    }

    #[tokio::test]
    async fn test_wrong_shape_is_decode_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/playback/videoPlaybackInfo/1")
            .with_status(200)
            .with_body(r#"{"data":{"attributes":{}}}"#)
            .create_async()
            .await;

        let client = client_for(&server.url());
        let err = client
            .playback_info("1", &AuthToken::new("t"))
            .await
            .unwrap_err();
        assert!(matches!(err, LinksError::Decode(_)));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let client = client_for("http://127.0.0.1:1");
        let err = client.token("dmaxde").await.unwrap_err();
        assert!(matches!(err, LinksError::Transport(_)));
    }
}
