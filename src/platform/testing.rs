//! In-memory [`DiscoveryApi`] for tests.

use crate::error::LinksError;
use crate::platform::types::{
    CatalogPageResponse, EpisodeAttributes, EpisodeResource, HlsStream, IncludedResource,
    PageMeta, PlaybackAttributes, PlaybackData, PlaybackResponse, Streaming, TokenAttributes,
    TokenData, TokenResponse,
};
use crate::platform::{AuthToken, DiscoveryApi};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use tokio::time::Instant;

/// Scripted answer to a playback request
#[derive(Debug, Clone)]
pub(crate) enum PlaybackReply {
    Url(String),
    RateLimited,
    Status(u16),
    EmptyUrl,
}

impl PlaybackReply {
    fn into_result(self) -> Result<PlaybackResponse, LinksError> {
        match self {
            PlaybackReply::Url(url) => Ok(playback_response(&url)),
            PlaybackReply::EmptyUrl => Ok(playback_response("")),
            PlaybackReply::RateLimited => Err(LinksError::RateLimited),
            PlaybackReply::Status(status) => Err(LinksError::Http { status }),
        }
    }
}

/// Fake API answering from scripted replies and recording every call
pub(crate) struct FakeApi {
    token: Mutex<Option<Result<Option<String>, LinksError>>>,
    pages: HashMap<u32, Result<CatalogPageResponse, u16>>,
    playback: Mutex<HashMap<String, VecDeque<PlaybackReply>>>,
    default_playback: PlaybackReply,
    token_realms: Mutex<Vec<String>>,
    page_requests: Mutex<Vec<u32>>,
    playback_calls: Mutex<Vec<(String, Instant)>>,
}

impl FakeApi {
    pub(crate) fn new() -> Self {
        Self {
            token: Mutex::new(Some(Ok(Some("test-token".to_string())))),
            pages: HashMap::new(),
            playback: Mutex::new(HashMap::new()),
            default_playback: PlaybackReply::Status(404),
            token_realms: Mutex::new(Vec::new()),
            page_requests: Mutex::new(Vec::new()),
            playback_calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with_token(self, token: Option<&str>) -> Self {
        *self.token.lock().unwrap() = Some(Ok(token.map(str::to_string)));
        self
    }

    pub(crate) fn with_token_error(self, error: LinksError) -> Self {
        *self.token.lock().unwrap() = Some(Err(error));
        self
    }

    pub(crate) fn with_page(mut self, number: u32, page: CatalogPageResponse) -> Self {
        self.pages.insert(number, Ok(page));
        self
    }

    pub(crate) fn with_page_error(mut self, number: u32, status: u16) -> Self {
        self.pages.insert(number, Err(status));
        self
    }

    /// Replies for one episode, consumed in order; the last one repeats
    pub(crate) fn with_playback(self, episode_id: &str, replies: Vec<PlaybackReply>) -> Self {
        self.playback
            .lock()
            .unwrap()
            .insert(episode_id.to_string(), replies.into());
        self
    }

    /// Reply for episodes without a script
    pub(crate) fn with_default_playback(mut self, reply: PlaybackReply) -> Self {
        self.default_playback = reply;
        self
    }

    pub(crate) fn token_realms(&self) -> Vec<String> {
        self.token_realms.lock().unwrap().clone()
    }

    pub(crate) fn page_requests(&self) -> Vec<u32> {
        self.page_requests.lock().unwrap().clone()
    }

    pub(crate) fn playback_requests(&self) -> Vec<String> {
        self.playback_calls
            .lock()
            .unwrap()
            .iter()
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Instants at which playback info for `episode_id` was requested
    pub(crate) fn playback_times(&self, episode_id: &str) -> Vec<Instant> {
        self.playback_calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(id, _)| id == episode_id)
            .map(|(_, at)| *at)
            .collect()
    }
}

#[async_trait::async_trait]
impl DiscoveryApi for FakeApi {
    async fn token(&self, realm: &str) -> Result<TokenResponse, LinksError> {
        self.token_realms.lock().unwrap().push(realm.to_string());
        let token = self
            .token
            .lock()
            .unwrap()
            .take()
            .unwrap_or(Err(LinksError::Http { status: 500 }))?;

        Ok(TokenResponse {
            data: TokenData {
                attributes: TokenAttributes { token },
            },
        })
    }

    async fn catalog_page(
        &self,
        _show_id: u64,
        page: u32,
        _token: &AuthToken,
    ) -> Result<CatalogPageResponse, LinksError> {
        self.page_requests.lock().unwrap().push(page);
        match self.pages.get(&page) {
            Some(Ok(response)) => Ok(response.clone()),
            Some(Err(status)) => Err(LinksError::Http { status: *status }),
            None => Err(LinksError::Http { status: 404 }),
        }
    }

    async fn playback_info(
        &self,
        episode_id: &str,
        _token: &AuthToken,
    ) -> Result<PlaybackResponse, LinksError> {
        self.playback_calls
            .lock()
            .unwrap()
            .push((episode_id.to_string(), Instant::now()));

        let reply = {
            let mut scripts = self.playback.lock().unwrap();
            match scripts.get_mut(episode_id) {
                Some(queue) if queue.len() > 1 => queue.pop_front(),
                Some(queue) => queue.front().cloned(),
                None => None,
            }
        };

        reply
            .unwrap_or_else(|| self.default_playback.clone())
            .into_result()
    }
}

pub(crate) fn episode(id: &str, season: u32, number: u32) -> EpisodeResource {
    EpisodeResource {
        id: id.to_string(),
        attributes: EpisodeAttributes {
            alternate_id: format!("episode-{}", id),
            air_date: None,
            name: format!("Episode {}", id),
            description: format!("Description of {}", id),
            episode_number: number,
            season_number: season,
            drm_enabled: false,
        },
    }
}

pub(crate) fn show_resource(name: &str) -> IncludedResource {
    IncludedResource {
        kind: "show".to_string(),
        id: "4711".to_string(),
        attributes: serde_json::json!({
            "alternateId": "show-alt",
            "name": name,
            "episodeCount": 42,
            "seasonNumber": 3
        }),
    }
}

pub(crate) fn page(
    episodes: Vec<EpisodeResource>,
    total_pages: u32,
    included: Vec<IncludedResource>,
) -> CatalogPageResponse {
    CatalogPageResponse {
        data: episodes,
        included,
        meta: PageMeta { total_pages },
    }
}

fn playback_response(url: &str) -> PlaybackResponse {
    PlaybackResponse {
        data: PlaybackData {
            attributes: PlaybackAttributes {
                streaming: Streaming {
                    hls: HlsStream {
                        url: url.to_string(),
                    },
                },
            },
        },
    }
}
