//! disco-api client and the retrieval steps built on it

pub mod auth;
pub mod catalog;
pub mod client;
pub mod playback;
pub mod retry;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use auth::*;
pub use catalog::*;
pub use client::*;
pub use playback::*;
pub use retry::*;

use crate::error::LinksError;
use types::{CatalogPageResponse, PlaybackResponse, TokenResponse};

/// The three remote calls a run needs
#[async_trait::async_trait]
pub trait DiscoveryApi: Send + Sync {
    /// Fetch a token for a realm, unauthenticated
    async fn token(&self, realm: &str) -> Result<TokenResponse, LinksError>;

    /// Fetch one page of a show's episode catalog
    async fn catalog_page(
        &self,
        show_id: u64,
        page: u32,
        token: &AuthToken,
    ) -> Result<CatalogPageResponse, LinksError>;

    /// Fetch playback info for a single episode
    async fn playback_info(
        &self,
        episode_id: &str,
        token: &AuthToken,
    ) -> Result<PlaybackResponse, LinksError>;
}
