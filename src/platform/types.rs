//! Response schemas for the disco-api endpoints

use serde::{Deserialize, Deserializer};

/// Decode `null` like a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// `GET /token?realm=<realm>`
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub data: TokenData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenData {
    pub attributes: TokenAttributes,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenAttributes {
    #[serde(default)]
    pub token: Option<String>,
}

/// One page of `GET /content/videos/`
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogPageResponse {
    pub data: Vec<EpisodeResource>,
    #[serde(default)]
    pub included: Vec<IncludedResource>,
    pub meta: PageMeta,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total_pages: u32,
}

/// Video resource as listed in a catalog page
#[derive(Debug, Clone, Deserialize)]
pub struct EpisodeResource {
    pub id: String,
    pub attributes: EpisodeAttributes,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeAttributes {
    #[serde(default, deserialize_with = "null_as_default")]
    pub alternate_id: String,
    /// Kept as sent; parsed leniently into [`crate::core::Episode::air_date`]
    #[serde(default)]
    pub air_date: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub episode_number: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub season_number: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub drm_enabled: bool,
}

/// Side-loaded resource from the `include` parameter
///
/// Channels, images, genres and tags all land here; only `type == "show"`
/// entries are decoded further, into [`ShowAttributes`].
#[derive(Debug, Clone, Deserialize)]
pub struct IncludedResource {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub attributes: serde_json::Value,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowAttributes {
    #[serde(default, deserialize_with = "null_as_default")]
    pub alternate_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub episode_count: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub season_number: u32,
}

/// `GET /playback/videoPlaybackInfo/<id>`
#[derive(Debug, Clone, Deserialize)]
pub struct PlaybackResponse {
    pub data: PlaybackData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaybackData {
    pub attributes: PlaybackAttributes,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaybackAttributes {
    pub streaming: Streaming,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Streaming {
    pub hls: HlsStream,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HlsStream {
    #[serde(default)]
    pub url: String,
}
