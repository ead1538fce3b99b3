//! Show, episode and output row types

use crate::platform::types::{EpisodeResource, ShowAttributes};
use chrono::{DateTime, Utc};
use std::fmt;

/// Name used when the catalog carries no show resource
pub const UNKNOWN_SHOW_NAME: &str = "Unknown show";

/// Show metadata, taken from the first catalog page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Show {
    /// Numeric show id the catalog was requested for
    pub id: u64,
    pub alternate_id: String,
    pub name: String,
    pub episode_count: u32,
    pub season_count: u32,
}

impl Show {
    /// Placeholder for catalogs without show metadata
    pub fn unknown(id: u64) -> Self {
        Self {
            id,
            alternate_id: String::new(),
            name: UNKNOWN_SHOW_NAME.to_string(),
            episode_count: 0,
            season_count: 0,
        }
    }

    pub fn from_attributes(id: u64, attributes: ShowAttributes) -> Self {
        if attributes.name.trim().is_empty() {
            return Self::unknown(id);
        }

        Self {
            id,
            alternate_id: attributes.alternate_id,
            name: attributes.name,
            episode_count: attributes.episode_count,
            season_count: attributes.season_number,
        }
    }
}

/// A single video from the catalog
///
/// Season and episode number 0 mean "special" or "unnumbered".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Episode {
    pub id: String,
    pub alternate_id: String,
    pub name: String,
    pub description: String,
    pub air_date: Option<DateTime<Utc>>,
    pub season_number: u32,
    pub episode_number: u32,
    pub has_drm: bool,
}

impl From<EpisodeResource> for Episode {
    fn from(resource: EpisodeResource) -> Self {
        let attributes = resource.attributes;
        Self {
            id: resource.id,
            alternate_id: attributes.alternate_id,
            name: attributes.name,
            description: attributes.description,
            air_date: attributes.air_date.as_deref().and_then(parse_air_date),
            season_number: attributes.season_number,
            episode_number: attributes.episode_number,
            has_drm: attributes.drm_enabled,
        }
    }
}

/// RFC 3339 air date; anything else counts as unknown
fn parse_air_date(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|date| date.with_timezone(&Utc))
}

impl Episode {
    /// Base name of the downloaded file, without extension
    pub fn file_name(&self, show_name: &str) -> String {
        match (self.season_number, self.episode_number) {
            (0, 0) => format!("{} - {}", show_name, self.name),
            (0, episode) => format!("{} - E{:02}", show_name, episode),
            (season, episode) => format!("{} - S{:02}E{:02}", show_name, season, episode),
        }
    }
}

impl fmt::Display for Episode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Season {}, Episode {}: {}",
            self.season_number, self.episode_number, self.name
        )
    }
}

/// One output row: an episode and, if resolution worked, its link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLink {
    pub episode: Episode,
    pub file_name: String,
    pub url: Option<String>,
    pub command: Option<String>,
}

impl ResolvedLink {
    /// Build a row, deriving the command only when a URL exists
    pub fn new(episode: Episode, show_name: &str, url: Option<String>, downloader: &str) -> Self {
        let file_name = episode.file_name(show_name);
        let command = url
            .as_deref()
            .map(|url| download_command(downloader, url, &file_name));

        Self {
            episode,
            file_name,
            url,
            command,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.url.is_some()
    }
}

/// `<downloader> "<url>" -o "<file name>.mp4"`
pub fn download_command(downloader: &str, url: &str, file_name: &str) -> String {
    format!("{} \"{}\" -o \"{}.mp4\"", downloader, url, file_name)
}
