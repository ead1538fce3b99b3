//! Season/episode filtering of a catalog

use crate::core::models::Episode;
use crate::error::LinksError;
use std::fmt;

/// Which part of a catalog to resolve
///
/// `0` stands for "not given". An episode can only be picked inside a
/// season, so `(0, n)` with `n > 0` cannot be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionCriterion {
    season: u32,
    episode: u32,
}

impl SelectionCriterion {
    /// Validate and build a criterion from raw CLI numbers
    pub fn new(season: u32, episode: u32) -> Result<Self, LinksError> {
        if episode > 0 && season == 0 {
            return Err(LinksError::InvalidArgument(
                "need season when selecting an episode".to_string(),
            ));
        }
        Ok(Self { season, episode })
    }

    /// Every episode of the show
    pub fn all() -> Self {
        Self::default()
    }

    /// A whole season; `0` selects everything
    pub fn season(season: u32) -> Self {
        Self { season, episode: 0 }
    }

    pub fn season_number(&self) -> Option<u32> {
        (self.season > 0).then_some(self.season)
    }

    pub fn episode_number(&self) -> Option<u32> {
        (self.episode > 0).then_some(self.episode)
    }

    pub fn is_all(&self) -> bool {
        self.season == 0 && self.episode == 0
    }
}

impl fmt::Display for SelectionCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.season_number(), self.episode_number()) {
            (None, _) => write!(f, "all episodes"),
            (Some(season), None) => write!(f, "season {}", season),
            (Some(season), Some(episode)) => write!(f, "S{:02}E{:02}", season, episode),
        }
    }
}

/// Filter `episodes` by `criterion`, keeping catalog order
///
/// Selecting everything never fails, even on an empty list. A season or
/// episode filter that matches nothing is [`LinksError::SelectionEmpty`].
pub fn select(episodes: &[Episode], criterion: SelectionCriterion) -> Result<Vec<Episode>, LinksError> {
    match (criterion.season_number(), criterion.episode_number()) {
        (None, _) => Ok(episodes.to_vec()),
        (Some(season), None) => {
            let selected: Vec<Episode> = episodes
                .iter()
                .filter(|e| e.season_number == season)
                .cloned()
                .collect();
            if selected.is_empty() {
                return Err(LinksError::SelectionEmpty(format!(
                    "Season {} does not exist",
                    season
                )));
            }
            Ok(selected)
        }
        (Some(season), Some(episode)) => {
            let selected: Vec<Episode> = episodes
                .iter()
                .filter(|e| e.season_number == season && e.episode_number == episode)
                .cloned()
                .collect();
            if selected.is_empty() {
                return Err(LinksError::SelectionEmpty(format!(
                    "Episode {} of season {} not found",
                    episode, season
                )));
            }
            Ok(selected)
        }
    }
}
