//! End-to-end retrieval: token, catalog, selection, resolution

use crate::config::AppConfig;
use crate::core::models::{ResolvedLink, Show};
use crate::core::selector::{select, SelectionCriterion};
use crate::error::LinksError;
use crate::export::ExportSink;
use crate::platform::{fetch_show, get_token, DiscoveryApi, PlaybackResolver};
use std::path::PathBuf;
use tracing::{error, info, warn};

/// What to resolve, already validated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRequest {
    pub show_id: u64,
    pub realm: String,
    pub criterion: SelectionCriterion,
}

impl RunRequest {
    /// Validate raw parameters against the configuration
    ///
    /// Runs before any request is made.
    pub fn new(
        show_id: u64,
        realm: &str,
        season: u32,
        episode: u32,
        config: &AppConfig,
    ) -> Result<Self, LinksError> {
        if show_id == 0 {
            return Err(LinksError::InvalidArgument(
                "showId must be a positive number".to_string(),
            ));
        }
        config.validate_realm(realm)?;
        let criterion = SelectionCriterion::new(season, episode)?;

        Ok(Self {
            show_id,
            realm: realm.to_string(),
            criterion,
        })
    }
}

/// Outcome of a run, one link per selected episode in catalog order
#[derive(Debug, Clone)]
pub struct RunReport {
    pub show: Show,
    pub links: Vec<ResolvedLink>,
    /// Catalog pages that could not be fetched
    pub skipped_pages: Vec<u32>,
    /// Episodes in the (possibly partial) catalog before selection
    pub catalog_size: usize,
}

impl RunReport {
    pub fn resolved_count(&self) -> usize {
        self.links.iter().filter(|link| link.is_resolved()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.links.len() - self.resolved_count()
    }

    /// Hand the finished rows to a sink
    pub fn export(&self, sink: &dyn ExportSink) -> Result<PathBuf, LinksError> {
        sink.export(&self.show, &self.links)
    }
}

/// Drives one run against a [`DiscoveryApi`]
pub struct LinkCollector<'a, A: ?Sized> {
    api: &'a A,
    config: &'a AppConfig,
}

impl<'a, A> LinkCollector<'a, A>
where
    A: DiscoveryApi + ?Sized,
{
    pub fn new(api: &'a A, config: &'a AppConfig) -> Self {
        Self { api, config }
    }

    /// Run the whole pipeline
    ///
    /// Token, show lookup and selection failures end the run. Episodes are
    /// resolved strictly one after another; one that cannot be resolved
    /// still produces a row, without link. `on_link` sees every row as soon
    /// as it is finished, with its index and the number of selected episodes.
    pub async fn run<F>(&self, request: &RunRequest, mut on_link: F) -> Result<RunReport, LinksError>
    where
        F: FnMut(usize, usize, &ResolvedLink),
    {
        let token = get_token(self.api, &request.realm).await?;
        let catalog = fetch_show(self.api, request.show_id, &token).await?;
        let selected = select(&catalog.episodes, request.criterion)?;

        let total = selected.len();
        info!(
            "Selected {} of {} episodes ({})",
            total,
            catalog.episodes.len(),
            request.criterion
        );

        let resolver = PlaybackResolver::new(self.api, self.config.retry.clone());
        let mut links = Vec::with_capacity(total);

        for (index, episode) in selected.into_iter().enumerate() {
            info!("Getting link {} of {}: {}", index + 1, total, episode.name);
            if episode.has_drm {
                warn!("{} is DRM protected, its link will likely not play", episode);
            }

            let url = match resolver.resolve(&episode.id, &token).await {
                Ok(url) => Some(url),
                Err(e) => {
                    error!("Couldn't get episode '{}': {}", episode, e);
                    None
                }
            };

            let link = ResolvedLink::new(episode, &catalog.show.name, url, &self.config.downloader);
            on_link(index, total, &link);
            links.push(link);
        }

        Ok(RunReport {
            show: catalog.show,
            links,
            skipped_pages: catalog.skipped_pages,
            catalog_size: catalog.episodes.len(),
        })
    }
}
