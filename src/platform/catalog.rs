//! Paginated catalog retrieval

use crate::core::models::{Episode, Show};
use crate::error::LinksError;
use crate::platform::types::{CatalogPageResponse, IncludedResource, ShowAttributes};
use crate::platform::{AuthToken, DiscoveryApi};
use tracing::{debug, info, warn};

/// A show's merged catalog
#[derive(Debug, Clone)]
pub struct Catalog {
    pub show: Show,
    /// Episodes of every fetched page, in page order
    pub episodes: Vec<Episode>,
    /// Page count reported by the first page
    pub total_pages: u32,
    /// Pages that failed and were left out
    pub skipped_pages: Vec<u32>,
}

impl Catalog {
    pub fn is_partial(&self) -> bool {
        !self.skipped_pages.is_empty()
    }
}

/// Fetch every page of a show's catalog
///
/// The first page decides whether the show exists: no pages or no episodes
/// is [`LinksError::ShowNotFound`] and any other failure there is returned
/// as is. Later pages are best effort; a failing page is logged and skipped.
pub async fn fetch_show<A>(api: &A, show_id: u64, token: &AuthToken) -> Result<Catalog, LinksError>
where
    A: DiscoveryApi + ?Sized,
{
    info!("Loading show data...");

    let first = fetch_page(api, show_id, 1, token).await?;
    let total_pages = first.meta.total_pages;
    let show = extract_show(show_id, &first.included)?;
    let mut episodes: Vec<Episode> = first.data.into_iter().map(Episode::from).collect();
    let mut skipped_pages = Vec::new();

    if total_pages > 1 {
        info!("  Catalog spans {} pages, loading the rest...", total_pages);

        for page in 2..=total_pages {
            debug!("  Loading page {}...", page);
            match fetch_page(api, show_id, page, token).await {
                Ok(response) => episodes.extend(response.data.into_iter().map(Episode::from)),
                Err(e) => {
                    warn!("Couldn't get page {} ({}), skipping...", page, e);
                    skipped_pages.push(page);
                }
            }
        }
    }

    info!("=> {} ({} episodes)", show.name, episodes.len());

    Ok(Catalog {
        show,
        episodes,
        total_pages,
        skipped_pages,
    })
}

async fn fetch_page<A>(
    api: &A,
    show_id: u64,
    page: u32,
    token: &AuthToken,
) -> Result<CatalogPageResponse, LinksError>
where
    A: DiscoveryApi + ?Sized,
{
    let response = api.catalog_page(show_id, page, token).await?;
    if response.meta.total_pages == 0 || response.data.is_empty() {
        return Err(LinksError::ShowNotFound(show_id));
    }
    Ok(response)
}

/// Show metadata from the first `type == "show"` resource
///
/// Episodes filtered by one show id all point at the same show, so when the
/// page side-loads several show resources the first one wins.
fn extract_show(show_id: u64, included: &[IncludedResource]) -> Result<Show, LinksError> {
    match included.iter().find(|resource| resource.kind == "show") {
        Some(resource) if !resource.attributes.is_null() => {
            let attributes: ShowAttributes = serde_json::from_value(resource.attributes.clone())?;
            Ok(Show::from_attributes(show_id, attributes))
        }
        _ => {
            warn!("Catalog carries no show metadata");
            Ok(Show::unknown(show_id))
        }
    }
}
