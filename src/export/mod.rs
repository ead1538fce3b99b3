//! Export of resolved links

pub mod xlsx;

pub use xlsx::*;

use crate::core::models::{ResolvedLink, Show};
use crate::error::LinksError;
use std::path::PathBuf;

/// Header row of every export
pub const HEADERS: [&str; 5] = ["Name", "Description", "File name", "Link", "Command"];

/// Destination for a finished run
pub trait ExportSink {
    /// Persist all rows in order and return where they went
    fn export(&self, show: &Show, links: &[ResolvedLink]) -> Result<PathBuf, LinksError>;
}

/// Cell values of one row, in [`HEADERS`] order
///
/// Unresolved episodes keep their row with empty link and command cells.
pub fn row_cells(link: &ResolvedLink) -> [&str; 5] {
    [
        link.episode.name.as_str(),
        link.episode.description.as_str(),
        link.file_name.as_str(),
        link.url.as_deref().unwrap_or_default(),
        link.command.as_deref().unwrap_or_default(),
    ]
}
