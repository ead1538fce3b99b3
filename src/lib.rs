//! # dmax-links
//!
//! Resolves every episode of a DMAX, HGTV or TLC show into a direct HLS
//! playback link and exports the links as a spreadsheet.
//!
//! ## Features
//!
//! - Paginated catalog retrieval that survives failing pages
//! - Season and episode selection
//! - Linear backoff on rate limiting, bounded per episode
//! - xlsx export with ready-to-run download commands
//!
//! ## Example
//!
//! ```rust,no_run
//! use dmax_links::config::AppConfig;
//! use dmax_links::core::{LinkCollector, RunRequest};
//! use dmax_links::export::XlsxSink;
//! use dmax_links::platform::ApiClient;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::default();
//!     let request = RunRequest::new(12345, "dmaxde", 1, 0, &config)?;
//!     let client = ApiClient::new(&config)?;
//!
//!     let report = LinkCollector::new(&client, &config)
//!         .run(&request, |_, _, _| {})
//!         .await?;
//!     let path = report.export(&XlsxSink::new("."))?;
//!     println!("Saved {} links to {}", report.links.len(), path.display());
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod export;
pub mod platform;
pub mod utils;

// Re-export main types
pub use crate::config::AppConfig;
pub use crate::core::{Episode, LinkCollector, ResolvedLink, RunReport, RunRequest, SelectionCriterion, Show};
pub use crate::error::LinksError;

/// Result type alias for dmax-links operations
pub type Result<T> = std::result::Result<T, LinksError>;
