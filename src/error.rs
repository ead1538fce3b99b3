//! Error types for dmax-links

use thiserror::Error;

/// Main error type for dmax-links operations
#[derive(Debug, Error)]
pub enum LinksError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Can not decode JSON: {0}")]
    Decode(String),

    #[error("Got HTTP status code {status}")]
    Http { status: u16 },

    #[error("Too Many Requests")]
    RateLimited,

    #[error("Got empty token for realm '{0}'")]
    Auth(String),

    #[error("Show {0} does not exist")]
    ShowNotFound(u64),

    #[error("{0}")]
    SelectionEmpty(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Export failed: {0}")]
    Export(#[from] rust_xlsxwriter::XlsxError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),
}

impl LinksError {
    /// Check if the server asked us to slow down
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, LinksError::RateLimited)
    }

    /// Check if error always ends the run, whatever request produced it
    ///
    /// Request-level kinds (transport, decode, status, 429) are only fatal
    /// for the token and the first catalog page.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            LinksError::Auth(_)
                | LinksError::ShowNotFound(_)
                | LinksError::SelectionEmpty(_)
                | LinksError::InvalidArgument(_)
                | LinksError::Export(_)
                | LinksError::Io(_)
                | LinksError::Url(_)
        )
    }
}

impl From<serde_json::Error> for LinksError {
    fn from(error: serde_json::Error) -> Self {
        LinksError::Decode(error.to_string())
    }
}
