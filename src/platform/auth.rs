//! Bearer token acquisition

use crate::error::LinksError;
use crate::platform::DiscoveryApi;
use std::fmt;
use tracing::info;

/// Bearer credential for one realm, held for the lifetime of a run
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

/// Obtain a token for `realm`
///
/// A successful response without a usable token fails with
/// [`LinksError::Auth`]; whitespace-only tokens count as empty.
pub async fn get_token<A>(api: &A, realm: &str) -> Result<AuthToken, LinksError>
where
    A: DiscoveryApi + ?Sized,
{
    info!("Getting authorization token for '{}'...", realm);

    let response = api.token(realm).await?;
    match response.data.attributes.token {
        Some(token) if !token.trim().is_empty() => Ok(AuthToken::new(token)),
        _ => Err(LinksError::Auth(realm.to_string())),
    }
}
