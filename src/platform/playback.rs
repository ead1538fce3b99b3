//! Episode id to playback URL resolution

use crate::error::LinksError;
use crate::platform::retry::RetryConfig;
use crate::platform::{AuthToken, DiscoveryApi};
use tracing::{debug, warn};

/// Resolves episodes to HLS playback URLs, one request at a time
pub struct PlaybackResolver<'a, A: ?Sized> {
    api: &'a A,
    retry: RetryConfig,
}

impl<'a, A> PlaybackResolver<'a, A>
where
    A: DiscoveryApi + ?Sized,
{
    pub fn new(api: &'a A, retry: RetryConfig) -> Self {
        Self { api, retry }
    }

    /// Resolve one episode, retrying up to `max_attempts` times
    ///
    /// A 429 sleeps `attempt * rate_limit_step` before the next try; any
    /// other failure waits `error_delay` (zero by default). Nothing sleeps
    /// after the last attempt. On exhaustion the last error is returned.
    pub async fn resolve(&self, episode_id: &str, token: &AuthToken) -> Result<String, LinksError> {
        let max_attempts = self.retry.max_attempts;
        let mut last_error = None;

        for attempt in 1..=max_attempts {
            match self.request(episode_id, token).await {
                Ok(url) => {
                    debug!("Resolved {} on attempt {}", episode_id, attempt);
                    return Ok(url);
                }
                Err(error) => {
                    let has_next = self.retry.has_next(attempt);

                    if error.is_rate_limited() {
                        if has_next {
                            let wait = self.retry.rate_limit_delay(attempt);
                            warn!(
                                "Got rate-limited, waiting {} seconds (attempt {} of {})",
                                wait.as_secs(),
                                attempt,
                                max_attempts
                            );
                            tokio::time::sleep(wait).await;
                        } else {
                            warn!("Got rate-limited (attempt {} of {})", attempt, max_attempts);
                        }
                    } else {
                        warn!(
                            "Couldn't get link for {}: {} (attempt {} of {})",
                            episode_id, error, attempt, max_attempts
                        );
                        if has_next && !self.retry.error_delay.is_zero() {
                            tokio::time::sleep(self.retry.error_delay).await;
                        }
                    }

                    last_error = Some(error);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            LinksError::InvalidArgument("retry policy allows no attempts".to_string())
        }))
    }

    async fn request(&self, episode_id: &str, token: &AuthToken) -> Result<String, LinksError> {
        let response = self.api.playback_info(episode_id, token).await?;
        let url = response.data.attributes.streaming.hls.url;
        if url.is_empty() {
            return Err(LinksError::Decode(format!(
                "playback info for {} has no HLS url",
                episode_id
            )));
        }
        Ok(url)
    }
}
