//! Retry policy for playback resolution

use std::time::Duration;

/// Retry configuration
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Maximum number of attempts per episode, first request included
    pub max_attempts: u32,
    /// Linear backoff step applied after a rate-limited attempt
    pub rate_limit_step: Duration,
    /// Delay after any other failed attempt
    pub error_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 6,
            rate_limit_step: Duration::from_secs(5),
            error_delay: Duration::ZERO,
        }
    }
}

impl RetryConfig {
    /// Wait after the given 1-based attempt was rate-limited
    ///
    /// Linear, not exponential: attempt 1 waits one step, attempt 2 two steps.
    pub fn rate_limit_delay(&self, attempt: u32) -> Duration {
        self.rate_limit_step * attempt
    }

    /// Whether another attempt follows the given 1-based attempt
    pub fn has_next(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }

    /// Full sleep schedule an always rate-limited episode goes through
    pub fn rate_limit_schedule(&self) -> Vec<Duration> {
        (1..self.max_attempts)
            .map(|attempt| self.rate_limit_delay(attempt))
            .collect()
    }
}

/// Retry configuration builder
pub struct RetryConfigBuilder {
    config: RetryConfig,
}

impl RetryConfigBuilder {
    /// Create a new retry configuration builder
    pub fn new() -> Self {
        Self {
            config: RetryConfig::default(),
        }
    }

    /// Set maximum attempts (clamped to at least one)
    pub fn max_attempts(mut self, max_attempts: u32) -> Self {
        self.config.max_attempts = max_attempts.max(1);
        self
    }

    /// Set rate limit backoff step
    pub fn rate_limit_step(mut self, step: Duration) -> Self {
        self.config.rate_limit_step = step;
        self
    }

    /// Set delay after non rate-limit failures
    pub fn error_delay(mut self, delay: Duration) -> Self {
        self.config.error_delay = delay;
        self
    }

    /// Build the retry configuration
    pub fn build(self) -> RetryConfig {
        self.config
    }
}

impl Default for RetryConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
