//! Stream client configuration
//!
//! The streaming endpoint base address is supplied by the deployment; when
//! it is absent a session fails before any network activity. The idle
//! timeout bounds the wait for each next chunk of an open stream - neither
//! producer had one originally, so a stalled connection would block forever.

use crate::error::StreamError;
use std::time::Duration;

/// Route of the streaming analysis endpoint, relative to the base address
pub const ANALYZE_STREAM_ROUTE: &str = "analyze-stream";

/// Default bound on the wait for each next stream chunk
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(90);

/// Configuration for the analysis stream client
#[derive(Debug, Clone)]
pub struct StreamConfig {
    /// Base address of the analysis backend (e.g. `https://analysis.internal`)
    pub endpoint: Option<String>,
    /// Maximum wait between stream chunks; `None` disables the bound
    pub idle_timeout: Option<Duration>,
}

impl StreamConfig {
    /// Create configuration with an endpoint
    #[inline]
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: Some(endpoint.into()),
            idle_timeout: Some(DEFAULT_IDLE_TIMEOUT),
        }
    }

    /// Create configuration with no endpoint set
    ///
    /// Sessions started against this configuration fail immediately with a
    /// configuration error and perform no network activity.
    #[inline]
    #[must_use]
    pub fn unconfigured() -> Self {
        Self {
            endpoint: None,
            idle_timeout: Some(DEFAULT_IDLE_TIMEOUT),
        }
    }

    /// With a custom idle timeout
    #[inline]
    #[must_use]
    pub fn with_idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = Some(timeout);
        self
    }

    /// Disable the idle timeout entirely
    #[inline]
    #[must_use]
    pub fn without_idle_timeout(mut self) -> Self {
        self.idle_timeout = None;
        self
    }

    /// Resolve the full URL of the streaming analysis route
    ///
    /// # Errors
    /// `StreamError::MissingEndpoint` if no endpoint is configured
    pub fn analyze_url(&self) -> Result<String, StreamError> {
        let base = self.endpoint.as_deref().ok_or(StreamError::MissingEndpoint)?;
        Ok(format!("{}/{ANALYZE_STREAM_ROUTE}", base.trim_end_matches('/')))
    }
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self::unconfigured()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn analyze_url_joins_route() {
        let config = StreamConfig::new("https://analysis.internal");
        assert_eq!(
            config.analyze_url().unwrap(),
            "https://analysis.internal/analyze-stream"
        );
    }

    #[test]
    fn analyze_url_trims_trailing_slash() {
        let config = StreamConfig::new("https://analysis.internal/");
        assert_eq!(
            config.analyze_url().unwrap(),
            "https://analysis.internal/analyze-stream"
        );
    }

    #[test]
    fn missing_endpoint_is_a_configuration_error() {
        let config = StreamConfig::unconfigured();
        assert!(matches!(
            config.analyze_url(),
            Err(StreamError::MissingEndpoint)
        ));
    }

    #[test]
    fn idle_timeout_defaults_and_overrides() {
        let config = StreamConfig::new("https://x");
        assert_eq!(config.idle_timeout, Some(DEFAULT_IDLE_TIMEOUT));

        let config = config.with_idle_timeout(Duration::from_secs(5));
        assert_eq!(config.idle_timeout, Some(Duration::from_secs(5)));

        let config = config.without_idle_timeout();
        assert_eq!(config.idle_timeout, None);
    }
}
