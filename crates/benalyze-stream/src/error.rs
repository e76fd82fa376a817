//! Error types for the stream parser
//!
//! Covers the session-fatal taxonomy:
//! - Configuration failures (endpoint not set)
//! - Connection failures (request could not be opened)
//! - Protocol failures (bad status, missing body, missing terminal frame)
//! - Stall detection (idle timeout between chunks)
//!
//! Two kinds deliberately do NOT appear here: a server-reported `error`
//! frame becomes the terminal outcome's error string directly, and a
//! malformed stream line is a logged warning that never fails the session.

use reqwest::StatusCode;
use std::time::Duration;

/// Session-fatal stream parser errors
///
/// Every kind surfaces to callers as a failed [`benalyze_event::SessionOutcome`]
/// carrying the `Display` string verbatim; none are retried by this crate.
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    /// Streaming endpoint not configured; fails before any request
    #[error("streaming endpoint is not configured")]
    MissingEndpoint,

    /// Request could not be opened (network-level failure)
    #[error("connection failed: {0}")]
    Connection(#[from] reqwest::Error),

    /// Non-success response status
    ///
    /// The message is extracted from a structured `{"error": ...}` body when
    /// one exists, else the raw body text, else derived from the status.
    #[error("{message}")]
    BadStatus {
        /// Response status
        status: StatusCode,
        /// Extracted error message
        message: String,
    },

    /// No stream body was obtainable from a successful response
    #[error("No response body")]
    MissingBody,

    /// Stream ended without a `complete` or `error` frame
    #[error("Analysis completed but result was not received")]
    MissingTerminal,

    /// No bytes arrived within the configured idle timeout
    #[error("stream stalled: no data received for {}s", after.as_secs())]
    Stalled {
        /// The idle bound that elapsed
        after: Duration,
    },
}

impl StreamError {
    /// Check if the error occurred before any request was attempted
    #[inline]
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::MissingEndpoint)
    }

    /// Check if the error is a protocol violation by the backend
    #[inline]
    #[must_use]
    pub fn is_protocol(&self) -> bool {
        matches!(
            self,
            Self::BadStatus { .. } | Self::MissingBody | Self::MissingTerminal
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_strings() {
        assert_eq!(
            StreamError::MissingBody.to_string(),
            "No response body"
        );
        assert_eq!(
            StreamError::MissingTerminal.to_string(),
            "Analysis completed but result was not received"
        );
    }

    #[test]
    fn bad_status_displays_extracted_message() {
        let err = StreamError::BadStatus {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: "handbook could not be read".to_string(),
        };
        assert_eq!(err.to_string(), "handbook could not be read");
    }

    #[test]
    fn error_classification() {
        assert!(StreamError::MissingEndpoint.is_configuration());
        assert!(!StreamError::MissingEndpoint.is_protocol());
        assert!(StreamError::MissingTerminal.is_protocol());
        assert!(StreamError::Stalled {
            after: Duration::from_secs(90)
        }
        .to_string()
        .contains("90s"));
    }
}
