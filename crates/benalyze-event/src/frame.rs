//! Wire frames
//!
//! The streaming endpoint delivers line-oriented frames, each a JSON
//! document discriminated by its `type` field. Exactly four kinds exist;
//! modeling them as one tagged union gives exhaustive dispatch at the
//! parser.

use crate::event::TraceEvent;
use crate::id::AnalysisId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One frame extracted from the event stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamFrame {
    /// First frame of a session: the backend-assigned analysis id
    Start {
        /// Backend-assigned identifier for this analysis
        analysis_id: AnalysisId,
    },
    /// One step of real progress
    Trace(TraceEvent),
    /// Terminal success frame carrying the opaque analysis result
    Complete {
        /// Opaque analysis result, passed through to the caller
        result: Value,
    },
    /// Terminal failure frame reported by the backend
    Error {
        /// Human-readable error, passed through verbatim
        error: String,
    },
}

impl StreamFrame {
    /// Check if this frame terminates the session
    #[inline]
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete { .. } | Self::Error { .. })
    }
}
