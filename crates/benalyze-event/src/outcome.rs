//! Session outcomes
//!
//! Exactly one terminal outcome exists per session, produced once when the
//! stream ends (or fails to start). Exactly one of `result` / `error` is
//! populated; the constructors are the only way outcomes are built.

use crate::id::AnalysisId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Terminal outcome of one analysis session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionOutcome {
    /// Backend-assigned analysis id, if a `start` frame was seen
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis_id: Option<AnalysisId>,
    /// Opaque analysis result (success path)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Terminal error, passed through verbatim for display (failure path)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SessionOutcome {
    /// Create a successful outcome
    #[inline]
    #[must_use]
    pub fn completed(analysis_id: Option<AnalysisId>, result: Value) -> Self {
        Self {
            analysis_id,
            result: Some(result),
            error: None,
        }
    }

    /// Create a failed outcome
    #[inline]
    #[must_use]
    pub fn failed(analysis_id: Option<AnalysisId>, error: impl Into<String>) -> Self {
        Self {
            analysis_id,
            result: None,
            error: Some(error.into()),
        }
    }

    /// Check if the session succeeded
    #[inline]
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.result.is_some()
    }

    /// Check if the session failed
    #[inline]
    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }
}
