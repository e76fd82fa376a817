//! Trace events
//!
//! One `TraceEvent` is one reported unit of progress for a step of the
//! remote analysis pipeline. Events are immutable once created and are only
//! ever appended to (or wholesale replaced in) the session log.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Status of a single analysis step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    /// Step is in progress
    Processing,
    /// Step finished successfully
    Completed,
    /// Step failed
    Failed,
}

impl StepStatus {
    /// Check if this status is terminal for the step
    #[inline]
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

/// One reported unit of progress
///
/// Produced either by parsing a `trace` wire frame or synthesized locally by
/// the placeholder scheduler. The two origins share one shape; origin is a
/// property of the producer, not the event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEvent {
    /// 1-based step number
    pub step: u32,
    /// Step identifier (e.g. `download_files`)
    pub name: String,
    /// Step status
    pub status: StepStatus,
    /// Optional step-specific details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Map<String, Value>>,
    /// ISO-8601 timestamp, carried verbatim from the producer
    pub timestamp: String,
}

impl TraceEvent {
    /// Create a new trace event
    #[inline]
    #[must_use]
    pub fn new(step: u32, name: impl Into<String>, status: StepStatus) -> Self {
        Self {
            step,
            name: name.into(),
            status,
            payload: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Create a synthetic placeholder event
    ///
    /// Placeholder events are always `completed` and stamped with the local
    /// clock, matching what the scheduler shows before real data exists.
    #[inline]
    #[must_use]
    pub fn synthetic(step: u32, name: impl Into<String>) -> Self {
        Self::new(step, name, StepStatus::Completed)
    }

    /// With payload
    #[inline]
    #[must_use]
    pub fn with_payload(mut self, payload: Map<String, Value>) -> Self {
        self.payload = Some(payload);
        self
    }

    /// With explicit timestamp
    #[inline]
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = timestamp.into();
        self
    }
}
