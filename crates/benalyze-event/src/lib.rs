//! Benalyze Event Model
//!
//! The shared data model for the live progress-reporting subsystem:
//! - Trace events reported for each step of a remote analysis
//! - Wire frames carried by the streaming endpoint
//! - Session outcomes (the single terminal result per session)
//! - The fixed placeholder step catalog used before real data arrives
//!
//! This crate is pure data: no I/O, no async, no clocks beyond stamping
//! synthetic timestamps.

#![warn(unreachable_pub)]

pub mod catalog;
pub mod event;
pub mod frame;
pub mod id;
pub mod outcome;
pub mod request;

// Re-exports for convenience
pub use catalog::{PLACEHOLDER_STEPS, PLACEHOLDER_STEP_COUNT};
pub use event::{StepStatus, TraceEvent};
pub use frame::StreamFrame;
pub use id::{AnalysisId, SessionId};
pub use outcome::SessionOutcome;
pub use request::AnalysisRequest;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
