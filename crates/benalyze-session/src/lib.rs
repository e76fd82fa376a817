//! Benalyze Session Core
//!
//! The live progress-reporting subsystem of the benefits-analysis dashboard:
//! - [`StepSink`]: the ordered event log and the one-time synthetic-to-real
//!   handoff rule
//! - [`PlaceholderScheduler`]: timer-driven synthetic progress over a fixed
//!   seven-step catalog, until superseded
//! - [`AnalysisSession`]: the driver wiring both producers into one sink and
//!   resolving a single terminal outcome
//!
//! # Example
//!
//! ```rust,ignore
//! use benalyze_event::AnalysisRequest;
//! use benalyze_session::AnalysisSession;
//! use benalyze_stream::{AnalysisStreamClient, StreamConfig};
//!
//! # async fn example() {
//! let client = AnalysisStreamClient::new(StreamConfig::new("https://analysis.internal"));
//! let request = AnalysisRequest::new("https://s/paystub", "https://s/handbook");
//!
//! let session = AnalysisSession::start(client, request);
//! let mut updates = session.sink().subscribe();
//!
//! let outcome = session.outcome().await;
//! println!("done: success={}", outcome.is_success());
//! # }
//! ```

#![warn(unreachable_pub)]

pub mod scheduler;
pub mod session;
pub mod sink;

// Re-exports for convenience
pub use scheduler::{PlaceholderScheduler, SchedulerHandle, PLACEHOLDER_TICK};
pub use session::{AnalysisSession, SessionHandle};
pub use sink::{SinkUpdate, StepSink};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
