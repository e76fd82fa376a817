//! Benalyze Stream Parser
//!
//! The network-facing producer of the progress subsystem:
//! - Opens a long-lived streamed request against the analysis backend
//! - Incrementally decodes the response, preserving partial multi-byte
//!   characters across reads
//! - Extracts line-oriented frames and dispatches them by kind
//! - Resolves exactly one terminal [`SessionOutcome`] per session
//!
//! # Example
//!
//! ```rust,ignore
//! use benalyze_event::AnalysisRequest;
//! use benalyze_stream::{AnalysisStreamClient, StreamConfig};
//!
//! # async fn example() {
//! let config = StreamConfig::new("https://analysis.internal");
//! let client = AnalysisStreamClient::new(config);
//!
//! let request = AnalysisRequest::new("https://s/paystub", "https://s/handbook");
//! let outcome = client
//!     .stream_analysis(&request, |event| println!("step {}: {}", event.step, event.name))
//!     .await;
//!
//! println!("session resolved: success={}", outcome.is_success());
//! # }
//! ```

#![warn(unreachable_pub)]

pub mod client;
pub mod config;
pub mod decode;
pub mod error;

// Re-exports for convenience
pub use client::AnalysisStreamClient;
pub use config::StreamConfig;
pub use decode::{FrameDecoder, Utf8Decoder, EVENT_DATA_PREFIX};
pub use error::StreamError;

// Convenience re-export: every session resolves to one of these
pub use benalyze_event::SessionOutcome;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
