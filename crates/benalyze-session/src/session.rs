//! Session driver
//!
//! Wires the two producers together for one analysis run: the placeholder
//! scheduler starts immediately for perceived responsiveness while the
//! stream client opens the backend connection concurrently. Both write into
//! one [`StepSink`]; the sink's handoff rule decides authority. The caller
//! gets a handle carrying the sink (for UI subscription), the eventual
//! terminal outcome, and an abandon path that releases every resource.

use crate::scheduler::{PlaceholderScheduler, SchedulerHandle, PLACEHOLDER_TICK};
use crate::sink::StepSink;
use benalyze_event::{AnalysisRequest, SessionId, SessionOutcome};
use benalyze_stream::AnalysisStreamClient;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Entry point for one live analysis session
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalysisSession;

impl AnalysisSession {
    /// Start a session at the production placeholder cadence
    #[must_use]
    pub fn start(client: AnalysisStreamClient, request: AnalysisRequest) -> SessionHandle {
        Self::start_with_tick(client, request, PLACEHOLDER_TICK)
    }

    /// Start a session with a custom placeholder cadence
    #[must_use]
    pub fn start_with_tick(
        client: AnalysisStreamClient,
        request: AnalysisRequest,
        tick: Duration,
    ) -> SessionHandle {
        let id = SessionId::new();
        let sink = Arc::new(StepSink::new());

        // Placeholder production starts first so the log is never silent
        let scheduler = PlaceholderScheduler::spawn_with_tick(sink.clone(), tick);
        sink.register_scheduler(scheduler.clone());

        let stream_sink = sink.clone();
        let task = tokio::spawn(async move {
            let outcome = client
                .stream_analysis(&request, |event| stream_sink.accept_real(event))
                .await;
            tracing::info!(session = %id, success = outcome.is_success(), "session resolved");
            outcome
        });

        tracing::info!(session = %id, "analysis session started");
        SessionHandle {
            id,
            sink,
            scheduler,
            task,
        }
    }
}

/// Handle to a running analysis session
#[derive(Debug)]
pub struct SessionHandle {
    id: SessionId,
    sink: Arc<StepSink>,
    scheduler: SchedulerHandle,
    task: JoinHandle<SessionOutcome>,
}

impl SessionHandle {
    /// Get the local session ID
    #[inline]
    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Get the shared sink for subscription and log snapshots
    #[inline]
    #[must_use]
    pub fn sink(&self) -> Arc<StepSink> {
        self.sink.clone()
    }

    /// Await the single terminal outcome of the session
    pub async fn outcome(&mut self) -> SessionOutcome {
        match (&mut self.task).await {
            Ok(outcome) => outcome,
            // Only reachable after abandon(); report it as such
            Err(_) => SessionOutcome::failed(None, "session abandoned"),
        }
    }

    /// Abandon the session, releasing every resource
    ///
    /// Aborts the network task - dropping the in-flight stream closes the
    /// connection at its next suspension point - and cancels the placeholder
    /// timer. Safe to call more than once.
    pub fn abandon(&self) {
        tracing::info!(session = %self.id, "session abandoned");
        self.task.abort();
        self.scheduler.cancel();
    }
}
