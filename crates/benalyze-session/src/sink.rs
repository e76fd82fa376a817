//! Step sink - the ordered log of progress events
//!
//! The synchronization point between the two producers. The sink owns the
//! log exclusively; the placeholder scheduler and the stream parser only
//! submit candidate events through it. A single suppression flag enforces
//! the single-writer discipline: either the scheduler writes, or - after
//! the one-time handoff - the stream does, never both.
//!
//! The handoff on the first real event is one critical section: cancel the
//! scheduler's timer, set the suppression flag permanently, and replace the
//! entire log with that one event. Stale optimistic progress never survives
//! real data.

use crate::scheduler::SchedulerHandle;
use benalyze_event::TraceEvent;
use parking_lot::Mutex;
use tokio::sync::mpsc;

/// Notification delivered to sink subscribers
#[derive(Debug, Clone, PartialEq)]
pub enum SinkUpdate {
    /// One event was appended to the log
    Appended(TraceEvent),
    /// The whole log was replaced (handoff or reset)
    Replaced(Vec<TraceEvent>),
}

/// Interior state, guarded as one unit so the handoff is atomic
#[derive(Debug, Default)]
struct SinkState {
    /// The ordered event log; arrival order, never reordered
    entries: Vec<TraceEvent>,
    /// Once set, no synthetic event is ever appended again
    suppress_synthetic: bool,
    /// Timer handle of the active placeholder scheduler, if any
    scheduler: Option<SchedulerHandle>,
    /// Live subscribers; closed ones are pruned on notify
    subscribers: Vec<mpsc::UnboundedSender<SinkUpdate>>,
}

/// Ordered log of progress events with the synthetic-to-real handoff rule
#[derive(Debug, Default)]
pub struct StepSink {
    state: Mutex<SinkState>,
}

impl StepSink {
    /// Create new empty sink
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the scheduler whose timer the handoff must cancel
    ///
    /// A previously registered scheduler is cancelled before replacement.
    pub fn register_scheduler(&self, handle: SchedulerHandle) {
        let mut state = self.state.lock();
        if let Some(previous) = state.scheduler.replace(handle) {
            previous.cancel();
        }
    }

    /// Submit a synthetic placeholder event
    ///
    /// Returns `false` once real data holds authority; the scheduler stops
    /// on the first refusal.
    pub fn append_synthetic(&self, event: TraceEvent) -> bool {
        let mut state = self.state.lock();
        if state.suppress_synthetic {
            tracing::warn!(step = event.step, "dropping synthetic event after handoff");
            return false;
        }

        state.entries.push(event.clone());
        Self::notify(&mut state, &SinkUpdate::Appended(event));
        true
    }

    /// Submit a real trace event from the stream
    ///
    /// The first real event performs the handoff; later ones append.
    pub fn accept_real(&self, event: TraceEvent) {
        let mut state = self.state.lock();

        if state.suppress_synthetic {
            state.entries.push(event.clone());
            Self::notify(&mut state, &SinkUpdate::Appended(event));
            return;
        }

        // Handoff: one critical section covering all three steps
        if let Some(scheduler) = state.scheduler.take() {
            scheduler.cancel();
        }
        state.suppress_synthetic = true;
        let discarded = state.entries.len();
        state.entries = vec![event];

        tracing::info!(discarded, "handoff to real progress stream");
        let snapshot = state.entries.clone();
        Self::notify(&mut state, &SinkUpdate::Replaced(snapshot));
    }

    /// Snapshot of the current log
    #[must_use]
    pub fn current_log(&self) -> Vec<TraceEvent> {
        self.state.lock().entries.clone()
    }

    /// Number of events currently in the log
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    /// Check if the log is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.lock().entries.is_empty()
    }

    /// Check if the handoff has occurred
    #[must_use]
    pub fn is_suppressed(&self) -> bool {
        self.state.lock().suppress_synthetic
    }

    /// Subscribe to log updates
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<SinkUpdate> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.state.lock().subscribers.push(tx);
        rx
    }

    /// Cancel any running timer, clear the suppression flag, clear the log
    ///
    /// Idempotent: resetting an already-reset sink is a no-op apart from the
    /// (empty) replacement notification.
    pub fn reset(&self) {
        let mut state = self.state.lock();
        if let Some(scheduler) = state.scheduler.take() {
            scheduler.cancel();
        }
        state.suppress_synthetic = false;
        state.entries.clear();
        Self::notify(&mut state, &SinkUpdate::Replaced(Vec::new()));
    }

    /// Deliver an update to all live subscribers, pruning closed ones
    fn notify(state: &mut SinkState, update: &SinkUpdate) {
        state
            .subscribers
            .retain(|subscriber| subscriber.send(update.clone()).is_ok());
    }
}
