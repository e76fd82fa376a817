//! Placeholder scheduler - timer-driven synthetic progress
//!
//! Before the first authoritative event arrives, a timer walks the fixed
//! seven-step catalog, appending one synthetic `completed` event per tick so
//! the display never appears stalled. The scheduler stops on its own after
//! the catalog is exhausted, or immediately once the sink refuses a
//! synthetic event (authority has passed to the stream).
//!
//! The returned [`SchedulerHandle`] makes cancellation an explicit call so
//! every exit path - handoff, reset, abandonment - can reach it.

use crate::sink::StepSink;
use benalyze_event::{TraceEvent, PLACEHOLDER_STEPS};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Production cadence: one synthetic step per second
pub const PLACEHOLDER_TICK: Duration = Duration::from_secs(1);

/// Cancellable handle to a running placeholder scheduler
#[derive(Debug, Clone)]
pub struct SchedulerHandle {
    task: Arc<JoinHandle<()>>,
}

impl SchedulerHandle {
    /// Cancel the timer
    ///
    /// Idempotent: cancelling an already-stopped scheduler is a no-op.
    pub fn cancel(&self) {
        self.task.abort();
    }

    /// Check if the scheduler task has stopped
    #[inline]
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// Timer-driven producer of synthetic progress events
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderScheduler;

impl PlaceholderScheduler {
    /// Start synthetic production at the production cadence
    ///
    /// Clears the sink (log and suppression flag) and begins ticking from a
    /// fresh counter; the first event appears one tick after start.
    #[must_use]
    pub fn spawn(sink: Arc<StepSink>) -> SchedulerHandle {
        Self::spawn_with_tick(sink, PLACEHOLDER_TICK)
    }

    /// Start synthetic production at a custom cadence
    #[must_use]
    pub fn spawn_with_tick(sink: Arc<StepSink>, tick: Duration) -> SchedulerHandle {
        sink.reset();

        let task = tokio::spawn(async move {
            let mut timer = tokio::time::interval(tick);
            // The first interval tick completes immediately; consume it so
            // events are spaced one full tick apart from start.
            timer.tick().await;

            for (index, name) in PLACEHOLDER_STEPS.iter().enumerate() {
                timer.tick().await;

                #[allow(clippy::cast_possible_truncation)]
                let event = TraceEvent::synthetic(index as u32 + 1, *name);
                if !sink.append_synthetic(event) {
                    tracing::debug!("placeholder scheduler superseded by real stream");
                    return;
                }
            }
            // Catalog exhausted: stop; never loop or repeat
            tracing::debug!("placeholder catalog exhausted");
        });

        SchedulerHandle {
            task: Arc::new(task),
        }
    }
}
