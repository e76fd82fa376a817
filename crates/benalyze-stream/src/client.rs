//! Analysis stream client
//!
//! Drives one streaming session end to end:
//! 1. Resolve the configured endpoint (fail fast when absent)
//! 2. POST the analysis request
//! 3. Read the response incrementally through one [`FrameDecoder`]
//! 4. Dispatch frames by kind, invoking the trace callback in arrival order
//! 5. Resolve exactly one terminal [`SessionOutcome`]
//!
//! The returned future is cancel-safe: dropping it at any suspension point
//! drops the in-flight response and closes the connection. The `error`-frame
//! path returns immediately for the same reason.

use crate::config::StreamConfig;
use crate::decode::FrameDecoder;
use crate::error::StreamError;
use benalyze_event::{AnalysisId, AnalysisRequest, SessionOutcome, StreamFrame, TraceEvent};
use bytes::Bytes;
use futures::{Stream, StreamExt};
use serde_json::Value;

/// Streaming client for the analysis backend
#[derive(Debug, Clone)]
pub struct AnalysisStreamClient {
    http: reqwest::Client,
    config: StreamConfig,
}

impl AnalysisStreamClient {
    /// Create a new client
    #[inline]
    #[must_use]
    pub fn new(config: StreamConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Create with a caller-supplied HTTP client (shared pools, proxies)
    #[inline]
    #[must_use]
    pub fn with_http_client(http: reqwest::Client, config: StreamConfig) -> Self {
        Self { http, config }
    }

    /// Get the configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    /// Run one analysis session against the streaming endpoint
    ///
    /// Invokes `on_trace` once per accepted trace frame, in arrival order,
    /// and resolves with the single terminal outcome. All session-fatal
    /// errors surface as a failed outcome carrying the error string
    /// verbatim; nothing is retried here.
    pub async fn stream_analysis<F>(
        &self,
        request: &AnalysisRequest,
        mut on_trace: F,
    ) -> SessionOutcome
    where
        F: FnMut(TraceEvent),
    {
        let url = match self.config.analyze_url() {
            Ok(url) => url,
            Err(err) => {
                tracing::warn!(%err, "analysis session refused");
                return SessionOutcome::failed(None, err.to_string());
            }
        };

        tracing::info!(%url, "opening analysis stream");

        let response = match self.http.post(&url).json(request).send().await {
            Ok(response) => response,
            Err(err) => {
                let err = StreamError::Connection(err);
                tracing::warn!(%err, "analysis stream could not be opened");
                return SessionOutcome::failed(None, err.to_string());
            }
        };

        if !response.status().is_success() {
            let err = Self::status_error(response).await;
            tracing::warn!(%err, "analysis stream rejected");
            return SessionOutcome::failed(None, err.to_string());
        }

        if response.content_length() == Some(0) {
            return SessionOutcome::failed(None, StreamError::MissingBody.to_string());
        }

        self.read_stream(Box::pin(response.bytes_stream()), &mut on_trace)
            .await
    }

    /// Consume the byte stream, dispatching frames until a terminal state
    async fn read_stream<S, F>(&self, mut stream: S, on_trace: &mut F) -> SessionOutcome
    where
        S: Stream<Item = reqwest::Result<Bytes>> + Unpin,
        F: FnMut(TraceEvent),
    {
        let mut decoder = FrameDecoder::new();
        let mut analysis_id: Option<AnalysisId> = None;
        let mut result: Option<Value> = None;

        loop {
            let chunk = match self.next_chunk(&mut stream).await {
                Ok(Some(chunk)) => chunk,
                Ok(None) => break,
                Err(err) => {
                    tracing::warn!(%err, "analysis stream aborted mid-read");
                    return SessionOutcome::failed(analysis_id, err.to_string());
                }
            };

            for frame in decoder.push(&chunk) {
                if let Some(error) = Self::dispatch(frame, &mut analysis_id, &mut result, on_trace)
                {
                    // Authoritative early termination; dropping `stream`
                    // here releases the connection.
                    tracing::info!("analysis stream reported failure");
                    return SessionOutcome::failed(analysis_id, error);
                }
            }
        }

        if let Some(frame) = decoder.finish() {
            if let Some(error) = Self::dispatch(frame, &mut analysis_id, &mut result, on_trace) {
                return SessionOutcome::failed(analysis_id, error);
            }
        }

        match result {
            Some(result) => {
                tracing::info!("analysis stream completed");
                SessionOutcome::completed(analysis_id, result)
            }
            None => {
                let err = StreamError::MissingTerminal;
                tracing::warn!(%err, "analysis stream ended without a terminal frame");
                SessionOutcome::failed(analysis_id, err.to_string())
            }
        }
    }

    /// Await the next chunk, bounded by the configured idle timeout
    async fn next_chunk<S>(&self, stream: &mut S) -> Result<Option<Bytes>, StreamError>
    where
        S: Stream<Item = reqwest::Result<Bytes>> + Unpin,
    {
        let item = match self.config.idle_timeout {
            Some(limit) => tokio::time::timeout(limit, stream.next())
                .await
                .map_err(|_| StreamError::Stalled { after: limit })?,
            None => stream.next().await,
        };

        match item {
            Some(Ok(chunk)) => Ok(Some(chunk)),
            Some(Err(err)) => Err(StreamError::Connection(err)),
            None => Ok(None),
        }
    }

    /// Dispatch one frame; `Some(error)` means authoritative early termination
    fn dispatch<F>(
        frame: StreamFrame,
        analysis_id: &mut Option<AnalysisId>,
        result: &mut Option<Value>,
        on_trace: &mut F,
    ) -> Option<String>
    where
        F: FnMut(TraceEvent),
    {
        match frame {
            StreamFrame::Start { analysis_id: id } => {
                tracing::debug!(analysis_id = %id, "analysis started");
                *analysis_id = Some(id);
                None
            }
            StreamFrame::Trace(event) => {
                tracing::debug!(step = event.step, name = %event.name, "trace frame");
                on_trace(event);
                None
            }
            StreamFrame::Complete { result: value } => {
                tracing::debug!("complete frame received");
                *result = Some(value);
                None
            }
            StreamFrame::Error { error } => Some(error),
        }
    }

    /// Extract an error message from a non-success response
    ///
    /// Prefers a structured `{"error": ...}` body, then the raw body text,
    /// then a status-derived message.
    async fn status_error(response: reqwest::Response) -> StreamError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        let message = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|value| {
                value
                    .get("error")
                    .and_then(Value::as_str)
                    .map(str::to_string)
            })
            .or_else(|| {
                let trimmed = body.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            })
            .unwrap_or_else(|| format!("Analysis failed with status {status}"));

        StreamError::BadStatus { status, message }
    }
}
