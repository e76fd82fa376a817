//! End-to-end session tests
//!
//! A scripted warp backend streams real frames after a deliberate delay so
//! the placeholder scheduler gets a head start. Real time is used (the
//! stream crosses a loopback socket), with a fast placeholder cadence.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::time::Duration;

use benalyze_event::{AnalysisId, AnalysisRequest, StepStatus};
use benalyze_session::{AnalysisSession, SinkUpdate};
use benalyze_stream::{AnalysisStreamClient, StreamConfig};
use futures::StreamExt;
use pretty_assertions::assert_eq;
use warp::hyper::Body;
use warp::Filter;

/// Stream `lines` on `POST /analyze-stream`, holding the first chunk back
/// for `initial_delay`, then pacing the rest at `line_delay`.
fn spawn_backend(
    lines: Vec<&'static str>,
    initial_delay: Duration,
    line_delay: Duration,
) -> SocketAddr {
    let route = warp::path("analyze-stream").and(warp::post()).map(move || {
        let lines = lines.clone();
        let body = Body::wrap_stream(
            futures::stream::iter(lines.into_iter().enumerate()).then(move |(index, line)| {
                async move {
                    let delay = if index == 0 { initial_delay } else { line_delay };
                    tokio::time::sleep(delay).await;
                    Ok::<_, Infallible>(line)
                }
            }),
        );
        warp::reply::Response::new(body)
    });

    let (addr, server) = warp::serve(route).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);
    addr
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

fn client_for(addr: SocketAddr) -> AnalysisStreamClient {
    AnalysisStreamClient::new(
        StreamConfig::new(format!("http://{addr}")).with_idle_timeout(Duration::from_secs(5)),
    )
}

fn request() -> AnalysisRequest {
    AnalysisRequest::new("https://s/paystub", "https://s/handbook").with_rsu_url("https://s/rsu")
}

#[tokio::test]
async fn real_stream_supersedes_placeholder_progress() {
    init_tracing();
    // Placeholder ticks every 20ms; the backend stays silent for 150ms, so
    // several synthetic events land before the first real frame.
    let addr = spawn_backend(
        vec![
            "data: {\"type\":\"start\",\"analysis_id\":\"abc\"}\n",
            "data: {\"type\":\"trace\",\"step\":1,\"name\":\"download_files\",\"status\":\"processing\",\"timestamp\":\"t\"}\n",
            "data: {\"type\":\"trace\",\"step\":1,\"name\":\"download_files\",\"status\":\"completed\",\"timestamp\":\"t\"}\n",
            "data: {\"type\":\"trace\",\"step\":2,\"name\":\"initialize_agent\",\"status\":\"completed\",\"timestamp\":\"t\"}\n",
            "data: {\"type\":\"complete\",\"result\":{\"recommendation\":\"ok\"}}\n",
        ],
        Duration::from_millis(150),
        Duration::from_millis(10),
    );

    let mut session = AnalysisSession::start_with_tick(
        client_for(addr),
        request(),
        Duration::from_millis(20),
    );
    let sink = session.sink();
    let mut updates = sink.subscribe();

    let outcome = session.outcome().await;

    assert_eq!(outcome.analysis_id, Some(AnalysisId::from("abc")));
    assert_eq!(
        outcome.result,
        Some(serde_json::json!({"recommendation": "ok"}))
    );

    // Only real events survive the handoff, in arrival order
    let log = sink.current_log();
    let names: Vec<_> = log.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["download_files", "download_files", "initialize_agent"]);
    assert_eq!(log[0].status, StepStatus::Processing);
    assert!(sink.is_suppressed());

    // The subscription saw the replacement exactly once
    let mut replacements = 0;
    let mut appended_after_handoff = 0;
    while let Ok(update) = updates.try_recv() {
        match update {
            SinkUpdate::Replaced(log) if !log.is_empty() => replacements += 1,
            SinkUpdate::Appended(_) if replacements > 0 => appended_after_handoff += 1,
            SinkUpdate::Appended(_) | SinkUpdate::Replaced(_) => {}
        }
    }
    assert_eq!(replacements, 1);
    assert_eq!(appended_after_handoff, 2);
}

#[tokio::test]
async fn backend_error_frame_fails_session_with_verbatim_message() {
    init_tracing();
    let addr = spawn_backend(
        vec![
            "data: {\"type\":\"start\",\"analysis_id\":\"bad\"}\n",
            "data: {\"type\":\"error\",\"error\":\"document is not a paystub\"}\n",
        ],
        Duration::from_millis(50),
        Duration::from_millis(10),
    );

    let mut session = AnalysisSession::start_with_tick(
        client_for(addr),
        request(),
        Duration::from_millis(20),
    );
    let sink = session.sink();

    let outcome = session.outcome().await;

    assert_eq!(
        outcome.error.as_deref(),
        Some("document is not a paystub")
    );
    assert_eq!(outcome.analysis_id, Some(AnalysisId::from("bad")));

    // No real trace frame arrived, so the placeholder log was never
    // replaced; whatever synthetic events accrued are still synthetic.
    assert!(!sink.is_suppressed());
}

#[tokio::test]
async fn slow_backend_leaves_placeholder_log_in_catalog_order() {
    init_tracing();
    // Backend silent long enough for a few ticks, then completes without
    // any trace frames: synthetic events stay authoritative.
    let addr = spawn_backend(
        vec!["data: {\"type\":\"complete\",\"result\":null}\n"],
        Duration::from_millis(120),
        Duration::from_millis(0),
    );

    let mut session = AnalysisSession::start_with_tick(
        client_for(addr),
        request(),
        Duration::from_millis(20),
    );
    let sink = session.sink();

    let outcome = session.outcome().await;
    assert!(outcome.is_success());

    let log = sink.current_log();
    assert!(!log.is_empty());
    for (index, event) in log.iter().enumerate() {
        assert_eq!(event.step, index as u32 + 1);
        assert_eq!(event.status, StepStatus::Completed);
    }

    session.abandon();
}

#[tokio::test]
async fn abandoned_session_reports_abandonment() {
    init_tracing();
    // A backend that never sends anything; abandon mid-flight.
    let addr = spawn_backend(
        vec!["data: {\"type\":\"start\",\"analysis_id\":\"x\"}\n"],
        Duration::from_secs(30),
        Duration::from_secs(30),
    );

    let mut session = AnalysisSession::start_with_tick(
        client_for(addr),
        request(),
        Duration::from_millis(20),
    );

    tokio::time::sleep(Duration::from_millis(60)).await;
    session.abandon();

    let sink = session.sink();
    let len_at_abandon = sink.len();
    let outcome = session.outcome().await;

    assert_eq!(outcome.error.as_deref(), Some("session abandoned"));

    // Scheduler was cancelled: the log stops growing
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(sink.len(), len_at_abandon);
}
