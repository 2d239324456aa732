#![cfg(feature = "http")]

use std::time::Duration;

use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::net::TcpListener;

use subgrab::{FetchSession, FetchState, HttpCaptionService, HttpServiceConfig};

/// Serve `app` on an ephemeral local port and return its base URL.
async fn spawn_backend(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fixture backend");
    let addr = listener.local_addr().expect("fixture backend address");
    tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("fixture backend failed");
    });
    format!("http://{addr}")
}

/// Mirrors the caption backend's `/api/subtitles` contract.
async fn subtitles(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let url = body["url"].as_str().unwrap_or_default();
    let lang = body["lang"].as_str().unwrap_or("en");

    if url.contains("zzzzzzzzzzz") {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "No subtitles",
                "message": "This video has no subtitles available.",
                "videoId": "zzzzzzzzzzz"
            })),
        );
    }

    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "videoId": "dQw4w9WgXcQ",
            "language": lang,
            "languageName": "Deutsch",
            "subtitles": [
                {"start": "0.500", "dur": "1.000", "text": "Hallo &amp; willkommen"},
                {"start": "4.000", "dur": "2.250", "text": "Tsch&uuml;ss"}
            ],
            "count": 2
        })),
    )
}

fn backend() -> Router {
    Router::new()
        .route("/api/subtitles", post(subtitles))
        .route(
            "/api/languages",
            get(|| async { Json(json!([{"code": "en", "name": "English"}, {"code": "de", "name": "Deutsch"}])) }),
        )
        .route(
            "/api/health",
            get(|| async { Json(json!({"status": "ok", "timestamp": "2026-01-01T00:00:00"})) }),
        )
}

fn service(base_url: String, timeout: Option<Duration>) -> anyhow::Result<HttpCaptionService> {
    Ok(HttpCaptionService::new(HttpServiceConfig { base_url, timeout })?)
}

#[tokio::test]
async fn fetches_and_exports_over_http() -> anyhow::Result<()> {
    let base = spawn_backend(backend()).await;
    let mut session = FetchSession::new(service(base, None)?);

    let state = session
        .submit("https://www.youtube.com/watch?v=dQw4w9WgXcQ", "de")
        .await?;
    assert!(
        matches!(state, FetchState::Succeeded { language, count: 2, .. } if language == "de"),
        "unexpected state: {state}"
    );

    assert_eq!(
        session.export_srt(),
        "1\n00:00:00,500 --> 00:00:01,500\nHallo & willkommen\n\n\
         2\n00:00:04,000 --> 00:00:06,250\nTschüss\n\n"
    );
    assert_eq!(session.search("SS").hits[0].spans, vec![6..8]);
    Ok(())
}

#[tokio::test]
async fn error_status_passes_backend_message_through() -> anyhow::Result<()> {
    let base = spawn_backend(backend()).await;
    let mut session = FetchSession::new(service(base, None)?);

    let state = session.submit("zzzzzzzzzzz", "en").await?;
    assert!(
        matches!(state, FetchState::Failed { message, .. } if message == "This video has no subtitles available."),
        "unexpected state: {state}"
    );
    Ok(())
}

#[tokio::test]
async fn error_status_without_json_gets_generic_message() -> anyhow::Result<()> {
    let app = Router::new().route(
        "/api/subtitles",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let base = spawn_backend(app).await;
    let mut session = FetchSession::new(service(base, None)?);

    let state = session.submit("dQw4w9WgXcQ", "en").await?;
    assert!(
        matches!(state, FetchState::Failed { message, .. } if message == "Error getting subtitles (HTTP 500)"),
        "unexpected state: {state}"
    );
    Ok(())
}

#[tokio::test]
async fn unreachable_backend_ends_in_failed() -> anyhow::Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);

    let mut session = FetchSession::new(service(format!("http://{addr}"), None)?);
    let state = session.submit("dQw4w9WgXcQ", "en").await?;
    assert!(matches!(state, FetchState::Failed { .. }), "unexpected state: {state}");
    assert!(session.subtitles().is_empty());
    Ok(())
}

#[tokio::test]
async fn slow_backend_times_out_when_configured() -> anyhow::Result<()> {
    let app = Router::new().route(
        "/api/subtitles",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(json!({"success": false}))
        }),
    );
    let base = spawn_backend(app).await;
    let mut session = FetchSession::new(service(base, Some(Duration::from_millis(100)))?);

    let state = session.submit("dQw4w9WgXcQ", "en").await?;
    assert!(matches!(state, FetchState::Failed { .. }), "unexpected state: {state}");
    Ok(())
}

#[tokio::test]
async fn lists_languages_and_reports_health() -> anyhow::Result<()> {
    let base = spawn_backend(backend()).await;
    let client = service(format!("{base}/"), None)?;

    let languages = client.languages().await?;
    assert_eq!(languages.len(), 2);
    assert_eq!(languages[1].code, "de");
    assert_eq!(languages[1].name, "Deutsch");

    let health = client.health().await?;
    assert_eq!(health.status, "ok");
    assert!(health.timestamp.is_some());
    Ok(())
}
