//! Wire tests for the HTTP backend against a local axum server.

use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio_test::{assert_err, assert_ok};
use zeta::backend::{Backend, Flashcard, HttpBackend, TranscriptEntry};
use zeta::config::Settings;
use zeta::error::{Endpoint, RemoteError};

/// Serve `app` on an ephemeral port and return its base URL.
async fn serve(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn backend_at(base_url: &str) -> HttpBackend {
    let mut settings = Settings::default();
    settings.backend.base_url = base_url.to_string();
    HttpBackend::from_settings(&settings).unwrap()
}

/// A well-behaved backend that derives its answers from the request bodies.
fn study_app() -> Router {
    Router::new()
        .route(
            "/submit-video",
            post(|Json(body): Json<Value>| async move {
                let url = body["videoUrl"].as_str().unwrap_or_default().to_string();
                Json(json!({
                    "message": "Video processed successfully",
                    "transcription": [
                        {"timestamp": "0:00", "text": format!("about {}", url)},
                        {"timestamp": "0:42", "text": "the end"},
                    ],
                    "summary": "A short video.",
                }))
            }),
        )
        .route(
            "/submit-transcription",
            post(|Json(body): Json<Value>| async move {
                let count = body["transcription"].as_array().map_or(0, Vec::len);
                Json(json!({ "chapters": [format!("{} lines", count)] }))
            }),
        )
        .route(
            "/generate-flashcards",
            post(|Json(body): Json<Value>| async move {
                let first = body["chapters"][0].as_str().unwrap_or_default().to_string();
                Json(json!({
                    "flashcards": [{"Question": format!("What is in {}?", first), "Answer": "Words"}]
                }))
            }),
        )
        .route(
            "/chat",
            post(|Json(body): Json<Value>| async move {
                let query = body["query"].as_str().unwrap_or_default().to_string();
                Json(json!({ "response": format!("You asked: {}", query) }))
            }),
        )
        .route(
            "/",
            get(|| async { Json(json!({ "message": "The site is running!" })) }),
        )
}

#[tokio::test]
async fn test_stage_calls_round_trip() {
    let backend = backend_at(&serve(study_app()).await);

    let submission = assert_ok!(backend.submit_video("https://youtu.be/dQw4w9WgXcQ").await);
    assert_eq!(submission.message.as_deref(), Some("Video processed successfully"));
    assert_eq!(submission.summary, "A short video.");
    assert_eq!(
        submission.transcript[0],
        TranscriptEntry::new("0:00", "about https://youtu.be/dQw4w9WgXcQ")
    );

    let chapters = assert_ok!(backend.derive_chapters(&submission.transcript).await);
    assert_eq!(chapters, vec!["2 lines".to_string()]);

    let cards = assert_ok!(backend.derive_flashcards(&chapters).await);
    assert_eq!(cards, vec![Flashcard::new("What is in 2 lines?", "Words")]);

    let reply = assert_ok!(backend.send_chat_message("why?").await);
    assert_eq!(reply, "You asked: why?");

    let health = assert_ok!(backend.health().await);
    assert_eq!(health, "The site is running!");
}

#[tokio::test]
async fn test_error_body_is_surfaced() {
    let app = Router::new().route(
        "/submit-video",
        post(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Invalid YouTube URL" })),
            )
        }),
    );
    let backend = backend_at(&serve(app).await);

    let error = assert_err!(backend.submit_video("https://youtu.be/dQw4w9WgXcQ").await);
    assert_eq!(
        error,
        RemoteError::Rejected {
            endpoint: Endpoint::SubmitVideo,
            status: 400,
            message: "Invalid YouTube URL".to_string(),
        }
    );
    assert_eq!(error.to_string(), "submit-video failed: Invalid YouTube URL");
}

#[tokio::test]
async fn test_error_without_body_uses_status_line() {
    let app = Router::new().route(
        "/chat",
        post(|| async { (StatusCode::BAD_GATEWAY, "upstream down") }),
    );
    let backend = backend_at(&serve(app).await);

    let error = assert_err!(backend.send_chat_message("hello").await);
    assert!(matches!(error, RemoteError::Rejected { status: 502, .. }));
    assert_eq!(error.message(), "502 Bad Gateway");
}

#[tokio::test]
async fn test_undecodable_body_is_transport_error() {
    let app = Router::new().route(
        "/generate-flashcards",
        post(|| async { "<html>oops</html>" }),
    );
    let backend = backend_at(&serve(app).await);

    let error = assert_err!(backend.derive_flashcards(&["one".to_string()]).await);
    assert!(matches!(error, RemoteError::Transport { .. }));
    assert_eq!(error.endpoint(), Endpoint::GenerateFlashcards);
}

#[tokio::test]
async fn test_missing_server_is_transport_error() {
    // Grab a free port, then close it again.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let backend = backend_at(&format!("http://{}", addr));
    let error = assert_err!(backend.health().await);
    assert!(matches!(
        error,
        RemoteError::Transport {
            endpoint: Endpoint::Health,
            ..
        }
    ));
}

#[tokio::test]
async fn test_custom_endpoint_paths() {
    let app = Router::new().route(
        "/api/v2/ask",
        post(|Json(body): Json<Value>| async move {
            Json(json!({ "response": body["query"].clone() }))
        }),
    );
    let base_url = serve(app).await;

    let mut settings = Settings::default();
    settings.backend.base_url = base_url;
    settings.backend.chat = "/api/v2/ask".to_string();
    let backend = HttpBackend::from_settings(&settings).unwrap();

    let reply = assert_ok!(backend.send_chat_message("ping").await);
    assert_eq!(reply, "ping");
}
