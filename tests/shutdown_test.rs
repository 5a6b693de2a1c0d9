#![cfg(unix)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::http::HeaderValue;
use reqwest::StatusCode;
use serde_json::json;

use prompt_analyzer::analysis::AnalysisService;
use prompt_analyzer::provider::{Completion, Provider, ProviderError};
use prompt_analyzer::shutdown::shutdown_signal;
use prompt_analyzer::web::{AppState, create_app};

/// Takes a while to answer, so a request is still in flight at shutdown.
struct SlowProvider;

#[async_trait]
impl Provider for SlowProvider {
    async fn complete(&self, _system: &str, _user: &str) -> Result<Completion, ProviderError> {
        tokio::time::sleep(Duration::from_millis(500)).await;
        Ok(Completion {
            text: json!({
                "score": 5,
                "technique": "zero-shot",
                "strengths": [],
                "issues": [],
                "suggestions": []
            })
            .to_string(),
            usage: None,
        })
    }

    fn name(&self) -> &str {
        "slow"
    }

    fn model(&self) -> &str {
        "slow-model"
    }
}

fn send_sigterm() {
    let status = std::process::Command::new("kill")
        .args(["-TERM", &std::process::id().to_string()])
        .status()
        .unwrap();
    assert!(status.success());
}

#[tokio::test]
async fn sigterm_drains_in_flight_request_then_stops() {
    let provider: Arc<dyn Provider> = Arc::new(SlowProvider);
    let app = create_app(
        Arc::new(AppState::new(AnalysisService::new(Some(provider), None))),
        HeaderValue::from_static("http://localhost:3000"),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = shutdown_signal();
    let server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
    });

    let request = tokio::spawn(async move {
        reqwest::Client::new()
            .post(format!("http://{addr}/analyze"))
            .json(&json!({"prompt": "hello"}))
            .send()
            .await
    });

    tokio::time::sleep(Duration::from_millis(100)).await;
    send_sigterm();

    let resp = request.await.unwrap().unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let stopped = tokio::time::timeout(Duration::from_secs(5), server).await;
    assert!(stopped.is_ok(), "server kept running after SIGTERM");
    stopped.unwrap().unwrap().unwrap();
}
