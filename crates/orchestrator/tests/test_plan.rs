//! Integration tests for the orchestrator crate against a mocked upstream.

use httpmock::prelude::*;
use serde_json::json;

use eduassist_config::AppConfig;
use eduassist_learning::Grade;
use eduassist_orchestrator::{DoubtPrompt, Orchestrator, OrchestratorError, NO_ANSWER_FALLBACK};

fn config_for(server: &MockServer) -> AppConfig {
    let mut config = AppConfig::default();
    config.orchestrator.upstream.api_key = Some("test-key".to_string());
    config.orchestrator.upstream.base_url = server.base_url();
    config.orchestrator.upstream.request_timeout_seconds = 5;
    config.orchestrator.upstream.title = Some("EduAssist Tests".to_string());
    config
}

fn orchestrator_for(server: &MockServer) -> Orchestrator {
    Orchestrator::new(&config_for(server))
        .bootstrap()
        .expect("bootstrap succeeds")
}

fn completion(content: &str) -> serde_json::Value {
    json!({
        "id": "gen-1",
        "choices": [{"index": 0, "message": {"role": "assistant", "content": content}}]
    })
}

#[tokio::test]
async fn answer_doubt_posts_system_and_user_messages() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/chat/completions")
                .header("authorization", "Bearer test-key")
                .header("x-title", "EduAssist Tests")
                .body_contains("\"model\":\"google/gemini-2.5-flash\"")
                .body_contains("{\"role\":\"system\",\"content\":\"You are an educational AI tutor")
                .body_contains("{\"role\":\"user\",\"content\":\"Why is the sky blue?\"}")
                .body_contains("suitable for grade 6 students");
            then.status(200).json_body(completion("**Rayleigh scattering**"));
        })
        .await;

    let orchestrator = orchestrator_for(&server);
    let answer = orchestrator
        .answer_doubt(&DoubtPrompt::new("Why is the sky blue?", "science", Grade::Level(6)))
        .await
        .expect("answer expected");

    assert_eq!(answer, "**Rayleigh scattering**");
    mock.assert_async().await;
}

#[tokio::test]
async fn answer_doubt_sends_image_as_content_part() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/chat/completions")
                .body_contains("\"type\":\"image_url\"")
                .body_contains("data:image/png;base64,AAAA");
            then.status(200).json_body(completion("The roots are 2 and 3."));
        })
        .await;

    let orchestrator = orchestrator_for(&server);
    let prompt = DoubtPrompt::new("Solve this equation", "math", Grade::Level(10))
        .with_image("data:image/png;base64,AAAA");
    let answer = orchestrator.answer_doubt(&prompt).await.expect("answer");

    assert_eq!(answer, "The roots are 2 and 3.");
    mock.assert_async().await;
}

#[tokio::test]
async fn answer_doubt_falls_back_when_content_missing() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200).json_body(json!({"choices": []}));
        })
        .await;

    let orchestrator = orchestrator_for(&server);
    let answer = orchestrator
        .answer_doubt(&DoubtPrompt::new("What is 2+2?", "math", Grade::Level(1)))
        .await
        .expect("fallback answer");

    assert_eq!(answer, NO_ANSWER_FALLBACK);
}

#[tokio::test]
async fn translate_returns_empty_string_when_content_missing() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/chat/completions")
                .body_contains("Translate the given text to Telugu");
            then.status(200)
                .json_body(json!({"choices": [{"message": {"content": null}}]}));
        })
        .await;

    let orchestrator = orchestrator_for(&server);
    let translated = orchestrator
        .translate("Plants make food from sunlight.", "telugu")
        .await
        .expect("translation call succeeds");

    assert_eq!(translated, "");
}

#[tokio::test]
async fn upstream_error_status_is_preserved() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(429).body("rate limited");
        })
        .await;

    let orchestrator = orchestrator_for(&server);
    let err = orchestrator
        .translate("hello", "telugu")
        .await
        .expect_err("429 should surface");

    match err {
        OrchestratorError::UpstreamStatus { status, body } => {
            assert_eq!(status.as_u16(), 429);
            assert_eq!(body, "rate limited");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn undecodable_success_body_is_a_response_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200).body("<html>gateway</html>");
        })
        .await;

    let orchestrator = orchestrator_for(&server);
    let err = orchestrator
        .answer_doubt(&DoubtPrompt::new("q", "math", Grade::College))
        .await
        .expect_err("html body should fail to decode");

    assert!(matches!(err, OrchestratorError::ProviderResponse(_)));
}

#[tokio::test]
async fn calls_before_bootstrap_fail() {
    let orchestrator = Orchestrator::new(&AppConfig::default());
    assert!(!orchestrator.is_ready());

    let err = orchestrator
        .translate("hello", "telugu")
        .await
        .expect_err("not bootstrapped");
    assert!(matches!(err, OrchestratorError::UpstreamMissing));
}

#[test]
fn bootstrap_requires_api_key() {
    std::env::remove_var(eduassist_orchestrator::API_KEY_ENV);

    let err = match Orchestrator::new(&AppConfig::default()).bootstrap() {
        Ok(_) => panic!("missing api key should error"),
        Err(err) => err,
    };
    assert!(matches!(err, OrchestratorError::ApiKeyMissing));
}

#[test]
fn active_model_reports_configured_model() {
    let mut config = AppConfig::default();
    config.orchestrator.model = "openai/gpt-4o-mini".to_string();

    let orchestrator = Orchestrator::new(&config);
    assert_eq!(orchestrator.active_model(), "openai/gpt-4o-mini");
}
