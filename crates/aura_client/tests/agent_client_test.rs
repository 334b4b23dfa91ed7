//! Agent call classification against a simulated agent endpoint

mod test_utils;

use std::time::Duration;

use aura_client::{AgentApi, AgentClient, AgentError, UNRECOGNIZED_RESPONSE};
use test_utils::{http_client, AGENT_PATH};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn agent_for(server: &MockServer, timeout: Duration) -> AgentClient {
    AgentClient::new(
        http_client(),
        format!("{}{}", server.uri(), AGENT_PATH),
        timeout,
    )
}

async fn mount_status(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path(AGENT_PATH))
        .respond_with(template)
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn posts_input_with_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(AGENT_PATH))
        .and(header("authorization", "Bearer tok"))
        .and(header("content-type", "application/json"))
        .and(body_json(serde_json::json!({"input": "Qui est Elisabeth Müller ?"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "output": "Elisabeth Müller était..."
        })))
        .expect(1)
        .mount(&server)
        .await;

    let agent = agent_for(&server, Duration::from_secs(5));
    let answer = agent.ask("Qui est Elisabeth Müller ?", "tok").await;

    assert_eq!(answer, Ok("Elisabeth Müller était...".to_string()));
}

#[tokio::test]
async fn content_blocks_are_normalized() {
    let server = MockServer::start().await;
    mount_status(
        &server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "content": [
                {"type": "text", "text": "draft"},
                {"type": "tool_use", "name": "cypher"},
                {"type": "text", "text": "final"}
            ]
        })),
    )
    .await;

    let agent = agent_for(&server, Duration::from_secs(5));
    assert_eq!(agent.ask("q", "tok").await, Ok("final".to_string()));
}

#[tokio::test]
async fn unparseable_success_body_yields_placeholder() {
    let server = MockServer::start().await;
    mount_status(&server, ResponseTemplate::new(200).set_body_string("not json")).await;

    let agent = agent_for(&server, Duration::from_secs(5));
    assert_eq!(
        agent.ask("q", "tok").await,
        Ok(UNRECOGNIZED_RESPONSE.to_string())
    );
}

#[tokio::test]
async fn unauthorized_is_auth_expired() {
    let server = MockServer::start().await;
    mount_status(&server, ResponseTemplate::new(401)).await;

    let agent = agent_for(&server, Duration::from_secs(5));
    let err = agent.ask("q", "stale").await.unwrap_err();

    assert_eq!(err, AgentError::AuthExpired);
    assert!(!err.user_message().is_empty());
}

#[tokio::test]
async fn not_found_is_endpoint_not_found() {
    let server = MockServer::start().await;
    mount_status(&server, ResponseTemplate::new(404).set_body_string("no agent")).await;

    let agent = agent_for(&server, Duration::from_secs(5));
    assert_eq!(
        agent.ask("q", "tok").await,
        Err(AgentError::EndpointNotFound)
    );
}

#[tokio::test]
async fn other_status_is_upstream_error_with_truncated_body() {
    let server = MockServer::start().await;
    mount_status(
        &server,
        ResponseTemplate::new(500).set_body_string("x".repeat(500)),
    )
    .await;

    let agent = agent_for(&server, Duration::from_secs(5));
    match agent.ask("q", "tok").await {
        Err(AgentError::UpstreamError { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body.len(), 200);
        }
        other => panic!("expected UpstreamError, got {other:?}"),
    }
}

#[tokio::test]
async fn slow_agent_is_timeout() {
    let server = MockServer::start().await;
    mount_status(
        &server,
        ResponseTemplate::new(200)
            .set_body_json(serde_json::json!({"output": "late"}))
            .set_delay(Duration::from_secs(3)),
    )
    .await;

    let agent = agent_for(&server, Duration::from_millis(300));
    let err = agent.ask("q", "tok").await.unwrap_err();

    assert!(matches!(err, AgentError::Timeout { .. }), "got {err:?}");
    assert!(err.user_message().contains("simpler question"));
}

#[tokio::test]
async fn connection_failure_is_transport_error() {
    let agent = AgentClient::new(
        http_client(),
        "http://127.0.0.1:9/invoke",
        Duration::from_secs(2),
    );

    let err = agent.ask("q", "tok").await.unwrap_err();
    assert!(matches!(err, AgentError::Transport(_)), "got {err:?}");
}
