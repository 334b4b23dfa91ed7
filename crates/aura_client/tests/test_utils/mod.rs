//! Shared helpers for the aura_client integration tests

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use aura_client::{build_http_client, AuraAuthHandler, ClientCredentials};
use chat_core::Config;
use reqwest_middleware::ClientWithMiddleware;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TOKEN_PATH: &str = "/oauth/token";
pub const AGENT_PATH: &str = "/v2beta1/projects/p/agents/a/invoke";

/// `base64("id:secret")`
pub const BASIC_ID_SECRET: &str = "Basic aWQ6c2VjcmV0";

pub fn http_client() -> Arc<ClientWithMiddleware> {
    Arc::new(build_http_client(&Config::default()).expect("http client"))
}

pub fn credentials() -> ClientCredentials {
    ClientCredentials::new("id", "secret")
}

pub fn auth_handler(server: &MockServer, ttl: Duration) -> AuraAuthHandler {
    AuraAuthHandler::new(
        http_client(),
        format!("{}{}", server.uri(), TOKEN_PATH),
        Duration::from_secs(10),
        ttl,
    )
}

/// Mounts a token endpoint that hands out `token` and expects `calls` exchanges.
pub async fn mount_token_endpoint(server: &MockServer, token: &str, calls: u64) {
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .and(header("authorization", BASIC_ID_SECRET))
        .and(body_string_contains("grant_type=client_credentials"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": token,
            "token_type": "bearer",
            "expires_in": 3600
        })))
        .expect(calls)
        .mount(server)
        .await;
}

pub fn config_for(server: &MockServer) -> Config {
    Config {
        agent_endpoint: format!("{}{}", server.uri(), AGENT_PATH),
        client_id: "id".to_string(),
        client_secret: "secret".to_string(),
        token_url: format!("{}{}", server.uri(), TOKEN_PATH),
        ..Config::default()
    }
}
