use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use chat_core::Config;
use log::{error, info, warn};
use reqwest::StatusCode;
use reqwest_middleware::ClientWithMiddleware;

use crate::api::models::AgentRequest;
use crate::api::response::extract_answer_from_text;
use crate::client_trait::AgentApi;
use crate::error::{truncate_chars, AgentError, AgentResult, ERROR_BODY_LIMIT};

/// Client for the hosted question-answering agent.
#[derive(Debug, Clone)]
pub struct AgentClient {
    client: Arc<ClientWithMiddleware>,
    endpoint: String,
    timeout: Duration,
}

impl AgentClient {
    pub fn new(client: Arc<ClientWithMiddleware>, endpoint: impl Into<String>, timeout: Duration) -> Self {
        AgentClient {
            client,
            endpoint: endpoint.into(),
            timeout,
        }
    }

    pub fn from_config(client: Arc<ClientWithMiddleware>, config: &Config) -> Self {
        Self::new(
            client,
            config.agent_endpoint.clone(),
            Duration::from_secs(config.agent_timeout_secs),
        )
    }

    fn transport_error(&self, err: reqwest_middleware::Error) -> AgentError {
        match err {
            reqwest_middleware::Error::Reqwest(e) => self.reqwest_error(e),
            other => AgentError::Transport(other.to_string()),
        }
    }

    fn reqwest_error(&self, err: reqwest::Error) -> AgentError {
        if err.is_timeout() {
            AgentError::Timeout {
                secs: self.timeout.as_secs(),
            }
        } else {
            AgentError::Transport(err.to_string())
        }
    }
}

#[async_trait]
impl AgentApi for AgentClient {
    async fn ask(&self, question: &str, token: &str) -> AgentResult<String> {
        info!("Asking agent ({} chars)", question.chars().count());

        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .bearer_auth(token)
            .json(&AgentRequest::new(question))
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        match status {
            StatusCode::OK => {
                let body = response.text().await.map_err(|e| self.reqwest_error(e))?;
                Ok(extract_answer_from_text(&body))
            }
            StatusCode::UNAUTHORIZED => {
                warn!("Agent rejected the bearer token");
                Err(AgentError::AuthExpired)
            }
            StatusCode::NOT_FOUND => {
                error!("Agent endpoint not found: {}", self.endpoint);
                Err(AgentError::EndpointNotFound)
            }
            _ => {
                let body = response.text().await.unwrap_or_default();
                error!("Agent returned HTTP {status}");
                Err(AgentError::UpstreamError {
                    status: status.as_u16(),
                    body: truncate_chars(&body, ERROR_BODY_LIMIT),
                })
            }
        }
    }
}
