//! One request/response cycle per submitted question.
//!
//! The transcript is passed in by the caller; the service keeps no
//! conversation state of its own.

use std::sync::Arc;

use chat_core::{Config, Role, Transcript};
use log::{info, warn};
use reqwest_middleware::ClientWithMiddleware;

use crate::api::client::AgentClient;
use crate::auth::{AuraAuthHandler, ClientCredentials, ClientCredentialsAuth};
use crate::client_trait::{AgentApi, TokenProvider};
use crate::error::AgentError;

/// Outcome of a submitted question. Both variants are displayable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Answer(String),
    Failure(AgentError),
}

impl Reply {
    pub fn text(&self) -> String {
        match self {
            Reply::Answer(answer) => answer.clone(),
            Reply::Failure(err) => err.user_message(),
        }
    }

    pub fn is_answer(&self) -> bool {
        matches!(self, Reply::Answer(_))
    }
}

#[derive(Clone)]
pub struct AgentService {
    tokens: Arc<dyn TokenProvider>,
    agent: Arc<dyn AgentApi>,
}

impl AgentService {
    pub fn new(tokens: Arc<dyn TokenProvider>, agent: Arc<dyn AgentApi>) -> Self {
        Self { tokens, agent }
    }

    /// Wires the token exchange and the agent client over one shared HTTP client.
    pub fn from_config(client: Arc<ClientWithMiddleware>, config: &Config) -> Self {
        let handler = Arc::new(AuraAuthHandler::from_config(Arc::clone(&client), config));
        let tokens = ClientCredentialsAuth::new(handler, ClientCredentials::from_config(config));
        let agent = AgentClient::from_config(client, config);
        Self::new(Arc::new(tokens), Arc::new(agent))
    }

    /// Appends the question and the reply (answer or failure text) to
    /// `transcript`. A 401 from the agent clears the token cache; the user
    /// retries by submitting again.
    pub async fn handle_question(&self, transcript: &mut Transcript, question: &str) -> Reply {
        transcript.append(Role::User, question);

        let reply = match self.tokens.get_token().await {
            Ok(token) => match self.agent.ask(question, &token).await {
                Ok(answer) => Reply::Answer(answer),
                Err(AgentError::AuthExpired) => {
                    self.tokens.invalidate().await;
                    Reply::Failure(AgentError::AuthExpired)
                }
                Err(err) => Reply::Failure(err),
            },
            Err(err) => Reply::Failure(err),
        };

        match &reply {
            Reply::Answer(_) => info!("Agent answered"),
            Reply::Failure(err) => warn!("Question failed: {err}"),
        }

        transcript.append(Role::Assistant, reply.text());
        reply
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AgentResult;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeTokens {
        fail: bool,
        issued: AtomicUsize,
        invalidated: AtomicUsize,
    }

    #[async_trait]
    impl TokenProvider for FakeTokens {
        async fn get_token(&self) -> AgentResult<String> {
            if self.fail {
                return Err(AgentError::AuthFailure {
                    status: Some(403),
                    detail: "forbidden".to_string(),
                });
            }
            let n = self.issued.fetch_add(1, Ordering::SeqCst);
            Ok(format!("token-{n}"))
        }

        async fn invalidate(&self) {
            self.invalidated.fetch_add(1, Ordering::SeqCst);
        }
    }

    struct FakeAgent {
        result: AgentResult<String>,
        seen: Mutex<Vec<(String, String)>>,
    }

    impl FakeAgent {
        fn new(result: AgentResult<String>) -> Self {
            Self {
                result,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl AgentApi for FakeAgent {
        async fn ask(&self, question: &str, token: &str) -> AgentResult<String> {
            self.seen
                .lock()
                .unwrap()
                .push((question.to_string(), token.to_string()));
            self.result.clone()
        }
    }

    #[tokio::test]
    async fn answer_is_appended_after_question() {
        let tokens = Arc::new(FakeTokens::default());
        let agent = Arc::new(FakeAgent::new(Ok("Bonjour".to_string())));
        let service = AgentService::new(tokens.clone(), agent.clone());
        let mut transcript = Transcript::new();

        let reply = service.handle_question(&mut transcript, "Salut").await;

        assert_eq!(reply, Reply::Answer("Bonjour".to_string()));
        let entries: Vec<_> = transcript
            .all()
            .iter()
            .map(|m| (m.role, m.content.clone()))
            .collect();
        assert_eq!(
            entries,
            vec![
                (Role::User, "Salut".to_string()),
                (Role::Assistant, "Bonjour".to_string())
            ]
        );
        assert_eq!(
            agent.seen.lock().unwrap().as_slice(),
            &[("Salut".to_string(), "token-0".to_string())]
        );
    }

    #[tokio::test]
    async fn auth_expired_invalidates_token_cache() {
        let tokens = Arc::new(FakeTokens::default());
        let agent = Arc::new(FakeAgent::new(Err(AgentError::AuthExpired)));
        let service = AgentService::new(tokens.clone(), agent);
        let mut transcript = Transcript::new();

        let reply = service.handle_question(&mut transcript, "q").await;

        assert_eq!(reply, Reply::Failure(AgentError::AuthExpired));
        assert_eq!(tokens.invalidated.load(Ordering::SeqCst), 1);
        assert_eq!(
            transcript.last().map(|m| m.content.clone()),
            Some(AgentError::AuthExpired.user_message())
        );
    }

    #[tokio::test]
    async fn other_failures_keep_the_token() {
        let tokens = Arc::new(FakeTokens::default());
        let agent = Arc::new(FakeAgent::new(Err(AgentError::Timeout { secs: 90 })));
        let service = AgentService::new(tokens.clone(), agent);
        let mut transcript = Transcript::new();

        let reply = service.handle_question(&mut transcript, "q").await;

        assert!(!reply.is_answer());
        assert_eq!(tokens.invalidated.load(Ordering::SeqCst), 0);
        assert_eq!(transcript.len(), 2);
    }

    #[tokio::test]
    async fn auth_failure_skips_the_agent_call() {
        let tokens = Arc::new(FakeTokens {
            fail: true,
            ..FakeTokens::default()
        });
        let agent = Arc::new(FakeAgent::new(Ok("unused".to_string())));
        let service = AgentService::new(tokens, agent.clone());
        let mut transcript = Transcript::new();

        let reply = service.handle_question(&mut transcript, "q").await;

        assert!(matches!(reply, Reply::Failure(AgentError::AuthFailure { .. })));
        assert!(agent.seen.lock().unwrap().is_empty());
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.all()[1].role, Role::Assistant);
    }
}
