use async_trait::async_trait;

use crate::error::AgentResult;

/// Source of bearer tokens for the agent call.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn get_token(&self) -> AgentResult<String>;

    /// Forget the current token so the next `get_token` fetches a new one.
    async fn invalidate(&self);
}

#[async_trait]
pub trait AgentApi: Send + Sync {
    /// Send one self-contained question and return the extracted answer.
    async fn ask(&self, question: &str, token: &str) -> AgentResult<String>;
}
