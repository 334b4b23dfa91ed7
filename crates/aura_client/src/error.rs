use thiserror::Error;

/// Upstream bodies are cut to this many characters before display.
pub const ERROR_BODY_LIMIT: usize = 200;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AgentError {
    /// The credential exchange was rejected or could not be performed.
    #[error("authentication failed{}: {detail}", .status.map(|s| format!(" (HTTP {s})")).unwrap_or_default())]
    AuthFailure { status: Option<u16>, detail: String },

    /// A previously accepted token was refused by the agent.
    #[error("token expired or invalid")]
    AuthExpired,

    #[error("agent endpoint not found")]
    EndpointNotFound,

    #[error("agent API error (HTTP {status}): {body}")]
    UpstreamError { status: u16, body: String },

    #[error("agent request timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("transport error: {0}")]
    Transport(String),
}

pub type AgentResult<T> = std::result::Result<T, AgentError>;

impl AgentError {
    /// Text shown in the transcript in place of an answer.
    pub fn user_message(&self) -> String {
        match self {
            AgentError::AuthFailure { status, detail } => {
                let status = status.map(|s| format!(" ({s})")).unwrap_or_default();
                format!(
                    "❌ Could not obtain an authentication token{status}: {detail}. Check CLIENT_ID and CLIENT_SECRET."
                )
            }
            AgentError::AuthExpired => {
                "🔑 Token expired or invalid. Try again (the token cache has been cleared).".to_string()
            }
            AgentError::EndpointNotFound => {
                "🔍 Agent not found. Check the endpoint URL.".to_string()
            }
            AgentError::UpstreamError { status, body } => {
                format!("❌ API error ({status}): {body}")
            }
            AgentError::Timeout { secs } => format!(
                "⏱️ Timeout (>{secs} sec). The agent is taking too long. Try again with a simpler question."
            ),
            AgentError::Transport(message) => format!("❌ Error: {message}"),
        }
    }
}

/// Truncate to at most `limit` characters without splitting a code point.
pub fn truncate_chars(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
