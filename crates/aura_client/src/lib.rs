pub mod api;
pub mod auth;
pub mod client_trait;
pub mod error;
pub mod service;
pub mod utils;

pub use api::client::AgentClient;
pub use api::models::AgentRequest;
pub use api::response::{extract_answer, extract_answer_from_text, UNRECOGNIZED_RESPONSE};
pub use auth::{
    AuraAuthHandler, ClientCredentials, ClientCredentialsAuth, Credential, CredentialState,
    TokenCache,
};
pub use chat_core::Config;
pub use client_trait::{AgentApi, TokenProvider};
pub use error::{AgentError, AgentResult};
pub use service::{AgentService, Reply};
pub use utils::http_utils::{build_http_client, RequestLogger};
