//! Aura API authentication
//!
//! OAuth2 client-credentials flow:
//! 1. POST `grant_type=client_credentials` with HTTP basic auth to the token endpoint
//! 2. Cache the returned bearer token for its time-to-live
//! 3. Drop the cached token when the agent answers 401

pub mod auth_handler;
pub mod token_cache;

pub use auth_handler::{AuraAuthHandler, ClientCredentials, ClientCredentialsAuth};
pub use token_cache::{Credential, CredentialState, TokenCache};
