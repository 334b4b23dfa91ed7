use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use async_trait::async_trait;
use chat_core::Config;
use log::{debug, error, info};
use reqwest::StatusCode;
use reqwest_middleware::ClientWithMiddleware;
use tokio::sync::Mutex;

use super::token_cache::TokenCache;
use crate::api::models::TokenResponse;
use crate::client_trait::TokenProvider;
use crate::error::{AgentError, AgentResult};

/// OAuth2 client credentials. The secret never appears in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: String,
}

impl ClientCredentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.client_id.clone(), config.client_secret.clone())
    }
}

impl std::fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Exchanges client credentials for a bearer token and caches it.
///
/// The cache lock is held across the exchange, so concurrent callers wait for
/// one exchange instead of starting their own.
#[derive(Debug)]
pub struct AuraAuthHandler {
    client: Arc<ClientWithMiddleware>,
    token_url: String,
    timeout: Duration,
    cache: Mutex<TokenCache>,
}

impl AuraAuthHandler {
    pub fn new(
        client: Arc<ClientWithMiddleware>,
        token_url: impl Into<String>,
        timeout: Duration,
        ttl: Duration,
    ) -> Self {
        AuraAuthHandler {
            client,
            token_url: token_url.into(),
            timeout,
            cache: Mutex::new(TokenCache::new(ttl)),
        }
    }

    pub fn from_config(client: Arc<ClientWithMiddleware>, config: &Config) -> Self {
        Self::new(
            client,
            config.token_url.clone(),
            Duration::from_secs(config.token_timeout_secs),
            Duration::from_secs(config.token_ttl_secs),
        )
    }

    /// Cached token if still fresh, otherwise a new one from the token endpoint.
    /// Failures are never cached.
    pub async fn get_token(&self, credentials: &ClientCredentials) -> AgentResult<String> {
        let mut cache = self.cache.lock().await;

        if let Some(token) = cache.lookup(&credentials.client_id, Instant::now()) {
            debug!("Using cached bearer token");
            return Ok(token);
        }

        let response = self.exchange(credentials).await?;
        let token = response
            .access_token
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| {
                error!("Token response carries no usable access_token");
                AgentError::AuthFailure {
                    status: Some(StatusCode::OK.as_u16()),
                    detail: "token response has no access_token".to_string(),
                }
            })?;

        cache.store(
            &credentials.client_id,
            token.clone(),
            Instant::now(),
            response.expires_in.map(Duration::from_secs),
        );
        info!("Obtained a new bearer token");
        Ok(token)
    }

    /// Drops the cached token; the next `get_token` performs a fresh exchange.
    pub async fn invalidate(&self) {
        self.cache.lock().await.invalidate();
        info!("Bearer token cache cleared");
    }

    pub async fn has_valid_token(&self) -> bool {
        self.cache.lock().await.is_valid_at(Instant::now())
    }

    async fn exchange(&self, credentials: &ClientCredentials) -> AgentResult<TokenResponse> {
        let params = [("grant_type", "client_credentials")];

        let response = self
            .client
            .post(&self.token_url)
            .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .header("Accept", "application/json")
            .form(&params)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                error!("Token request failed: {e}");
                AgentError::AuthFailure {
                    status: None,
                    detail: e.to_string(),
                }
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| AgentError::AuthFailure {
            status: Some(status.as_u16()),
            detail: e.to_string(),
        })?;

        if status != StatusCode::OK {
            error!("Token endpoint returned HTTP {status}");
            return Err(AgentError::AuthFailure {
                status: Some(status.as_u16()),
                detail: body,
            });
        }

        serde_json::from_str::<TokenResponse>(&body).map_err(|e| {
            error!("Failed to parse token response: {e}");
            AgentError::AuthFailure {
                status: Some(status.as_u16()),
                detail: format!("invalid token response: {e}"),
            }
        })
    }
}

/// An [`AuraAuthHandler`] bound to one set of credentials.
#[derive(Debug, Clone)]
pub struct ClientCredentialsAuth {
    handler: Arc<AuraAuthHandler>,
    credentials: ClientCredentials,
}

impl ClientCredentialsAuth {
    pub fn new(handler: Arc<AuraAuthHandler>, credentials: ClientCredentials) -> Self {
        Self {
            handler,
            credentials,
        }
    }
}

#[async_trait]
impl TokenProvider for ClientCredentialsAuth {
    async fn get_token(&self) -> AgentResult<String> {
        self.handler.get_token(&self.credentials).await
    }

    async fn invalidate(&self) {
        self.handler.invalidate().await;
    }
}
