use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::paths::config_json_path;

pub const DEFAULT_TOKEN_URL: &str = "https://api.neo4j.io/oauth/token";
pub const DEFAULT_AGENT_TIMEOUT_SECS: u64 = 90;
pub const DEFAULT_TOKEN_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 3600;
pub const DEFAULT_GRAPH_DATABASE: &str = "neo4j";

const CONFIG_FILE_PATH: &str = "config.toml";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing configuration: {}", .0.join(", "))]
    Missing(Vec<&'static str>),

    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub agent_endpoint: String,
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_secret: String,
    #[serde(default = "default_token_url")]
    pub token_url: String,
    #[serde(default = "default_agent_timeout_secs")]
    pub agent_timeout_secs: u64,
    #[serde(default = "default_token_timeout_secs")]
    pub token_timeout_secs: u64,
    #[serde(default = "default_token_ttl_secs")]
    pub token_ttl_secs: u64,
    #[serde(default)]
    pub http_proxy: String,
    #[serde(default)]
    pub https_proxy: String,
    #[serde(default)]
    pub http_proxy_auth: Option<ProxyAuth>,
    #[serde(default)]
    pub https_proxy_auth: Option<ProxyAuth>,
    #[serde(default)]
    pub graph: Option<GraphConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyAuth {
    pub username: String,
    pub password: String,
}

/// Connection settings for the hosted graph database query API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GraphConfig {
    pub uri: String,
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub database: Option<String>,
}

impl GraphConfig {
    pub fn database(&self) -> &str {
        self.database
            .as_deref()
            .filter(|db| !db.is_empty())
            .unwrap_or(DEFAULT_GRAPH_DATABASE)
    }
}

fn default_token_url() -> String {
    DEFAULT_TOKEN_URL.to_string()
}

fn default_agent_timeout_secs() -> u64 {
    DEFAULT_AGENT_TIMEOUT_SECS
}

fn default_token_timeout_secs() -> u64 {
    DEFAULT_TOKEN_TIMEOUT_SECS
}

fn default_token_ttl_secs() -> u64 {
    DEFAULT_TOKEN_TTL_SECS
}

fn parse_secs(key: &'static str, value: &str) -> Result<u64, ConfigError> {
    value.trim().parse::<u64>().map_err(|_| ConfigError::Invalid {
        key,
        value: value.to_string(),
    })
}

impl Default for Config {
    fn default() -> Self {
        Config {
            agent_endpoint: String::new(),
            client_id: String::new(),
            client_secret: String::new(),
            token_url: default_token_url(),
            agent_timeout_secs: DEFAULT_AGENT_TIMEOUT_SECS,
            token_timeout_secs: DEFAULT_TOKEN_TIMEOUT_SECS,
            token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
            http_proxy: String::new(),
            https_proxy: String::new(),
            http_proxy_auth: None,
            https_proxy_auth: None,
            graph: None,
        }
    }
}

impl Config {
    /// Load from `~/.aura-agent/config.json`, falling back to `./config.toml`,
    /// then apply environment overrides.
    pub fn new() -> Result<Self, ConfigError> {
        Self::load(&config_json_path(), Path::new(CONFIG_FILE_PATH), |key| {
            std::env::var(key).ok()
        })
    }

    pub fn load(
        json_path: &Path,
        toml_path: &Path,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        let mut loaded = false;
        if json_path.exists() {
            match std::fs::read_to_string(json_path) {
                Ok(content) => match serde_json::from_str::<Config>(&content) {
                    Ok(file_config) => {
                        config = file_config;
                        loaded = true;
                    }
                    Err(e) => log::warn!("Ignoring {}: {e}", json_path.display()),
                },
                Err(e) => log::warn!("Failed to read {}: {e}", json_path.display()),
            }
        }

        if !loaded && toml_path.exists() {
            match std::fs::read_to_string(toml_path) {
                Ok(content) => match toml::from_str::<Config>(&content) {
                    Ok(file_config) => config = file_config,
                    Err(e) => log::warn!("Ignoring {}: {e}", toml_path.display()),
                },
                Err(e) => log::warn!("Failed to read {}: {e}", toml_path.display()),
            }
        }

        config.apply_env(env)?;
        Ok(config)
    }

    fn apply_env(&mut self, env: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(endpoint) = env("AGENT_ENDPOINT") {
            self.agent_endpoint = endpoint;
        }
        if let Some(client_id) = env("CLIENT_ID") {
            self.client_id = client_id;
        }
        if let Some(client_secret) = env("CLIENT_SECRET") {
            self.client_secret = client_secret;
        }
        if let Some(token_url) = env("AURA_TOKEN_URL") {
            self.token_url = token_url;
        }
        if let Some(value) = env("AGENT_TIMEOUT_SECS") {
            self.agent_timeout_secs = parse_secs("AGENT_TIMEOUT_SECS", &value)?;
        }
        if let Some(value) = env("TOKEN_TIMEOUT_SECS") {
            self.token_timeout_secs = parse_secs("TOKEN_TIMEOUT_SECS", &value)?;
        }
        if let Some(value) = env("TOKEN_TTL_SECS") {
            self.token_ttl_secs = parse_secs("TOKEN_TTL_SECS", &value)?;
        }
        if let Some(http_proxy) = env("HTTP_PROXY") {
            self.http_proxy = http_proxy;
        }
        if let Some(https_proxy) = env("HTTPS_PROXY") {
            self.https_proxy = https_proxy;
        }

        let uri = env("NEO4J_URI");
        let username = env("NEO4J_USERNAME");
        let password = env("NEO4J_PASSWORD");
        let database = env("NEO4J_DATABASE");
        if uri.is_some() || username.is_some() || password.is_some() || database.is_some() {
            let graph = self.graph.get_or_insert_with(|| GraphConfig {
                uri: String::new(),
                username: String::new(),
                password: String::new(),
                database: None,
            });
            if let Some(uri) = uri {
                graph.uri = uri;
            }
            if let Some(username) = username {
                graph.username = username;
            }
            if let Some(password) = password {
                graph.password = password;
            }
            if database.is_some() {
                graph.database = database;
            }
        }
        Ok(())
    }

    /// Checks that every setting the agent conversation needs is present.
    pub fn require_agent(&self) -> Result<(), ConfigError> {
        let mut missing = Vec::new();
        if self.agent_endpoint.trim().is_empty() {
            missing.push("AGENT_ENDPOINT");
        }
        if self.client_id.trim().is_empty() {
            missing.push("CLIENT_ID");
        }
        if self.client_secret.trim().is_empty() {
            missing.push("CLIENT_SECRET");
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Missing(missing))
        }
    }

    pub fn graph(&self) -> Result<&GraphConfig, ConfigError> {
        let Some(graph) = self.graph.as_ref() else {
            return Err(ConfigError::Missing(vec![
                "NEO4J_URI",
                "NEO4J_USERNAME",
                "NEO4J_PASSWORD",
            ]));
        };
        let mut missing = Vec::new();
        if graph.uri.trim().is_empty() {
            missing.push("NEO4J_URI");
        }
        if graph.username.trim().is_empty() {
            missing.push("NEO4J_USERNAME");
        }
        if graph.password.is_empty() {
            missing.push("NEO4J_PASSWORD");
        }
        if missing.is_empty() {
            Ok(graph)
        } else {
            Err(ConfigError::Missing(missing))
        }
    }
}
