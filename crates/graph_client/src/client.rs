use std::{sync::Arc, time::Duration};

use chat_core::GraphConfig;
use log::{debug, error, info};
use reqwest::StatusCode;
use reqwest_middleware::ClientWithMiddleware;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{GraphError, GraphResult};

const DEFAULT_TIMEOUT_SECS: u64 = 60;
const PLAIN_HTTP_PORT: u16 = 7474;

/// One result row: column name to value.
pub type Record = Map<String, Value>;

/// Materialized result of one statement. `fields` keeps the column order,
/// which `Record` does not.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    pub fields: Vec<String>,
    pub rows: Vec<Record>,
}

impl QueryResult {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Row values in column order, for tabular rendering.
    pub fn ordered_row(&self, row: &Record) -> Vec<Value> {
        self.fields
            .iter()
            .map(|f| row.get(f).cloned().unwrap_or(Value::Null))
            .collect()
    }
}

#[derive(Debug, Serialize)]
struct QueryRequest<'a> {
    statement: &'a str,
    parameters: &'a Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    data: Option<QueryData>,
    #[serde(default)]
    errors: Vec<ServerError>,
}

#[derive(Debug, Deserialize)]
struct QueryData {
    #[serde(default)]
    fields: Vec<String>,
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct ServerError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

/// Turns a driver-style URI (`neo4j+s://host`, `bolt://host:7687`) into the
/// base URL of the HTTP query API. `http(s)://` URIs are used as given.
pub fn query_base_url(uri: &str) -> GraphResult<String> {
    let uri = uri.trim().trim_end_matches('/');
    let Some((scheme, rest)) = uri.split_once("://") else {
        return Err(GraphError::InvalidUri(uri.to_string()));
    };
    let authority = rest.split('/').next().unwrap_or_default();
    if authority.is_empty() {
        return Err(GraphError::InvalidUri(uri.to_string()));
    }
    let host = authority
        .rsplit_once(':')
        .map_or(authority, |(host, _port)| host);

    match scheme {
        "http" | "https" => Ok(uri.to_string()),
        "neo4j+s" | "neo4j+ssc" | "bolt+s" | "bolt+ssc" => Ok(format!("https://{host}")),
        "neo4j" | "bolt" => Ok(format!("http://{host}:{PLAIN_HTTP_PORT}")),
        _ => Err(GraphError::InvalidUri(uri.to_string())),
    }
}

#[derive(Debug, Clone)]
pub struct GraphClient {
    client: Arc<ClientWithMiddleware>,
    base_url: String,
    username: String,
    password: String,
    default_database: String,
    timeout: Duration,
}

impl GraphClient {
    pub fn new(client: Arc<ClientWithMiddleware>, config: &GraphConfig) -> GraphResult<Self> {
        Ok(GraphClient {
            client,
            base_url: query_base_url(&config.uri)?,
            username: config.username.clone(),
            password: config.password.clone(),
            default_database: config.database().to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Opens a session on `database`, or on the configured default.
    pub fn session(&self, database: Option<&str>) -> GraphSession<'_> {
        let database = database
            .filter(|db| !db.trim().is_empty())
            .unwrap_or(&self.default_database)
            .to_string();
        debug!("Opened graph session on {database}");
        GraphSession {
            client: self,
            database,
        }
    }

    /// Convenience for a single statement in a throwaway session.
    pub async fn query(
        &self,
        statement: &str,
        parameters: &Map<String, Value>,
    ) -> GraphResult<QueryResult> {
        self.session(None).run(statement, parameters).await
    }
}

/// A session bound to one database. The query API is stateless, so releasing
/// the session is just dropping it.
#[derive(Debug)]
pub struct GraphSession<'a> {
    client: &'a GraphClient,
    database: String,
}

impl GraphSession<'_> {
    pub fn database(&self) -> &str {
        &self.database
    }

    /// Runs one parameterized statement and materializes every row.
    pub async fn run(
        &self,
        statement: &str,
        parameters: &Map<String, Value>,
    ) -> GraphResult<QueryResult> {
        let url = format!("{}/db/{}/query/v2", self.client.base_url, self.database);
        info!(
            "Running graph statement on {} with {} parameter(s)",
            self.database,
            parameters.len()
        );

        let response = self
            .client
            .client
            .post(&url)
            .basic_auth(&self.client.username, Some(&self.client.password))
            .header("Accept", "application/json")
            .json(&QueryRequest {
                statement,
                parameters,
            })
            .timeout(self.client.timeout)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                GraphError::Timeout
            } else {
                GraphError::Transport(e.to_string())
            }
        })?;

        if status == StatusCode::UNAUTHORIZED {
            return Err(GraphError::Unauthorized);
        }

        let parsed = serde_json::from_str::<QueryResponse>(&body);
        if let Ok(QueryResponse { errors, .. }) = &parsed {
            if let Some(first) = errors.first() {
                error!("Graph query failed: {} {}", first.code, first.message);
                return Err(GraphError::Query {
                    code: first.code.clone(),
                    message: first.message.clone(),
                });
            }
        }

        if !status.is_success() {
            return Err(GraphError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let data = parsed
            .map_err(|e| GraphError::Decode(e.to_string()))?
            .data
            .ok_or_else(|| GraphError::Decode("response has no data".to_string()))?;

        Ok(materialize(data))
    }
}

impl Drop for GraphSession<'_> {
    fn drop(&mut self) {
        debug!("Released graph session on {}", self.database);
    }
}

fn materialize(data: QueryData) -> QueryResult {
    let rows = data
        .values
        .into_iter()
        .map(|values| {
            data.fields
                .iter()
                .cloned()
                .zip(values.into_iter().chain(std::iter::repeat(Value::Null)))
                .collect::<Record>()
        })
        .collect();
    QueryResult {
        fields: data.fields,
        rows,
    }
}

fn transport_error(err: reqwest_middleware::Error) -> GraphError {
    match err {
        reqwest_middleware::Error::Reqwest(e) if e.is_timeout() => GraphError::Timeout,
        other => GraphError::Transport(other.to_string()),
    }
}
