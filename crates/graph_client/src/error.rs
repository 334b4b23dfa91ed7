use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("invalid graph database URI: {0}")]
    InvalidUri(String),

    #[error("graph database rejected the credentials")]
    Unauthorized,

    #[error("query failed ({code}): {message}")]
    Query { code: String, message: String },

    #[error("graph database returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("graph request timed out")]
    Timeout,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("unexpected response: {0}")]
    Decode(String),

    #[error("unknown query template: {0}")]
    UnknownTemplate(String),

    #[error("missing query parameter: ${0}")]
    MissingParameter(String),

    #[error("invalid parameter '{0}', expected key=value")]
    InvalidParameter(String),
}

pub type GraphResult<T> = std::result::Result<T, GraphError>;
