use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Body of an agent invocation. The agent is stateless, so only the latest
/// question is sent, never the transcript.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgentRequest {
    pub input: String,
}

impl AgentRequest {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            input: question.into(),
        }
    }
}

/// OAuth2 token endpoint response
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: Option<String>,
    #[allow(dead_code)]
    pub token_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_secs")]
    pub expires_in: Option<u64>,
}

/// Accepts `3600`, `3600.0` or `"3600"`; anything else is treated as absent.
fn lenient_secs<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(secs_from_value))
}

fn secs_from_value(value: &Value) -> Option<u64> {
    let secs = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    (secs.is_finite() && secs >= 0.0).then(|| secs as u64)
}
