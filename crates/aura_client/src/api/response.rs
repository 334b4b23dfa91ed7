//! Answer extraction for agent responses.
//!
//! The agent's response envelope has changed over time, so no single schema is
//! assumed. The fallback order is:
//! 1. the last `{"type": "text"}` block of a `content` list
//! 2. `output`
//! 3. `response`
//! 4. `result`
//! 5. [`UNRECOGNIZED_RESPONSE`]

use chat_core::ContentBlock;
use log::warn;
use serde_json::Value;

pub const UNRECOGNIZED_RESPONSE: &str = "⚠️ Unrecognized response format from the agent.";

const FLAT_FIELDS: [&str; 3] = ["output", "response", "result"];

/// Extract a displayable answer from a JSON body. Never fails.
pub fn extract_answer(body: &Value) -> String {
    if let Some(text) = last_text_block(body) {
        return text;
    }

    for field in FLAT_FIELDS {
        if let Some(answer) = body.get(field).and_then(non_empty_text) {
            return answer;
        }
    }

    warn!("Unrecognized agent response shape: {}", preview(body));
    UNRECOGNIZED_RESPONSE.to_string()
}

/// Same as [`extract_answer`] for a raw body that may not even be JSON.
pub fn extract_answer_from_text(raw: &str) -> String {
    match serde_json::from_str::<Value>(raw) {
        Ok(body) => extract_answer(&body),
        Err(e) => {
            warn!("Agent response is not JSON: {e}");
            UNRECOGNIZED_RESPONSE.to_string()
        }
    }
}

fn last_text_block(body: &Value) -> Option<String> {
    body.get("content")?
        .as_array()?
        .iter()
        .rev()
        .map(ContentBlock::from_value)
        .find_map(|block| block.as_text().map(str::to_string))
}

/// Falsy values (`null`, `false`, zero, empty string, list or object) count as
/// absent, so the next field is tried.
fn non_empty_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Array(items) if items.is_empty() => None,
        Value::Object(map) if map.is_empty() => None,
        other => Some(other.to_string()),
    }
}

fn preview(body: &Value) -> String {
    crate::error::truncate_chars(&body.to_string(), crate::error::ERROR_BODY_LIMIT)
}
