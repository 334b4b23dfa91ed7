//! ContentBlock - typed blocks found in agent responses
//!
//! The hosted agent may answer with `{"content": [{"type": "text", "text": ...}, ...]}`.
//! Only text blocks carry an answer; every other block type is kept as `Other`.

use serde::{Deserialize, Serialize};

/// A typed block of agent response content
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// Text content
    Text { text: String },

    /// Any other block type (tool use, thinking, ...)
    #[serde(other)]
    Other,
}

impl ContentBlock {
    /// Parse a single block, treating malformed blocks as `Other`
    pub fn from_value(value: &serde_json::Value) -> Self {
        serde_json::from_value(value.clone()).unwrap_or(Self::Other)
    }

    /// Get text content if this is a text block
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text } => Some(text),
            Self::Other => None,
        }
    }
}
