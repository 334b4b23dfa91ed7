//! chat_core - Core types for the archives agent chat
//!
//! This crate provides the foundational types shared by the client crates and the CLI:
//! - `config` - Config loading (file + environment) and validation
//! - `paths` - Application directory layout
//! - `message` - Roles, messages and agent content blocks
//! - `transcript` - The session-scoped conversation log
//! - `prompts` - The catalogue of canned questions

pub mod config;
pub mod message;
pub mod paths;
pub mod prompts;
pub mod transcript;

// Re-export commonly used types
pub use config::{Config, ConfigError, GraphConfig, ProxyAuth};
pub use message::{ContentBlock, Message, Role};
pub use prompts::{CannedPrompt, PromptCategory, Selection, CATALOGUE};
pub use transcript::Transcript;
