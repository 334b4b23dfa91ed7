//! Message module - Conversation messages and agent content blocks

mod content;
mod entry;

pub use content::ContentBlock;
pub use entry::{Message, Role};
