//! Transcript - the session-scoped conversation log
//!
//! Entries are kept in append order and rendered top to bottom. The transcript
//! is never persisted; dropping it ends the conversation.

use crate::message::{Message, Role};

#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message. Role alternation is not enforced.
    pub fn append(&mut self, role: Role, content: impl Into<String>) -> &Message {
        self.messages.push(Message::new(role, content));
        &self.messages[self.messages.len() - 1]
    }

    pub fn all(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Remove every message.
    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(transcript: &Transcript) -> Vec<(Role, &str)> {
        transcript
            .all()
            .iter()
            .map(|m| (m.role, m.content.as_str()))
            .collect()
    }

    #[test]
    fn append_keeps_insertion_order() {
        let mut transcript = Transcript::new();
        transcript.append(Role::User, "hi");
        transcript.append(Role::Assistant, "hello");

        assert_eq!(
            pairs(&transcript),
            vec![(Role::User, "hi"), (Role::Assistant, "hello")]
        );
        assert_eq!(transcript.last().map(|m| m.content.as_str()), Some("hello"));
    }

    #[test]
    fn clear_removes_everything() {
        let mut transcript = Transcript::new();
        transcript.append(Role::User, "hi");
        transcript.append(Role::Assistant, "hello");
        transcript.clear();

        assert!(transcript.all().is_empty());
        assert!(transcript.is_empty());
        assert_eq!(transcript.len(), 0);
    }

    #[test]
    fn repeated_roles_are_accepted() {
        let mut transcript = Transcript::new();
        transcript.append(Role::User, "first");
        transcript.append(Role::User, "second");
        transcript.append(Role::Assistant, "only answer");
        transcript.append(Role::Assistant, "another");

        assert_eq!(transcript.len(), 4);
    }
}
