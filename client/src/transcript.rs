use crate::models::Source;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Assistant,
}

pub type MessageId = Uuid;

/// One transcript entry. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub id: MessageId,
    pub text: String,
    pub sender: Sender,
    pub is_loading: bool,
    pub sources: Option<Vec<Source>>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(text, Sender::User, false, None)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(text, Sender::Assistant, false, None)
    }

    pub fn loading(text: impl Into<String>) -> Self {
        Self::new(text, Sender::Assistant, true, None)
    }

    pub fn with_sources(mut self, sources: Vec<Source>) -> Self {
        self.sources = Some(sources);
        self
    }

    fn new(text: impl Into<String>, sender: Sender, is_loading: bool, sources: Option<Vec<Source>>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            sender,
            is_loading,
            sources,
        }
    }
}

/// In-memory chat log plus the welcome placeholder shown before the first message.
#[derive(Debug, Clone)]
pub struct Transcript {
    welcome_visible: bool,
    messages: Vec<ChatMessage>,
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

impl Transcript {
    pub fn new() -> Self {
        Self {
            welcome_visible: true,
            messages: Vec::new(),
        }
    }

    pub fn welcome_visible(&self) -> bool {
        self.welcome_visible
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Appends `message`. Returns true when this dismissed the welcome placeholder.
    pub fn push(&mut self, message: ChatMessage) -> bool {
        let dismissed = std::mem::replace(&mut self.welcome_visible, false);
        self.messages.push(message);
        dismissed
    }

    pub fn remove(&mut self, id: MessageId) -> Option<ChatMessage> {
        let index = self.messages.iter().position(|m| m.id == id)?;
        Some(self.messages.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_push_dismisses_welcome() {
        let mut transcript = Transcript::new();
        assert!(transcript.welcome_visible());

        assert!(transcript.push(ChatMessage::user("привет")));
        assert!(!transcript.welcome_visible());
        assert!(!transcript.push(ChatMessage::assistant("здравствуйте")));
        assert_eq!(transcript.messages().len(), 2);
    }

    #[test]
    fn remove_drops_only_that_message() {
        let mut transcript = Transcript::new();
        transcript.push(ChatMessage::user("q"));
        let placeholder = ChatMessage::loading("Думаю...");
        let id = placeholder.id;
        transcript.push(placeholder);

        let removed = transcript.remove(id).unwrap();
        assert!(removed.is_loading);
        assert_eq!(transcript.messages().len(), 1);
        assert!(transcript.remove(id).is_none());
    }
}
