use crate::models::message::Message;

/// Chronological, append-only record of a conversation.
#[derive(Debug, Clone, Default)]
pub struct ConversationHistory {
    messages: Vec<Message>,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message and return a reference to the stored copy
    pub fn add_message(&mut self, message: Message) -> &Message {
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }

    pub fn add_user_message(&mut self, content: &str) -> &Message {
        self.add_message(Message::user(content))
    }

    pub fn add_assistant_message(&mut self, content: &str) -> &Message {
        self.add_message(Message::assistant(content))
    }

    pub fn messages(&self) -> &[Message] {
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::message::Role;

    #[test]
    fn test_messages_keep_insertion_order() {
        let mut history = ConversationHistory::new();
        assert!(history.is_empty());

        history.add_message(Message::system("be nice"));
        history.add_user_message("hello");
        history.add_assistant_message("hi there");

        let roles: Vec<Role> = history.messages().iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::System, Role::User, Role::Assistant]);
        assert_eq!(history.len(), 3);
        assert_eq!(history.last().map(Message::text), Some("hi there"));
    }

    #[test]
    fn test_add_returns_stored_message() {
        let mut history = ConversationHistory::new();
        let id = history.add_user_message("ping").id.clone();
        assert_eq!(history.messages()[0].id, id);
    }
}
