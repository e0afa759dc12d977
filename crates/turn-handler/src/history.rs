//! Append-only conversation history for one session

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

/// Ordered user/assistant turns. Append-only: turns are never edited or
/// removed, so the history doubles as the de-duplication guard that keeps
/// the engine from re-asking filled fields.
#[derive(Debug, Default)]
pub struct ConversationHistory {
    turns: Vec<Turn>,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_user(&mut self, text: impl Into<String>) {
        self.turns.push(Turn {
            role: Role::User,
            text: text.into(),
        });
    }

    pub fn push_assistant(&mut self, text: impl Into<String>) {
        self.turns.push(Turn {
            role: Role::Assistant,
            text: text.into(),
        });
    }

    /// Most recent assistant message, used as context when a short answer
    /// ("yes") only makes sense against the question that prompted it.
    pub fn last_assistant(&self) -> Option<&str> {
        self.turns
            .iter()
            .rev()
            .find(|turn| turn.role == Role::Assistant)
            .map(|turn| turn.text.as_str())
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Rendered transcript for prompts and logs.
    pub fn transcript(&self) -> String {
        if self.turns.is_empty() {
            return "No previous conversation.".to_string();
        }
        self.turns
            .iter()
            .map(|turn| match turn.role {
                Role::User => format!("User: {}", turn.text),
                Role::Assistant => format!("Assistant: {}", turn.text),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_assistant_skips_trailing_user_turns() {
        let mut history = ConversationHistory::new();
        assert_eq!(history.last_assistant(), None);

        history.push_user("hi");
        history.push_assistant("What's your full name?");
        history.push_user("Alex");
        assert_eq!(history.last_assistant(), Some("What's your full name?"));
    }

    #[test]
    fn transcript_renders_roles_in_order() {
        let mut history = ConversationHistory::new();
        assert_eq!(history.transcript(), "No previous conversation.");

        history.push_user("hi");
        history.push_assistant("hello");
        assert_eq!(history.transcript(), "User: hi\nAssistant: hello");
    }
}
