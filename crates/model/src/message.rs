use serde::{Deserialize, Serialize};

/// Who authored a message.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Text typed by the person using the widget.
    User,
    /// A reply from the endpoint, or the widget's welcome text.
    Assistant,
    /// A failure notice shown in place of a reply.
    ///
    /// Error turns live in the same sequence as the others, so they are
    /// also part of what gets sent with later requests.
    Error,
}

impl Role {
    /// Returns the wire name of the role.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::Error => "error",
        }
    }
}

/// A single turn in the conversation.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Message {
    /// The author of this message.
    pub role: Role,
    /// The raw text, Markdown for assistant turns.
    pub content: String,
}

impl Message {
    /// Creates a message with the given role.
    #[inline]
    pub fn new<S: Into<String>>(role: Role, content: S) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Creates a user message.
    #[inline]
    pub fn user<S: Into<String>>(content: S) -> Self {
        Self::new(Role::User, content)
    }

    /// Creates an assistant message.
    #[inline]
    pub fn assistant<S: Into<String>>(content: S) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Creates an error message.
    #[inline]
    pub fn error<S: Into<String>>(content: S) -> Self {
        Self::new(Role::Error, content)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_wire_format() {
        let messages = vec![
            Message::user("Hi"),
            Message::assistant("**Hello**"),
            Message::error("oops"),
        ];
        let value = serde_json::to_value(&messages).unwrap();
        assert_eq!(
            value,
            json!([
                { "role": "user", "content": "Hi" },
                { "role": "assistant", "content": "**Hello**" },
                { "role": "error", "content": "oops" },
            ])
        );
    }

    #[test]
    fn test_unknown_role() {
        let result = serde_json::from_str::<Message>(
            r#"{ "role": "system", "content": "x" }"#,
        );
        assert!(result.is_err());
    }
}
