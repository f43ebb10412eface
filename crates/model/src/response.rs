use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A parsed JSON body returned by the chat endpoint.
///
/// The body is kept as-is, since any shape is acceptable: a body that
/// doesn't carry a reply at `choices[0].message.content` is still a
/// successful response, just an empty one.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatCompletion(pub Value);

impl ChatCompletion {
    /// Returns the reply text, if the body contains a non-empty one.
    pub fn reply_text(&self) -> Option<&str> {
        self.0
            .pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }
}

impl From<Value> for ChatCompletion {
    #[inline]
    fn from(value: Value) -> Self {
        Self(value)
    }
}
