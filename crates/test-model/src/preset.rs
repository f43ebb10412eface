use popchat_model::{ChatCompletion, ErrorKind};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// How the test provider answers one request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PresetReply {
    /// A well-formed completion with the given reply text.
    #[serde(rename = "content")]
    Content(String),
    /// A successful response with an arbitrary JSON body.
    #[serde(rename = "body")]
    Body(Value),
    /// A failed request of the given kind.
    #[serde(rename = "failure")]
    Failure(PresetFailure),
}

/// Failures that a preset can simulate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresetFailure {
    /// The endpoint answered with a non-success status.
    Status,
    /// The request was rejected before any answer.
    Transport,
}

impl PresetReply {
    /// Creates a well-formed reply with the given text.
    #[inline]
    pub fn content<S: Into<String>>(content: S) -> Self {
        Self::Content(content.into())
    }

    pub(crate) fn resolve(&self) -> Result<ChatCompletion, ErrorKind> {
        match self {
            PresetReply::Content(content) => Ok(ChatCompletion(json!({
                "choices": [{
                    "index": 0,
                    "message": { "role": "assistant", "content": content },
                    "finish_reason": "stop",
                }]
            }))),
            PresetReply::Body(body) => Ok(ChatCompletion(body.clone())),
            PresetReply::Failure(PresetFailure::Status) => {
                Err(ErrorKind::Status)
            }
            PresetReply::Failure(PresetFailure::Transport) => {
                Err(ErrorKind::Transport)
            }
        }
    }
}
