use std::fmt::{self, Debug};

use crate::Message;

/// A request to be sent to the chat endpoint.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ChatRequest {
    /// Where to send the request. May be relative, providers decide how
    /// to resolve it.
    pub endpoint: String,
    /// Bearer credential, if one is configured.
    pub access_key: Option<String>,
    /// The messages to transmit, already truncated by the caller.
    pub messages: Vec<Message>,
}

impl Debug for ChatRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatRequest")
            .field("endpoint", &self.endpoint)
            .field(
                "access_key",
                &self.access_key.as_ref().map(|_| "<redacted>"),
            )
            .field("messages", &self.messages)
            .finish()
    }
}
