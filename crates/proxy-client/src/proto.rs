use popchat_model::{ChatRequest, Message};
use serde::Serialize;

// ------------------------
// Types sent to the server
// ------------------------

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ChatCompletionRequest<'a> {
    messages: &'a [Message],
}

// -----------
// Conversions
// -----------

#[inline]
pub fn create_request(req: &ChatRequest) -> ChatCompletionRequest<'_> {
    ChatCompletionRequest {
        messages: &req.messages,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_create_request() {
        let request = ChatRequest {
            endpoint: "/api/chat".to_owned(),
            access_key: Some("secret".to_owned()),
            messages: vec![
                Message::assistant("Hello! How can I help you today?"),
                Message::user("Hi"),
                Message::error("Sorry, something went wrong."),
            ],
        };
        let body = serde_json::to_value(create_request(&request)).unwrap();
        // Nothing but the messages goes into the body.
        assert_eq!(
            body,
            json!({
                "messages": [
                    {
                        "role": "assistant",
                        "content": "Hello! How can I help you today?"
                    },
                    { "role": "user", "content": "Hi" },
                    {
                        "role": "error",
                        "content": "Sorry, something went wrong."
                    },
                ]
            })
        );
    }
}
