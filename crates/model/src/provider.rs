use std::error::Error;

use crate::error::ErrorKind;
use crate::request::ChatRequest;
use crate::response::ChatCompletion;

/// The error type for a chat provider.
pub trait ChatProviderError: Error + 'static {
    /// Returns the kind of this error.
    fn kind(&self) -> ErrorKind;
}

/// A type that can deliver a conversation to a chat endpoint and bring
/// back its completion.
///
/// Once the provider is created, it should behave like a stateless object.
/// It can still have internal state, but callers should not rely on it.
///
/// The returned future is not required to be `Send`: the widget runs on
/// the single-threaded browser event loop, where HTTP futures can't be
/// moved across threads anyway.
pub trait ChatProvider {
    /// The error type that may be returned by the provider.
    type Error: ChatProviderError;

    /// Sends a request to the endpoint.
    ///
    /// Implementations must treat a non-success status as an error
    /// without looking at the body.
    fn send_request(
        &self,
        req: &ChatRequest,
    ) -> impl Future<Output = Result<ChatCompletion, Self::Error>> + 'static;
}
