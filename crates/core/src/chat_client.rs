use std::pin::Pin;
use std::rc::Rc;

use popchat_model::{
    ChatCompletion, ChatProvider, ChatProviderError, ChatRequest,
};
use tracing::Instrument;

type SendRequestResult = Result<ChatCompletion, Box<dyn ChatProviderError>>;
type BoxedSendRequestFuture = Pin<Box<dyn Future<Output = SendRequestResult>>>;
type HandlerFn = Rc<dyn Fn(ChatRequest) -> BoxedSendRequestFuture>;

/// A wrapper around a chat provider that provides a type-erased interface
/// for the other modules.
#[derive(Clone)]
pub struct ChatClient {
    handler_fn: HandlerFn,
}

impl ChatClient {
    #[inline]
    pub fn new<P: ChatProvider + 'static>(provider: P) -> Self {
        // We have to erase the type `P`, since the widget is exported to
        // JavaScript and can't carry a generic parameter.
        let handler_fn: HandlerFn = Rc::new(move |req| {
            let fut = provider.send_request(&req);
            Box::pin(
                async move {
                    trace!("got a request: {:?}", req);
                    match fut.await {
                        Ok(completion) => {
                            trace!("finished a request");
                            Ok(completion)
                        }
                        Err(err) => {
                            debug!("got an error: {err:?}");
                            Err(Box::new(err) as Box<dyn ChatProviderError>)
                        }
                    }
                }
                .instrument(trace_span!("chat client req")),
            )
        });
        Self { handler_fn }
    }

    /// Sends a request and returns the completion.
    #[inline]
    pub async fn send_request(&self, req: ChatRequest) -> SendRequestResult {
        (self.handler_fn)(req).await
    }
}
