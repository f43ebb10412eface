//! A local fake chat provider for testing purpose.

mod preset;

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::error::Error as StdError;
use std::fmt::{self, Debug, Display, Formatter};
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

use popchat_model::{
    ChatCompletion, ChatProvider, ChatProviderError, ChatRequest, ErrorKind,
};

pub use preset::*;

#[derive(Debug)]
pub struct Error {
    #[allow(dead_code)]
    message: &'static str,
    kind: ErrorKind,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(self, f)
    }
}

impl StdError for Error {}

impl ChatProviderError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

#[derive(Default)]
struct GateState {
    held: Cell<bool>,
    wakers: RefCell<Vec<Waker>>,
}

/// Holds back replies of a [`TestChatProvider`] until released.
#[derive(Clone)]
pub struct ReplyGate(Rc<GateState>);

impl ReplyGate {
    /// Lets every pending and future reply through.
    pub fn release(&self) {
        self.0.held.set(false);
        for waker in self.0.wakers.borrow_mut().drain(..) {
            waker.wake();
        }
    }
}

/// The future returned by [`TestChatProvider::send_request`].
pub struct TestReply {
    gate: Rc<GateState>,
    result: Option<Result<ChatCompletion, Error>>,
}

impl Future for TestReply {
    type Output = Result<ChatCompletion, Error>;

    fn poll(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Self::Output> {
        if self.gate.held.get() {
            self.gate.wakers.borrow_mut().push(cx.waker().clone());
            return Poll::Pending;
        }
        match self.result.take() {
            Some(result) => Poll::Ready(result),
            None => panic!("`TestReply` polled after completion"),
        }
    }
}

/// A local fake chat provider for testing purpose.
///
/// Replies are taken from a script in the order they were added, one per
/// request. When the script runs out, requests fail with a status error.
/// Every request is recorded and can be inspected afterwards.
///
/// Clones share the same script and records, so a test can keep one clone
/// while the widget owns another.
#[derive(Clone, Default)]
pub struct TestChatProvider {
    script: Rc<RefCell<VecDeque<PresetReply>>>,
    requests: Rc<RefCell<Vec<ChatRequest>>>,
    gate: Rc<GateState>,
}

impl TestChatProvider {
    /// Appends a reply to the script.
    #[inline]
    pub fn add_reply(&self, reply: PresetReply) {
        self.script.borrow_mut().push_back(reply);
    }

    /// Returns all the requests received so far.
    #[inline]
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.borrow().clone()
    }

    /// Returns the last request received, if any.
    #[inline]
    pub fn last_request(&self) -> Option<ChatRequest> {
        self.requests.borrow().last().cloned()
    }

    /// Makes replies stay pending until the returned gate is released.
    pub fn hold_replies(&self) -> ReplyGate {
        self.gate.held.set(true);
        ReplyGate(Rc::clone(&self.gate))
    }
}

impl ChatProvider for TestChatProvider {
    type Error = crate::Error;

    fn send_request(
        &self,
        req: &ChatRequest,
    ) -> impl Future<Output = Result<ChatCompletion, Self::Error>> + 'static
    {
        self.requests.borrow_mut().push(req.clone());
        let result = match self.script.borrow_mut().pop_front() {
            Some(reply) => reply.resolve().map_err(|kind| Error {
                message: "preset failure",
                kind,
            }),
            None => Err(Error {
                message: "no enough replies",
                kind: ErrorKind::Status,
            }),
        };
        TestReply {
            gate: Rc::clone(&self.gate),
            result: Some(result),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::future::poll_fn;
    use std::pin::pin;

    use popchat_model::Message;

    use super::*;

    fn request(content: &str) -> ChatRequest {
        ChatRequest {
            endpoint: "/api/chat".to_owned(),
            access_key: None,
            messages: vec![Message::user(content)],
        }
    }

    #[tokio::test]
    async fn test_send_request() {
        let provider = TestChatProvider::default();
        provider.add_reply(PresetReply::content("Hello, world!"));
        provider.add_reply(PresetReply::Failure(PresetFailure::Transport));

        let completion = provider.send_request(&request("Hi")).await.unwrap();
        assert_eq!(completion.reply_text(), Some("Hello, world!"));

        let err = provider.send_request(&request("Again")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);

        // The script is exhausted now.
        let err = provider.send_request(&request("More")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Status);

        let requests = provider.requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[1].messages, vec![Message::user("Again")]);
    }

    #[tokio::test]
    async fn test_hold_replies() {
        let provider = TestChatProvider::default();
        provider.add_reply(PresetReply::content("Later"));
        let gate = provider.hold_replies();

        let mut reply = pin!(provider.send_request(&request("Hi")));
        let polled = poll_fn(|cx| Poll::Ready(reply.as_mut().poll(cx))).await;
        assert!(polled.is_pending());

        gate.release();
        let completion = reply.await.unwrap();
        assert_eq!(completion.reply_text(), Some("Later"));
    }
}
