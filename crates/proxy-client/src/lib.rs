//! A chat provider that talks to a proxy endpoint over HTTP.
//!
//! The endpoint is expected to accept `{"messages": [...]}` and answer with
//! a chat-completion body. Authentication is limited to an optional static
//! bearer token.

#[macro_use]
extern crate tracing;

mod proto;

use std::error::Error as StdError;
use std::fmt::{self, Display};

use popchat_model::{
    ChatCompletion, ChatProvider, ChatProviderError, ChatRequest, ErrorKind,
};
pub use reqwest::Url;
use reqwest::{Client, Response, header};
use serde_json::Value;

/// Error type for [`ProxyProvider`].
#[derive(Debug)]
pub struct Error {
    message: String,
    kind: ErrorKind,
}

impl Error {
    fn new(message: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }

    /// Returns the error message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl StdError for Error {}

impl ChatProviderError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

/// HTTP chat provider.
///
/// Relative endpoints (like the default `/api/chat`) are resolved against
/// the base URL, which is usually the location of the hosting page.
#[derive(Clone, Debug, Default)]
pub struct ProxyProvider {
    client: Client,
    base_url: Option<Url>,
}

impl ProxyProvider {
    /// Creates a new `ProxyProvider` without a base URL.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the URL that relative endpoints are resolved against.
    #[inline]
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = Some(base_url);
        self
    }

    fn resolve_endpoint(&self, endpoint: &str) -> Result<Url, Error> {
        let resolved = match &self.base_url {
            Some(base_url) => base_url.join(endpoint),
            None => Url::parse(endpoint),
        };
        resolved.map_err(|err| {
            Error::new(
                format!("Invalid endpoint {endpoint:?}: {err}"),
                ErrorKind::Transport,
            )
        })
    }
}

impl ChatProvider for ProxyProvider {
    type Error = Error;

    fn send_request(
        &self,
        req: &ChatRequest,
    ) -> impl Future<Output = Result<ChatCompletion, Self::Error>> + 'static
    {
        let resp_fut = self.resolve_endpoint(&req.endpoint).map(|url| {
            debug!("posting {} messages to {url}", req.messages.len());
            let mut builder = self
                .client
                .post(url)
                .header(
                    header::CONTENT_TYPE,
                    mime::APPLICATION_JSON.as_ref(),
                )
                .json(&proto::create_request(req));
            if let Some(access_key) = req.access_key.as_deref() {
                builder = builder.header(
                    header::AUTHORIZATION,
                    format!("Bearer {access_key}"),
                );
            }
            builder.send()
        });

        async move {
            let resp = match resp_fut?.await.and_then(Response::error_for_status)
            {
                Ok(resp) => resp,
                Err(err) => {
                    // The body of a failed response is never looked at.
                    let kind = if err.is_status() {
                        ErrorKind::Status
                    } else {
                        ErrorKind::Transport
                    };
                    return Err(Error::new(format!("{err}"), kind));
                }
            };

            let body = resp.json::<Value>().await.map_err(|err| {
                Error::new(format!("{err}"), ErrorKind::InvalidBody)
            })?;
            trace!("got completion: {body}");
            Ok(ChatCompletion(body))
        }
    }
}

#[cfg(test)]
mod tests;
