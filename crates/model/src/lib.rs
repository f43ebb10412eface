//! Protocol types shared by the chat widget and its backends.
//!
//! This crate describes what travels between the widget and a
//! chat-completion endpoint: the conversation messages, the request the
//! widget hands to a provider, and the completion the provider returns.
//!
//! Types in this crate don't define any behavior, instead they are the
//! constraints that provider implementors should adhere to. The HTTP
//! transport lives in its own crate, and so does the scripted provider
//! used by tests.

#![deny(missing_docs)]

mod error;
mod message;
mod provider;
mod request;
mod response;

pub use error::*;
pub use message::*;
pub use provider::*;
pub use request::*;
pub use response::*;
