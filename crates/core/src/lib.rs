//! Core logic of the chat widget: conversation, persistence, rendering and
//! the request/response cycle.
//!
//! Nothing in this crate touches the DOM. The page is reached through the
//! [`WidgetView`] and [`KeyValueStore`] traits, and the endpoint through a
//! [`ChatProvider`](popchat_model::ChatProvider).

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

mod chat_client;
pub mod config;
pub mod conversation;
pub mod render;
pub mod resize;
pub mod store;
pub mod view;
mod widget;

pub use config::{ConfigError, WidgetConfig, WidgetConfigBuilder};
pub use store::{KeyValueStore, MemoryStore, STORAGE_KEY, StoreError};
pub use view::{RenderedMessage, WidgetView, is_submit_key};
pub use widget::{
    ChatWidget, ChatWidgetBuilder, ERROR_MESSAGE, NO_RESPONSE_PLACEHOLDER,
};

/// Re-exports of [`popchat_model`] crate.
pub mod model {
    pub use popchat_model::*;
}
