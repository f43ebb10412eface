//! An embeddable popup chat widget.
//!
//! Built for `wasm32` with the `web` feature, the crate exports a single
//! `ChatWidget` JavaScript class that binds to a container element of the
//! host page. The `cli` feature provides a terminal front end driving the
//! same widget logic, which is handy for trying out an endpoint.

#![deny(missing_docs)]

#[allow(unused_imports)]
#[macro_use]
extern crate tracing;

#[cfg(feature = "cli")]
pub mod file_store;
#[cfg(feature = "cli")]
pub mod terminal;
#[cfg(feature = "web")]
pub mod web;

pub use popchat_core::model::{Message, Role};
pub use popchat_core::{
    ChatWidget, ChatWidgetBuilder, KeyValueStore, MemoryStore, WidgetConfig,
    WidgetConfigBuilder, WidgetView,
};
pub use popchat_proxy_client::{ProxyProvider, Url};
