use popchat_model::ChatProvider;

use super::ChatWidget;
use crate::chat_client::ChatClient;
use crate::config::WidgetConfig;
use crate::store::{KeyValueStore, MemoryStore};
use crate::view::WidgetView;

/// [`ChatWidget`] builder.
pub struct ChatWidgetBuilder {
    pub(crate) chat_client: ChatClient,
    pub(crate) config: WidgetConfig,
    pub(crate) store: Box<dyn KeyValueStore>,
}

impl ChatWidgetBuilder {
    /// Creates a new builder with the specified chat provider.
    ///
    /// Until configured otherwise, the widget uses the default options
    /// and keeps its conversation in memory only.
    #[inline]
    pub fn with_chat_provider<P: ChatProvider + 'static>(provider: P) -> Self {
        Self {
            chat_client: ChatClient::new(provider),
            config: WidgetConfig::default(),
            store: Box::new(MemoryStore::new()),
        }
    }

    /// Sets the widget configuration.
    #[inline]
    pub fn with_config(mut self, config: WidgetConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the store the conversation is persisted to.
    #[inline]
    pub fn with_store<S: KeyValueStore + 'static>(mut self, store: S) -> Self {
        self.store = Box::new(store);
        self
    }

    /// Builds the widget and initializes the view.
    ///
    /// The welcome message is displayed, a previously stored conversation
    /// is restored, and the popup is expanded if the configuration asks
    /// for it.
    #[inline]
    pub fn build<V: WidgetView + 'static>(self, view: V) -> ChatWidget {
        ChatWidget::from_builder(self, Box::new(view))
    }
}
