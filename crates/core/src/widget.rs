mod builder;
mod persistence;

use std::cell::RefCell;
use std::rc::Rc;

use popchat_model::{ChatRequest, Message, Role};

use crate::chat_client::ChatClient;
use crate::config::WidgetConfig;
use crate::conversation::Conversation;
use crate::render::Renderer;
use crate::resize::clamp_height;
use crate::store::{KeyValueStore, STORAGE_KEY};
use crate::view::{RenderedMessage, WidgetView};
pub use builder::ChatWidgetBuilder;

/// Text of the error turn shown when a request fails.
pub const ERROR_MESSAGE: &str =
    "Sorry, something went wrong. Please try again.";

/// Reply used when a successful response carries no reply text.
pub const NO_RESPONSE_PLACEHOLDER: &str = "(No response from API)";

struct WidgetState {
    config: RefCell<WidgetConfig>,
    conversation: RefCell<Conversation>,
    chat_client: ChatClient,
    renderer: Renderer,
    view: Box<dyn WidgetView>,
    store: Box<dyn KeyValueStore>,
}

/// A popup chat widget bound to one view.
///
/// The widget owns the conversation, keeps the view in sync with it,
/// persists it, and runs the request/response cycle with the endpoint.
/// It's a cheap handle: clones share the same state, which is how event
/// handlers get hold of it.
///
/// Everything runs on one thread. While a message is being sent the input
/// is disabled, and that is the only thing preventing a second request
/// from starting. Nothing cancels a request in flight: if the
/// conversation is cleared meanwhile, the reply still lands in it.
#[derive(Clone)]
pub struct ChatWidget {
    state: Rc<WidgetState>,
}

impl ChatWidget {
    fn from_builder(
        builder: ChatWidgetBuilder,
        view: Box<dyn WidgetView>,
    ) -> Self {
        let ChatWidgetBuilder {
            chat_client,
            config,
            store,
        } = builder;

        let state = WidgetState {
            config: RefCell::new(config),
            conversation: Default::default(),
            chat_client,
            renderer: Renderer::new(),
            view,
            store,
        };
        let widget = Self {
            state: Rc::new(state),
        };
        widget.initialize();
        widget
    }

    fn initialize(&self) {
        self.resize_input();
        self.insert_welcome_message();
        if self.load() {
            debug!(
                "restored {} messages",
                self.state.conversation.borrow().len()
            );
        }
        if self.state.config.borrow().opens_by_default() {
            self.toggle(Some(true));
        }
        info!("chat widget is ready");
    }

    /// Returns a copy of the full conversation.
    #[inline]
    pub fn conversation(&self) -> Vec<Message> {
        self.state.conversation.borrow().messages().to_vec()
    }

    /// Replaces the full conversation, redisplays it and persists it.
    pub fn set_conversation(&self, messages: Vec<Message>) {
        self.state.conversation.borrow_mut().replace(messages);
        self.state.view.clear_messages();
        self.display_conversation();
        self.save();
    }

    /// Changes the endpoint used by the following requests.
    #[inline]
    pub fn set_proxy_url<S: Into<String>>(&self, proxy_url: S) {
        self.state.config.borrow_mut().proxy_url = proxy_url.into();
    }

    /// Returns the key the conversation is persisted under.
    #[inline]
    pub fn storage_key(&self) -> &'static str {
        STORAGE_KEY
    }

    /// Returns a copy of the current configuration.
    #[inline]
    pub fn config(&self) -> WidgetConfig {
        self.state.config.borrow().clone()
    }

    /// Expands or collapses the popup.
    ///
    /// `None` flips the current state. The input gets the focus whenever
    /// the popup ends up expanded.
    pub fn toggle(&self, expanded: Option<bool>) {
        let view = &self.state.view;
        let expanded = expanded.unwrap_or_else(|| !view.is_expanded());
        view.set_expanded(expanded);
        if expanded {
            view.focus_input();
        }
    }

    /// Appends a message to the conversation and displays it.
    ///
    /// With `persist` set, the conversation is saved afterwards.
    pub fn add_message(&self, role: Role, content: &str, persist: bool) {
        self.state
            .conversation
            .borrow_mut()
            .push(Message::new(role, content));
        self.display_message(role, content);
        if persist {
            self.save();
        }
    }

    /// Shows or hides the typing indicator.
    ///
    /// Showing it twice still displays a single indicator.
    pub fn set_typing(&self, visible: bool) {
        let view = &self.state.view;
        if visible {
            if !view.has_typing_indicator() {
                view.insert_typing_indicator();
            }
        } else {
            view.remove_typing_indicator();
        }
        view.scroll_to_bottom();
    }

    /// Fits the input height to its content, between 2 and 10 lines.
    pub fn resize_input(&self) {
        let view = &self.state.view;
        if let Some(metrics) = view.measure_input() {
            view.set_input_height(clamp_height(&metrics));
        }
    }

    /// Sends the text of the input to the endpoint and displays the reply.
    ///
    /// Does nothing if the input is blank. Failures end up as an error
    /// turn in the conversation, never as an error returned to the caller.
    pub async fn submit(&self) {
        let view = &self.state.view;
        let input = view.input_value();
        let text = input.trim();
        if text.is_empty() {
            return;
        }

        view.set_input_enabled(false);
        self.add_message(Role::User, text, true);
        view.set_input_value("");
        self.resize_input();
        self.set_typing(true);

        let request = self.build_request();
        debug!("sending {} messages", request.messages.len());
        match self.state.chat_client.send_request(request).await {
            Ok(completion) => {
                let reply =
                    completion.reply_text().unwrap_or(NO_RESPONSE_PLACEHOLDER);
                self.add_message(Role::Assistant, reply, true);
            }
            Err(err) => {
                error!("failed to get a reply: {err}");
                self.add_message(Role::Error, ERROR_MESSAGE, false);
            }
        }

        self.set_typing(false);
        view.set_input_enabled(true);
        view.focus_input();
    }

    fn build_request(&self) -> ChatRequest {
        let config = self.state.config.borrow();
        let conversation = self.state.conversation.borrow();
        ChatRequest {
            endpoint: config.proxy_url.clone(),
            access_key: config.access_key.clone(),
            messages: conversation
                .tail(config.max_conversation_length)
                .to_vec(),
        }
    }

    fn insert_welcome_message(&self) {
        let welcome = self.state.config.borrow().welcome_message.clone();
        self.add_message(Role::Assistant, &welcome, false);
    }

    fn display_message(&self, role: Role, content: &str) {
        let html = self.state.renderer.render(role, content);
        self.state.view.append_message(RenderedMessage {
            role,
            content,
            html: &html,
        });
    }

    fn display_conversation(&self) {
        let conversation = self.state.conversation.borrow();
        for msg in conversation.messages() {
            self.display_message(msg.role, &msg.content);
        }
    }
}
