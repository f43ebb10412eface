//! The JavaScript export of the widget.
//!
//! ```js
//! import init, { ChatWidget } from "./popchat.js";
//!
//! await init();
//! const widget = new ChatWidget("support-chat", {
//!   proxyUrl: "/api/chat",
//!   openByDefault: "true",
//! });
//! ```

mod dom;
mod storage;

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::{self, Display};
use std::rc::Rc;

use popchat_core::model::Message;
use popchat_core::{
    ChatWidget, ChatWidgetBuilder, ConfigError, STORAGE_KEY, WidgetConfig,
    is_submit_key,
};
use popchat_proxy_client::{ProxyProvider, Url};
use serde_json::Value;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_web::MakeWebConsoleWriter;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{future_to_promise, spawn_local};
use web_sys::{Event, EventTarget, KeyboardEvent};

use self::dom::{DomView, Elements};
use self::storage::SessionStore;

/// Sends log records to the browser console. Runs when the module loads.
#[wasm_bindgen(start)]
pub fn start() {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_writer(MakeWebConsoleWriter::new());
    let result = tracing_subscriber::registry()
        .with(LevelFilter::INFO)
        .with(fmt_layer)
        .try_init();
    if result.is_err() {
        warn!("a global subscriber is already installed");
    }
}

#[derive(Debug)]
enum MountError {
    NoWindow,
    ContainerNotFound(String),
    InvalidOptions(String),
}

impl Display for MountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoWindow => write!(f, "no window or document to mount on"),
            Self::ContainerNotFound(id) => {
                write!(f, "no element with id `{id}`")
            }
            Self::InvalidOptions(reason) => {
                write!(f, "invalid options: {reason}")
            }
        }
    }
}

impl From<ConfigError> for MountError {
    fn from(err: ConfigError) -> Self {
        Self::InvalidOptions(err.message().to_owned())
    }
}

/// Removes its event listener when dropped.
///
/// Dropped only when its container is mounted again.
struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn new<F>(target: &EventTarget, event: &'static str, f: F) -> Option<Self>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::<dyn FnMut(Event)>::new(f);
        let result = target.add_event_listener_with_callback(
            event,
            callback.as_ref().unchecked_ref(),
        );
        if let Err(err) = result {
            error!("failed to listen to `{event}`: {err:?}");
            return None;
        }
        Some(Self {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        self.target
            .remove_event_listener_with_callback(
                self.event,
                self.callback.as_ref().unchecked_ref(),
            )
            .ok();
    }
}

thread_local! {
    // Event listeners of every mounted container, by container id. They
    // live as long as the page, even if the JS object is freed. Mounting
    // the same container again replaces them.
    static LISTENERS: RefCell<HashMap<String, Vec<Listener>>> =
        RefCell::new(HashMap::new());
}

/// A chat widget bound to a container element of the page.
///
/// When mounting fails the error is logged to the console and the
/// instance stays inert: its methods do nothing.
#[wasm_bindgen(js_name = ChatWidget)]
pub struct WebChatWidget {
    widget: Option<ChatWidget>,
}

#[wasm_bindgen(js_class = ChatWidget)]
impl WebChatWidget {
    /// Mounts a widget on the element with id `container_id`.
    #[wasm_bindgen(constructor)]
    pub fn new(container_id: &str, options: JsValue) -> Self {
        match mount(container_id, &options) {
            Ok(widget) => Self {
                widget: Some(widget),
            },
            Err(err) => {
                error!("failed to mount chat widget: {err}");
                Self { widget: None }
            }
        }
    }

    /// Returns the full conversation as an array of `{role, content}`.
    #[wasm_bindgen(js_name = getConversation)]
    pub fn get_conversation(&self) -> Result<JsValue, JsError> {
        let messages = self
            .widget
            .as_ref()
            .map(ChatWidget::conversation)
            .unwrap_or_default();
        let json = serde_json::to_string(&messages)?;
        js_sys::JSON::parse(&json)
            .map_err(|_| JsError::new("failed to parse conversation"))
    }

    /// Replaces the conversation, redisplays it and persists it.
    #[wasm_bindgen(js_name = setConversation)]
    pub fn set_conversation(&self, messages: JsValue) -> Result<(), JsError> {
        let Some(widget) = &self.widget else {
            return Ok(());
        };
        let json = js_sys::JSON::stringify(&messages)
            .map_err(|_| JsError::new("conversation is not serializable"))?;
        let messages: Vec<Message> =
            serde_json::from_str(&String::from(json))?;
        widget.set_conversation(messages);
        Ok(())
    }

    /// Changes the endpoint used by the following requests.
    #[wasm_bindgen(js_name = setProxyUrl)]
    pub fn set_proxy_url(&self, proxy_url: String) {
        if let Some(widget) = &self.widget {
            widget.set_proxy_url(proxy_url);
        }
    }

    /// Returns the session storage key of the conversation.
    #[wasm_bindgen(js_name = getStorageKey)]
    pub fn get_storage_key(&self) -> String {
        STORAGE_KEY.to_owned()
    }

    /// Expands (`true`), collapses (`false`) or flips the popup.
    pub fn toggle(&self, state: Option<bool>) {
        if let Some(widget) = &self.widget {
            widget.toggle(state);
        }
    }

    /// Clears the conversation and its stored copy.
    pub fn clear(&self) {
        if let Some(widget) = &self.widget {
            widget.clear();
        }
    }

    /// Sends the text of the input. Resolves once the reply is displayed.
    pub fn send(&self) -> js_sys::Promise {
        let widget = self.widget.clone();
        future_to_promise(async move {
            if let Some(widget) = widget {
                widget.submit().await;
            }
            Ok(JsValue::UNDEFINED)
        })
    }
}

fn options_to_value(options: &JsValue) -> Result<Value, MountError> {
    if options.is_undefined() || options.is_null() {
        return Ok(Value::Null);
    }
    let json = js_sys::JSON::stringify(options).map_err(|err| {
        MountError::InvalidOptions(format!("{err:?}"))
    })?;
    serde_json::from_str(&String::from(json))
        .map_err(|err| MountError::InvalidOptions(err.to_string()))
}

/// Checks what mounting needs before anything is touched.
fn resolve_mount<C>(
    container: Option<C>,
    container_id: &str,
    options: &Value,
) -> Result<(C, WidgetConfig), MountError> {
    let container = container.ok_or_else(|| {
        MountError::ContainerNotFound(container_id.to_owned())
    })?;
    let config = WidgetConfig::from_options(options)?;
    Ok((container, config))
}

fn mount(
    container_id: &str,
    options: &JsValue,
) -> Result<ChatWidget, MountError> {
    let window = web_sys::window().ok_or(MountError::NoWindow)?;
    let document = window.document().ok_or(MountError::NoWindow)?;
    let (container, config) = resolve_mount(
        document.get_element_by_id(container_id),
        container_id,
        &options_to_value(options)?,
    )?;

    let mut provider = ProxyProvider::new();
    match window.location().href().map(|href| Url::parse(&href)) {
        Ok(Ok(base_url)) => provider = provider.with_base_url(base_url),
        _ => warn!("page location is unusable, only absolute URLs work"),
    }

    let elements = Rc::new(Elements::resolve(&container));
    let store = SessionStore::new(&window);
    let view = DomView::new(window, document, Rc::clone(&elements));
    let widget = ChatWidgetBuilder::with_chat_provider(provider)
        .with_config(config)
        .with_store(store)
        .build(view);

    let listeners = bind_events(&widget, &elements);
    let prev = LISTENERS.with_borrow_mut(|mounted| {
        mounted.insert(container_id.to_owned(), listeners)
    });
    if prev.is_some() {
        debug!("rebound container `{container_id}`");
    }
    Ok(widget)
}

fn submit_later(widget: &ChatWidget) {
    let widget = widget.clone();
    spawn_local(async move { widget.submit().await });
}

fn bind_events(widget: &ChatWidget, elements: &Elements) -> Vec<Listener> {
    let mut listeners = vec![];

    if let Some(toggle) = &elements.toggle {
        let widget = widget.clone();
        listeners.extend(Listener::new(toggle, "click", move |_| {
            widget.toggle(Some(true));
        }));
    }
    if let Some(close) = &elements.close {
        let widget = widget.clone();
        listeners.extend(Listener::new(close, "click", move |_| {
            widget.toggle(Some(false));
        }));
    }
    if let Some(clear) = &elements.clear {
        let widget = widget.clone();
        listeners.extend(Listener::new(clear, "click", move |_| {
            widget.clear();
        }));
    }
    if let Some(form) = &elements.form {
        let widget = widget.clone();
        listeners.extend(Listener::new(form, "submit", move |event| {
            event.prevent_default();
            submit_later(&widget);
        }));
    }
    if let Some(input) = &elements.input {
        let keydown_widget = widget.clone();
        listeners.extend(Listener::new(input, "keydown", move |event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            if is_submit_key(&event.key(), event.shift_key()) {
                event.prevent_default();
                submit_later(&keydown_widget);
            }
        }));

        let widget = widget.clone();
        listeners.extend(Listener::new(input, "input", move |_| {
            widget.resize_input();
        }));
    }

    listeners
}
