use std::cell::RefCell;
use std::rc::Rc;

use popchat_core::model::Role;
use popchat_core::resize::{InputMetrics, parse_px};
use popchat_core::{RenderedMessage, WidgetView};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, HtmlButtonElement, HtmlTextAreaElement,
    ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition, Window,
};

const OPEN_CLASS: &str = "open";
const TYPING_CLASS: &str = "chat-typing-indicator";

/// The widget elements found inside the container.
///
/// Host markup may leave any of them out.
pub(crate) struct Elements {
    pub(crate) toggle: Option<Element>,
    pub(crate) popup: Option<Element>,
    pub(crate) close: Option<Element>,
    pub(crate) clear: Option<Element>,
    pub(crate) messages: Option<Element>,
    pub(crate) form: Option<Element>,
    pub(crate) input: Option<HtmlTextAreaElement>,
    pub(crate) send: Option<HtmlButtonElement>,
}

impl Elements {
    pub(crate) fn resolve(container: &Element) -> Self {
        let find = |class: &str| -> Option<Element> {
            match container.query_selector(&format!(".{class}")) {
                Ok(element) => element,
                Err(err) => {
                    warn!("failed to look up `.{class}`: {err:?}");
                    None
                }
            }
        };
        Self {
            toggle: find("chat-widget-toggle"),
            popup: find("chat-widget-popup"),
            close: find("chat-widget-close"),
            clear: find("chat-widget-clear"),
            messages: find("chat-widget-messages"),
            form: find("chat-widget-form"),
            input: find("chat-widget-input").and_then(|el| el.dyn_into().ok()),
            send: find("chat-widget-send").and_then(|el| el.dyn_into().ok()),
        }
    }
}

pub(crate) struct DomView {
    window: Window,
    document: Document,
    elements: Rc<Elements>,
    typing: RefCell<Option<Element>>,
}

impl DomView {
    pub(crate) fn new(
        window: Window,
        document: Document,
        elements: Rc<Elements>,
    ) -> Self {
        Self {
            window,
            document,
            elements,
            typing: RefCell::new(None),
        }
    }

    fn create_element(&self, class: &str) -> Option<Element> {
        match self.document.create_element("div") {
            Ok(element) => {
                element.set_class_name(class);
                Some(element)
            }
            Err(err) => {
                error!("failed to create element: {err:?}");
                None
            }
        }
    }

    fn append(&self, element: &Element) {
        let Some(messages) = &self.elements.messages else {
            return;
        };
        if let Err(err) = messages.append_child(element) {
            error!("failed to append element: {err:?}");
        }
    }

    /// Scrolls `element` into view after two animation frames, once the
    /// browser has laid it out.
    fn scroll_into_view_later(&self, element: Element) {
        let window = self.window.clone();
        let scroll = Closure::once_into_js(move || {
            let options = ScrollIntoViewOptions::new();
            options.set_behavior(ScrollBehavior::Smooth);
            options.set_block(ScrollLogicalPosition::End);
            element.scroll_into_view_with_scroll_into_view_options(&options);
        });
        let next_frame = Closure::once_into_js(move || {
            if let Err(err) =
                window.request_animation_frame(scroll.unchecked_ref())
            {
                warn!("failed to request animation frame: {err:?}");
            }
        });
        if let Err(err) =
            self.window.request_animation_frame(next_frame.unchecked_ref())
        {
            warn!("failed to request animation frame: {err:?}");
        }
    }
}

fn role_class(role: Role) -> &'static str {
    match role {
        Role::User => "user",
        Role::Assistant => "bot",
        Role::Error => "error",
    }
}

impl WidgetView for DomView {
    fn append_message(&self, msg: RenderedMessage<'_>) {
        let class = format!("chat-message {}", role_class(msg.role));
        let Some(element) = self.create_element(&class) else {
            return;
        };
        element.set_inner_html(msg.html);
        self.append(&element);
        self.scroll_into_view_later(element);
    }

    fn clear_messages(&self) {
        if let Some(messages) = &self.elements.messages {
            messages.set_inner_html("");
        }
        self.typing.borrow_mut().take();
    }

    fn has_typing_indicator(&self) -> bool {
        self.typing.borrow().is_some()
    }

    fn insert_typing_indicator(&self) {
        let Some(indicator) = self.create_element(TYPING_CLASS) else {
            return;
        };
        indicator.set_inner_html("<span></span><span></span><span></span>");
        self.append(&indicator);
        if let Some(prev) = self.typing.replace(Some(indicator)) {
            prev.remove();
        }
    }

    fn remove_typing_indicator(&self) {
        if let Some(indicator) = self.typing.borrow_mut().take() {
            indicator.remove();
        }
    }

    fn scroll_to_bottom(&self) {
        if let Some(messages) = &self.elements.messages {
            messages.set_scroll_top(messages.scroll_height());
        }
    }

    fn is_expanded(&self) -> bool {
        self.elements
            .popup
            .as_ref()
            .is_some_and(|popup| popup.class_list().contains(OPEN_CLASS))
    }

    fn set_expanded(&self, expanded: bool) {
        if let Some(popup) = &self.elements.popup {
            let classes = popup.class_list();
            if let Err(err) = classes.toggle_with_force(OPEN_CLASS, expanded) {
                warn!("failed to toggle popup: {err:?}");
            }
        }
        if let Some(toggle) = &self.elements.toggle {
            let value = if expanded { "true" } else { "false" };
            toggle.set_attribute("aria-expanded", value).ok();
        }
    }

    fn input_value(&self) -> String {
        self.elements
            .input
            .as_ref()
            .map(HtmlTextAreaElement::value)
            .unwrap_or_default()
    }

    fn set_input_value(&self, value: &str) {
        if let Some(input) = &self.elements.input {
            input.set_value(value);
        }
    }

    fn set_input_enabled(&self, enabled: bool) {
        if let Some(input) = &self.elements.input {
            input.set_disabled(!enabled);
        }
        if let Some(send) = &self.elements.send {
            send.set_disabled(!enabled);
        }
    }

    fn focus_input(&self) {
        if let Some(input) = &self.elements.input {
            input.focus().ok();
        }
    }

    fn measure_input(&self) -> Option<InputMetrics> {
        let input = self.elements.input.as_ref()?;
        input.style().set_property("height", "auto").ok()?;

        let style = self.window.get_computed_style(input).ok().flatten()?;
        let px = |name: &str| {
            style
                .get_property_value(name)
                .ok()
                .and_then(|value| parse_px(&value))
        };
        Some(InputMetrics {
            line_height: px("line-height"),
            padding_top: px("padding-top").unwrap_or_default(),
            padding_bottom: px("padding-bottom").unwrap_or_default(),
            scroll_height: f64::from(input.scroll_height()),
        })
    }

    fn set_input_height(&self, height: f64) {
        if let Some(input) = &self.elements.input {
            let style = input.style();
            style.set_property("height", &format!("{height}px")).ok();
        }
    }
}
