//! The seam between the widget logic and whatever displays it.

use popchat_model::Role;

use crate::resize::InputMetrics;

/// A message ready to be displayed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderedMessage<'a> {
    /// The author of the message.
    pub role: Role,
    /// The raw content, for views that don't display HTML.
    pub content: &'a str,
    /// Sanitized HTML of the content.
    pub html: &'a str,
}

/// Display surface of a chat widget.
///
/// In the browser this is the set of elements found inside the widget
/// container. Any of those elements may be missing from the host markup;
/// implementations turn operations on missing elements into no-ops
/// instead of failing.
pub trait WidgetView {
    /// Appends a message bubble and scrolls it into view once layout has
    /// settled.
    fn append_message(&self, msg: RenderedMessage<'_>);

    /// Removes every displayed message bubble.
    fn clear_messages(&self);

    /// Returns `true` if the typing indicator is currently displayed.
    fn has_typing_indicator(&self) -> bool;

    /// Displays a new typing indicator.
    fn insert_typing_indicator(&self);

    /// Removes the typing indicator, if any.
    fn remove_typing_indicator(&self);

    /// Scrolls the message list to its bottom.
    fn scroll_to_bottom(&self);

    /// Returns `true` if the popup is currently expanded.
    fn is_expanded(&self) -> bool;

    /// Expands or collapses the popup.
    fn set_expanded(&self, expanded: bool);

    /// Returns the current text of the input.
    fn input_value(&self) -> String;

    /// Replaces the text of the input.
    fn set_input_value(&self, value: &str);

    /// Enables or disables both the input and the send button.
    fn set_input_enabled(&self, enabled: bool);

    /// Moves the focus to the input.
    fn focus_input(&self);

    /// Resets the input height to `auto` and measures it.
    ///
    /// Returns `None` when there's no input to measure.
    fn measure_input(&self) -> Option<InputMetrics>;

    /// Applies a height in pixels to the input.
    fn set_input_height(&self, height: f64);
}

/// Returns `true` if a key press in the input should send the message
/// rather than insert a newline.
#[inline]
pub fn is_submit_key(key: &str, shift_key: bool) -> bool {
    key == "Enter" && !shift_key
}
