//! A [`WidgetView`] that prints to the terminal.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use popchat_core::model::Role;
use popchat_core::resize::InputMetrics;
use popchat_core::{RenderedMessage, WidgetView};

const BAR_CHAR: &str = "▎";

#[derive(Default)]
struct TerminalState {
    expanded: Cell<bool>,
    input_enabled: Cell<bool>,
    input: RefCell<String>,
    typing: RefCell<Option<ProgressBar>>,
}

/// Prints the conversation as it grows.
///
/// The typing indicator is a spinner. The input is whatever line was last
/// handed to [`TerminalView::set_input_value`], so clones of the view are
/// used to feed it from the read loop.
#[derive(Clone, Default)]
pub struct TerminalView {
    state: Rc<TerminalState>,
}

impl TerminalView {
    /// Creates a collapsed view with an empty input.
    #[inline]
    pub fn new() -> Self {
        let view = Self::default();
        view.state.input_enabled.set(true);
        view
    }

    /// Returns `true` unless a message is being sent.
    #[inline]
    pub fn is_input_enabled(&self) -> bool {
        self.state.input_enabled.get()
    }

    fn print(&self, line: String) {
        match &*self.state.typing.borrow() {
            // Keep the spinner from eating the line.
            Some(progress_bar) => progress_bar.suspend(|| println!("{line}")),
            None => println!("{line}"),
        }
    }
}

impl WidgetView for TerminalView {
    fn append_message(&self, msg: RenderedMessage<'_>) {
        let line = match msg.role {
            Role::User => {
                format!("{}🙂 {}", BAR_CHAR.bright_green(), msg.content)
            }
            Role::Assistant => format!(
                "{}🤖 {}",
                BAR_CHAR.bright_cyan(),
                msg.content.bright_white()
            ),
            Role::Error => format!(
                "{}⚠️  {}",
                BAR_CHAR.bright_red(),
                msg.content.bright_red()
            ),
        };
        self.print(line);
    }

    fn clear_messages(&self) {
        self.remove_typing_indicator();
        self.print(format!("{}", "(conversation cleared)".dimmed()));
    }

    fn has_typing_indicator(&self) -> bool {
        self.state.typing.borrow().is_some()
    }

    fn insert_typing_indicator(&self) {
        let progress_bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {wide_msg}")
        {
            progress_bar.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
        }
        progress_bar.set_message("Typing...");
        progress_bar.enable_steady_tick(Duration::from_millis(100));

        let prev = self.state.typing.replace(Some(progress_bar));
        if let Some(prev) = prev {
            prev.finish_and_clear();
        }
    }

    fn remove_typing_indicator(&self) {
        if let Some(progress_bar) = self.state.typing.take() {
            progress_bar.finish_and_clear();
        }
    }

    fn scroll_to_bottom(&self) {}

    fn is_expanded(&self) -> bool {
        self.state.expanded.get()
    }

    fn set_expanded(&self, expanded: bool) {
        if self.state.expanded.replace(expanded) != expanded {
            let status = if expanded { "(opened)" } else { "(closed)" };
            self.print(format!("{}", status.dimmed()));
        }
    }

    fn input_value(&self) -> String {
        self.state.input.borrow().clone()
    }

    fn set_input_value(&self, value: &str) {
        value.clone_into(&mut self.state.input.borrow_mut());
    }

    fn set_input_enabled(&self, enabled: bool) {
        self.state.input_enabled.set(enabled);
    }

    fn focus_input(&self) {}

    fn measure_input(&self) -> Option<InputMetrics> {
        None
    }

    fn set_input_height(&self, _height: f64) {}
}
