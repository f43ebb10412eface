//! Turns message content into HTML that is safe to insert into the page.

use popchat_model::Role;
use pulldown_cmark::{Options, Parser, html};

/// Markdown renderer and HTML sanitizer for message bubbles.
pub struct Renderer {
    sanitizer: ammonia::Builder<'static>,
}

impl Renderer {
    /// Creates a renderer.
    ///
    /// The sanitizer makes every link open in a new tab with
    /// `rel="noopener noreferrer"`.
    pub fn new() -> Self {
        let mut sanitizer = ammonia::Builder::default();
        sanitizer
            .set_tag_attribute_value("a", "target", "_blank")
            .link_rel(Some("noopener noreferrer"));
        Self { sanitizer }
    }

    /// Renders the content of a message with the given role.
    ///
    /// Assistant content is Markdown. Content of other roles is used as-is,
    /// but it goes through the sanitizer all the same.
    pub fn render(&self, role: Role, content: &str) -> String {
        let html = match role {
            Role::Assistant => markdown_to_html(content),
            Role::User | Role::Error => content.to_owned(),
        };
        self.sanitizer.clean(&html).to_string()
    }
}

impl Default for Renderer {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

fn markdown_to_html(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    let mut out = String::new();
    html::push_html(&mut out, Parser::new_ext(markdown, options));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assistant_markdown() {
        let renderer = Renderer::new();
        let html = renderer.render(Role::Assistant, "Hello **there**");
        assert_eq!(html.trim(), "<p>Hello <strong>there</strong></p>");
    }

    #[test]
    fn test_links_open_in_new_tab() {
        let renderer = Renderer::new();
        let html = renderer.render(
            Role::Assistant,
            "See [the docs](https://example.com/docs?a=1&b=2).",
        );
        assert!(html.contains(r#"href="https://example.com/docs?a=1&amp;b=2""#));
        assert!(html.contains(r#"target="_blank""#));
        assert!(html.contains(r#"rel="noopener noreferrer""#));
        assert!(html.contains(">the docs</a>"));
    }

    #[test]
    fn test_email_autolink() {
        let renderer = Renderer::new();
        let html = renderer
            .render(Role::Assistant, "Mail <help@example.com> for help.");
        assert!(html.contains(r#"href="mailto:help@example.com""#));
        assert!(html.contains(r#"target="_blank""#));
        assert!(html.contains(">help@example.com</a>"));
    }

    #[test]
    fn test_user_links_open_in_new_tab() {
        let renderer = Renderer::new();
        let html = renderer.render(
            Role::User,
            r#"<a href="https://example.com" target="_self">x</a>"#,
        );
        assert!(html.contains(r#"target="_blank""#));
        assert!(!html.contains("_self"));
    }

    #[test]
    fn test_scripts_are_stripped() {
        let renderer = Renderer::new();
        let html = renderer.render(
            Role::Assistant,
            "Hi <script>alert(1)</script><img src=x onerror=alert(2)>",
        );
        assert!(!html.contains("<script"));
        assert!(!html.contains("onerror"));

        let html = renderer
            .render(Role::User, r#"<b onclick="steal()">bold</b> move"#);
        assert_eq!(html, "<b>bold</b> move");
    }

    #[test]
    fn test_user_content_is_not_markdown() {
        let renderer = Renderer::new();
        assert_eq!(renderer.render(Role::User, "**as typed**"), "**as typed**");
        assert_eq!(renderer.render(Role::Error, "a < b"), "a &lt; b");
    }

    #[test]
    fn test_javascript_links_are_dropped() {
        let renderer = Renderer::new();
        let html = renderer.render(Role::Assistant, "[x](javascript:alert(1))");
        assert!(!html.contains("javascript:"));
    }
}
