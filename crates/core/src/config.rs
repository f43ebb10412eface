//! Widget configuration.

use std::error::Error as StdError;
use std::fmt::{self, Debug, Display};

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Endpoint used when none is configured.
pub const DEFAULT_PROXY_URL: &str = "/api/chat";
/// How many recent messages are transmitted when not configured.
pub const DEFAULT_MAX_CONVERSATION_LENGTH: usize = 10;
/// Greeting used when none is configured.
pub const DEFAULT_WELCOME_MESSAGE: &str = "Hello! How can I help you today?";

/// Error returned when the widget options can't be understood.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigError {
    message: String,
}

impl ConfigError {
    /// Returns the error message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid widget options: {}", self.message)
    }
}

impl StdError for ConfigError {}

/// Builder for [`WidgetConfig`].
#[derive(Clone, Default, PartialEq, Eq)]
pub struct WidgetConfigBuilder {
    proxy_url: Option<String>,
    open_by_default: Option<Value>,
    max_conversation_length: Option<usize>,
    welcome_message: Option<String>,
    access_key: Option<String>,
}

impl WidgetConfigBuilder {
    /// Creates a builder where everything is left to the defaults.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the endpoint that messages are posted to.
    #[inline]
    pub fn with_proxy_url<S: Into<String>>(mut self, proxy_url: S) -> Self {
        self.proxy_url = Some(proxy_url.into());
        self
    }

    /// Sets the `openByDefault` option.
    ///
    /// Only the exact string `"true"` opens the popup on startup.
    #[inline]
    pub fn with_open_by_default<V: Into<Value>>(mut self, value: V) -> Self {
        self.open_by_default = Some(value.into());
        self
    }

    /// Sets how many recent messages are transmitted per request.
    #[inline]
    pub fn with_max_conversation_length(mut self, max_len: usize) -> Self {
        self.max_conversation_length = Some(max_len);
        self
    }

    /// Sets the greeting shown when the widget starts or is cleared.
    #[inline]
    pub fn with_welcome_message<S: Into<String>>(mut self, msg: S) -> Self {
        self.welcome_message = Some(msg.into());
        self
    }

    /// Sets the bearer credential. An empty key counts as no key.
    #[inline]
    pub fn with_access_key<S: Into<String>>(mut self, access_key: S) -> Self {
        self.access_key = Some(access_key.into());
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> WidgetConfig {
        WidgetConfig {
            proxy_url: self
                .proxy_url
                .unwrap_or_else(|| DEFAULT_PROXY_URL.to_owned()),
            open_by_default: self
                .open_by_default
                .unwrap_or_else(|| Value::from("false")),
            max_conversation_length: self
                .max_conversation_length
                .unwrap_or(DEFAULT_MAX_CONVERSATION_LENGTH),
            welcome_message: self
                .welcome_message
                .unwrap_or_else(|| DEFAULT_WELCOME_MESSAGE.to_owned()),
            access_key: self.access_key.filter(|key| !key.is_empty()),
        }
    }
}

impl Debug for WidgetConfigBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetConfigBuilder")
            .field("proxy_url", &self.proxy_url)
            .field("open_by_default", &self.open_by_default)
            .field("max_conversation_length", &self.max_conversation_length)
            .field("welcome_message", &self.welcome_message)
            .field("access_key", &"<redacted>")
            .finish()
    }
}

/// Configuration of a chat widget.
#[derive(Clone, PartialEq, Eq)]
pub struct WidgetConfig {
    pub(crate) proxy_url: String,
    pub(crate) open_by_default: Value,
    pub(crate) max_conversation_length: usize,
    pub(crate) welcome_message: String,
    pub(crate) access_key: Option<String>,
}

impl WidgetConfig {
    /// Creates a configuration from host-page options.
    ///
    /// `options` is a JSON object using the JavaScript option names
    /// (`proxyUrl`, `openByDefault`, `maxConversationLength`,
    /// `welcomeMessage`, `accessKey`). Present keys override the defaults
    /// and unknown keys are ignored. A `null` value, for the whole object
    /// or for one key, keeps the defaults.
    pub fn from_options(options: &Value) -> Result<Self, ConfigError> {
        if options.is_null() {
            return Ok(WidgetConfigBuilder::new().build());
        }

        let options = Options::deserialize(options).map_err(|err| {
            ConfigError {
                message: err.to_string(),
            }
        })?;
        let mut builder = WidgetConfigBuilder::new();
        if let Some(proxy_url) = options.proxy_url {
            builder = builder.with_proxy_url(proxy_url);
        }
        if let Some(open_by_default) = options.open_by_default {
            builder = builder.with_open_by_default(open_by_default);
        }
        if let Some(max_len) = options.max_conversation_length {
            builder = builder.with_max_conversation_length(max_len);
        }
        if let Some(welcome_message) = options.welcome_message {
            builder = builder.with_welcome_message(welcome_message);
        }
        if let Some(access_key) = options.access_key {
            builder = builder.with_access_key(access_key);
        }
        Ok(builder.build())
    }

    /// Returns the endpoint that messages are posted to.
    #[inline]
    pub fn proxy_url(&self) -> &str {
        &self.proxy_url
    }

    /// Returns `true` if the popup should be expanded on startup.
    ///
    /// The option is compared as a string on purpose: a boolean `true`
    /// doesn't count.
    #[inline]
    pub fn opens_by_default(&self) -> bool {
        self.open_by_default.as_str() == Some("true")
    }

    /// Returns how many recent messages are transmitted per request.
    #[inline]
    pub fn max_conversation_length(&self) -> usize {
        self.max_conversation_length
    }

    /// Returns the greeting text.
    #[inline]
    pub fn welcome_message(&self) -> &str {
        &self.welcome_message
    }

    /// Returns the bearer credential, if any.
    #[inline]
    pub fn access_key(&self) -> Option<&str> {
        self.access_key.as_deref()
    }
}

impl Default for WidgetConfig {
    #[inline]
    fn default() -> Self {
        WidgetConfigBuilder::new().build()
    }
}

impl Debug for WidgetConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetConfig")
            .field("proxy_url", &self.proxy_url)
            .field("open_by_default", &self.open_by_default)
            .field("max_conversation_length", &self.max_conversation_length)
            .field("welcome_message", &self.welcome_message)
            .field("access_key", &"<redacted>")
            .finish()
    }
}

// `null` values fall back to the defaults like missing keys do.
#[derive(Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct Options {
    proxy_url: Option<String>,
    open_by_default: Option<Value>,
    #[serde(deserialize_with = "deserialize_length")]
    max_conversation_length: Option<usize>,
    welcome_message: Option<String>,
    access_key: Option<String>,
}

// Options often come from `data-*` attributes, where numbers are strings.
fn deserialize_length<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<usize>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Length {
        Number(usize),
        Text(String),
    }

    match Option::<Length>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Length::Number(len)) => Ok(Some(len)),
        Some(Length::Text(text)) => {
            text.trim().parse().map(Some).map_err(|_| {
                D::Error::custom(format!(
                    "maxConversationLength must be a non-negative integer, \
                     got {text:?}"
                ))
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = WidgetConfig::from_options(&Value::Null).unwrap();
        assert_eq!(config, WidgetConfig::default());
        assert_eq!(config.proxy_url(), "/api/chat");
        assert!(!config.opens_by_default());
        assert_eq!(config.max_conversation_length(), 10);
        assert_eq!(config.welcome_message(), DEFAULT_WELCOME_MESSAGE);
        assert_eq!(config.access_key(), None);
    }

    #[test]
    fn test_options_override_defaults() {
        let config = WidgetConfig::from_options(&json!({
            "proxyUrl": "https://chat.example.com/v1",
            "maxConversationLength": 4,
            "welcomeMessage": "Ahoy!",
            "accessKey": "k3y",
            "theme": "dark",
        }))
        .unwrap();
        assert_eq!(config.proxy_url(), "https://chat.example.com/v1");
        assert_eq!(config.max_conversation_length(), 4);
        assert_eq!(config.welcome_message(), "Ahoy!");
        assert_eq!(config.access_key(), Some("k3y"));
    }

    #[test]
    fn test_open_by_default_is_string_compared() {
        let cases = [
            (json!({ "openByDefault": "true" }), true),
            (json!({ "openByDefault": "false" }), false),
            (json!({ "openByDefault": true }), false),
            (json!({ "openByDefault": "TRUE" }), false),
            (json!({ "openByDefault": null }), false),
            (json!({}), false),
        ];
        for (options, expected) in cases {
            let config = WidgetConfig::from_options(&options).unwrap();
            assert_eq!(config.opens_by_default(), expected, "{options}");
        }
    }

    #[test]
    fn test_length_from_string() {
        let config = WidgetConfig::from_options(&json!({
            "maxConversationLength": " 6 ",
        }))
        .unwrap();
        assert_eq!(config.max_conversation_length(), 6);
    }

    #[test]
    fn test_invalid_length() {
        for len in [json!(-1), json!("many"), json!(2.5)] {
            let options = json!({ "maxConversationLength": len });
            assert!(WidgetConfig::from_options(&options).is_err());
        }
    }

    #[test]
    fn test_null_options_use_defaults() {
        let config = WidgetConfig::from_options(&json!({
            "proxyUrl": null,
            "openByDefault": null,
            "maxConversationLength": null,
            "welcomeMessage": null,
            "accessKey": null,
        }))
        .unwrap();
        assert_eq!(config, WidgetConfig::default());
    }

    #[test]
    fn test_empty_access_key() {
        let config =
            WidgetConfig::from_options(&json!({ "accessKey": "" })).unwrap();
        assert_eq!(config.access_key(), None);
    }

    #[test]
    fn test_debug_hides_access_key() {
        let config = WidgetConfigBuilder::new().with_access_key("k3y").build();
        assert!(!format!("{config:?}").contains("k3y"));
    }
}
