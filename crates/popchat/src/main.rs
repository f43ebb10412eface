//! A terminal front end for trying out a chat endpoint.

#[macro_use]
extern crate tracing;

use std::env;
use std::io::Write as _;
use std::rc::Rc;

use popchat::file_store::FileStore;
use popchat::terminal::TerminalView;
use popchat_core::{
    ChatWidgetBuilder, KeyValueStore, MemoryStore, WidgetConfig, WidgetView,
};
use popchat_proxy_client::{ProxyProvider, Url};
use serde_json::{Map, Value};
use tokio::io::{self, AsyncBufReadExt};

const DEFAULT_BASE_URL: &str = "http://localhost:8080/";

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = match WidgetConfig::from_options(&options_from_env()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("invalid configuration: {err}");
            return;
        }
    };

    let base_url = env::var("POPCHAT_BASE_URL")
        .unwrap_or_else(|_| DEFAULT_BASE_URL.to_owned());
    let Ok(base_url) = Url::parse(&base_url) else {
        eprintln!("POPCHAT_BASE_URL is not a valid URL: {base_url}");
        return;
    };

    let store: Rc<dyn KeyValueStore> = match env::var("POPCHAT_STORE_DIR") {
        Ok(dir) => Rc::new(FileStore::new(dir)),
        Err(_) => Rc::new(MemoryStore::new()),
    };

    let view = TerminalView::new();
    let provider = ProxyProvider::new().with_base_url(base_url);
    let widget = ChatWidgetBuilder::with_chat_provider(provider)
        .with_config(config)
        .with_store(store)
        .build(view.clone());

    loop {
        print!("> ");
        if let Err(err) = std::io::stdout().flush() {
            error!("error flushing output: {}", err);
        }

        let Some(line) = read_line().await else {
            break;
        };
        match line.trim() {
            "/quit" => break,
            "/clear" => widget.clear(),
            "/open" => widget.toggle(Some(true)),
            "/close" => widget.toggle(Some(false)),
            "/toggle" => widget.toggle(None),
            text => {
                view.set_input_value(text);
                widget.submit().await;
            }
        }
    }
}

fn options_from_env() -> Value {
    let mut options = Map::new();
    options.insert("openByDefault".to_owned(), "true".into());

    let vars = [
        ("POPCHAT_PROXY_URL", "proxyUrl"),
        ("POPCHAT_ACCESS_KEY", "accessKey"),
        ("POPCHAT_MAX_CONVERSATION_LENGTH", "maxConversationLength"),
        ("POPCHAT_WELCOME_MESSAGE", "welcomeMessage"),
        ("POPCHAT_OPEN_BY_DEFAULT", "openByDefault"),
    ];
    for (var, option) in vars {
        if let Ok(value) = env::var(var) {
            options.insert(option.to_owned(), value.into());
        }
    }
    Value::Object(options)
}

async fn read_line() -> Option<String> {
    let mut stdin = io::BufReader::new(io::stdin());
    let mut line = String::new();

    match stdin.read_line(&mut line).await {
        Ok(count) => {
            if count == 0 {
                return None;
            }
            Some(line)
        }
        Err(err) => {
            error!("error reading input: {}", err);
            None
        }
    }
}
