use popchat_model::{ChatProvider, ChatProviderError, Message};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;

fn chat_request(endpoint: String, access_key: Option<&str>) -> ChatRequest {
    ChatRequest {
        endpoint,
        access_key: access_key.map(ToOwned::to_owned),
        messages: vec![
            Message::assistant("Hello! How can I help you today?"),
            Message::user("What's the weather like?"),
        ],
    }
}

#[tokio::test]
async fn test_successful_completion() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(header("content-type", "application/json"))
        .and(header("authorization", "Bearer s3cr3t"))
        .and(body_json(json!({
            "messages": [
                {
                    "role": "assistant",
                    "content": "Hello! How can I help you today?"
                },
                { "role": "user", "content": "What's the weather like?" },
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{
                "message": { "role": "assistant", "content": "Sunny." }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = ProxyProvider::new();
    let req =
        chat_request(format!("{}/api/chat", server.uri()), Some("s3cr3t"));
    let completion = provider.send_request(&req).await.unwrap();
    assert_eq!(completion.reply_text(), Some("Sunny."));
}

#[tokio::test]
async fn test_no_authorization_without_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let provider = ProxyProvider::new();
    let req = chat_request(format!("{}/api/chat", server.uri()), None);
    let completion = provider.send_request(&req).await.unwrap();
    assert_eq!(completion.reply_text(), None);

    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
    assert!(!received[0].headers.contains_key("authorization"));
}

#[tokio::test]
async fn test_relative_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "content": "Resolved." } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let base_url =
        Url::parse(&format!("{}/docs/page.html", server.uri())).unwrap();
    let provider = ProxyProvider::new().with_base_url(base_url);
    let req = chat_request("/api/chat".to_owned(), None);
    let completion = provider.send_request(&req).await.unwrap();
    assert_eq!(completion.reply_text(), Some("Resolved."));
}

#[tokio::test]
async fn test_relative_endpoint_without_base() {
    let provider = ProxyProvider::new();
    let req = chat_request("/api/chat".to_owned(), None);
    let err = provider.send_request(&req).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
}

#[tokio::test]
async fn test_error_status_ignores_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_json(json!({
            "choices": [{ "message": { "content": "never read" } }]
        })))
        .mount(&server)
        .await;

    let provider = ProxyProvider::new();
    let req = chat_request(format!("{}/api/chat", server.uri()), None);
    let err = provider.send_request(&req).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Status);
}

#[tokio::test]
async fn test_invalid_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let provider = ProxyProvider::new();
    let req = chat_request(format!("{}/api/chat", server.uri()), None);
    let err = provider.send_request(&req).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidBody);
}
