//! Integration tests for `GmailClient` against a mock Gmail API.
//!
//! Each test starts a `mockito` server, points a `GmailClient` at it
//! via `GmailConfig::api_base`, and exercises one of the client's
//! public methods. The end-to-end test drives the whole chain: label
//! lookup, message listing, message fetch, and the extraction
//! pipeline.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE;
use gmail_lookup::{Error, GmailClient, GmailConfig, LookupSet, pipeline};
use mockito::{Matcher, ServerGuard};
use serde_json::json;

/// Create a `GmailClient` pointed at the mock server.
fn client_for(server: &ServerGuard) -> GmailClient {
    let config = GmailConfig {
        api_base: server.url(),
        user: "me".to_string(),
        access_token: "test_token".to_string(),
    };
    GmailClient::new(config)
}

/// Gmail-style `format=full` message JSON with one HTML part nested
/// under a `multipart/alternative` payload.
fn message_json(id: &str, subject: &str, html: &str) -> serde_json::Value {
    json!({
        "id": id,
        "threadId": format!("thr_{id}"),
        "internalDate": "1731401723000",
        "payload": {
            "mimeType": "multipart/alternative",
            "headers": [
                {"name": "From", "value": "alerts@example.com"},
                {"name": "Subject", "value": subject}
            ],
            "parts": [
                {
                    "partId": "0",
                    "mimeType": "text/plain",
                    "body": {"size": 5, "data": URL_SAFE.encode("plain")}
                },
                {
                    "partId": "1",
                    "mimeType": "text/html",
                    "body": {"size": html.len(), "data": URL_SAFE.encode(html)}
                }
            ]
        }
    })
}

fn labels_json() -> String {
    json!({
        "labels": [
            {"id": "INBOX", "name": "INBOX", "type": "system"},
            {"id": "Label_7", "name": "Seek", "type": "user"}
        ]
    })
    .to_string()
}

// ── Tests ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_labels() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/gmail/v1/users/me/labels")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(labels_json())
        .create_async()
        .await;

    let client = client_for(&server);
    let labels = client.list_labels().await.unwrap();

    assert_eq!(labels.len(), 2);
    assert_eq!(labels[1].name, "Seek");
    assert_eq!(labels[1].id, "Label_7");
}

#[tokio::test]
async fn test_find_label_missing() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/gmail/v1/users/me/labels")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(labels_json())
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client.find_label("DoesNotExist").await.unwrap_err();

    assert!(matches!(err, Error::LabelNotFound(name) if name == "DoesNotExist"));
}

#[tokio::test]
async fn test_list_message_ids() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/gmail/v1/users/me/messages")
        .match_query(Matcher::UrlEncoded("labelIds".into(), "Label_7".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({"messages": [{"id": "m1", "threadId": "t1"}, {"id": "m2", "threadId": "t2"}]})
                .to_string(),
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let ids = client.list_message_ids("Label_7").await.unwrap();

    assert_eq!(ids, vec!["m1", "m2"]);
}

#[tokio::test]
async fn test_list_message_ids_empty_label() {
    let mut server = mockito::Server::new_async().await;
    // Gmail omits the `messages` array entirely when a label is empty.
    let _mock = server
        .mock("GET", "/gmail/v1/users/me/messages")
        .match_query(Matcher::UrlEncoded("labelIds".into(), "Label_7".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"resultSizeEstimate": 0}).to_string())
        .create_async()
        .await;

    let client = client_for(&server);
    let ids = client.list_message_ids("Label_7").await.unwrap();

    assert!(ids.is_empty());
}

#[tokio::test]
async fn test_get_message_parses_part_tree() {
    let mut server = mockito::Server::new_async().await;
    let body = message_json("m1", "7 new matches", "<p>found <b>7</b></p>");
    let _mock = server
        .mock("GET", "/gmail/v1/users/me/messages/m1?format=full")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await;

    let client = client_for(&server);
    let message = client.get_message("m1").await.unwrap();

    assert_eq!(message.id, "m1");
    assert_eq!(message.subject(), "7 new matches");
    assert_eq!(message.sender(), "alerts@example.com");
    assert_eq!(
        message.html_body(),
        URL_SAFE.encode("<p>found <b>7</b></p>")
    );
}

#[tokio::test]
async fn test_fetch_error_propagates() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/gmail/v1/users/me/labels")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error": {"message": "Unauthorized"}}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client.list_labels().await.unwrap_err();

    assert!(matches!(err, Error::Fetch(_)));
}

#[tokio::test]
async fn test_fetch_by_label_and_scan() {
    let mut server = mockito::Server::new_async().await;

    let _labels = server
        .mock("GET", "/gmail/v1/users/me/labels")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(labels_json())
        .create_async()
        .await;

    let _list = server
        .mock("GET", "/gmail/v1/users/me/messages")
        .match_query(Matcher::UrlEncoded("labelIds".into(), "Label_7".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({"messages": [{"id": "m1", "threadId": "t1"}, {"id": "m2", "threadId": "t2"}]})
                .to_string(),
        )
        .create_async()
        .await;

    let _m1 = server
        .mock("GET", "/gmail/v1/users/me/messages/m1?format=full")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            message_json(
                "m1",
                "Acme alert",
                "We've found <b> 7 </b> jobs. <b>software in Acme</b> posted a short while ago.",
            )
            .to_string(),
        )
        .create_async()
        .await;

    let _m2 = server
        .mock("GET", "/gmail/v1/users/me/messages/m2?format=full")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            message_json(
                "m2",
                "Globex alert",
                "We've found <b>12</b> jobs. <b>software in Globex</b> posted a short while ago.",
            )
            .to_string(),
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let messages = client.fetch_by_label("Seek").await.unwrap();
    assert_eq!(messages.len(), 2);

    let set = LookupSet::new("Seek")
        .rule(
            r"found <b>\s*(\d+)\s*</b>",
            r"<b>software in (.+)</b> posted",
        )
        .unwrap();

    let results = pipeline::run(&messages, &set).unwrap();
    let pairs: Vec<(&str, &str)> = results
        .iter()
        .map(|r| (r.label.as_str(), r.data.as_str()))
        .collect();

    assert_eq!(pairs, vec![("Acme", "7"), ("Globex", "12")]);
}

#[tokio::test]
async fn test_email_summary() {
    let mut server = mockito::Server::new_async().await;
    let html = "<p>hello</p>";
    let _mock = server
        .mock("GET", "/gmail/v1/users/me/messages/m9?format=full")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(message_json("m9", "Greetings", html).to_string())
        .create_async()
        .await;

    let client = client_for(&server);
    let email = client.email("m9").await.unwrap();

    assert_eq!(email.id, "m9");
    assert_eq!(email.subject, "Greetings");
    assert_eq!(email.sender, "alerts@example.com");
    // The summary body is the raw resolver output, still encoded.
    assert_eq!(email.body, URL_SAFE.encode(html));
}
