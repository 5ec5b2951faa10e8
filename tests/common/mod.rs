//! Shared helpers for the integration tests: a wiremock backend and
//! channel utilities for waiting on spawned requests.

#![allow(dead_code)]

use mindline::{ApiClient, ApiMessage, ConnectionOptions, RoutedResource, ScreenMessage};
use serde_json::{json, Value};
use std::time::Duration;
use tokio::sync::mpsc;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const WAIT: Duration = Duration::from_secs(5);

pub fn api_client(server: &MockServer) -> ApiClient {
    ApiClient::new(&server.uri(), &ConnectionOptions::default()).expect("mock server uri is valid")
}

/// Wait for the next message of resource `R`
pub async fn next_screen_message<R: RoutedResource>(
    receiver: &mut mpsc::Receiver<ApiMessage>,
) -> ScreenMessage<R> {
    let message = tokio::time::timeout(WAIT, receiver.recv())
        .await
        .expect("timed out waiting for a response")
        .expect("response channel closed");
    R::unwrap(message).unwrap_or_else(|other| panic!("unexpected message: {other:?}"))
}

pub fn exercise_json(id: u64, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "type_string": "Deep Breathing",
        "description": format!("{title} description"),
        "media_url": format!("https://cdn.example.com/{id}.mp4")
    })
}

pub fn expert_json(id: u64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "specialization_string": "Counseling",
        "bio": "Licensed counselor",
        "contact_info": "office@clinic.org",
        "phone_number": "555-0100",
        "avatar": null
    })
}

/// Mount `GET /{collection}?page=<page>&limit=20`
pub async fn mount_list_page(
    server: &MockServer,
    collection: &str,
    page: u32,
    records: Vec<Value>,
    total_pages: u32,
) {
    Mock::given(method("GET"))
        .and(path(format!("/{collection}")))
        .and(query_param("page", page.to_string()))
        .and(query_param("limit", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            collection: records,
            "total_page": total_pages
        })))
        .mount(server)
        .await;
}

/// Requests received so far for `path` with `page=<page>`
pub async fn list_requests(server: &MockServer, collection: &str, page: u32) -> usize {
    let wanted = format!("page={page}");
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|request| {
            request.method.as_str() == "GET"
                && request.url.path() == format!("/{collection}")
                && request
                    .url
                    .query()
                    .is_some_and(|query| query.split('&').any(|pair| pair == wanted))
        })
        .count()
}
