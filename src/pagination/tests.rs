//! Tests for pagination module

use super::*;
use crate::auth::Auth;
use crate::config::ClientConfig;
use crate::error::Error;
use crate::http::RequestHandler;
use crate::types::{Event, JsonValue};
use futures::TryStreamExt;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn handler_for(server: &MockServer) -> RequestHandler {
    let config = ClientConfig::builder().base_url(server.uri()).build();
    RequestHandler::new(config, Auth::with_access_token("token")).unwrap()
}

fn offline_handler() -> RequestHandler {
    RequestHandler::new(ClientConfig::default(), Auth::default()).unwrap()
}

/// Body for page `current` of `total`, linking to `next` when given
fn page_body(current: u32, total: u32, ids: &[u32], next: Option<String>) -> JsonValue {
    let mut pages = json!({"current": current, "total": total});
    if let Some(next) = next {
        pages["next_page"] = json!(next);
    }
    json!({
        "pages": pages,
        "events": ids.iter().map(|id| json!({"id": id})).collect::<Vec<_>>()
    })
}

async fn mount_page(server: &MockServer, route: &str, body: JsonValue, expected: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(expected)
        .mount(server)
        .await;
}

async fn drain(pages: &mut Pages<'_>) -> Vec<JsonValue> {
    let mut items = Vec::new();
    while let Some(item) = pages.next_item().await.unwrap() {
        items.push(item);
    }
    items
}

fn ids(items: &[JsonValue]) -> Vec<u64> {
    items.iter().map(|item| item["id"].as_u64().unwrap()).collect()
}

// ============================================================================
// Page Tests
// ============================================================================

#[test]
fn test_page_from_json() {
    let body = page_body(1, 2, &[1, 2], Some("https://api.example.com/p2".to_string()));
    let page: Page<JsonValue> = Page::from_json(body, "events").unwrap();

    assert_eq!(page.len(), 2);
    assert_eq!(page.result_key(), "events");
    assert_eq!(page.info().current, 1);
    assert_eq!(page.info().total, 2);
    assert_eq!(page.next_page_url(), Some("https://api.example.com/p2"));
}

#[test]
fn test_page_without_pages_object() {
    let page: Page<JsonValue> = Page::from_json(json!({"free_busy": []}), "free_busy").unwrap();

    assert!(page.is_empty());
    assert_eq!(page.info(), &PageInfo::default());
    assert_eq!(page.next_page_url(), None);
}

#[test]
fn test_page_empty_next_link_is_last_page() {
    let body = json!({"pages": {"current": 2, "total": 2, "next_page": ""}, "events": []});
    let page: Page<JsonValue> = Page::from_json(body, "events").unwrap();
    assert!(!page.info().has_next());
    assert_eq!(page.next_page_url(), None);
}

#[test]
fn test_page_missing_result_key() {
    let err = Page::<JsonValue>::from_json(json!({"calendars": []}), "events").unwrap_err();
    assert!(matches!(err, Error::MissingResultKey { ref key } if key == "events"));
}

#[test]
fn test_page_typed_items() {
    let body = json!({
        "events": [{
            "calendar_id": "cal_1",
            "summary": "Lunch",
            "start": "2024-02-01T12:00:00Z",
            "end": "2024-02-01T13:00:00Z"
        }]
    });
    let page: Page<Event> = Page::from_json(body, "events").unwrap();
    assert_eq!(page.items()[0].summary.as_deref(), Some("Lunch"));
}

// ============================================================================
// Pages Tests
// ============================================================================

#[tokio::test]
async fn test_single_page_no_fetch() {
    let handler = offline_handler();
    let mut pages: Pages<'_> =
        Pages::new(&handler, page_body(1, 1, &[1, 2, 3], None), "events", true).unwrap();

    assert_eq!(ids(&drain(&mut pages).await), vec![1, 2, 3]);
    assert!(pages.is_exhausted());
    assert_eq!(pages.fetch_count(), 0);
    assert!(pages.next_item().await.unwrap().is_none());
}

#[tokio::test]
async fn test_automatic_pagination_concatenates_pages() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/v1/events/pages/2",
        page_body(2, 3, &[3, 4], Some(format!("{base}/v1/events/pages/3"))),
        1,
    )
    .await;
    mount_page(&server, "/v1/events/pages/3", page_body(3, 3, &[5], None), 1).await;

    let handler = handler_for(&server);
    let first = page_body(1, 3, &[1, 2], Some(format!("{base}/v1/events/pages/2")));
    let mut pages: Pages<'_> = Pages::new(&handler, first, "events", true).unwrap();

    assert_eq!(ids(&drain(&mut pages).await), vec![1, 2, 3, 4, 5]);
    assert_eq!(pages.fetch_count(), 2);
    assert_eq!(pages.page_info().current, 3);
    assert_eq!(pages.next_page_url(), None);
}

#[tokio::test]
async fn test_fetch_is_lazy() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/v1/events/pages/2", page_body(2, 2, &[3], None), 0).await;

    let handler = handler_for(&server);
    let first = page_body(1, 2, &[1, 2], Some(format!("{base}/v1/events/pages/2")));
    let mut pages: Pages<'_> = Pages::new(&handler, first, "events", true).unwrap();

    // consuming only the first page never touches the second
    assert!(pages.next_item().await.unwrap().is_some());
    assert!(pages.next_item().await.unwrap().is_some());
    assert_eq!(pages.fetch_count(), 0);
}

#[tokio::test]
async fn test_empty_intermediate_page_is_skipped() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/v1/events/pages/2",
        page_body(2, 3, &[], Some(format!("{base}/v1/events/pages/3"))),
        1,
    )
    .await;
    mount_page(&server, "/v1/events/pages/3", page_body(3, 3, &[9], None), 1).await;

    let handler = handler_for(&server);
    let first = page_body(1, 3, &[], Some(format!("{base}/v1/events/pages/2")));
    let mut pages: Pages<'_> = Pages::new(&handler, first, "events", true).unwrap();

    assert_eq!(ids(&drain(&mut pages).await), vec![9]);
}

#[tokio::test]
async fn test_manual_pagination_stops_after_first_page() {
    let server = MockServer::start().await;
    let base = server.uri();
    let next = format!("{base}/v1/events/pages/2");

    mount_page(&server, "/v1/events/pages/2", page_body(2, 2, &[3], None), 0).await;

    let handler = handler_for(&server);
    let first = page_body(1, 2, &[1, 2], Some(next.clone()));
    let mut pages: Pages<'_> = Pages::new(&handler, first, "events", false).unwrap();

    assert_eq!(ids(&drain(&mut pages).await), vec![1, 2]);
    assert!(!pages.automatic_pagination());
    assert_eq!(pages.next_page_url(), Some(next.as_str()));
    assert_eq!(pages.fetch_count(), 0);
}

#[tokio::test]
async fn test_manual_fetch_next_page() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/v1/events/pages/2", page_body(2, 2, &[3], None), 1).await;

    let handler = handler_for(&server);
    let first = page_body(1, 2, &[1, 2], Some(format!("{base}/v1/events/pages/2")));
    let mut pages: Pages<'_> = Pages::new(&handler, first, "events", false).unwrap();

    assert_eq!(ids(&drain(&mut pages).await), vec![1, 2]);
    assert!(pages.fetch_next_page().await.unwrap());
    assert_eq!(ids(&drain(&mut pages).await), vec![3]);
    assert!(!pages.fetch_next_page().await.unwrap());
}

#[tokio::test]
async fn test_fetch_after_maximum_page_number() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/v1/events/pages/last", page_body(u32::MAX, u32::MAX, &[9], None), 1).await;

    let handler = handler_for(&server);
    let first = page_body(u32::MAX, u32::MAX, &[8], Some(format!("{base}/v1/events/pages/last")));
    let pages: Pages<'_> = Pages::new(&handler, first, "events", true).unwrap();

    assert_eq!(ids(&pages.all().await.unwrap()), vec![8, 9]);
}

#[tokio::test]
async fn test_fetch_error_surfaces_and_state_survives() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/v1/events/pages/2"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    mount_page(&server, "/v1/events/pages/2", page_body(2, 2, &[3], None), 1).await;

    let handler = handler_for(&server);
    let first = page_body(1, 2, &[1], Some(format!("{base}/v1/events/pages/2")));
    let mut pages: Pages<'_> = Pages::new(&handler, first, "events", true).unwrap();

    assert_eq!(pages.next_item().await.unwrap().unwrap()["id"], 1);

    let err = pages.next_item().await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert!(!pages.is_exhausted());
    assert_eq!(pages.page_info().current, 1);

    // the retry picks up where the failure left off
    assert_eq!(pages.next_item().await.unwrap().unwrap()["id"], 3);
    assert!(pages.next_item().await.unwrap().is_none());
}

#[tokio::test]
async fn test_clones_fetch_independently() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/v1/events/pages/2", page_body(2, 2, &[2], None), 2).await;

    let handler = handler_for(&server);
    let first = page_body(1, 2, &[1], Some(format!("{base}/v1/events/pages/2")));
    let mut a: Pages<'_> = Pages::new(&handler, first, "events", true).unwrap();
    let mut b = a.clone();

    assert_eq!(ids(&drain(&mut a).await), vec![1, 2]);
    assert_eq!(ids(&drain(&mut b).await), vec![1, 2]);
}

#[tokio::test]
async fn test_all_follows_links_in_manual_mode() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/v1/events/pages/2", page_body(2, 2, &[3, 4], None), 1).await;

    let handler = handler_for(&server);
    let first = page_body(1, 2, &[1, 2], Some(format!("{base}/v1/events/pages/2")));
    let pages: Pages<'_> = Pages::new(&handler, first, "events", false).unwrap();

    assert_eq!(ids(&pages.all().await.unwrap()), vec![1, 2, 3, 4]);
}

#[tokio::test]
async fn test_into_stream() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/v1/events/pages/2", page_body(2, 2, &[7], None), 1).await;

    let handler = handler_for(&server);
    let first = page_body(1, 2, &[6], Some(format!("{base}/v1/events/pages/2")));
    let pages: Pages<'_> = Pages::new(&handler, first, "events", true).unwrap();

    let items: Vec<JsonValue> = pages.into_stream().try_collect().await.unwrap();
    assert_eq!(ids(&items), vec![6, 7]);
}

#[test]
fn test_pages_missing_key() {
    let handler = offline_handler();
    let result = Pages::<JsonValue>::new(&handler, json!({}), "events", true);
    assert!(matches!(result, Err(Error::MissingResultKey { .. })));
}
