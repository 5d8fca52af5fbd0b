mod common;

use chrono::{TimeZone, Utc};
use common::{source_config, API_KEY};
use roster_core::{Status, ViewConfig};
use roster_sources::{ApiClient, CustomerQuery, HttpConversationSource, HttpProfileSource};
use roster_views::{CustomerViews, ViewError};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn views_for(server: &MockServer) -> CustomerViews {
    let api = ApiClient::new(&source_config(&server.uri()));
    CustomerViews::builder()
        .profiles(Arc::new(HttpProfileSource::new(api.clone())))
        .conversations(Arc::new(HttpConversationSource::new(api)))
        .config(ViewConfig::new())
        .build()
        .unwrap()
}

async fn mount_profiles(server: &MockServer, limit: &str) {
    Mock::given(method("GET"))
        .and(path("/customers/"))
        .and(header("x-api-key", API_KEY))
        .and(query_param("limit", limit))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "customers": [
                {"phone_number": "923001111111", "customer_name": "Alice", "total_spend": 900, "escalation_status": true},
                {"phone_number": "923002222222", "customer_name": "Bob"},
                {"phone_number": "923004444444", "customer_name": "Dana"}
            ]
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_unified_view_end_to_end() {
    let server = MockServer::start().await;
    mount_profiles(&server, "100").await;
    Mock::given(method("GET"))
        .and(path("/chats/phone-numbers"))
        .and(header("x-api-key", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "phone_numbers": ["923003333333", "923002222222", "923001111111"]
        })))
        .mount(&server)
        .await;

    let view = views_for(&server).all_customers().await.unwrap();

    let phones: Vec<&str> = view.customers.iter().map(|c| c.phone_number.as_str()).collect();
    assert_eq!(
        phones,
        vec!["923003333333", "923002222222", "923001111111", "923004444444"]
    );
    assert_eq!(view.customers[0].status, Status::ChatOnly);
    assert_eq!(view.customers[3].status, Status::CustomerOnly);

    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["total"], 4);
    assert_eq!(json["stats"], json!({"active": 2, "chatOnly": 1, "customerOnly": 1}));
}

#[tokio::test]
async fn test_customer_page_end_to_end() {
    let server = MockServer::start().await;
    mount_profiles(&server, "1000").await;
    Mock::given(method("GET"))
        .and(path("/chats/list-chats"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "2"))
        .and(query_param("escalation_status", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "customers": [
                {"phone_number": "923001111111", "last_message": "Where is my order?", "last_message_sender": "customer", "last_message_type": "text"},
                {"phone_number": "923005555555", "last_message": "Thanks", "last_message_sender": "agent"}
            ],
            "total": 5,
            "page": 2,
            "limit": 2,
            "total_pages": 3,
            "has_next": true,
            "has_previous": true,
            "total_escalated": 1
        })))
        .mount(&server)
        .await;

    let query = CustomerQuery {
        page: 2,
        limit: 2,
        escalation_status: Some(true),
        ..CustomerQuery::new()
    };
    let page = views_for(&server).customer_page(&query).await.unwrap();

    assert_eq!(page.records.len(), 2);
    assert_eq!(page.records[0].status, Status::Active);
    assert_eq!(page.records[0].customer_name.as_deref(), Some("Alice"));
    assert_eq!(page.records[0].last_message.as_deref(), Some("Where is my order?"));
    assert_eq!(page.records[1].status, Status::ChatOnly);
    assert_eq!(page.total, 5);
    assert_eq!(page.total_pages, Some(3));
    assert_eq!(page.has_next, Some(true));
    assert_eq!(page.total_escalated, Some(1));
}

#[tokio::test]
async fn test_preview_end_to_end() {
    let server = MockServer::start().await;
    mount_profiles(&server, "1000").await;
    Mock::given(method("GET"))
        .and(path("/chats/list-chats"))
        .and(query_param("limit", "5"))
        .and(query_param("sort_by", "last_message_time"))
        .and(query_param("sort_order", "desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "customers": [
                {"phone_number": "923002222222", "last_message": "See you", "last_message_time": "2025-03-01T11:40:00Z", "last_message_type": "image"},
                {"phone_number": "923009999999"}
            ],
            "total": 2
        })))
        .mount(&server)
        .await;

    let now = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
    let view = views_for(&server).preview(now).await.unwrap();

    // two conversation records, then profile-only ones up to the preview size
    assert_eq!(view.cards.len(), 4);
    assert_eq!(view.cards[0].name, "Bob");
    assert_eq!(view.cards[0].time_ago, "20m ago");
    assert_eq!(view.cards[0].message_type, "image");
    assert_eq!(view.cards[1].name, "Unknown Customer");
    assert_eq!(view.cards[1].recent_message, "Recent conversation");
    assert_eq!(view.records[2].status, Status::CustomerOnly);
}

#[tokio::test]
async fn test_one_failing_source_fails_the_view() {
    let server = MockServer::start().await;
    mount_profiles(&server, "100").await;
    Mock::given(method("GET"))
        .and(path("/chats/phone-numbers"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let err = views_for(&server).all_customers().await.unwrap_err();
    assert!(matches!(err, ViewError::Upstream(_)));
    assert_eq!(err.user_message(), "Failed to fetch customers");
}

#[tokio::test]
async fn test_wrong_api_key_is_not_matched() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header("x-api-key", "some-other-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"customers": []})))
        .mount(&server)
        .await;

    // unmatched requests get wiremock's 404
    let err = views_for(&server).all_customers().await.unwrap_err();
    assert!(matches!(err, ViewError::Upstream(_)));
}
