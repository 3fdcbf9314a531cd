use std::time::Duration;

use httpmock::prelude::*;
use riffle_client::api::{
    ApiClient, ContentQuery, FetchOptions, RecommendationQuery, SearchQuery,
};
use riffle_client::app::RiffleError;
use riffle_client::config::ApiConfig;
use riffle_client::domain::{ContentUpdate, FeedbackInput, SourceInput, SourceList};
use serde_json::json;

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(&ApiConfig::new(server.base_url())).unwrap()
}

fn rust_blog() -> SourceInput {
    SourceInput::new("Rust Blog", "https://blog.rust-lang.org/feed.xml")
}

#[tokio::test]
async fn test_list_sources() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/sources")
                .header("accept", "application/json")
                .header("content-type", "application/json");
            then.status(200).json_body(json!({
                "sources": [{
                    "id": "s1",
                    "name": "Rust Blog",
                    "url": "https://blog.rust-lang.org/feed.xml",
                    "description": "",
                    "createdAt": "2024-01-01T00:00:00Z",
                    "updatedAt": "2024-01-01T00:00:00Z"
                }],
                "nextToken": ""
            }));
        })
        .await;

    let response = client_for(&server).list_sources().await.unwrap();
    mock.assert_async().await;

    assert_eq!(response.status(), 200);
    let list: SourceList = response.json().unwrap();
    assert_eq!(list.sources.len(), 1);
    assert_eq!(list.sources[0].name, "Rust Blog");
}

#[tokio::test]
async fn test_get_source() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/sources/42");
            then.status(200).json_body(json!({"id": "42"}));
        })
        .await;

    let response = client_for(&server).get_source(42).await.unwrap();
    mock.assert_async().await;
    assert_eq!(response.json::<serde_json::Value>().unwrap()["id"], "42");
}

#[tokio::test]
async fn test_create_source_posts_body() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/sources").json_body(json!({
                "name": "Rust Blog",
                "url": "https://blog.rust-lang.org/feed.xml",
                "description": ""
            }));
            then.status(201).json_body(json!({"id": "new"}));
        })
        .await;

    let response = client_for(&server).create_source(&rust_blog()).await.unwrap();
    mock.assert_async().await;
    assert_eq!(response.status(), 201);
}

#[tokio::test]
async fn test_batch_create_wraps_sources() {
    let server = MockServer::start_async().await;
    let a = rust_blog();
    let b = SourceInput::new("This Week in Rust", "https://this-week-in-rust.org/rss.xml");

    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/sources/batch").json_body(json!({
                "sources": [
                    {"name": "Rust Blog", "url": "https://blog.rust-lang.org/feed.xml", "description": ""},
                    {"name": "This Week in Rust", "url": "https://this-week-in-rust.org/rss.xml", "description": ""}
                ]
            }));
            then.status(200).json_body(json!({"sources": [], "errors": []}));
        })
        .await;

    client_for(&server)
        .batch_create_sources(&[a, b])
        .await
        .unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_batch_create_accepts_untyped_objects() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/sources/batch")
                .json_body(json!({"sources": [{"url": "a"}, {"url": "b"}]}));
            then.status(200);
        })
        .await;

    client_for(&server)
        .batch_create_sources(&[json!({"url": "a"}), json!({"url": "b"})])
        .await
        .unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_update_source_is_put_with_full_body() {
    let server = MockServer::start_async().await;
    let input = rust_blog().with_description("Official");
    let mock = server
        .mock_async(|when, then| {
            when.method(PUT).path("/sources/5").json_body(json!({
                "name": "Rust Blog",
                "url": "https://blog.rust-lang.org/feed.xml",
                "description": "Official"
            }));
            then.status(200).json_body(json!({"id": "5"}));
        })
        .await;

    client_for(&server).update_source(5, &input).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_delete_source() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(DELETE).path("/sources/9");
            then.status(200)
                .json_body(json!({"message": "Source deleted successfully"}));
        })
        .await;

    client_for(&server).delete_source("9").await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_batch_delete_sources() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(DELETE)
                .path("/sources/batch")
                .json_body(json!({"sourceIds": ["a", "b"]}));
            then.status(200).json_body(json!({"deletedCount": 2, "errors": []}));
        })
        .await;

    client_for(&server)
        .batch_delete_sources(&["a".to_string(), "b".to_string()])
        .await
        .unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_list_contents_passes_filters_through() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/contents")
                .query_param("sourceId", "s1")
                .query_param("startDate", "2024-01-01T00:00:00Z")
                .query_param("limit", "25");
            then.status(200).json_body(json!({"contents": []}));
        })
        .await;

    let query = ContentQuery {
        source_id: Some("s1".into()),
        start_date: Some("2024-01-01T00:00:00Z".parse().unwrap()),
        limit: Some(25),
        ..ContentQuery::default()
    };
    client_for(&server).list_contents(&query).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_list_contents_with_plain_map() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/contents").query_param("nextToken", "abc");
            then.status(200).json_body(json!({"contents": []}));
        })
        .await;

    let params = std::collections::HashMap::from([("nextToken", "abc")]);
    client_for(&server).list_contents(&params).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_get_content() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/contents/c1");
            then.status(200).json_body(json!({"id": "c1"}));
        })
        .await;

    client_for(&server).get_content("c1").await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_list_contents_by_source_default_limit() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/contents")
                .query_param("sourceId", "7")
                .query_param("limit", "10");
            then.status(200).json_body(json!({"contents": []}));
        })
        .await;

    client_for(&server)
        .list_contents_by_source(7, None)
        .await
        .unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_list_contents_by_source_custom_limit() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/contents")
                .query_param("sourceId", "7")
                .query_param("limit", "3");
            then.status(200).json_body(json!({"contents": []}));
        })
        .await;

    client_for(&server)
        .list_contents_by_source("7", Some(3))
        .await
        .unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_update_and_delete_content() {
    let server = MockServer::start_async().await;
    let update = ContentUpdate {
        title: "Edited".into(),
        categories: vec!["rust".into()],
        ..ContentUpdate::default()
    };
    let put = server
        .mock_async(|when, then| {
            when.method(PUT).path("/contents/c1").json_body(json!({
                "title": "Edited",
                "description": "",
                "content": "",
                "categories": ["rust"]
            }));
            then.status(200);
        })
        .await;
    let delete = server
        .mock_async(|when, then| {
            when.method(DELETE).path("/contents/c1");
            then.status(200);
        })
        .await;
    let batch = server
        .mock_async(|when, then| {
            when.method(DELETE)
                .path("/contents/batch")
                .json_body(json!({"contentIds": ["c2", "c3"]}));
            then.status(200).json_body(json!({"deletedCount": 2}));
        })
        .await;

    let client = client_for(&server);
    client.update_content("c1", &update).await.unwrap();
    client.delete_content("c1").await.unwrap();
    client
        .batch_delete_contents(&["c2".to_string(), "c3".to_string()])
        .await
        .unwrap();

    put.assert_async().await;
    delete.assert_async().await;
    batch.assert_async().await;
}

#[tokio::test]
async fn test_search_contents() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/contents/search")
                .query_param("keywords", "async rust")
                .query_param("limit", "5");
            then.status(200).json_body(json!({"contents": [], "count": 0}));
        })
        .await;

    let query = SearchQuery {
        limit: Some(5),
        ..SearchQuery::new("async rust")
    };
    client_for(&server).search_contents(&query).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_get_recommendations() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/recommendations");
            then.status(200)
                .json_body(json!({"recommendations": [], "count": 0}));
        })
        .await;

    client_for(&server).get_recommendations().await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_get_recommendations_with_query() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/recommendations")
                .query_param("userId", "u1")
                .query_param("sourceIds", "a")
                .query_param("sourceIds", "b")
                .query_param("limit", "4");
            then.status(200).json_body(json!({"recommendations": []}));
        })
        .await;

    let query = RecommendationQuery {
        user_id: Some("u1".into()),
        source_ids: vec!["a".into(), "b".into()],
        limit: Some(4),
    };
    client_for(&server)
        .get_recommendations_with(&query)
        .await
        .unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_feedback_endpoints() {
    let server = MockServer::start_async().await;
    let submit = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/recommendations/feedback")
                .json_body(json!({"contentId": "c1", "userId": "u1", "rating": 4}));
            then.status(201);
        })
        .await;
    let list = server
        .mock_async(|when, then| {
            when.method(GET).path("/recommendations/feedback/u1");
            then.status(200).json_body(json!({"feedback": [], "count": 0}));
        })
        .await;

    let client = client_for(&server);
    let input = FeedbackInput {
        content_id: "c1".into(),
        user_id: "u1".into(),
        rating: 4,
        comment: None,
    };
    client.submit_feedback(&input).await.unwrap();
    client.user_feedback("u1").await.unwrap();

    submit.assert_async().await;
    list.assert_async().await;
}

#[tokio::test]
async fn test_fetch_contents_defaults_to_thirty_days() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/contents/fetch")
                .json_body(json!({"days": 30}));
            then.status(202)
                .json_body(json!({"jobId": "j1", "status": "pending"}));
        })
        .await;

    let response = client_for(&server).fetch_contents().await.unwrap();
    mock.assert_async().await;
    assert_eq!(response.status(), 202);
}

#[tokio::test]
async fn test_fetch_contents_for_source() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/contents/fetch")
                .json_body(json!({"sourceId": "3", "days": 30}));
            then.status(202)
                .json_body(json!({"jobId": "j2", "status": "pending"}));
        })
        .await;

    client_for(&server)
        .fetch_contents_for_source(3)
        .await
        .unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_fetch_contents_with_custom_window() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/contents/fetch")
                .json_body(json!({"days": 7}));
            then.status(202);
        })
        .await;

    let options = FetchOptions {
        days: 7,
        ..FetchOptions::default()
    };
    client_for(&server).fetch_contents_with(&options).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_fetch_status() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/contents/fetch/j1");
            then.status(200).json_body(json!({
                "jobId": "j1",
                "status": "completed",
                "itemsProcessed": 12,
                "days": 30
            }));
        })
        .await;

    let job: riffle_client::domain::FetchJob = client_for(&server)
        .fetch_status("j1")
        .await
        .unwrap()
        .json()
        .unwrap();
    mock.assert_async().await;
    assert_eq!(job.items_processed, 12);
}

#[tokio::test]
async fn test_health_and_system_info() {
    let server = MockServer::start_async().await;
    let health = server
        .mock_async(|when, then| {
            when.method(GET).path("/health");
            then.status(200).json_body(json!({"status": "ok"}));
        })
        .await;
    let info = server
        .mock_async(|when, then| {
            when.method(GET).path("/system/info");
            then.status(200).json_body(json!({
                "version": "1.0.0",
                "goVersion": "go1.22",
                "startTime": "2024-01-01T00:00:00Z",
                "uptime": "1h0m0s",
                "numGoroutine": 8
            }));
        })
        .await;

    let client = client_for(&server);
    client.health().await.unwrap();
    let system: riffle_client::domain::SystemInfo = client.system_info().await.unwrap().json().unwrap();

    health.assert_async().await;
    info.assert_async().await;
    assert_eq!(system.version, "1.0.0");
}

#[tokio::test]
async fn test_error_status_keeps_body() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/sources/missing");
            then.status(404).json_body(json!({"error": "Source not found"}));
        })
        .await;

    let err = client_for(&server).get_source("missing").await.unwrap_err();
    mock.assert_async().await;

    assert_eq!(err.status().map(|s| s.as_u16()), Some(404));
    match err {
        RiffleError::Status { body, .. } => assert!(body.contains("Source not found")),
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_is_not_retried() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/contents/fetch");
            then.status(500).body("boom");
        })
        .await;

    let err = client_for(&server).fetch_contents().await.unwrap_err();
    assert!(matches!(err, RiffleError::Status { ref body, .. } if body == "boom"));
    assert!(!err.is_timeout());
    assert_eq!(mock.hits_async().await, 1);
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/recommendations");
            then.status(200).delay(Duration::from_secs(3));
        })
        .await;

    let config = ApiConfig {
        base_url: server.base_url(),
        timeout_secs: 1,
    };
    let err = ApiClient::new(&config)
        .unwrap()
        .get_recommendations()
        .await
        .unwrap_err();

    assert!(err.is_timeout(), "expected timeout, got {err:?}");
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // bind then drop to get a port with no listener
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let client = ApiClient::new(&ApiConfig::new(format!("http://127.0.0.1:{port}"))).unwrap();

    let err = client.list_sources().await.unwrap_err();
    assert!(matches!(err, RiffleError::Http(_)));
    assert!(!err.is_timeout());
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn test_base_url_prefix_preserved() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/sources");
            then.status(200).json_body(json!({"sources": []}));
        })
        .await;

    let client = ApiClient::new(&ApiConfig::new(server.url("/api"))).unwrap();
    client.list_sources().await.unwrap();
    mock.assert_async().await;
}
