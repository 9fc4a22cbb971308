//! Tests for the compose module

use super::*;
use crate::error::Error;
use crate::http::{HttpClient, HttpClientConfig};
use crate::pagination::{Endpoint, StopReason};
use crate::types::Record;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn http() -> HttpClient {
    HttpClient::with_config(HttpClientConfig::default()).unwrap()
}

fn record(value: Value) -> Record {
    match value {
        Value::Object(map) => map,
        _ => panic!("not an object"),
    }
}

/// Mount a two-page comment collection for one post
async fn mount_comments(server: &MockServer, post_id: &str, ids: [&str; 3]) {
    let route = format!("/post/{post_id}/comment");

    Mock::given(method("GET"))
        .and(path(route.clone()))
        .and(query_param("page", "1"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": ids[2]}],
            "page": 1,
            "total": 1,
        })))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(route))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": ids[0]}, {"id": ids[1]}],
            "page": 0,
            "total": 1,
        })))
        .with_priority(10)
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_posts(server: &MockServer, posts: Value) {
    Mock::given(method("GET"))
        .and(path("/post"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": posts,
            "page": 0,
            "total": 0,
        })))
        .expect(1)
        .mount(server)
        .await;
}

fn posts_endpoint(server: &MockServer) -> Endpoint {
    Endpoint::new(format!("{}/post", server.uri())).with_page_size(2)
}

fn comment_ids(record: &Record) -> Vec<&str> {
    record["comments"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap())
        .collect()
}

#[test]
fn test_compose_config_default_is_fail_fast() {
    assert!(ComposeConfig::default().fail_fast);
    assert!(!ComposeConfig::keep_going().fail_fast);
}

#[test]
fn test_parent_id_extraction() {
    let child = ChildResource::new("comment", "comments");

    assert_eq!(child.parent_id(&record(json!({"id": "abc"}))).unwrap(), "abc");
    assert_eq!(child.parent_id(&record(json!({"id": 42}))).unwrap(), "42");
    assert!(matches!(
        child.parent_id(&record(json!({"title": "x"}))),
        Err(Error::MissingField { .. })
    ));
    assert!(child.parent_id(&record(json!({"id": ""}))).is_err());

    let child = child.with_id_field("post_id");
    assert_eq!(child.parent_id(&record(json!({"post_id": "p"}))).unwrap(), "p");
}

#[tokio::test]
async fn test_attach_children_two_posts_three_comments_each() {
    let server = MockServer::start().await;

    mount_posts(&server, json!([{"id": "p1"}, {"id": "p2"}])).await;
    mount_comments(&server, "p1", ["c1", "c2", "c3"]).await;
    mount_comments(&server, "p2", ["c4", "c5", "c6"]).await;

    let composer = Composer::new(http(), ComposeConfig::default());
    let composed = composer
        .attach_children(
            &posts_endpoint(&server),
            Some(5),
            &ChildResource::new("comment", "comments"),
        )
        .await
        .unwrap();

    assert!(composed.is_complete());
    assert_eq!(composed.parent_stop, StopReason::Exhausted);
    assert_eq!(composed.records.len(), 2);
    assert_eq!(composed.records[0]["id"], "p1");
    assert_eq!(comment_ids(&composed.records[0]), vec!["c1", "c2", "c3"]);
    assert_eq!(composed.records[1]["id"], "p2");
    assert_eq!(comment_ids(&composed.records[1]), vec!["c4", "c5", "c6"]);
}

#[tokio::test]
async fn test_attach_children_fail_fast_aborts() {
    let server = MockServer::start().await;

    mount_posts(&server, json!([{"id": "p1"}, {"id": "p2"}])).await;

    Mock::given(method("GET"))
        .and(path("/post/p1/comment"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    // Never reached once p1 fails
    Mock::given(method("GET"))
        .and(path("/post/p2/comment"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(0)
        .mount(&server)
        .await;

    let composer = Composer::new(http(), ComposeConfig::default());
    let err = composer
        .attach_children(
            &posts_endpoint(&server),
            None,
            &ChildResource::new("comment", "comments"),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, Error::HttpStatus { status: 500, .. }));
}

#[tokio::test]
async fn test_attach_children_keep_going_collects_failures() {
    let server = MockServer::start().await;

    mount_posts(&server, json!([{"id": "p1"}, {"title": "no id"}, {"id": "p3"}])).await;

    Mock::given(method("GET"))
        .and(path("/post/p1/comment"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    mount_comments(&server, "p3", ["c1", "c2", "c3"]).await;

    let composer = Composer::new(http(), ComposeConfig::keep_going());
    let composed = composer
        .attach_children(
            &posts_endpoint(&server),
            None,
            &ChildResource::new("comment", "comments"),
        )
        .await
        .unwrap();

    assert!(!composed.is_complete());
    assert_eq!(composed.records.len(), 3);
    assert_eq!(composed.failures.len(), 2);

    assert_eq!(composed.failures[0].parent_id.as_deref(), Some("p1"));
    assert_eq!(composed.failures[0].index, 0);
    assert!(matches!(
        composed.failures[0].error,
        Error::HttpStatus { status: 500, .. }
    ));

    assert_eq!(composed.failures[1].parent_id, None);
    assert_eq!(composed.failures[1].index, 1);
    assert!(matches!(
        composed.failures[1].error,
        Error::MissingField { .. }
    ));

    assert!(!composed.records[0].contains_key("comments"));
    assert!(!composed.records[1].contains_key("comments"));
    assert_eq!(comment_ids(&composed.records[2]), vec!["c1", "c2", "c3"]);
}

#[tokio::test]
async fn test_attach_children_parent_failure_always_aborts() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/post"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let composer = Composer::new(http(), ComposeConfig::keep_going());
    let result = composer
        .attach_children(
            &posts_endpoint(&server),
            None,
            &ChildResource::new("comment", "comments"),
        )
        .await;

    assert!(matches!(result, Err(Error::HttpStatus { status: 502, .. })));
}

#[tokio::test]
async fn test_attach_children_empty_parent_collection() {
    let server = MockServer::start().await;
    mount_posts(&server, json!([])).await;

    let composer = Composer::new(http(), ComposeConfig::default());
    let composed = composer
        .attach_children(
            &posts_endpoint(&server),
            Some(1),
            &ChildResource::new("comment", "comments"),
        )
        .await
        .unwrap();

    assert!(composed.into_records().is_empty());
}
