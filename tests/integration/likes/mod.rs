//! Like integration tests

use axum::http::{Method, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::common::{parse_body, request, TestApp};

async fn like(app: &TestApp, artifact_id: &str, email: &str, note: &str) {
    let resp = app
        .router()
        .oneshot(request(
            Method::POST,
            "/likes",
            Some(json!({"id": artifact_id, "userEmail": email, "note": note})),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

async fn lookup(app: &TestApp, artifact_id: &str, email: &str) -> Value {
    let resp = app
        .router()
        .oneshot(request(
            Method::GET,
            &format!("/likes?email={email}&id={artifact_id}"),
            None,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    parse_body(resp).await
}

#[tokio::test]
async fn test_lookup_without_like_is_null() {
    let app = TestApp::new();
    like(&app, "art-1", "other@curio.test", "theirs").await;

    assert_eq!(lookup(&app, "art-1", "me@curio.test").await, Value::Null);
}

#[tokio::test]
async fn test_lookup_returns_first_of_duplicates() {
    let app = TestApp::new();
    like(&app, "art-1", "me@curio.test", "first").await;
    like(&app, "art-1", "me@curio.test", "second").await;

    let found = lookup(&app, "art-1", "me@curio.test").await;
    assert_eq!(found["note"], "first");
    assert!(found["_id"].is_string());
}

#[tokio::test]
async fn test_delete_removes_one_like_per_call() {
    let app = TestApp::new();
    like(&app, "art-1", "me@curio.test", "first").await;
    like(&app, "art-1", "you@curio.test", "second").await;

    let resp = app
        .router()
        .oneshot(request(Method::DELETE, "/likes/art-1", None, None))
        .await
        .unwrap();
    assert_eq!(
        parse_body(resp).await,
        json!({"acknowledged": true, "deletedCount": 1})
    );
    assert_eq!(app.likes.len(), 1);

    // The earliest like went first
    assert_eq!(lookup(&app, "art-1", "me@curio.test").await, Value::Null);
    assert_eq!(lookup(&app, "art-1", "you@curio.test").await["note"], "second");
}

#[tokio::test]
async fn test_delete_unknown_reference_reports_zero() {
    let app = TestApp::new();
    let resp = app
        .router()
        .oneshot(request(Method::DELETE, "/likes/nothing-here", None, None))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(parse_body(resp).await["deletedCount"], 0);
}

#[tokio::test]
async fn test_lookup_missing_params_is_400() {
    let app = TestApp::new();
    for uri in ["/likes", "/likes?id=art-1", "/likes?email=me@curio.test"] {
        let resp = app
            .router()
            .oneshot(request(Method::GET, uri, None, None))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");
    }
    assert_eq!(app.likes.operations(), 0);
}
