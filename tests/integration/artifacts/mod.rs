//! Artifact catalog integration tests

use axum::http::{Method, StatusCode};
use serde_json::{json, Value};
use tokio::task::JoinSet;
use tower::ServiceExt;
use uuid::Uuid;

use crate::common::{parse_body, request, sole_writer, writer_payload, TestApp};

async fn create(app: &TestApp, body: Value) -> String {
    let resp = app
        .router()
        .oneshot(request(Method::POST, "/artifacts", Some(body), None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    parse_body(resp).await["insertedId"]
        .as_str()
        .unwrap()
        .to_string()
}

mod test_catalog {
    use super::*;

    #[tokio::test]
    async fn test_create_stores_body_verbatim() {
        let app = TestApp::new();
        let body = json!({
            "artifactName": "Rosetta Stone",
            "myEmail": "keeper@curio.test",
            "likes": 3,
            "extra": {"nested": [1, 2, 3]}
        });

        let id = create(&app, body.clone()).await;

        let resp = app
            .router()
            .oneshot(request(Method::GET, &format!("/artifacts/{id}"), None, None))
            .await
            .unwrap();
        let mut stored = parse_body(resp).await;
        assert_eq!(stored["_id"], id);
        stored.as_object_mut().unwrap().remove("_id");
        assert_eq!(stored, body);
    }

    #[tokio::test]
    async fn test_client_id_is_ignored() {
        let app = TestApp::new();
        let id = create(&app, json!({"_id": "client-chosen", "artifactName": "Mask"})).await;

        assert_ne!(id, "client-chosen");
        assert!(Uuid::parse_str(&id).is_ok());
    }

    #[tokio::test]
    async fn test_list_returns_insertion_order() {
        let app = TestApp::new();
        for name in ["First", "Second", "Third"] {
            create(&app, json!({"artifactName": name})).await;
        }

        let resp = app
            .router()
            .oneshot(request(Method::GET, "/artifacts", None, None))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let names: Vec<String> = parse_body(resp)
            .await
            .as_array()
            .unwrap()
            .iter()
            .map(|a| a["artifactName"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
    }

    #[tokio::test]
    async fn test_list_empty_catalog() {
        let app = TestApp::new();
        let resp = app
            .router()
            .oneshot(request(Method::GET, "/artifacts", None, None))
            .await
            .unwrap();
        assert_eq!(parse_body(resp).await, json!([]));
    }

    #[tokio::test]
    async fn test_delete_then_get_is_null() {
        let app = TestApp::new();
        let id = create(&app, json!({"artifactName": "Amphora"})).await;

        let resp = app
            .router()
            .oneshot(request(Method::DELETE, &format!("/artifacts/{id}"), None, None))
            .await
            .unwrap();
        assert_eq!(
            parse_body(resp).await,
            json!({"acknowledged": true, "deletedCount": 1})
        );

        let resp = app
            .router()
            .oneshot(request(Method::GET, &format!("/artifacts/{id}"), None, None))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(parse_body(resp).await, Value::Null);
    }

    #[tokio::test]
    async fn test_malformed_json_is_400() {
        let app = TestApp::new();
        let req = axum::http::Request::builder()
            .method(Method::POST)
            .uri("/artifacts")
            .header("content-type", "application/json")
            .body(axum::body::Body::from("{not json"))
            .unwrap();

        let resp = app.router().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(app.artifacts.operations(), 0);
    }

    #[tokio::test]
    async fn test_concurrent_creates_get_distinct_ids() {
        let app = TestApp::new();
        let router = app.router();

        let mut tasks = JoinSet::new();
        for i in 0..32 {
            let router = router.clone();
            tasks.spawn(async move {
                let resp = router
                    .oneshot(request(
                        Method::POST,
                        "/artifacts",
                        Some(json!({"artifactName": format!("Coin {i}")})),
                        None,
                    ))
                    .await
                    .unwrap();
                parse_body(resp).await["insertedId"]
                    .as_str()
                    .unwrap()
                    .to_string()
            });
        }

        let mut ids = std::collections::HashSet::new();
        while let Some(id) = tasks.join_next().await {
            ids.insert(id.unwrap());
        }
        assert_eq!(ids.len(), 32);
        assert_eq!(app.artifacts.len(), 32);
    }
}

mod test_update {
    use super::*;

    #[tokio::test]
    async fn test_patch_overwrites_fixed_fields_and_keeps_the_rest() {
        let app = TestApp::new();
        let id = create(
            &app,
            json!({
                "artifactName": "Old",
                "artifactType": "Tools",
                "myEmail": "keeper@curio.test",
                "likes": 4
            }),
        )
        .await;

        let resp = app
            .router()
            .oneshot(request(
                Method::PATCH,
                &format!("/artifacts/mine/{id}"),
                Some(json!({"artifactName": "New", "presentLocation": "Cairo"})),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(
            parse_body(resp).await,
            json!({
                "acknowledged": true,
                "matchedCount": 1,
                "modifiedCount": 1,
                "upsertedCount": 0,
                "upsertedId": null
            })
        );

        let stored = app.repos().artifacts.find(id.parse().unwrap()).await.unwrap().unwrap();
        assert_eq!(stored["artifactName"], "New");
        assert_eq!(stored["presentLocation"], "Cairo");
        // Absent fixed fields are written as null
        assert_eq!(stored["artifactType"], Value::Null);
        assert_eq!(stored["myEmail"], "keeper@curio.test");
        assert_eq!(stored["likes"], 4);
    }

    #[tokio::test]
    async fn test_concurrent_upserts_on_missing_id_create_one_record() {
        let app = TestApp::new();
        let router = app.router();
        let id = Uuid::new_v4();

        let mut tasks = JoinSet::new();
        for i in 0..8 {
            let router = router.clone();
            tasks.spawn(async move {
                let resp = router
                    .oneshot(request(
                        Method::PATCH,
                        &format!("/artifacts/mine/{id}"),
                        Some(json!({"artifactName": format!("Draft {i}")})),
                        None,
                    ))
                    .await
                    .unwrap();
                parse_body(resp).await["upsertedCount"].as_u64().unwrap()
            });
        }

        let mut upserted = 0;
        while let Some(count) = tasks.join_next().await {
            upserted += count.unwrap();
        }
        assert_eq!(upserted, 1);
        assert_eq!(app.artifacts.len(), 1);
    }
}

mod test_concurrent_update {
    use super::*;

    const WRITERS: usize = 16;

    #[tokio::test]
    async fn test_concurrent_patches_leave_one_writers_state() {
        let app = TestApp::new();
        let id = create(
            &app,
            json!({"artifactName": "Seed", "myEmail": "keeper@curio.test", "likes": 1}),
        )
        .await;
        let router = app.router();

        let mut tasks = JoinSet::new();
        for writer in 0..WRITERS {
            let router = router.clone();
            let uri = format!("/artifacts/mine/{id}");
            tasks.spawn(async move {
                let resp = router
                    .oneshot(request(
                        Method::PATCH,
                        &uri,
                        Some(writer_payload(writer)),
                        None,
                    ))
                    .await
                    .unwrap();
                assert_eq!(resp.status(), StatusCode::OK);
                parse_body(resp).await
            });
        }
        while let Some(result) = tasks.join_next().await {
            assert_eq!(result.unwrap()["matchedCount"], 1);
        }

        let stored = app
            .repos()
            .artifacts
            .find(id.parse().unwrap())
            .await
            .unwrap()
            .unwrap();
        assert!(
            sole_writer(&stored, WRITERS).is_some(),
            "document mixes writers: {stored:?}"
        );
        assert_eq!(stored["myEmail"], "keeper@curio.test");
        assert_eq!(stored["likes"], 1);
        assert_eq!(app.artifacts.len(), 1);
    }

    #[tokio::test]
    async fn test_repeated_patch_is_not_a_modification() {
        let app = TestApp::new();
        let id = create(&app, json!({"artifactName": "Seed"})).await;
        let uri = format!("/artifacts/mine/{id}");

        let mut results = Vec::new();
        for _ in 0..2 {
            let resp = app
                .router()
                .oneshot(request(Method::PATCH, &uri, Some(writer_payload(0)), None))
                .await
                .unwrap();
            results.push(parse_body(resp).await);
        }

        assert_eq!(results[0]["modifiedCount"], 1);
        assert_eq!(results[1]["matchedCount"], 1);
        assert_eq!(results[1]["modifiedCount"], 0);
    }
}

mod test_discovery {
    use super::*;

    #[tokio::test]
    async fn test_featured_ranks_unliked_last() {
        let app = TestApp::new();
        for likes in [json!(2), json!("many"), json!(8), Value::Null, json!("5")] {
            create(&app, json!({"likes": likes})).await;
        }
        create(&app, json!({"artifactName": "No likes field"})).await;

        let resp = app
            .router()
            .oneshot(request(Method::GET, "/artifacts/featured", None, None))
            .await
            .unwrap();
        let featured = parse_body(resp).await;
        let featured = featured.as_array().unwrap();

        assert_eq!(featured.len(), 6);
        assert_eq!(featured[0]["likes"], 8);
        assert_eq!(featured[1]["likes"], "5");
        assert_eq!(featured[2]["likes"], 2);
        // Unranked documents keep store order
        assert_eq!(featured[3]["likes"], "many");
        assert_eq!(featured[4]["likes"], Value::Null);
        assert_eq!(featured[5]["artifactName"], "No likes field");
    }

    #[tokio::test]
    async fn test_search_ignores_case_and_whitespace() {
        let app = TestApp::new();
        for name in ["Dead Sea Scrolls", "Terracotta Army", "Seal of Deeds"] {
            create(&app, json!({"artifactName": name})).await;
        }

        let resp = app
            .router()
            .oneshot(request(
                Method::GET,
                "/artifacts/search?name=deadsea",
                None,
                None,
            ))
            .await
            .unwrap();
        let found = parse_body(resp).await;
        assert_eq!(found.as_array().unwrap().len(), 1);
        assert_eq!(found[0]["artifactName"], "Dead Sea Scrolls");
    }

    #[tokio::test]
    async fn test_search_empty_keyword_matches_all_named() {
        let app = TestApp::new();
        for name in ["Vase", "Helmet"] {
            create(&app, json!({"artifactName": name})).await;
        }

        let resp = app
            .router()
            .oneshot(request(Method::GET, "/artifacts/search?name=", None, None))
            .await
            .unwrap();
        assert_eq!(parse_body(resp).await.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_discovery_can_be_disabled() {
        let app = TestApp::with_env(&[("FEATURE_DISCOVERY", "false")]);
        let resp = app
            .router()
            .oneshot(request(Method::GET, "/artifacts/featured", None, None))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(app.artifacts.operations(), 0);
    }
}
