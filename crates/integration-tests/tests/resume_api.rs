//! Resume API over HTTP.

use folio_integration_tests::TestApp;
use reqwest::StatusCode;
use serde_json::{Value, json};

async fn create(app: &TestApp, body: Value) -> Value {
    let resp = app
        .client
        .post(app.url("/api/resume"))
        .json(&body)
        .send()
        .await
        .expect("Failed to create resume item");
    assert_eq!(resp.status(), StatusCode::CREATED);
    resp.json().await.expect("Invalid JSON")
}

async fn titles(app: &TestApp, kind: &str) -> Vec<String> {
    let items: Vec<Value> = app
        .client
        .get(app.url(&format!("/api/resume/{kind}")))
        .send()
        .await
        .expect("Failed to list resume")
        .json()
        .await
        .expect("Invalid JSON");
    items
        .iter()
        .map(|item| item["title"].as_str().unwrap_or_default().to_owned())
        .collect()
}

#[tokio::test]
async fn test_entries_sorted_by_order() {
    let app = TestApp::spawn().await;
    create(&app, json!({ "type": "experience", "title": "Senior", "order": 2 })).await;
    create(&app, json!({ "type": "experience", "title": "Junior" })).await;
    create(&app, json!({ "type": "experience", "title": "Pinned", "order": -1 })).await;
    create(&app, json!({ "type": "experience", "title": "Mid", "order": 2 })).await;
    create(&app, json!({ "type": "skill", "title": "Rust", "skillLevel": 5 })).await;

    assert_eq!(
        titles(&app, "experience").await,
        ["Pinned", "Junior", "Senior", "Mid"]
    );
    assert_eq!(titles(&app, "skill").await, ["Rust"]);
    assert!(titles(&app, "education").await.is_empty());
}

#[tokio::test]
async fn test_reorder_and_delete() {
    let app = TestApp::spawn().await;
    create(&app, json!({ "type": "education", "title": "BSc", "order": 0 })).await;
    let msc = create(&app, json!({ "type": "education", "title": "MSc", "order": 1 })).await;
    let id = msc["_id"].as_str().expect("id");

    let resp = app
        .client
        .put(app.url(&format!("/api/resume/{id}")))
        .json(&json!({ "order": -5 }))
        .send()
        .await
        .expect("Update failed");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(titles(&app, "education").await, ["MSc", "BSc"]);

    let fetched: Value = app
        .client
        .get(app.url(&format!("/api/resume/item/{id}")))
        .send()
        .await
        .expect("Get failed")
        .json()
        .await
        .expect("Invalid JSON");
    assert_eq!(fetched["order"], json!(-5));

    let resp = app
        .client
        .delete(app.url(&format!("/api/resume/{id}")))
        .send()
        .await
        .expect("Delete failed");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(titles(&app, "education").await, ["BSc"]);

    let resp = app
        .client
        .get(app.url(&format!("/api/resume/item/{id}")))
        .send()
        .await
        .expect("Get failed");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_missing_type_is_rejected() {
    let app = TestApp::spawn().await;

    let resp = app
        .client
        .post(app.url("/api/resume"))
        .json(&json!({ "title": "Orphan" }))
        .send()
        .await
        .expect("Request failed");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
