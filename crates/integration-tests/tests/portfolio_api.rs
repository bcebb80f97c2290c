//! Portfolio API over HTTP.

use folio_core::PortfolioItemId;
use folio_integration_tests::TestApp;
use reqwest::StatusCode;
use serde_json::{Value, json};

fn project(title: &str, category: &str) -> Value {
    json!({
        "title": title,
        "category": category,
        "description": format!("{title} description"),
        "imageUrl": "https://via.placeholder.com/600x400",
    })
}

async fn create(app: &TestApp, body: &Value) -> Value {
    let resp = app
        .client
        .post(app.url("/api/portfolio"))
        .json(body)
        .send()
        .await
        .expect("Failed to create portfolio item");
    assert_eq!(resp.status(), StatusCode::CREATED);
    resp.json().await.expect("Invalid JSON")
}

async fn list(app: &TestApp, path: &str) -> Vec<Value> {
    let resp = app
        .client
        .get(app.url(path))
        .send()
        .await
        .expect("Failed to list portfolio");
    assert_eq!(resp.status(), StatusCode::OK);
    resp.json().await.expect("Invalid JSON")
}

#[tokio::test]
async fn test_create_fills_defaults() {
    let app = TestApp::spawn().await;

    let created = create(&app, &project("Weather App", "app")).await;

    assert_eq!(created["featured"], json!(false));
    assert!(created["createdAt"].is_string());
    assert!(created["_id"].as_str().is_some_and(|id| !id.is_empty()));
    assert_eq!(created["imageUrl"], json!("https://via.placeholder.com/600x400"));
}

#[tokio::test]
async fn test_create_without_title_is_rejected() {
    let app = TestApp::spawn().await;
    let mut body = project("Weather App", "app");
    body.as_object_mut().expect("object").remove("title");

    let resp = app
        .client
        .post(app.url("/api/portfolio"))
        .json(&body)
        .send()
        .await
        .expect("Request failed");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("Invalid JSON");
    assert!(body["message"].is_string());
    assert!(list(&app, "/api/portfolio").await.is_empty());
}

#[tokio::test]
async fn test_malformed_json_is_rejected() {
    let app = TestApp::spawn().await;

    let resp = app
        .client
        .post(app.url("/api/portfolio"))
        .header("content-type", "application/json")
        .body("{ not json")
        .send()
        .await
        .expect("Request failed");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("Invalid JSON");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_category_filter() {
    let app = TestApp::spawn().await;
    create(&app, &project("Shop", "web")).await;
    create(&app, &project("Game", "app")).await;
    create(&app, &project("Blog", "web")).await;

    let web = list(&app, "/api/portfolio/category/web").await;

    assert_eq!(web.len(), 2);
    assert!(web.iter().all(|item| item["category"] == json!("web")));
    assert_eq!(web[0]["title"], json!("Blog"));
}

#[tokio::test]
async fn test_update_unknown_id_is_not_found() {
    let app = TestApp::spawn().await;
    create(&app, &project("Shop", "web")).await;

    let resp = app
        .client
        .put(app.url(&format!("/api/portfolio/{}", PortfolioItemId::generate())))
        .json(&json!({ "title": "Hijacked" }))
        .send()
        .await
        .expect("Request failed");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = resp.json().await.expect("Invalid JSON");
    assert_eq!(body, json!({ "message": "Portfolio item not found" }));

    let items = list(&app, "/api/portfolio").await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], json!("Shop"));
}

#[tokio::test]
async fn test_full_lifecycle() {
    let app = TestApp::spawn().await;
    create(&app, &project("Older", "ui")).await;

    // POST
    let created = create(&app, &project("Task Manager", "web")).await;
    let id = created["_id"].as_str().expect("id").to_owned();

    // List shows it first
    let items = list(&app, "/api/portfolio").await;
    assert_eq!(items[0]["_id"], json!(id));

    // PUT title
    let resp = app
        .client
        .put(app.url(&format!("/api/portfolio/{id}")))
        .json(&json!({ "title": "Task Manager Pro", "featured": true }))
        .send()
        .await
        .expect("Update failed");
    assert_eq!(resp.status(), StatusCode::OK);

    // GET by id shows the new title
    let fetched: Value = app
        .client
        .get(app.url(&format!("/api/portfolio/{id}")))
        .send()
        .await
        .expect("Get failed")
        .json()
        .await
        .expect("Invalid JSON");
    assert_eq!(fetched["title"], json!("Task Manager Pro"));
    assert_eq!(fetched["featured"], json!(true));
    assert_eq!(fetched["category"], json!("web"));

    // DELETE
    let resp = app
        .client
        .delete(app.url(&format!("/api/portfolio/{id}")))
        .send()
        .await
        .expect("Delete failed");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Invalid JSON");
    assert_eq!(body, json!({ "message": "Portfolio item deleted" }));

    // Gone from the list, and a second delete is 404
    let items = list(&app, "/api/portfolio").await;
    assert!(items.iter().all(|item| item["_id"] != json!(id)));

    let resp = app
        .client
        .delete(app.url(&format!("/api/portfolio/{id}")))
        .send()
        .await
        .expect("Delete failed");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
