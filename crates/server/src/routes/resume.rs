//! Resume route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use folio_core::ResumeItemId;

use super::MessageResponse;
use crate::error::{AppError, Result};
use crate::extract::ApiJson;
use crate::models::{ResumeItem, ResumeItemInput, ResumePatch};
use crate::state::AppState;

fn not_found() -> AppError {
    AppError::NotFound("Resume item not found".to_owned())
}

fn parse_id(raw: &str) -> Result<ResumeItemId> {
    raw.parse().map_err(|_| not_found())
}

/// Entries of one type, ascending by `order`.
///
/// GET /api/resume/{type}
pub async fn by_type(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> Result<Json<Vec<ResumeItem>>> {
    let items = state.store().list_resume(&kind).await?;
    Ok(Json(items))
}

/// GET /api/resume/item/{id}
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ResumeItem>> {
    let id = parse_id(&id)?;
    let item = state.store().get_resume(id).await?.ok_or_else(not_found)?;
    Ok(Json(item))
}

/// POST /api/resume
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<ResumeItemInput>,
) -> Result<(StatusCode, Json<ResumeItem>)> {
    let item = input.validate()?.into_document();
    let item = state.store().insert_resume(item).await?;

    tracing::info!(id = %item.id, kind = %item.kind, "Resume item created");
    Ok((StatusCode::CREATED, Json(item)))
}

/// PUT /api/resume/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<ResumePatch>,
) -> Result<Json<ResumeItem>> {
    let id = parse_id(&id)?;
    patch.validate()?;

    let item = state
        .store()
        .update_resume(id, &patch)
        .await?
        .ok_or_else(not_found)?;
    Ok(Json(item))
}

/// DELETE /api/resume/{id}
pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let id = parse_id(&id)?;
    if !state.store().delete_resume(id).await? {
        return Err(not_found());
    }

    tracing::info!(%id, "Resume item deleted");
    Ok(Json(MessageResponse {
        message: "Resume item deleted",
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use axum::http::Method;
    use serde_json::json;

    use super::*;
    use crate::db::MemoryStore;
    use crate::routes::test_support::{app, send};

    #[tokio::test]
    async fn test_list_sorted_by_order() {
        let app = app(Arc::new(MemoryStore::new()), None);
        for (title, order) in [("Second", 2), ("First", -1), ("Middle", 0)] {
            let (status, _) = send(
                &app,
                Method::POST,
                "/api/resume",
                Some(json!({ "type": "experience", "title": title, "order": order })),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
        }
        send(
            &app,
            Method::POST,
            "/api/resume",
            Some(json!({ "type": "education", "title": "BSc", "order": -10 })),
        )
        .await;

        let (status, body) = send(&app, Method::GET, "/api/resume/experience", None).await;

        assert_eq!(status, StatusCode::OK);
        let titles: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|item| item["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, ["First", "Middle", "Second"]);
    }

    #[tokio::test]
    async fn test_create_defaults_and_validation() {
        let app = app(Arc::new(MemoryStore::new()), None);

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/resume",
            Some(json!({ "type": "skill", "title": "Rust", "skillLevel": 4.5 })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["order"], json!(0));
        assert_eq!(body["current"], json!(false));
        assert_eq!(body["type"], json!("skill"));

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/resume",
            Some(json!({ "title": "No type" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().contains("type"));
    }

    #[tokio::test]
    async fn test_update_show_and_delete() {
        let app = app(Arc::new(MemoryStore::new()), None);
        let (_, created) = send(
            &app,
            Method::POST,
            "/api/resume",
            Some(json!({ "type": "experience", "title": "Engineer", "current": true })),
        )
        .await;
        let id = created["_id"].as_str().unwrap();

        let (status, updated) = send(
            &app,
            Method::PUT,
            &format!("/api/resume/{id}"),
            Some(json!({ "current": false, "endDate": "2024-06-30" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["current"], json!(false));
        assert!(updated["endDate"].is_string());

        let (status, fetched) = send(&app, Method::GET, &format!("/api/resume/item/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, updated);

        let (status, body) = send(&app, Method::DELETE, &format!("/api/resume/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "message": "Resume item deleted" }));

        let (status, body) = send(&app, Method::DELETE, &format!("/api/resume/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "message": "Resume item not found" }));
    }

    #[tokio::test]
    async fn test_update_unknown_id() {
        let app = app(Arc::new(MemoryStore::new()), None);
        let uri = format!("/api/resume/{}", ResumeItemId::generate());

        let (status, _) = send(&app, Method::PUT, &uri, Some(json!({ "order": 1 }))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unknown_type_is_empty_list() {
        let app = app(Arc::new(MemoryStore::new()), None);
        let (status, body) = send(&app, Method::GET, "/api/resume/volunteering", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }
}
