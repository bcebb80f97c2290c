//! Portfolio route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;

use folio_core::PortfolioItemId;

use super::MessageResponse;
use crate::error::{AppError, Result};
use crate::extract::ApiJson;
use crate::models::{PortfolioItem, PortfolioItemInput, PortfolioPatch};
use crate::state::AppState;

fn not_found() -> AppError {
    AppError::NotFound("Portfolio item not found".to_owned())
}

/// A malformed identifier cannot match any item.
fn parse_id(raw: &str) -> Result<PortfolioItemId> {
    raw.parse().map_err(|_| not_found())
}

/// All portfolio items, newest first.
///
/// GET /api/portfolio
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<PortfolioItem>>> {
    let items = state.store().list_portfolio(None).await?;
    Ok(Json(items))
}

/// Items in one category (exact match).
///
/// GET /api/portfolio/category/{category}
pub async fn by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<Vec<PortfolioItem>>> {
    let items = state.store().list_portfolio(Some(&category)).await?;
    Ok(Json(items))
}

/// GET /api/portfolio/{id}
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PortfolioItem>> {
    let id = parse_id(&id)?;
    let item = state.store().get_portfolio(id).await?.ok_or_else(not_found)?;
    Ok(Json(item))
}

/// POST /api/portfolio
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<PortfolioItemInput>,
) -> Result<(StatusCode, Json<PortfolioItem>)> {
    let item = input.validate()?.into_document(Utc::now());
    let item = state.store().insert_portfolio(item).await?;

    tracing::info!(id = %item.id, category = %item.category, "Portfolio item created");
    Ok((StatusCode::CREATED, Json(item)))
}

/// PUT /api/portfolio/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<PortfolioPatch>,
) -> Result<Json<PortfolioItem>> {
    let id = parse_id(&id)?;
    patch.validate()?;

    let item = state
        .store()
        .update_portfolio(id, &patch)
        .await?
        .ok_or_else(not_found)?;
    Ok(Json(item))
}

/// DELETE /api/portfolio/{id}
pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let id = parse_id(&id)?;
    if !state.store().delete_portfolio(id).await? {
        return Err(not_found());
    }

    tracing::info!(%id, "Portfolio item deleted");
    Ok(Json(MessageResponse {
        message: "Portfolio item deleted",
    }))
}
