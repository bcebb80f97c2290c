//! JSON API route handlers.
//!
//! # Route Structure
//!
//! ```text
//! # Portfolio
//! GET    /api/portfolio                      - All items, newest first
//! GET    /api/portfolio/category/{category}  - Items in one category
//! GET    /api/portfolio/{id}                 - One item
//! POST   /api/portfolio                      - Create item
//! PUT    /api/portfolio/{id}                 - Partial update
//! DELETE /api/portfolio/{id}                 - Delete item
//!
//! # Resume
//! GET    /api/resume/{type}                  - Entries of one type, by `order`
//! GET    /api/resume/item/{id}               - One entry
//! POST   /api/resume                         - Create entry
//! PUT    /api/resume/{id}                    - Partial update
//! DELETE /api/resume/{id}                    - Delete entry
//!
//! # Contact
//! POST   /api/contact                        - Relay a contact form message
//!
//! # Auth
//! POST   /api/auth/login                     - Credential check, no session
//! ```
//!
//! Write routes are not authenticated.

pub mod auth;
pub mod contact;
pub mod portfolio;
pub mod resume;

use axum::{
    Router,
    routing::{get, post},
};
use serde::Serialize;

use crate::state::AppState;

/// Body of confirmation responses.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Create the portfolio routes router.
pub fn portfolio_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(portfolio::index).post(portfolio::create))
        .route("/category/{category}", get(portfolio::by_category))
        .route(
            "/{id}",
            get(portfolio::show)
                .put(portfolio::update)
                .delete(portfolio::destroy),
        )
}

/// Create the resume routes router.
///
/// `GET /{key}` takes a type while `PUT`/`DELETE /{key}` take an identifier;
/// the single-entry read lives under `/item/{id}`.
pub fn resume_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(resume::create))
        .route("/item/{id}", get(resume::show))
        .route(
            "/{key}",
            get(resume::by_type)
                .put(resume::update)
                .delete(resume::destroy),
        )
}

/// Create all API routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/portfolio", portfolio_routes())
        .nest("/api/resume", resume_routes())
        .route("/api/contact", post(contact::submit))
        .route("/api/auth/login", post(auth::login))
}
