//! Login route.
//!
//! A bare credential check: no session, cookie or token is issued.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::error::{Result, set_sentry_user};
use crate::extract::ApiJson;
use crate::models::UserSummary;
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Login form data. Missing fields behave like empty strings.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    pub user: UserSummary,
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let auth = AuthService::new(state.store(), state.verifier());

    let user = auth
        .login(&request.username, &request.password)
        .await
        .inspect_err(|e| tracing::warn!(username = %request.username, error = %e, "Login failed"))?;

    set_sentry_user(&user.id, Some(user.email.as_str()));
    tracing::info!(user_id = %user.id, "Login successful");

    Ok(Json(LoginResponse {
        message: "Login successful",
        user: UserSummary::from(&user),
    }))
}
