//! Contact form route.

use axum::{Json, extract::State};

use super::MessageResponse;
use crate::error::Result;
use crate::extract::ApiJson;
use crate::services::contact::ContactInput;
use crate::services::email::EmailError;
use crate::state::AppState;

/// POST /api/contact
///
/// Delivery failures, including a missing mail transport, answer 500 with a
/// generic message; the cause is only logged.
pub async fn submit(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<ContactInput>,
) -> Result<Json<MessageResponse>> {
    let contact = input.validate()?;
    let relay = state.contact().ok_or(EmailError::NotConfigured)?;

    relay.submit(&contact).await?;

    tracing::info!(from = %contact.email, "Contact message relayed");
    Ok(Json(MessageResponse {
        message: "Message sent successfully",
    }))
}
