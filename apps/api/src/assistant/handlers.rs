//! Axum route handlers for the assistant API.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::HeaderValue,
    response::{IntoResponse, Response},
    Json,
};

use crate::assistant::features::{random_feature, random_tip};
use crate::assistant::models::{AssistantRequest, TipResponse};
use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::state::AppState;

const RATE_LIMIT_REMAINING: &str = "x-ratelimit-remaining";

/// POST /api/rojgaar-assistant
pub async fn handle_chat(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    payload: Result<Json<AssistantRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(request) = payload.map_err(|e| AppError::Validation(e.body_text()))?;

    let reply = state.assistant.respond(user_id, &request).await?;

    let mut response = Json(reply).into_response();
    response.headers_mut().insert(
        RATE_LIMIT_REMAINING,
        HeaderValue::from(state.assistant.remaining(user_id)),
    );
    Ok(response)
}

/// GET /api/rojgaar-assistant
///
/// A random tip plus one feature to try. No session needed.
pub async fn handle_tip() -> Json<TipResponse> {
    Json(TipResponse {
        success: true,
        tip: random_tip().to_string(),
        suggested_feature: random_feature(),
    })
}
