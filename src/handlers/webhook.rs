use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::errors::AppError;
use crate::models::telegram::Update;
use crate::services::dispatch::dispatch_update;
use crate::state::AppState;

const SECRET_HEADER: &str = "x-telegram-bot-api-secret-token";

// POST /webhook/telegram
pub async fn telegram_webhook(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(update): Json<Update>,
) -> Response {
    // Skip verification when no secret is configured (dev mode).
    if !state.config.webhook_secret.is_empty() {
        let provided = headers
            .get(SECRET_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        if provided != state.config.webhook_secret {
            tracing::warn!(update_id = update.update_id, "invalid webhook secret");
            return AppError::Unauthorized.into_response();
        }
    }

    tracing::debug!(update_id = update.update_id, "incoming update");
    dispatch_update(&state, update).await;

    // Telegram redelivers anything that is not a 2xx.
    StatusCode::OK.into_response()
}
