use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::{SessionKey, View, WizardState};
use crate::services::wizard::RenderInstruction;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct DevSession {
    pub chat_id: i64,
    pub user_id: i64,
}

#[derive(Deserialize)]
pub struct DevEvent {
    pub chat_id: i64,
    pub user_id: i64,
    pub data: String,
}

#[derive(Serialize)]
pub struct DevEventResponse {
    pub instruction: RenderInstruction,
    pub state: Option<WizardState>,
}

// POST /api/dev/reset
pub async fn reset(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<DevSession>,
) -> Json<View> {
    let key = SessionKey::new(payload.chat_id, payload.user_id);
    Json(state.wizard.handle_reset(key, state.today()))
}

// POST /api/dev/event
pub async fn send_event(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<DevEvent>,
) -> Result<Json<DevEventResponse>, AppError> {
    let key = SessionKey::new(payload.chat_id, payload.user_id);
    let instruction = state
        .wizard
        .handle_event(key, &payload.data, state.today())?;

    Ok(Json(DevEventResponse {
        instruction,
        state: state.wizard.session(key),
    }))
}

// GET /api/dev/session/:chat_id/:user_id
pub async fn get_session(
    State(state): State<Arc<AppState>>,
    Path((chat_id, user_id)): Path<(i64, i64)>,
) -> Result<Json<WizardState>, AppError> {
    state
        .wizard
        .session(SessionKey::new(chat_id, user_id))
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("session {chat_id}/{user_id}")))
}
