use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::services::wizard::WizardError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("wizard error: {0}")]
    Wizard(#[from] WizardError),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("unauthorized")]
    Unauthorized,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Wizard(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized => StatusCode::FORBIDDEN,
        };

        let body = serde_json::json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}
