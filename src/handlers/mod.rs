pub mod dev;
pub mod health;
pub mod webhook;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Shared by `main` and the integration tests. Developer endpoints are only
/// mounted when `dev_api` is enabled.
pub fn router(state: Arc<AppState>) -> Router {
    let mut app = Router::new()
        .route("/health", get(health::health))
        .route("/webhook/telegram", post(webhook::telegram_webhook));

    if state.config.dev_api {
        app = app
            .route("/api/dev/reset", post(dev::reset))
            .route("/api/dev/event", post(dev::send_event))
            .route(
                "/api/dev/session/:chat_id/:user_id",
                get(dev::get_session),
            );
    }

    app.layer(TraceLayer::new_for_http()).with_state(state)
}
