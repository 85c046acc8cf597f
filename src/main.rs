use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use meetbot::config::{AppConfig, UpdateMode};
use meetbot::handlers;
use meetbot::services::messaging::telegram::TelegramProvider;
use meetbot::services::polling;
use meetbot::services::wizard::Wizard;
use meetbot::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();
    anyhow::ensure!(
        !config.telegram_bot_token.is_empty(),
        "TELEGRAM_BOT_TOKEN must be set"
    );

    let new_telegram = || {
        TelegramProvider::new(
            config.telegram_api_url.clone(),
            config.telegram_bot_token.clone(),
        )
    };

    let state = Arc::new(AppState {
        config: config.clone(),
        wizard: Wizard::in_memory(),
        messaging: Box::new(new_telegram()),
    });

    if config.update_mode == UpdateMode::Polling {
        tokio::spawn(polling::run(Arc::clone(&state), new_telegram()));
    } else if config.webhook_secret.is_empty() {
        tracing::warn!("TELEGRAM_WEBHOOK_SECRET not set, webhook requests are not verified");
    }

    let app = handlers::router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!(mode = ?config.update_mode, dev_api = config.dev_api, "starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
