use std::env;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UpdateMode {
    Webhook,
    Polling,
}

impl UpdateMode {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "polling" | "poll" => UpdateMode::Polling,
            _ => UpdateMode::Webhook,
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub telegram_bot_token: String,
    pub telegram_api_url: String,
    pub webhook_secret: String,
    pub update_mode: UpdateMode,
    pub poll_timeout_secs: u64,
    pub dev_api: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            telegram_bot_token: env::var("TELEGRAM_BOT_TOKEN").unwrap_or_default(),
            telegram_api_url: env::var("TELEGRAM_API_URL")
                .unwrap_or_else(|_| "https://api.telegram.org".to_string()),
            webhook_secret: env::var("TELEGRAM_WEBHOOK_SECRET").unwrap_or_default(),
            update_mode: env::var("UPDATE_MODE")
                .map(|v| UpdateMode::parse(&v))
                .unwrap_or(UpdateMode::Webhook),
            poll_timeout_secs: env::var("POLL_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
            dev_api: env::var("DEV_API")
                .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
                .unwrap_or(false),
        }
    }
}
