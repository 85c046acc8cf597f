use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use super::MessagingProvider;
use crate::models::telegram::{ApiResponse, Update};
use crate::models::View;

pub struct TelegramProvider {
    api_url: String,
    token: String,
    client: reqwest::Client,
}

impl TelegramProvider {
    pub fn new(api_url: String, token: String) -> Self {
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            token,
            client: reqwest::Client::new(),
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_url, self.token, method)
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        body: &Value,
        timeout: Option<Duration>,
    ) -> anyhow::Result<Option<T>> {
        let mut request = self.client.post(self.method_url(method)).json(body);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response: ApiResponse<T> = request
            .send()
            .await
            .with_context(|| format!("failed to call Telegram {method}"))?
            .error_for_status()
            .with_context(|| format!("Telegram {method} returned error"))?
            .json()
            .await
            .with_context(|| format!("invalid Telegram {method} response"))?;

        anyhow::ensure!(
            response.ok,
            "Telegram {method} failed: {}",
            response.description.unwrap_or_default()
        );
        Ok(response.result)
    }

    /// Long-polls for updates after `offset`.
    pub async fn get_updates(&self, offset: i64, timeout_secs: u64) -> anyhow::Result<Vec<Update>> {
        let body = json!({
            "offset": offset,
            "timeout": timeout_secs,
            "allowed_updates": ["message", "callback_query"],
        });
        // Leave headroom over the server-side wait.
        let timeout = Duration::from_secs(timeout_secs + 10);
        let updates: Option<Vec<Update>> = self.call("getUpdates", &body, Some(timeout)).await?;
        Ok(updates.unwrap_or_default())
    }
}

fn message_body(chat_id: i64, view: &View) -> Value {
    let mut body = json!({
        "chat_id": chat_id,
        "text": view.text,
    });
    if !view.keyboard.rows.is_empty() {
        body["reply_markup"] = view.keyboard.to_inline_markup();
    }
    body
}

#[async_trait]
impl MessagingProvider for TelegramProvider {
    async fn send_message(&self, chat_id: i64, view: &View) -> anyhow::Result<()> {
        self.call::<Value>("sendMessage", &message_body(chat_id, view), None)
            .await?;
        Ok(())
    }

    async fn edit_message(&self, chat_id: i64, message_id: i64, view: &View) -> anyhow::Result<()> {
        let mut body = message_body(chat_id, view);
        body["message_id"] = json!(message_id);
        self.call::<Value>("editMessageText", &body, None).await?;
        Ok(())
    }

    async fn answer_callback(&self, callback_id: &str, text: Option<&str>) -> anyhow::Result<()> {
        let mut body = json!({ "callback_query_id": callback_id });
        if let Some(text) = text {
            body["text"] = json!(text);
        }
        self.call::<Value>("answerCallbackQuery", &body, None).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Action, Button, Keyboard};

    #[test]
    fn test_method_url() {
        let provider = TelegramProvider::new("https://api.telegram.org/".into(), "123:abc".into());
        assert_eq!(
            provider.method_url("sendMessage"),
            "https://api.telegram.org/bot123:abc/sendMessage"
        );
    }

    #[test]
    fn test_message_body_with_keyboard() {
        let view = View {
            text: "Pick a starting time".to_string(),
            keyboard: Keyboard::new(vec![vec![Button::new("Back", Action::Back)]]),
        };
        let body = message_body(7, &view);
        assert_eq!(body["chat_id"], 7);
        assert_eq!(body["text"], "Pick a starting time");
        assert_eq!(
            body["reply_markup"]["inline_keyboard"][0][0]["text"],
            "Back"
        );
    }

    #[test]
    fn test_message_body_plain_text() {
        let view = View {
            text: "Unknown command".to_string(),
            keyboard: Keyboard::default(),
        };
        let body = message_body(7, &view);
        assert!(body.get("reply_markup").is_none());
    }
}
