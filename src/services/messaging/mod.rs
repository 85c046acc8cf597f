pub mod telegram;

use async_trait::async_trait;

use crate::models::View;

#[async_trait]
pub trait MessagingProvider: Send + Sync {
    /// Posts a new message carrying `view`.
    async fn send_message(&self, chat_id: i64, view: &View) -> anyhow::Result<()>;

    /// Replaces the text and grid of an existing message.
    async fn edit_message(&self, chat_id: i64, message_id: i64, view: &View) -> anyhow::Result<()>;

    /// Acknowledges a button press, optionally showing `text` to the user.
    async fn answer_callback(&self, callback_id: &str, text: Option<&str>) -> anyhow::Result<()>;
}
