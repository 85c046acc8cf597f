use std::sync::Arc;

use crate::models::telegram::{CallbackQuery, Message, Update};
use crate::models::{Keyboard, SessionKey, View};
use crate::services::wizard::RenderInstruction;
use crate::state::AppState;

const UNKNOWN_COMMAND: &str = "Unknown command";

/// Routes one inbound update to the wizard and sends whatever it asks for.
/// Failures are logged; nothing here is fatal to the process.
pub async fn dispatch_update(state: &Arc<AppState>, update: Update) {
    if let Some(query) = update.callback_query {
        handle_callback(state, query).await;
    } else if let Some(message) = update.message {
        handle_message(state, message).await;
    } else {
        tracing::debug!(update_id = update.update_id, "ignoring unsupported update");
    }
}

async fn handle_message(state: &Arc<AppState>, message: Message) {
    let chat_id = message.chat.id;
    let Some(command) = message.command() else {
        tracing::info!(chat_id, "unknown update, not a command");
        return;
    };
    let Some(user_id) = message.from.as_ref().map(|u| u.id) else {
        tracing::warn!(chat_id, "command without sender, ignoring");
        return;
    };

    let view = match command {
        "start" | "reset" => {
            let key = SessionKey::new(chat_id, user_id);
            state.wizard.handle_reset(key, state.today())
        }
        other => {
            tracing::info!(chat_id, user_id, command = other, "unknown command");
            View {
                text: UNKNOWN_COMMAND.to_string(),
                keyboard: Keyboard::default(),
            }
        }
    };

    if let Err(e) = state.messaging.send_message(chat_id, &view).await {
        tracing::error!(error = %e, chat_id, "failed to send message");
    }
}

async fn handle_callback(state: &Arc<AppState>, query: CallbackQuery) {
    let Some(message) = query.message.as_ref() else {
        tracing::warn!(callback_id = %query.id, "callback without message, ignoring");
        answer(state, &query.id, None).await;
        return;
    };
    let key = SessionKey::new(message.chat.id, query.from.id);
    let data = query.data.as_deref().unwrap_or_default();

    let notice = match state.wizard.handle_event(key, data, state.today()) {
        Ok(RenderInstruction::Edit { view }) => {
            if let Err(e) = state
                .messaging
                .edit_message(key.chat_id, message.message_id, &view)
                .await
            {
                tracing::error!(error = %e, chat_id = key.chat_id, "failed to edit message");
            }
            None
        }
        Ok(RenderInstruction::NoOp) => None,
        Err(e) => {
            tracing::warn!(
                chat_id = key.chat_id,
                user_id = key.user_id,
                error = %e,
                "event rejected"
            );
            Some(e.to_string())
        }
    };

    answer(state, &query.id, notice.as_deref()).await;
}

async fn answer(state: &Arc<AppState>, callback_id: &str, text: Option<&str>) {
    if let Err(e) = state.messaging.answer_callback(callback_id, text).await {
        tracing::error!(error = %e, "failed to answer callback");
    }
}
