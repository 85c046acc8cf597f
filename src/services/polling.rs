use std::sync::Arc;
use std::time::Duration;

use crate::services::dispatch::dispatch_update;
use crate::services::messaging::telegram::TelegramProvider;
use crate::state::AppState;

const RETRY_DELAY: Duration = Duration::from_secs(5);

/// Pulls updates with `getUpdates` forever, dispatching each on its own task.
pub async fn run(state: Arc<AppState>, telegram: TelegramProvider) {
    let timeout_secs = state.config.poll_timeout_secs;
    let mut offset = 0_i64;

    tracing::info!(timeout_secs, "starting long polling");

    loop {
        let updates = match telegram.get_updates(offset, timeout_secs).await {
            Ok(updates) => updates,
            Err(e) => {
                tracing::error!(error = %e, "failed to fetch updates");
                tokio::time::sleep(RETRY_DELAY).await;
                continue;
            }
        };

        for update in updates {
            offset = offset.max(update.update_id + 1);
            let state = Arc::clone(&state);
            tokio::spawn(async move {
                dispatch_update(&state, update).await;
            });
        }
    }
}
