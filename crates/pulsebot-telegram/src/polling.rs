//! Telegram long-polling loop.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use pulsebot_types::InboundMessage;

use crate::api::TelegramApi;
use crate::types::GetUpdatesParams;

/// Run the long-polling loop, converting Telegram updates to
/// [`InboundMessage`].
///
/// Exits when `cancel` is cancelled or the `sender` is closed.
pub async fn run_polling_loop(
    api: &TelegramApi,
    sender: mpsc::Sender<InboundMessage>,
    cancel: CancellationToken,
) {
    let mut offset: Option<i64> = None;
    let mut backoff = Duration::from_secs(1);
    let max_backoff = Duration::from_secs(30);

    info!("telegram polling loop started");

    loop {
        if cancel.is_cancelled() {
            break;
        }

        let params = GetUpdatesParams {
            offset,
            timeout: Some(30),
            allowed_updates: Some(vec!["message".into()]),
        };

        let updates = tokio::select! {
            _ = cancel.cancelled() => break,
            result = api.get_updates(&params) => result,
        };

        match updates {
            Ok(updates) => {
                backoff = Duration::from_secs(1);

                for update in updates {
                    offset = Some(update.update_id + 1);

                    let Some(msg) = update.message else {
                        continue;
                    };
                    let Some(text) = msg.text else {
                        continue;
                    };

                    let sender_id = msg.from.as_ref().map(|u| u.id).unwrap_or(msg.chat.id);
                    let sender_name = msg.from.as_ref().map(|u| u.display_name());

                    let inbound = InboundMessage {
                        chat_id: msg.chat.id,
                        sender_id,
                        sender_name,
                        text,
                        timestamp: msg.date * 1000,
                    };

                    debug!(update_id = update.update_id, "forwarding telegram message");

                    if sender.send(inbound).await.is_err() {
                        info!("inbound channel closed, stopping polling");
                        return;
                    }
                }
            }
            Err(e) => {
                warn!(backoff_secs = backoff.as_secs(), "getUpdates error: {e}");

                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = tokio::time::sleep(backoff) => {}
                }

                backoff = (backoff * 2).min(max_backoff);
            }
        }
    }

    info!("telegram polling loop stopped");
}
