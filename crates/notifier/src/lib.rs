//! Notification delivery to the configured Telegram chat.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use relay_common::config::AppConfig;
use relay_common::error::RelayError;

/// Delivers a plain-text message to a single destination.
///
/// One call makes exactly one delivery attempt; retrying is the caller's concern.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, message: &str) -> Result<(), RelayError>;
}

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
}

/// Subset of the Bot API response envelope.
#[derive(Debug, Deserialize)]
struct BotResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Telegram Bot API `sendMessage` client.
#[derive(Debug, Clone)]
pub struct TelegramNotifier {
    client: reqwest::Client,
    api_url: String,
    token: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(
        api_url: impl Into<String>,
        token: impl Into<String>,
        chat_id: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            chat_id: chat_id.into(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.telegram_api_url.clone(),
            config.telegram_token.clone(),
            config.telegram_chat_id.clone(),
        )
    }

    fn send_message_url(&self) -> String {
        format!("{}/bot{}/sendMessage", self.api_url, self.token)
    }

    async fn send(&self, message: &str) -> Result<(), RelayError> {
        let response = self
            .client
            .post(self.send_message_url())
            .json(&SendMessage {
                chat_id: &self.chat_id,
                text: message,
            })
            .send()
            .await
            .map_err(|e| RelayError::Delivery(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            // Bot API failures are 4xx/5xx with an `{"ok": false, "description": ..}` body.
            let description = response
                .json::<BotResponse>()
                .await
                .ok()
                .and_then(|body| body.description);
            return Err(RelayError::Delivery(description.unwrap_or_else(|| {
                format!("Bot API returned status code {}", status.as_u16())
            })));
        }

        let body: BotResponse = response
            .json()
            .await
            .map_err(|e| RelayError::Delivery(e.without_url().to_string()))?;
        if !body.ok {
            return Err(RelayError::Delivery(
                body.description
                    .unwrap_or_else(|| "Bot API rejected the message".to_string()),
            ));
        }

        Ok(())
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, message: &str) -> Result<(), RelayError> {
        tracing::info!(chat_id = %self.chat_id, "Sending message");
        match self.send(message).await {
            Ok(()) => {
                tracing::info!(chat_id = %self.chat_id, "Message sent");
                Ok(())
            }
            Err(e) => {
                tracing::error!(chat_id = %self.chat_id, error = %e, "Failed to send message");
                Err(e)
            }
        }
    }
}
