//! Telegram Bot API sink.

use serde::Deserialize;

use homework_common::config::AppConfig;
use homework_common::error::DeliveryError;

use crate::MessageSink;

/// Sends messages to a single Telegram chat via `sendMessage`.
#[derive(Debug, Clone)]
pub struct TelegramBot {
    client: reqwest::Client,
    api_url: String,
    token: String,
    chat_id: String,
}

#[derive(Debug, Deserialize)]
struct TelegramApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

impl TelegramBot {
    pub fn new(
        client: reqwest::Client,
        api_url: impl Into<String>,
        token: impl Into<String>,
        chat_id: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_url: api_url.into(),
            token: token.into(),
            chat_id: chat_id.into(),
        }
    }

    pub fn from_config(client: reqwest::Client, config: &AppConfig) -> Self {
        Self::new(
            client,
            config.telegram_api_url.clone(),
            config.telegram_token.clone(),
            config.telegram_chat_id.clone(),
        )
    }

    fn method_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{}",
            self.api_url.trim_end_matches('/'),
            self.token,
            method
        )
    }
}

impl MessageSink for TelegramBot {
    async fn deliver(&self, text: &str) -> Result<(), DeliveryError> {
        let body = serde_json::json!({
            "chat_id": self.chat_id,
            "text": text,
        });

        // `without_url` keeps the bot token out of error messages.
        let response = self
            .client
            .post(self.method_url("sendMessage"))
            .json(&body)
            .send()
            .await
            .map_err(|e| DeliveryError::Request(e.without_url().to_string()))?;

        let status = response.status();
        let reply = response.json::<TelegramApiResponse>().await.ok();

        match reply {
            Some(reply) if status.is_success() && reply.ok => Ok(()),
            reply => Err(DeliveryError::Rejected {
                status: status.as_u16(),
                description: reply
                    .and_then(|r| r.description)
                    .unwrap_or_else(|| "no description".to_string()),
            }),
        }
    }
}
