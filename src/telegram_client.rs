use crate::config::{
    RETRY_BASE_DELAY_MS, RETRY_FACTOR, RETRY_MAX_ATTEMPTS, RETRY_MAX_DELAY_SECS,
    TELEGRAM_HTTP_TIMEOUT,
};
use crate::error::TelegramDeliveryError;
use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;
use tokio_retry::Retry;
use tokio_retry::strategy::ExponentialBackoff;
use tracing::error;

/// Thin wrapper around the Telegram Bot API sendMessage endpoint
pub struct TelegramClient {
    client: Client,
    token: String,
    chat_id: String,
}

impl TelegramClient {
    pub fn new(token: String, chat_id: String) -> Result<Self> {
        Ok(Self {
            client: Client::builder()
                .timeout(TELEGRAM_HTTP_TIMEOUT)
                .build()
                .context("Failed to build Telegram HTTP client")?,
            token,
            chat_id,
        })
    }

    pub async fn send_message(&self, text: &str) -> Result<(), TelegramDeliveryError> {
        let url = format!("https://api.telegram.org/bot{}/sendMessage", self.token);

        let backoff = ExponentialBackoff::from_millis(RETRY_BASE_DELAY_MS)
            .factor(RETRY_FACTOR)
            .max_delay(Duration::from_secs(RETRY_MAX_DELAY_SECS))
            .take(RETRY_MAX_ATTEMPTS);

        let result = Retry::spawn(backoff, || async {
            let response = self
                .client
                .post(&url)
                .form(&[
                    ("chat_id", self.chat_id.as_str()),
                    ("text", text),
                    ("parse_mode", "HTML"),
                ])
                .send()
                .await?;
            response.error_for_status()?;
            Ok::<(), TelegramDeliveryError>(())
        })
        .await;

        if let Err(ref err) = result {
            error!(error = %err, "Telegram delivery failed");
        }
        result
    }
}
