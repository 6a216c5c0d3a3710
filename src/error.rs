use std::fmt;

/// Failure to map a raw snapshot record into a canonical contract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizeError {
    MissingTicker,
}

impl fmt::Display for NormalizeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            NormalizeError::MissingTicker => {
                write!(f, "snapshot record has no resolvable options ticker")
            }
        }
    }
}

impl std::error::Error for NormalizeError {}

/// Telegram Bot API delivery failure after retries were exhausted
#[derive(Debug)]
pub enum TelegramDeliveryError {
    Request(String),
    Status(String),
}

impl fmt::Display for TelegramDeliveryError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TelegramDeliveryError::Request(msg) => write!(f, "Telegram request error: {}", msg),
            TelegramDeliveryError::Status(msg) => write!(f, "Telegram API error: {}", msg),
        }
    }
}

impl std::error::Error for TelegramDeliveryError {}

impl From<reqwest::Error> for TelegramDeliveryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_status() {
            TelegramDeliveryError::Status(err.to_string())
        } else {
            TelegramDeliveryError::Request(err.to_string())
        }
    }
}
