use crate::config::Settings;
use crate::models::{Candidate, FlowType};
use crate::telegram_client::TelegramClient;
use anyhow::Result;
use async_trait::async_trait;
use tracing::{info, warn};

/// Outbound delivery capability. The pipeline knows nothing about
/// transports; it hands ranked candidates to whatever sinks are configured.
#[async_trait]
pub trait AlertSink: Send + Sync {
    async fn send(&self, candidate: &Candidate) -> Result<()>;

    /// Sink name for logging
    fn name(&self) -> &'static str;
}

/// Logs the formatted alert instead of delivering it anywhere
pub struct ConsoleAlertSink;

#[async_trait]
impl AlertSink for ConsoleAlertSink {
    async fn send(&self, candidate: &Candidate) -> Result<()> {
        let message = format_alert_message(candidate);
        info!(
            ticker = candidate.underlying_ticker.as_str(),
            strike = candidate.strike,
            sweep = candidate.is_sweep,
            message = %message.replace('\n', " | "),
            "Alert dispatched"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "console"
    }
}

/// Delivers alerts through the Telegram Bot API
pub struct TelegramAlertSink {
    client: TelegramClient,
}

impl TelegramAlertSink {
    pub fn new(client: TelegramClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AlertSink for TelegramAlertSink {
    async fn send(&self, candidate: &Candidate) -> Result<()> {
        let message = format_alert_message(candidate);
        self.client.send_message(&message).await?;
        info!(
            ticker = candidate.underlying_ticker.as_str(),
            title = %alert_title(candidate),
            "Alert sent via Telegram"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "telegram"
    }
}

/// Build the configured sinks: console always, Telegram when enabled and
/// fully configured
pub fn build_alert_sinks(settings: &Settings) -> Vec<Box<dyn AlertSink>> {
    let mut sinks: Vec<Box<dyn AlertSink>> = vec![Box::new(ConsoleAlertSink)];

    if settings.enable_telegram {
        if settings.telegram_bot_token.is_empty() || settings.telegram_chat_id.is_empty() {
            warn!(
                "Telegram alerts enabled but TELEGRAM_BOT_TOKEN or TELEGRAM_CHAT_ID \
                 is not configured; Telegram alerts will be disabled"
            );
        } else {
            match TelegramClient::new(
                settings.telegram_bot_token.clone(),
                settings.telegram_chat_id.clone(),
            ) {
                Ok(client) => sinks.push(Box::new(TelegramAlertSink::new(client))),
                Err(err) => warn!(error = %err, "Failed to build Telegram client"),
            }
        }
    }

    sinks
}

// -----------------------------------------------
// MESSAGE FORMATTING
// -----------------------------------------------

pub fn format_alert_message(candidate: &Candidate) -> String {
    let expiration = candidate.expiration_date.format("%m-%d-%Y").to_string();
    let notional = fmt_number(Some(candidate.notional));
    let volume = fmt_count(Some(candidate.volume));

    let vol_oi_line = match candidate.open_interest {
        None => format!("📊 Vol: {} (OI N/A)", volume),
        Some(0) => format!("📊 Vol/OI: {}/0 (Ratio N/A)", volume),
        Some(oi) => format!(
            "📊 Vol/OI: {}/{} (Ratio {})",
            volume,
            fmt_count(Some(oi)),
            fmt_ratio(candidate.volume_oi_ratio)
        ),
    };

    let (mut header, mut footer) = if candidate.is_sweep {
        (
            "🚨 SWEEP DETECTED — UNUSUAL OPTIONS FLOW".to_string(),
            "#FlowBot #UnusualOptions #Sweep".to_string(),
        )
    } else {
        (
            "📢 UNUSUAL OPTIONS FLOW DETECTED".to_string(),
            "#FlowBot #UnusualOptions".to_string(),
        )
    };

    if candidate.flow_type == FlowType::Debug {
        header = format!("[DEBUG ALERT] {}", header);
        footer = format!("{} #Debug", footer);
    }

    [
        header,
        String::new(),
        alert_title(candidate),
        format!(
            "🎯 Strike: {} | ⏳ Expires: {}",
            candidate.strike, expiration
        ),
        format!("💸 Premium: ${}", notional),
        vol_oi_line,
        format!(
            "📈 Last: ${} | DTE: {}",
            fmt_number(candidate.last_price),
            candidate.dte_days
        ),
        format!("⭐ Score: {:.2}", candidate.score),
        String::new(),
        footer,
    ]
    .join("\n")
}

fn alert_title(candidate: &Candidate) -> String {
    if candidate.is_sweep {
        format!(
            "📌 {} — {} (SWEEP)",
            candidate.underlying_ticker,
            candidate.contract_type.as_str()
        )
    } else {
        format!(
            "📌 {} — {}",
            candidate.underlying_ticker,
            candidate.contract_type.as_str()
        )
    }
}

fn fmt_number(value: Option<f64>) -> String {
    match value {
        Some(v) => group_thousands(&format!("{:.2}", v)),
        None => "N/A".to_string(),
    }
}

fn fmt_count(value: Option<u64>) -> String {
    match value {
        Some(v) => group_thousands(&v.to_string()),
        None => "N/A".to_string(),
    }
}

fn fmt_ratio(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}x", v),
        None => "N/A".to_string(),
    }
}

/// Insert comma separators into the integer part of an already-formatted
/// number ("1234567.89" -> "1,234,567.89")
fn group_thousands(formatted: &str) -> String {
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted, None),
    };

    let mut grouped = String::new();
    let digits: Vec<char> = int_part.chars().collect();
    for (idx, ch) in digits.iter().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*ch);
    }

    match frac_part {
        Some(frac) => format!("{}.{}", grouped, frac),
        None => grouped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContractType, Direction};
    use chrono::NaiveDate;

    fn candidate() -> Candidate {
        Candidate {
            options_ticker: "O:SPY251219C00650000".to_string(),
            underlying_ticker: "SPY".to_string(),
            direction: Direction::Bullish,
            expiration_date: NaiveDate::from_ymd_opt(2025, 12, 19).unwrap(),
            strike: 650.0,
            contract_type: ContractType::Call,
            last_price: Some(5.0),
            volume: 1000,
            open_interest: Some(200),
            notional: 500_000.0,
            volume_oi_ratio: Some(5.0),
            rvol: None,
            dte_days: 10,
            score: 33.99,
            is_sweep: false,
            flow_type: FlowType::Standard,
        }
    }

    #[test]
    fn test_standard_alert_message() {
        let message = format_alert_message(&candidate());
        assert!(message.starts_with("📢 UNUSUAL OPTIONS FLOW DETECTED"));
        assert!(message.contains("📌 SPY — CALL"));
        assert!(message.contains("💸 Premium: $500,000.00"));
        assert!(message.contains("📊 Vol/OI: 1,000/200 (Ratio 5.00x)"));
        assert!(message.contains("⭐ Score: 33.99"));
        assert!(!message.contains("SWEEP"));
    }

    #[test]
    fn test_sweep_alert_message() {
        let mut c = candidate();
        c.is_sweep = true;
        c.flow_type = FlowType::Sweep;
        let message = format_alert_message(&c);
        assert!(message.starts_with("🚨 SWEEP DETECTED"));
        assert!(message.contains("📌 SPY — CALL (SWEEP)"));
        assert!(message.contains("#Sweep"));
    }

    #[test]
    fn test_debug_alert_message() {
        let mut c = candidate();
        c.flow_type = FlowType::Debug;
        let message = format_alert_message(&c);
        assert!(message.starts_with("[DEBUG ALERT]"));
        assert!(message.contains("#Debug"));
    }

    #[test]
    fn test_missing_and_zero_oi_lines() {
        let mut c = candidate();
        c.open_interest = None;
        assert!(format_alert_message(&c).contains("📊 Vol: 1,000 (OI N/A)"));

        c.open_interest = Some(0);
        c.volume_oi_ratio = None;
        assert!(format_alert_message(&c).contains("📊 Vol/OI: 1,000/0 (Ratio N/A)"));
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("123"), "123");
        assert_eq!(group_thousands("1234"), "1,234");
        assert_eq!(group_thousands("1234567.89"), "1,234,567.89");
    }
}
