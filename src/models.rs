use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Option side of a canonical contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ContractType {
    Call,
    Put,
}

impl ContractType {
    /// Parse provider spellings ("call", "CALL", "C", ...)
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "CALL" | "C" => Some(ContractType::Call),
            "PUT" | "P" => Some(ContractType::Put),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContractType::Call => "CALL",
            ContractType::Put => "PUT",
        }
    }
}

/// Directional read of the flow: calls are bullish, puts are bearish
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Bullish,
    Bearish,
}

impl From<ContractType> for Direction {
    fn from(side: ContractType) -> Self {
        match side {
            ContractType::Call => Direction::Bullish,
            ContractType::Put => Direction::Bearish,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FlowType {
    Standard,
    Sweep,
    Debug,
}

/// Canonical per-cycle snapshot of one option instrument.
///
/// Built by the normalizer, never mutated afterwards. Optional fields stay
/// None when the provider record did not carry them; the pipeline decides
/// what a missing field means.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    pub options_ticker: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub underlying_ticker: Option<String>,

    /// ISO date string (YYYY-MM-DD); parsed by the pipeline
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub strike: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_type: Option<ContractType>,

    // Price basis
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_price: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_trade_price: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bid: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ask: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub midpoint: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_close: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_day_close: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub underlying_price: Option<f64>,

    // Size basis
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_volume: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_day_volume: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_interest: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_open_interest: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_day_open_interest: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub shares_per_contract: Option<f64>,

    // Upstream extras
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notional: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rvol: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sweep: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub trade_count: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub trade_size: Option<u64>,
}

/// Why a contract was dropped by the pipeline.
///
/// Labels are stable; rejection logs and tests rely on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    #[serde(rename = "missing_expiry")]
    MissingExpiry,
    #[serde(rename = "missing_contract_type")]
    MissingContractType,
    #[serde(rename = "dte")]
    Dte,
    #[serde(rename = "volume")]
    Volume,
    #[serde(rename = "open_interest")]
    OpenInterest,
    #[serde(rename = "trade_count")]
    TradeCount,
    #[serde(rename = "trade_size")]
    TradeSize,
    #[serde(rename = "price")]
    Price,
    #[serde(rename = "notional")]
    Notional,
    #[serde(rename = "vol/oi")]
    VolumeOiRatio,
    #[serde(rename = "rvol")]
    Rvol,
    #[serde(rename = "otm")]
    Otm,
    #[serde(rename = "spread")]
    Spread,
    #[serde(rename = "score")]
    Score,
}

impl RejectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectReason::MissingExpiry => "missing_expiry",
            RejectReason::MissingContractType => "missing_contract_type",
            RejectReason::Dte => "dte",
            RejectReason::Volume => "volume",
            RejectReason::OpenInterest => "open_interest",
            RejectReason::TradeCount => "trade_count",
            RejectReason::TradeSize => "trade_size",
            RejectReason::Price => "price",
            RejectReason::Notional => "notional",
            RejectReason::VolumeOiRatio => "vol/oi",
            RejectReason::Rvol => "rvol",
            RejectReason::Otm => "otm",
            RejectReason::Spread => "spread",
            RejectReason::Score => "score",
        }
    }
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An accepted contract, ready for delivery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    pub options_ticker: String,
    pub underlying_ticker: String,
    pub direction: Direction,
    pub expiration_date: NaiveDate,
    pub strike: f64,
    pub contract_type: ContractType,
    pub last_price: Option<f64>,
    pub volume: u64,
    pub open_interest: Option<u64>,
    pub notional: f64,
    pub volume_oi_ratio: Option<f64>,
    pub rvol: Option<f64>,
    pub dte_days: i64,
    pub score: f64,
    pub is_sweep: bool,
    pub flow_type: FlowType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_type_parsing() {
        assert_eq!(ContractType::parse("call"), Some(ContractType::Call));
        assert_eq!(ContractType::parse("CALL"), Some(ContractType::Call));
        assert_eq!(ContractType::parse(" put "), Some(ContractType::Put));
        assert_eq!(ContractType::parse("P"), Some(ContractType::Put));
        assert_eq!(ContractType::parse("straddle"), None);
    }

    #[test]
    fn test_direction_from_contract_type() {
        assert_eq!(Direction::from(ContractType::Call), Direction::Bullish);
        assert_eq!(Direction::from(ContractType::Put), Direction::Bearish);
    }

    #[test]
    fn test_reject_reason_labels() {
        assert_eq!(RejectReason::MissingExpiry.as_str(), "missing_expiry");
        assert_eq!(RejectReason::Dte.as_str(), "dte");
        assert_eq!(RejectReason::VolumeOiRatio.as_str(), "vol/oi");
    }
}
