use crate::error::NormalizeError;
use crate::models::{Contract, ContractType};
use serde_json::Value;

// -----------------------------------------------
// CANONICAL FIELD -> ORDERED SOURCE PATHS
// -----------------------------------------------
// One table drives the whole normalization: each canonical field lists the
// candidate source paths in priority order, first present non-null wins.
// Dotted segments descend into nested objects. The canonical flat name is
// always first, which makes normalization idempotent over records that are
// already canonical.
const OPTIONS_TICKER: &[&str] = &["options_ticker", "ticker", "details.ticker"];
const UNDERLYING_TICKER: &[&str] = &[
    "underlying_ticker",
    "underlying_symbol",
    "underlying_asset.ticker",
];
const EXPIRATION_DATE: &[&str] = &[
    "expiration_date",
    "details.expiration_date",
    "expiry",
    "expiry_date",
];
const STRIKE: &[&str] = &["strike", "strike_price", "details.strike_price"];
const CONTRACT_TYPE: &[&str] = &["contract_type", "details.contract_type", "type", "side"];
const LAST_PRICE: &[&str] = &["last_price", "lastPrice", "price"];
const LAST_TRADE_PRICE: &[&str] = &["last_trade_price", "last_trade.price", "trade.price"];
const BID: &[&str] = &["bid", "last_quote.bid", "quote.bid"];
const ASK: &[&str] = &["ask", "last_quote.ask", "quote.ask"];
const MIDPOINT: &[&str] = &["midpoint", "last_quote.midpoint"];
const DAY_CLOSE: &[&str] = &["day_close", "day.close", "session.close"];
const PREV_DAY_CLOSE: &[&str] = &[
    "prev_day_close",
    "prev_day.close",
    "previous_day.close",
    "day.previous_close",
];
const UNDERLYING_PRICE: &[&str] = &[
    "underlying_price",
    "underlying_asset.price",
    "underlying_asset.last_quote.midpoint",
];
const VOLUME: &[&str] = &["volume"];
const DAY_VOLUME: &[&str] = &["day_volume", "day.volume", "session.volume"];
const PREV_DAY_VOLUME: &[&str] = &["prev_day_volume", "prev_day.volume", "previous_day.volume"];
const OPEN_INTEREST: &[&str] = &["open_interest", "openInterest", "oi"];
const DAY_OPEN_INTEREST: &[&str] = &["day_open_interest", "day.open_interest"];
const PREV_DAY_OPEN_INTEREST: &[&str] = &[
    "prev_day_open_interest",
    "prev_day.open_interest",
    "previous_day.open_interest",
];
const SHARES_PER_CONTRACT: &[&str] = &[
    "shares_per_contract",
    "details.shares_per_contract",
    "contract_multiplier",
    "multiplier",
];
const NOTIONAL: &[&str] = &["notional", "premium", "total_premium"];
const RVOL: &[&str] = &["rvol", "relative_volume"];
const SWEEP: &[&str] = &["sweep", "is_sweep"];
const TRADE_COUNT: &[&str] = &["trade_count", "day.transactions", "transactions"];
const TRADE_SIZE: &[&str] = &["trade_size", "avg_trade_size"];

/// Map one raw snapshot record into a canonical Contract.
///
/// Only an unresolvable options ticker is an error; every other field
/// defaults to None and is left to the pipeline's rejection logic.
pub fn normalize(raw: &Value) -> Result<Contract, NormalizeError> {
    let options_ticker =
        first_string(raw, OPTIONS_TICKER).ok_or(NormalizeError::MissingTicker)?;

    Ok(Contract {
        options_ticker,
        underlying_ticker: first_string(raw, UNDERLYING_TICKER),
        expiration_date: first_string(raw, EXPIRATION_DATE),
        strike: first_f64(raw, STRIKE),
        contract_type: first_string(raw, CONTRACT_TYPE)
            .as_deref()
            .and_then(ContractType::parse),
        last_price: first_f64(raw, LAST_PRICE),
        last_trade_price: first_f64(raw, LAST_TRADE_PRICE),
        bid: first_f64(raw, BID),
        ask: first_f64(raw, ASK),
        midpoint: first_f64(raw, MIDPOINT),
        day_close: first_f64(raw, DAY_CLOSE),
        prev_day_close: first_f64(raw, PREV_DAY_CLOSE),
        underlying_price: first_f64(raw, UNDERLYING_PRICE),
        volume: first_u64(raw, VOLUME),
        day_volume: first_u64(raw, DAY_VOLUME),
        prev_day_volume: first_u64(raw, PREV_DAY_VOLUME),
        open_interest: first_u64(raw, OPEN_INTEREST),
        day_open_interest: first_u64(raw, DAY_OPEN_INTEREST),
        prev_day_open_interest: first_u64(raw, PREV_DAY_OPEN_INTEREST),
        shares_per_contract: first_f64(raw, SHARES_PER_CONTRACT),
        notional: first_f64(raw, NOTIONAL),
        rvol: first_f64(raw, RVOL),
        sweep: first_bool(raw, SWEEP),
        trade_count: first_u64(raw, TRADE_COUNT),
        trade_size: first_u64(raw, TRADE_SIZE),
    })
}

/// Walk a dotted path into nested objects; null counts as absent
fn lookup<'a>(raw: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = raw;
    for segment in path.split('.') {
        current = current.get(segment)?;
    }
    if current.is_null() { None } else { Some(current) }
}

fn first_value<'a>(raw: &'a Value, paths: &[&str]) -> Option<&'a Value> {
    paths.iter().find_map(|path| lookup(raw, path))
}

fn first_string(raw: &Value, paths: &[&str]) -> Option<String> {
    match first_value(raw, paths)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}

// Providers are inconsistent about numeric encoding; accept numbers and
// numeric strings.
fn first_f64(raw: &Value, paths: &[&str]) -> Option<f64> {
    match first_value(raw, paths)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn first_u64(raw: &Value, paths: &[&str]) -> Option<u64> {
    match first_value(raw, paths)? {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }
}

fn first_bool(raw: &Value, paths: &[&str]) -> Option<bool> {
    match first_value(raw, paths)? {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}
