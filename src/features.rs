use crate::config::DEFAULT_SHARES_PER_CONTRACT;
use crate::models::Contract;

/// Derived per-contract features the filter predicates and scorer work on
#[derive(Debug, Clone, PartialEq)]
pub struct ContractFeatures {
    pub mid_price: Option<f64>,
    pub last_price: Option<f64>,
    pub volume: u64,
    pub open_interest: Option<u64>,
    pub multiplier: f64,
    pub notional: f64,
    pub volume_oi_ratio: Option<f64>,
}

/// Compute all derived features for one canonical contract
pub fn extract(contract: &Contract) -> ContractFeatures {
    let mid_price = mid_price(contract);
    let last_price = resolve_last_price(contract, mid_price);
    let volume = resolve_volume(contract);
    let open_interest = resolve_open_interest(contract);
    let multiplier = contract
        .shares_per_contract
        .filter(|m| *m > 0.0)
        .unwrap_or(DEFAULT_SHARES_PER_CONTRACT);
    let notional = calculate_notional(contract, last_price, volume, multiplier);
    let volume_oi_ratio = calculate_volume_oi_ratio(volume, open_interest);

    ContractFeatures {
        mid_price,
        last_price,
        volume,
        open_interest,
        multiplier,
        notional,
        volume_oi_ratio,
    }
}

/// Quote midpoint; an explicit upstream midpoint wins over (bid + ask) / 2
pub fn mid_price(contract: &Contract) -> Option<f64> {
    if contract.midpoint.is_some() {
        return contract.midpoint;
    }
    match (contract.bid, contract.ask) {
        (Some(bid), Some(ask)) => Some((bid + ask) / 2.0),
        _ => None,
    }
}

/// Best available trade price: most recent trade, then the explicit last
/// price, then the quote midpoint, then session closes
pub fn resolve_last_price(contract: &Contract, mid_price: Option<f64>) -> Option<f64> {
    contract
        .last_trade_price
        .or(contract.last_price)
        .or(mid_price)
        .or(contract.day_close)
        .or(contract.prev_day_close)
}

pub fn resolve_volume(contract: &Contract) -> u64 {
    contract
        .day_volume
        .or(contract.prev_day_volume)
        .or(contract.volume)
        .unwrap_or(0)
}

pub fn resolve_open_interest(contract: &Contract) -> Option<u64> {
    contract
        .day_open_interest
        .or(contract.prev_day_open_interest)
        .or(contract.open_interest)
}

/// Dollar premium: price x volume x multiplier. A record with no resolvable
/// price falls back to its precomputed notional, else 0.
fn calculate_notional(
    contract: &Contract,
    last_price: Option<f64>,
    volume: u64,
    multiplier: f64,
) -> f64 {
    match last_price {
        Some(price) if volume > 0 => price * volume as f64 * multiplier,
        _ => contract.notional.filter(|n| *n >= 0.0).unwrap_or(0.0),
    }
}

/// Volume/OI ratio. Policy: zero or absent open interest leaves the ratio
/// undefined rather than inventing one; callers decide what None means.
pub fn calculate_volume_oi_ratio(volume: u64, open_interest: Option<u64>) -> Option<f64> {
    match open_interest {
        Some(oi) if oi > 0 => Some(volume as f64 / oi as f64),
        _ => None,
    }
}
