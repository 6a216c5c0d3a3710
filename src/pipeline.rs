use crate::features::{self, ContractFeatures};
use crate::models::{Candidate, Contract, ContractType, Direction, FlowType, RejectReason};
use crate::scorer;
use crate::sweep;
use crate::thresholds::Thresholds;
use chrono::NaiveDate;

/// A contract that failed at least one predicate, with every failing
/// predicate recorded in evaluation order
#[derive(Debug, Clone, PartialEq)]
pub struct Rejection {
    pub options_ticker: String,
    pub reasons: Vec<RejectReason>,
}

impl Rejection {
    /// The first failing predicate in the fixed evaluation order
    pub fn primary(&self) -> RejectReason {
        self.reasons[0]
    }
}

/// Result of one scan cycle over a batch of contracts
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    /// Accepted candidates, ranked by score descending, stable on ties
    pub candidates: Vec<Candidate>,
    pub rejections: Vec<Rejection>,
}

/// Evaluate a whole batch against one Thresholds value and one date, then
/// rank the accepted set
pub fn scan_contracts(
    contracts: &[Contract],
    thresholds: &Thresholds,
    today: NaiveDate,
    fallback_underlying: Option<&str>,
) -> ScanOutcome {
    let mut candidates = Vec::new();
    let mut rejections = Vec::new();

    for contract in contracts {
        match evaluate_contract(contract, thresholds, today, fallback_underlying) {
            Ok(candidate) => candidates.push(candidate),
            Err(rejection) => rejections.push(rejection),
        }
    }

    // Stable sort keeps insertion order on equal scores
    candidates.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    ScanOutcome {
        candidates,
        rejections,
    }
}

/// Run one contract through the fixed predicate chain.
///
/// Predicates run in a fixed order and every failure is recorded, so
/// rejection diagnostics are reproducible. Scoring and sweep classification
/// only happen for contracts that cleared everything before them.
pub fn evaluate_contract(
    contract: &Contract,
    thresholds: &Thresholds,
    today: NaiveDate,
    fallback_underlying: Option<&str>,
) -> Result<Candidate, Rejection> {
    let mut reasons: Vec<RejectReason> = Vec::new();

    // Structural fields first: nothing downstream makes sense without them
    let expiration = contract.expiration_date.as_deref().and_then(parse_expiration);
    if expiration.is_none() {
        reasons.push(RejectReason::MissingExpiry);
    }
    if contract.contract_type.is_none() {
        reasons.push(RejectReason::MissingContractType);
    }

    let dte_days = expiration.map(|exp| (exp - today).num_days());
    if let Some(dte) = dte_days {
        if dte < thresholds.min_dte_days || dte > thresholds.max_dte_days {
            reasons.push(RejectReason::Dte);
        }
    }

    let features = features::extract(contract);

    if features.volume < thresholds.min_volume {
        reasons.push(RejectReason::Volume);
    }

    if thresholds.min_open_interest > 0
        && features.open_interest.unwrap_or(0) < thresholds.min_open_interest
    {
        reasons.push(RejectReason::OpenInterest);
    }

    if thresholds.min_trade_count > 0
        && contract.trade_count.unwrap_or(0) < thresholds.min_trade_count
    {
        reasons.push(RejectReason::TradeCount);
    }

    if thresholds.min_trade_size > 0
        && contract.trade_size.unwrap_or(0) < thresholds.min_trade_size
    {
        reasons.push(RejectReason::TradeSize);
    }

    if features.last_price.is_none() && contract.notional.is_none() {
        reasons.push(RejectReason::Price);
    }

    if features.notional < thresholds.min_notional {
        reasons.push(RejectReason::Notional);
    }

    // Undefined ratio (zero/absent OI) only fails when a positive floor is
    // configured
    match features.volume_oi_ratio {
        Some(ratio) if ratio < thresholds.min_volume_oi_ratio => {
            reasons.push(RejectReason::VolumeOiRatio);
        }
        None if thresholds.min_volume_oi_ratio > 0.0 => {
            reasons.push(RejectReason::VolumeOiRatio);
        }
        _ => {}
    }

    if thresholds.min_rvol > 0.0 && contract.rvol.unwrap_or(0.0) < thresholds.min_rvol {
        reasons.push(RejectReason::Rvol);
    }

    // Moneyness and spread are tolerant: unresolvable inputs pass
    if let Some(otm_pct) = otm_percentage(contract) {
        if otm_pct > thresholds.max_otm_pct {
            reasons.push(RejectReason::Otm);
        }
    }

    if let Some(bps) = spread_bps(contract, &features) {
        if bps > thresholds.spread_threshold_bps {
            reasons.push(RejectReason::Spread);
        }
    }

    if !reasons.is_empty() {
        return Err(Rejection {
            options_ticker: contract.options_ticker.clone(),
            reasons,
        });
    }

    // Everything cleared; both are guaranteed present here
    let expiration_date = expiration.expect("checked above");
    let contract_type = contract.contract_type.expect("checked above");
    let dte_days = dte_days.expect("checked above");

    let score = scorer::calculate_score(
        features.notional,
        features.volume_oi_ratio,
        contract.rvol,
        dte_days,
    );
    if score < thresholds.min_score {
        return Err(Rejection {
            options_ticker: contract.options_ticker.clone(),
            reasons: vec![RejectReason::Score],
        });
    }

    let is_sweep = sweep::classify_sweep(contract, &features, thresholds);

    Ok(build_candidate(
        contract,
        &features,
        expiration_date,
        contract_type,
        dte_days,
        score,
        is_sweep,
        thresholds,
        fallback_underlying,
    ))
}

fn parse_expiration(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

/// How far out of the money the strike sits, as a percentage of the
/// underlying price. In-the-money contracts count as 0% OTM. None when
/// either side is unknown.
fn otm_percentage(contract: &Contract) -> Option<f64> {
    let strike = contract.strike?;
    let underlying = contract.underlying_price.filter(|p| *p > 0.0)?;
    let side = contract.contract_type?;

    let distance = match side {
        ContractType::Call => strike - underlying,
        ContractType::Put => underlying - strike,
    };
    Some((distance.max(0.0) / underlying) * 100.0)
}

/// Quoted spread in basis points of the midpoint
fn spread_bps(contract: &Contract, features: &ContractFeatures) -> Option<f64> {
    let bid = contract.bid?;
    let ask = contract.ask?;
    let mid = features.mid_price.filter(|m| *m > 0.0)?;
    Some(((ask - bid).max(0.0) / mid) * 10_000.0)
}

#[allow(clippy::too_many_arguments)]
fn build_candidate(
    contract: &Contract,
    features: &ContractFeatures,
    expiration_date: NaiveDate,
    contract_type: ContractType,
    dte_days: i64,
    score: f64,
    is_sweep: bool,
    thresholds: &Thresholds,
    fallback_underlying: Option<&str>,
) -> Candidate {
    let flow_type = if is_sweep {
        FlowType::Sweep
    } else if thresholds.debug_mode {
        FlowType::Debug
    } else {
        FlowType::Standard
    };

    Candidate {
        options_ticker: contract.options_ticker.clone(),
        underlying_ticker: contract
            .underlying_ticker
            .clone()
            .or_else(|| fallback_underlying.map(|s| s.to_string()))
            .unwrap_or_default(),
        direction: Direction::from(contract_type),
        expiration_date,
        strike: contract.strike.unwrap_or(0.0),
        contract_type,
        last_price: features.last_price,
        volume: features.volume,
        open_interest: features.open_interest,
        notional: features.notional,
        volume_oi_ratio: features.volume_oi_ratio,
        rvol: contract.rvol,
        dte_days,
        score,
        is_sweep,
        flow_type,
    }
}
