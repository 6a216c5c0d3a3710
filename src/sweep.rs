use crate::features::ContractFeatures;
use crate::models::Contract;
use crate::thresholds::Thresholds;

// Heuristic bounds for sweep-like aggression
const SWEEP_VOLUME_OI_MULTIPLE: f64 = 5.0;
const SWEEP_RATIO_FLOOR: f64 = 3.0;
const SWEEP_NOTIONAL_MULTIPLE: f64 = 2.0;

/// Decide whether a contract's activity pattern qualifies as an aggressive
/// sweep.
///
/// An explicit upstream sweep flag is always trusted. Otherwise all three
/// heuristics must hold: volume dwarfing open interest (or, with no usable
/// open interest, a volume/OI ratio past the fallback floor), premium at
/// least twice the minimum-notional threshold, and a last price at or above
/// the quote midpoint (taker-side execution).
pub fn classify_sweep(
    contract: &Contract,
    features: &ContractFeatures,
    thresholds: &Thresholds,
) -> bool {
    if contract.sweep == Some(true) {
        return true;
    }

    let aggressive_volume = match features.open_interest {
        Some(oi) if oi > 0 => features.volume as f64 >= SWEEP_VOLUME_OI_MULTIPLE * oi as f64,
        _ => features
            .volume_oi_ratio
            .is_some_and(|ratio| ratio >= SWEEP_RATIO_FLOOR),
    };
    if !aggressive_volume {
        return false;
    }

    if features.notional < SWEEP_NOTIONAL_MULTIPLE * thresholds.min_notional {
        return false;
    }

    // Trivially satisfied when no midpoint can be computed
    match (features.last_price, features.mid_price) {
        (Some(last), Some(mid)) => last >= mid,
        _ => true,
    }
}
