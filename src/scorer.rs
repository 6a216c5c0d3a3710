// Composite unusualness score on a 0-100 scale.
//
// Four sub-scores, each normalized to 0-100, blended with fixed weights.
// This is the one canonical formula; older variants of this scanner used
// different blends and are intentionally not reproduced.

pub const SCORE_MIN: f64 = 0.0;
pub const SCORE_MAX: f64 = 100.0;

// log10 dollar anchors: $10k scores 0, $100M scores 100
const NOTIONAL_LOG_FLOOR: f64 = 4.0;
const NOTIONAL_LOG_CEILING: f64 = 8.0;

// Ratio and rvol caps before linear normalization
const RATIO_CAP: f64 = 25.0;
const RVOL_CAP: f64 = 10.0;
const NEUTRAL_RATIO: f64 = 1.0;
const NEUTRAL_RVOL: f64 = 1.0;

// DTE peaks at the sweet spot and decays linearly on both sides
const DTE_SWEET_SPOT_DAYS: f64 = 10.0;
const DTE_DECAY_SPAN_DAYS: f64 = 30.0;

const WEIGHT_NOTIONAL: f64 = 0.40;
const WEIGHT_RVOL: f64 = 0.30;
const WEIGHT_RATIO: f64 = 0.20;
const WEIGHT_DTE: f64 = 0.10;

/// Blend notional, rvol, volume/OI ratio and DTE into one bounded score,
/// rounded to 2 decimal places.
pub fn calculate_score(
    notional: f64,
    volume_oi_ratio: Option<f64>,
    rvol: Option<f64>,
    dte_days: i64,
) -> f64 {
    let raw = notional_score(notional) * WEIGHT_NOTIONAL
        + rvol_score(rvol) * WEIGHT_RVOL
        + ratio_score(volume_oi_ratio) * WEIGHT_RATIO
        + dte_score(dte_days) * WEIGHT_DTE;

    (raw.clamp(SCORE_MIN, SCORE_MAX) * 100.0).round() / 100.0
}

fn notional_score(notional: f64) -> f64 {
    if notional <= 0.0 {
        return 0.0;
    }
    let span = NOTIONAL_LOG_CEILING - NOTIONAL_LOG_FLOOR;
    ((notional.log10() - NOTIONAL_LOG_FLOOR) / span * 100.0).clamp(0.0, 100.0)
}

fn ratio_score(volume_oi_ratio: Option<f64>) -> f64 {
    let ratio = volume_oi_ratio.unwrap_or(NEUTRAL_RATIO).max(0.0);
    ratio.min(RATIO_CAP) / RATIO_CAP * 100.0
}

fn rvol_score(rvol: Option<f64>) -> f64 {
    let rvol = rvol.unwrap_or(NEUTRAL_RVOL).max(0.0);
    rvol.min(RVOL_CAP) / RVOL_CAP * 100.0
}

fn dte_score(dte_days: i64) -> f64 {
    if dte_days <= 0 {
        return 0.0;
    }
    let distance = (dte_days as f64 - DTE_SWEET_SPOT_DAYS).abs();
    ((1.0 - distance / DTE_DECAY_SPAN_DAYS) * 100.0).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notional_anchors() {
        assert_eq!(notional_score(0.0), 0.0);
        assert_eq!(notional_score(-5.0), 0.0);
        assert!(notional_score(10_000.0).abs() < 1e-9);
        assert!((notional_score(100_000_000.0) - 100.0).abs() < 1e-9);
        // $1M sits exactly halfway on the log scale
        assert!((notional_score(1_000_000.0) - 50.0).abs() < 1e-9);
        // Above the ceiling stays clamped
        assert_eq!(notional_score(1_000_000_000.0), 100.0);
    }

    #[test]
    fn test_ratio_cap_and_neutral() {
        assert_eq!(ratio_score(Some(25.0)), 100.0);
        assert_eq!(ratio_score(Some(60.0)), 100.0);
        assert!((ratio_score(Some(5.0)) - 20.0).abs() < 1e-9);
        // Undefined ratio contributes the neutral 1.0
        assert!((ratio_score(None) - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_rvol_neutral_and_cap() {
        assert!((rvol_score(None) - 10.0).abs() < 1e-9);
        assert_eq!(rvol_score(Some(10.0)), 100.0);
        assert_eq!(rvol_score(Some(50.0)), 100.0);
    }

    #[test]
    fn test_dte_sweet_spot_and_decay() {
        assert_eq!(dte_score(10), 100.0);
        assert!(dte_score(5) < dte_score(10));
        assert!(dte_score(20) < dte_score(10));
        // Symmetric decay
        assert_eq!(dte_score(7), dte_score(13));
        // Expired or unresolved floors at zero
        assert_eq!(dte_score(0), 0.0);
        assert_eq!(dte_score(-3), 0.0);
        assert_eq!(dte_score(41), 0.0);
    }

    #[test]
    fn test_score_is_bounded_and_rounded() {
        let score = calculate_score(1e12, Some(1000.0), Some(100.0), 10);
        assert!(score <= SCORE_MAX);
        assert_eq!(score, 100.0);

        let score = calculate_score(0.0, None, None, 0);
        assert!(score >= SCORE_MIN);

        let score = calculate_score(500_000.0, Some(5.0), None, 10);
        // 42.47 * 0.4 + 10 * 0.3 + 20 * 0.2 + 100 * 0.1 = 33.99
        assert_eq!(score, (score * 100.0).round() / 100.0);
        assert!(score > 0.0 && score < 100.0);
    }

    #[test]
    fn test_bigger_premium_scores_higher() {
        let small = calculate_score(50_000.0, Some(2.0), None, 10);
        let large = calculate_score(5_000_000.0, Some(2.0), None, 10);
        assert!(large > small);
    }
}
