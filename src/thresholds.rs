use crate::config::Settings;

// Diagnostic-mode floors and ceilings. Relaxation only ever widens the
// acceptance region: lower bounds are clamped down toward these floors,
// upper bounds up toward these ceilings.
const DEBUG_MIN_DTE_DAYS: i64 = 0;
const DEBUG_MAX_DTE_DAYS: i64 = 60;
const DEBUG_MIN_NOTIONAL: f64 = 1_000.0;
const DEBUG_MIN_VOLUME: u64 = 1;
const DEBUG_MAX_OTM_PCT: f64 = 50.0;
const DEBUG_SPREAD_THRESHOLD_BPS: f64 = 2_000.0;

/// Effective filter bounds for one scan cycle.
///
/// Computed once per cycle, then shared read-only by every contract
/// evaluation in that cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Thresholds {
    pub min_dte_days: i64,
    pub max_dte_days: i64,
    pub min_notional: f64,
    pub min_volume: u64,
    pub min_open_interest: u64,
    pub min_volume_oi_ratio: f64,
    pub min_rvol: f64,
    pub min_trade_count: u64,
    pub min_trade_size: u64,
    pub max_otm_pct: f64,
    pub spread_threshold_bps: f64,
    pub min_score: f64,
    pub debug_mode: bool,
}

impl Thresholds {
    /// Resolve the effective thresholds from configuration.
    ///
    /// In debug mode every bound is relaxed so the pipeline can still
    /// surface some candidates for diagnostics under a strict production
    /// configuration.
    pub fn effective(settings: &Settings) -> Self {
        if settings.debug_mode {
            return Self {
                min_dte_days: settings.min_dte_days.min(DEBUG_MIN_DTE_DAYS),
                max_dte_days: settings.max_dte_days.max(DEBUG_MAX_DTE_DAYS),
                min_notional: settings.min_notional.min(DEBUG_MIN_NOTIONAL),
                min_volume: settings.min_volume.min(DEBUG_MIN_VOLUME),
                min_open_interest: 0,
                min_volume_oi_ratio: settings.min_volume_oi_ratio.min(0.0),
                min_rvol: settings.min_rvol.min(0.0),
                min_trade_count: 0,
                min_trade_size: 0,
                max_otm_pct: settings.max_otm_pct.max(DEBUG_MAX_OTM_PCT),
                spread_threshold_bps: settings
                    .spread_threshold_bps
                    .max(DEBUG_SPREAD_THRESHOLD_BPS),
                min_score: settings.min_score.min(0.0),
                debug_mode: true,
            };
        }

        Self {
            min_dte_days: settings.min_dte_days,
            max_dte_days: settings.max_dte_days,
            min_notional: settings.min_notional,
            min_volume: settings.min_volume,
            min_open_interest: settings.min_open_interest,
            min_volume_oi_ratio: settings.min_volume_oi_ratio,
            min_rvol: settings.min_rvol,
            min_trade_count: settings.min_trade_count,
            min_trade_size: settings.min_trade_size,
            max_otm_pct: settings.max_otm_pct,
            spread_threshold_bps: settings.spread_threshold_bps,
            min_score: settings.min_score,
            debug_mode: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strict_settings() -> Settings {
        let mut settings = test_settings();
        settings.min_dte_days = 3;
        settings.max_dte_days = 14;
        settings.min_notional = 250_000.0;
        settings.min_volume = 5_000;
        settings.min_open_interest = 1_000;
        settings.min_volume_oi_ratio = 2.5;
        settings.min_rvol = 1.5;
        settings.min_trade_count = 50;
        settings.min_trade_size = 10;
        settings.max_otm_pct = 10.0;
        settings.spread_threshold_bps = 100.0;
        settings.min_score = 40.0;
        settings
    }

    fn test_settings() -> Settings {
        Settings {
            massive_api_key: String::new(),
            massive_base_url: String::new(),
            ticker_universe: vec![],
            scan_interval_secs: 60,
            min_dte_days: 0,
            max_dte_days: 21,
            min_notional: 25_000.0,
            min_volume: 100,
            min_open_interest: 0,
            min_volume_oi_ratio: 1.0,
            min_rvol: 0.0,
            min_trade_count: 0,
            min_trade_size: 0,
            max_otm_pct: 20.0,
            spread_threshold_bps: 500.0,
            min_score: 0.0,
            debug_mode: false,
            enable_telegram: false,
            telegram_bot_token: String::new(),
            telegram_chat_id: String::new(),
        }
    }

    #[test]
    fn test_production_mode_passes_bounds_through() {
        let settings = strict_settings();
        let thresholds = Thresholds::effective(&settings);
        assert_eq!(thresholds.min_notional, 250_000.0);
        assert_eq!(thresholds.min_volume, 5_000);
        assert_eq!(thresholds.max_dte_days, 14);
        assert!(!thresholds.debug_mode);
    }

    #[test]
    fn test_debug_mode_never_tightens_any_bound() {
        let mut settings = strict_settings();
        settings.debug_mode = true;

        let production = Thresholds::effective(&strict_settings());
        let debug = Thresholds::effective(&settings);

        // Lower bounds may only move down
        assert!(debug.min_dte_days <= production.min_dte_days);
        assert!(debug.min_notional <= production.min_notional);
        assert!(debug.min_volume <= production.min_volume);
        assert!(debug.min_open_interest <= production.min_open_interest);
        assert!(debug.min_volume_oi_ratio <= production.min_volume_oi_ratio);
        assert!(debug.min_rvol <= production.min_rvol);
        assert!(debug.min_trade_count <= production.min_trade_count);
        assert!(debug.min_trade_size <= production.min_trade_size);
        assert!(debug.min_score <= production.min_score);

        // Upper bounds may only move up
        assert!(debug.max_dte_days >= production.max_dte_days);
        assert!(debug.max_otm_pct >= production.max_otm_pct);
        assert!(debug.spread_threshold_bps >= production.spread_threshold_bps);
    }

    #[test]
    fn test_debug_mode_keeps_already_loose_bounds() {
        let mut settings = test_settings();
        settings.debug_mode = true;
        settings.max_dte_days = 90;
        settings.min_notional = 500.0;

        let thresholds = Thresholds::effective(&settings);
        // An already-permissive configuration must not be pulled back in
        assert_eq!(thresholds.max_dte_days, 90);
        assert_eq!(thresholds.min_notional, 500.0);
    }
}
