use chrono::NaiveDate;
use flow_scanner::thresholds::Thresholds;
use flow_scanner::{FlowType, Settings, normalizer, pipeline};
use serde_json::json;

fn strict_settings() -> Settings {
    Settings {
        massive_api_key: String::new(),
        massive_base_url: String::new(),
        ticker_universe: vec!["SPY".to_string()],
        scan_interval_secs: 60,
        min_dte_days: 0,
        max_dte_days: 21,
        min_notional: 1_000_000.0,
        min_volume: 10_000,
        min_open_interest: 0,
        min_volume_oi_ratio: 3.0,
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

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 12, 9).unwrap()
}

#[test]
fn test_debug_mode_surfaces_candidates_a_strict_config_drops() {
    // Modest flow: $50k premium, ratio 2.0
    let raw = json!({
        "ticker": "O:SPY251219C00650000",
        "underlying_ticker": "SPY",
        "expiration_date": "2025-12-19",
        "strike": 650.0,
        "contract_type": "call",
        "last_price": 5.0,
        "volume": 100,
        "open_interest": 50
    });
    let contract = normalizer::normalize(&raw).unwrap();

    // Production thresholds: rejected
    let production = Thresholds::effective(&strict_settings());
    let outcome = pipeline::scan_contracts(
        std::slice::from_ref(&contract),
        &production,
        today(),
        None,
    );
    assert!(outcome.candidates.is_empty());

    // Debug thresholds: accepted, marked as a diagnostic emission
    let mut settings = strict_settings();
    settings.debug_mode = true;
    let debug = Thresholds::effective(&settings);
    let outcome = pipeline::scan_contracts(
        std::slice::from_ref(&contract),
        &debug,
        today(),
        None,
    );
    assert_eq!(outcome.candidates.len(), 1);
    assert_eq!(outcome.candidates[0].flow_type, FlowType::Debug);
}

#[test]
fn test_acceptance_region_only_widens() {
    // Anything production accepts, debug mode must accept too
    let raw = json!({
        "ticker": "O:SPY251219C00650000",
        "underlying_ticker": "SPY",
        "expiration_date": "2025-12-19",
        "strike": 650.0,
        "contract_type": "call",
        "last_price": 50.0,
        "volume": 30000,
        "open_interest": 5000
    });
    let contract = normalizer::normalize(&raw).unwrap();

    let production = Thresholds::effective(&strict_settings());
    let mut settings = strict_settings();
    settings.debug_mode = true;
    let debug = Thresholds::effective(&settings);

    let accepted_in_production = pipeline::scan_contracts(
        std::slice::from_ref(&contract),
        &production,
        today(),
        None,
    )
    .candidates
    .len();
    let accepted_in_debug = pipeline::scan_contracts(
        std::slice::from_ref(&contract),
        &debug,
        today(),
        None,
    )
    .candidates
    .len();

    assert_eq!(accepted_in_production, 1);
    assert!(accepted_in_debug >= accepted_in_production);
}
