use std::time::Duration;

// -----------------------------------------------
// MASSIVE API
// -----------------------------------------------
// Base URL is hard-coded on purpose: reading it from ENV produced broken
// values like `https://api.massive.com/v1/v3/...` in past deployments.
pub const MASSIVE_BASE_URL: &str = "https://api.massive.com";
pub const SNAPSHOT_LIMIT: u32 = 250;

pub fn snapshot_url(base_url: &str, ticker: &str) -> String {
    format!(
        "{}/v3/snapshot/options/{}?limit={}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(ticker),
        SNAPSHOT_LIMIT
    )
}

// -----------------------------------------------
// HTTP CLIENT CONFIG
// -----------------------------------------------
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(10);
pub const TELEGRAM_HTTP_TIMEOUT: Duration = Duration::from_secs(5);

// -----------------------------------------------
// RETRY CONFIG
// -----------------------------------------------
pub const RETRY_BASE_DELAY_MS: u64 = 200;
pub const RETRY_FACTOR: u64 = 3;
pub const RETRY_MAX_DELAY_SECS: u64 = 8;
pub const RETRY_MAX_ATTEMPTS: usize = 3;

// -----------------------------------------------
// CONCURRENCY LIMITS
// -----------------------------------------------
pub const DEFAULT_MAX_CONCURRENT: usize = 5;

// -----------------------------------------------
// SCANNER DEFAULTS
// -----------------------------------------------
pub const DEFAULT_TICKER_UNIVERSE: &[&str] = &[
    "SPY", "QQQ", "IWM", "NVDA", "TSLA", "AAPL", "MSFT", "AMZN", "META", "AVGO", "AMD",
];
pub const DEFAULT_SCAN_INTERVAL_SECS: u64 = 60;

/// Shares covered by one contract when the record does not say otherwise
pub const DEFAULT_SHARES_PER_CONTRACT: f64 = 100.0;

// Filter defaults; every one can be overridden via UNUSUAL_* env vars
pub const DEFAULT_MIN_DTE_DAYS: i64 = 0;
pub const DEFAULT_MAX_DTE_DAYS: i64 = 21;
pub const DEFAULT_MIN_NOTIONAL: f64 = 25_000.0;
pub const DEFAULT_MIN_VOLUME: u64 = 100;
pub const DEFAULT_MIN_OPEN_INTEREST: u64 = 0;
pub const DEFAULT_MIN_VOLUME_OI_RATIO: f64 = 1.0;
pub const DEFAULT_MIN_RVOL: f64 = 0.0;
pub const DEFAULT_MIN_TRADE_COUNT: u64 = 0;
pub const DEFAULT_MIN_TRADE_SIZE: u64 = 0;
pub const DEFAULT_MAX_OTM_PCT: f64 = 20.0;
pub const DEFAULT_SPREAD_THRESHOLD_BPS: f64 = 500.0;
pub const DEFAULT_MIN_SCORE: f64 = 0.0;

/// Central runtime configuration, loaded once at startup.
///
/// The only required env var is MASSIVE_API_KEY; everything else has a sane
/// default.
#[derive(Debug, Clone)]
pub struct Settings {
    pub massive_api_key: String,
    pub massive_base_url: String,

    pub ticker_universe: Vec<String>,
    pub scan_interval_secs: u64,

    // Unusual-options filters
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

    // Telegram
    pub enable_telegram: bool,
    pub telegram_bot_token: String,
    pub telegram_chat_id: String,
}

impl Settings {
    pub fn from_env() -> Self {
        Self {
            massive_api_key: env_string("MASSIVE_API_KEY", ""),
            massive_base_url: MASSIVE_BASE_URL.to_string(),
            ticker_universe: std::env::var("TICKER_UNIVERSE")
                .map(|raw| parse_ticker_universe(&raw))
                .ok()
                .filter(|parsed| !parsed.is_empty())
                .unwrap_or_else(default_ticker_universe),
            scan_interval_secs: env_u64("SCAN_INTERVAL_SECONDS", DEFAULT_SCAN_INTERVAL_SECS),
            min_dte_days: env_i64("UNUSUAL_MIN_DTE_DAYS", DEFAULT_MIN_DTE_DAYS),
            max_dte_days: env_i64("UNUSUAL_MAX_DTE_DAYS", DEFAULT_MAX_DTE_DAYS),
            min_notional: env_f64("UNUSUAL_MIN_NOTIONAL", DEFAULT_MIN_NOTIONAL),
            min_volume: env_u64("UNUSUAL_MIN_VOLUME", DEFAULT_MIN_VOLUME),
            min_open_interest: env_u64("UNUSUAL_MIN_OPEN_INTEREST", DEFAULT_MIN_OPEN_INTEREST),
            min_volume_oi_ratio: env_f64(
                "UNUSUAL_MIN_VOLUME_OI_RATIO",
                DEFAULT_MIN_VOLUME_OI_RATIO,
            ),
            min_rvol: env_f64("UNUSUAL_MIN_RVOL", DEFAULT_MIN_RVOL),
            min_trade_count: env_u64("UNUSUAL_MIN_TRADE_COUNT", DEFAULT_MIN_TRADE_COUNT),
            min_trade_size: env_u64("UNUSUAL_MIN_TRADE_SIZE", DEFAULT_MIN_TRADE_SIZE),
            max_otm_pct: env_f64("UNUSUAL_MAX_OTM_PCT", DEFAULT_MAX_OTM_PCT),
            spread_threshold_bps: env_f64(
                "UNUSUAL_SPREAD_THRESHOLD_BPS",
                DEFAULT_SPREAD_THRESHOLD_BPS,
            ),
            min_score: env_f64("UNUSUAL_MIN_SCORE", DEFAULT_MIN_SCORE),
            debug_mode: env_bool("DEBUG_MODE", false),
            enable_telegram: env_bool("ENABLE_TELEGRAM", false),
            telegram_bot_token: env_string("TELEGRAM_BOT_TOKEN", ""),
            telegram_chat_id: env_string("TELEGRAM_CHAT_ID", ""),
        }
    }
}

fn default_ticker_universe() -> Vec<String> {
    DEFAULT_TICKER_UNIVERSE
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Accept a comma-separated universe: "spy, qqq,NVDA" -> ["SPY","QQQ","NVDA"]
pub fn parse_ticker_universe(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_ascii_uppercase())
        .filter(|s| !s.is_empty())
        .collect()
}

pub fn parse_bool(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "y" | "on"
    )
}

/// Concurrency for snapshot fetches, overridable via MAX_CONCURRENT_FETCHES
pub fn get_max_concurrent() -> usize {
    if let Ok(val) = std::env::var("MAX_CONCURRENT_FETCHES") {
        if let Ok(num) = val.parse::<usize>() {
            return num.clamp(1, 50);
        }
    }
    DEFAULT_MAX_CONCURRENT
}

fn env_string(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .map(|v| parse_bool(&v))
        .unwrap_or(default)
}

fn env_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn env_i64(key: &str, default: i64) -> i64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn env_f64(key: &str, default: f64) -> f64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
