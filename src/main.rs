use anyhow::Result;
use colored::Colorize;
use flow_scanner::alerts::{self, AlertSink};
use flow_scanner::massive_client::MassiveClient;
use flow_scanner::thresholds::Thresholds;
use flow_scanner::{Settings, config, logging, normalizer, pipeline};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

// Cap on per-ticker rejection logs in debug mode, to keep cycles readable
const MAX_REJECTION_LOGS: usize = 5;

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_logging();

    println!("{}", "=".repeat(60).blue());
    println!("{}", "Unusual Options Flow Scanner".green().bold());
    println!("{}", "=".repeat(60).blue());
    println!();

    let settings = Settings::from_env();
    info!(
        tickers = %settings.ticker_universe.join(","),
        interval_secs = settings.scan_interval_secs,
        telegram = settings.enable_telegram,
        "Config loaded"
    );
    info!(
        min_notional = settings.min_notional,
        min_volume = settings.min_volume,
        min_volume_oi_ratio = settings.min_volume_oi_ratio,
        min_dte_days = settings.min_dte_days,
        max_dte_days = settings.max_dte_days,
        debug_mode = settings.debug_mode,
        "Strategy thresholds"
    );

    let client = Arc::new(MassiveClient::new(&settings)?);
    let sinks = alerts::build_alert_sinks(&settings);

    loop {
        let started = std::time::Instant::now();
        run_scan_cycle(&settings, Arc::clone(&client), &sinks).await;
        let elapsed = started.elapsed();

        let sleep_for =
            Duration::from_secs(settings.scan_interval_secs).saturating_sub(elapsed);
        info!(
            elapsed_secs = elapsed.as_secs_f64(),
            sleep_secs = sleep_for.as_secs_f64(),
            "Scan cycle complete"
        );

        tokio::select! {
            _ = tokio::time::sleep(sleep_for) => {}
            _ = tokio::signal::ctrl_c() => {
                info!("Received shutdown signal, stopping scanner");
                break;
            }
        }
    }

    info!("Scanner stopped");
    Ok(())
}

/// One scan across the configured ticker universe: fetch snapshots, run
/// the detection pipeline per ticker, dispatch ranked candidates to sinks
async fn run_scan_cycle(
    settings: &Settings,
    client: Arc<MassiveClient>,
    sinks: &[Box<dyn AlertSink>],
) {
    let tickers = settings.ticker_universe.clone();
    if tickers.is_empty() {
        info!("No tickers configured in TICKER_UNIVERSE; nothing to scan");
        return;
    }

    // Thresholds are resolved once and shared read-only across the cycle
    let thresholds = Thresholds::effective(settings);
    let today = chrono::Local::now().date_naive();

    info!(
        tickers = %tickers.join(","),
        ticker_count = tickers.len(),
        "Starting scan cycle"
    );

    let results = client
        .fetch_all_snapshots(tickers.clone(), config::get_max_concurrent())
        .await;

    for (ticker, result) in tickers.iter().zip(results) {
        let ticker = ticker.as_str();
        let records = match result {
            Ok((_, records)) => records,
            Err(err) => {
                error!(ticker, error = %err, "Failed to fetch option chain snapshot");
                continue;
            }
        };

        if records.is_empty() {
            info!(ticker, "No snapshot data");
            continue;
        }

        let mut contracts = Vec::with_capacity(records.len());
        let mut normalize_failures = 0usize;
        for record in &records {
            match normalizer::normalize(record) {
                Ok(contract) => contracts.push(contract),
                Err(err) => {
                    normalize_failures += 1;
                    debug!(ticker, error = %err, "Dropped unnormalizable record");
                }
            }
        }
        info!(
            ticker,
            contract_count = contracts.len(),
            dropped = normalize_failures,
            "Snapshot loaded"
        );

        let outcome = pipeline::scan_contracts(&contracts, &thresholds, today, Some(ticker));

        if thresholds.debug_mode {
            for rejection in outcome.rejections.iter().take(MAX_REJECTION_LOGS) {
                debug!(
                    ticker,
                    options_ticker = rejection.options_ticker.as_str(),
                    reasons = ?rejection.reasons.iter().map(|r| r.as_str()).collect::<Vec<_>>(),
                    "Rejected contract"
                );
            }
        }

        if outcome.candidates.is_empty() {
            info!(ticker, "No unusual activity found");
            continue;
        }

        info!(
            ticker,
            count = outcome.candidates.len(),
            "Unusual activity detected"
        );

        for candidate in &outcome.candidates {
            info!(
                ticker,
                options_ticker = candidate.options_ticker.as_str(),
                notional = candidate.notional,
                score = candidate.score,
                "ALERT EMITTED"
            );
            for sink in sinks {
                if let Err(err) = sink.send(candidate).await {
                    error!(ticker, sink = sink.name(), error = %err, "Alert sink failed");
                }
            }
        }
    }
}
