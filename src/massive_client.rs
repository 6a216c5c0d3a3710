use crate::config::{
    self, HTTP_TIMEOUT, RETRY_BASE_DELAY_MS, RETRY_FACTOR, RETRY_MAX_ATTEMPTS,
    RETRY_MAX_DELAY_SECS, Settings,
};
use anyhow::{Context, Result};
use reqwest::{Client, StatusCode, header};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio_retry::Retry;
use tokio_retry::strategy::ExponentialBackoff;
use tracing::{info, warn};

// -----------------------------------------------
// CLIENT WRAPPER
// -----------------------------------------------
pub struct MassiveClient {
    client: Client,
    base_url: String,
}

impl MassiveClient {
    pub fn new(settings: &Settings) -> Result<Self> {
        Ok(Self {
            client: build_client(&settings.massive_api_key)?,
            base_url: settings.massive_base_url.clone(),
        })
    }

    /// Generic retry fetch; retries transient failures, fails fast on the
    /// rest
    async fn fetch_json(&self, url: &str) -> Result<String> {
        let backoff = ExponentialBackoff::from_millis(RETRY_BASE_DELAY_MS)
            .factor(RETRY_FACTOR)
            .max_delay(Duration::from_secs(RETRY_MAX_DELAY_SECS))
            .take(RETRY_MAX_ATTEMPTS);

        Retry::spawn(backoff, || async {
            let res = self
                .client
                .get(url)
                .send()
                .await
                .context("Request send failed")?;

            let status = res.status();

            if status.is_success() {
                let text = res.text().await.context("Failed to read body")?;

                // A proxy or gateway error page is not JSON
                let trimmed = text.trim();
                if !trimmed.starts_with('{') && !trimmed.starts_with('[') {
                    let preview: String = text.chars().take(200).collect();
                    anyhow::bail!("Non-JSON response: {}", preview);
                }

                Ok(text)
            } else if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
                anyhow::bail!("Retryable error: {}", status)
            } else {
                let body = res.text().await.unwrap_or_default();
                let preview: String = body.chars().take(200).collect();
                anyhow::bail!("Client error {}: {}", status, preview)
            }
        })
        .await
    }

    // -----------------------------------------------
    // OPTION CHAIN SNAPSHOT
    // -----------------------------------------------
    /// Fetch the raw option-chain snapshot records for one underlying.
    ///
    /// GET /v3/snapshot/options/{underlyingAsset}. Records come back as raw
    /// JSON objects; canonicalization is the normalizer's job.
    pub async fn get_option_chain_snapshot(&self, ticker: &str) -> Result<Vec<Value>> {
        let url = config::snapshot_url(&self.base_url, ticker);
        info!(ticker, url = url.as_str(), "Massive API request");

        let text = self.fetch_json(&url).await?;
        let envelope: Value = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse snapshot envelope for {}", ticker))?;

        let results = match envelope.get("results").and_then(Value::as_array) {
            Some(records) => records.clone(),
            None => {
                warn!(ticker, "Snapshot envelope has no results array");
                Vec::new()
            }
        };

        info!(ticker, contracts = results.len(), "Massive option chain fetched");
        Ok(results)
    }

    // -----------------------------------------------
    // BATCH FETCH WITH CONCURRENCY CONTROL
    // -----------------------------------------------
    /// Fetch snapshots for every ticker, at most `max_concurrent` in flight.
    /// Results come back aligned with the input order.
    pub async fn fetch_all_snapshots(
        self: Arc<Self>,
        tickers: Vec<String>,
        max_concurrent: usize,
    ) -> Vec<Result<(String, Vec<Value>)>> {
        let semaphore = Arc::new(Semaphore::new(max_concurrent));
        let mut handles = vec![];

        for ticker in tickers {
            let client = Arc::clone(&self);
            let sem = Arc::clone(&semaphore);

            let handle = tokio::spawn(async move {
                let _permit = sem
                    .acquire_owned()
                    .await
                    .map_err(|e| anyhow::anyhow!("Semaphore error: {}", e))?;

                let records = client.get_option_chain_snapshot(&ticker).await?;
                Ok((ticker, records))
            });

            handles.push(handle);
        }

        let mut results = vec![];
        for handle in handles {
            match handle.await {
                Ok(res) => results.push(res),
                Err(e) => results.push(Err(anyhow::anyhow!("Task error: {}", e))),
            }
        }

        results
    }
}

// -----------------------------------------------
// HTTP CLIENT BUILDER
// -----------------------------------------------
fn build_client(api_key: &str) -> Result<Client> {
    let mut headers = header::HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        header::HeaderValue::from_static("application/json"),
    );
    let mut auth = header::HeaderValue::from_str(&format!("Bearer {}", api_key))
        .context("Invalid MASSIVE_API_KEY for Authorization header")?;
    auth.set_sensitive(true);
    headers.insert(header::AUTHORIZATION, auth);

    Ok(Client::builder()
        .default_headers(headers)
        .timeout(HTTP_TIMEOUT)
        .build()
        .context("Failed to build HTTP client")?)
}
