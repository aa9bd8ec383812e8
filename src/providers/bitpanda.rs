use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::core::wallet::{WalletRow, WalletSource, coerce_balance};

pub const API_KEY_ENV: &str = "BITPANDA_API_KEY";

/// Wallet holdings from the Bitpanda REST API.
pub struct BitpandaSource {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl BitpandaSource {
    /// `api_key` falls back to the BITPANDA_API_KEY environment variable.
    pub fn new(base_url: &str, api_key: Option<&str>) -> Result<Self> {
        let api_key = match api_key {
            Some(key) => key.to_string(),
            None => std::env::var(API_KEY_ENV).map_err(|_| {
                anyhow!(
                    "Bitpanda API key not configured. Set wallet.api_key in the \
                     config file or export {API_KEY_ENV}."
                )
            })?,
        };
        let client = reqwest::Client::builder()
            .user_agent("coinfolio/0.1")
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(BitpandaSource {
            base_url: base_url.to_string(),
            api_key,
            client,
        })
    }
}

#[derive(Deserialize, Debug)]
struct WalletsResponse {
    data: Vec<WalletEntry>,
}

#[derive(Deserialize, Debug)]
struct WalletEntry {
    attributes: WalletAttributes,
}

#[derive(Deserialize, Debug)]
struct WalletAttributes {
    cryptocoin_symbol: String,
    balance: String,
    #[serde(default)]
    deleted: bool,
}

/// Parses the /wallets envelope. Wallets flagged deleted are skipped;
/// balances coerce leniently to numbers.
pub(crate) fn parse_wallets(body: &str) -> Result<Vec<WalletRow>> {
    let response: WalletsResponse =
        serde_json::from_str(body).context("Failed to parse wallets response")?;

    Ok(response
        .data
        .into_iter()
        .filter(|entry| !entry.attributes.deleted)
        .map(|entry| WalletRow {
            symbol: entry.attributes.cryptocoin_symbol,
            balance: coerce_balance(&entry.attributes.balance),
        })
        .collect())
}

#[async_trait]
impl WalletSource for BitpandaSource {
    async fn fetch_wallets(&self) -> Result<Vec<WalletRow>> {
        let url = format!("{}/wallets", self.base_url);
        debug!("Requesting wallets from {}", url);

        let response = self
            .client
            .get(&url)
            .header("X-Api-Key", &self.api_key)
            .send()
            .await
            .with_context(|| format!("Failed to reach Bitpanda at {url}"))?;

        if !response.status().is_success() {
            anyhow::bail!("HTTP error: {} from {}", response.status(), url);
        }

        let body = response.text().await?;
        parse_wallets(&body)
    }
}
