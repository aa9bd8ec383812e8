use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::core::price::{PriceSource, Symbol};

/// Live market price from the Yahoo Finance chart endpoint, quoted against
/// a fixed currency pair, e.g. `BTC-EUR`.
pub struct YahooFinanceSource {
    base_url: String,
    quote_currency: String,
    client: reqwest::Client,
}

impl YahooFinanceSource {
    pub fn new(base_url: &str, quote_currency: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("coinfolio/0.1")
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(YahooFinanceSource {
            base_url: base_url.to_string(),
            quote_currency: quote_currency.to_uppercase(),
            client,
        })
    }
}

#[derive(Deserialize, Debug)]
struct YahooPriceResponse {
    chart: PriceChartResult,
}

#[derive(Deserialize, Debug)]
struct PriceChartResult {
    // Yahoo answers "result": null with an error object for unknown symbols
    result: Option<Vec<PriceChartItem>>,
}

#[derive(Deserialize, Debug)]
struct PriceChartItem {
    meta: PriceChartMeta,
}

#[derive(Deserialize, Debug)]
struct PriceChartMeta {
    #[serde(alias = "regularMarketPrice")]
    regular_market_price: Option<f64>,
}

#[async_trait]
impl PriceSource for YahooFinanceSource {
    #[instrument(
        name = "YahooPriceFetch",
        skip(self),
        fields(symbol = %symbol)
    )]
    async fn fetch_price(&self, symbol: &Symbol) -> Result<f64> {
        let ticker = format!("{}-{}", symbol, self.quote_currency);
        let url = format!(
            "{}/v8/finance/chart/{}?interval=1d&range=1d",
            self.base_url, ticker
        );
        debug!("Requesting price data from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for ticker: {} URL: {}", e, ticker, url))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for ticker: {}",
                response.status(),
                ticker
            ));
        }

        let data = response.json::<YahooPriceResponse>().await?;
        let item = data
            .chart
            .result
            .as_ref()
            .and_then(|items| items.first())
            .ok_or_else(|| anyhow!("No chart data for ticker: {ticker}"))?;

        item.meta
            .regular_market_price
            .ok_or_else(|| anyhow!("No market price in quote for ticker: {ticker}"))
    }
}
