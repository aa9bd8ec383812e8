pub mod cli;
pub mod core;
pub mod providers;

use crate::core::config::AppConfig;
use crate::core::{
    ExclusionRegistry, PortfolioEnricher, PriceResolver, QuoteCache, RequestPacer, WalletSource,
};
use crate::providers::bitpanda::BitpandaSource;
use crate::providers::export_file::ExportFileSource;
use crate::providers::yahoo_finance::YahooFinanceSource;
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

pub enum AppCommand {
    Summary { json: bool },
    Exclusions,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("coinfolio starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let registry = Arc::new(ExclusionRegistry::load(config.exclusions_path()?));

    match command {
        AppCommand::Exclusions => cli::exclusions::run(&registry),
        AppCommand::Summary { json } => {
            let source = Arc::new(YahooFinanceSource::new(
                &config.provider.base_url,
                &config.quote_currency,
            )?);
            let pacer = Arc::new(RequestPacer::new(Duration::from_millis(
                config.lookup.pacing_ms,
            )));
            let resolver = Arc::new(PriceResolver::new(
                source,
                QuoteCache::new(),
                Arc::clone(&registry),
                pacer,
                config.lookup.retries,
                Duration::from_secs(config.lookup.retry_delay_secs),
            ));
            let enricher = PortfolioEnricher::new(resolver, config.lookup.concurrency);

            let wallets: Box<dyn WalletSource> = match &config.wallet.export_file {
                Some(path) => Box::new(ExportFileSource::new(path)),
                None => Box::new(BitpandaSource::new(
                    &config.wallet.base_url,
                    config.wallet.api_key.as_deref(),
                )?),
            };

            cli::summary::run(wallets.as_ref(), &enricher, &config.quote_currency, json).await
        }
    }
}
