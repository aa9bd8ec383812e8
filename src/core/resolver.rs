//! Paced, retried, cached price resolution for a single symbol.

use crate::core::cache::QuoteCache;
use crate::core::exclusions::ExclusionRegistry;
use crate::core::pacing::RequestPacer;
use crate::core::price::{PriceSource, QuoteOutcome, Symbol};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Resolves one symbol to a terminal [`QuoteOutcome`].
///
/// Order of business: cache, exclusion registry, then up to `retries` paced
/// network attempts. Absence of a price is a representable result, never an
/// error crossing this boundary. The cache is only written once a terminal
/// outcome is known, so dropping an in-flight `resolve` future caches
/// nothing.
pub struct PriceResolver {
    source: Arc<dyn PriceSource>,
    cache: QuoteCache,
    exclusions: Arc<ExclusionRegistry>,
    pacer: Arc<RequestPacer>,
    retries: usize,
    retry_delay: Duration,
}

impl PriceResolver {
    pub fn new(
        source: Arc<dyn PriceSource>,
        cache: QuoteCache,
        exclusions: Arc<ExclusionRegistry>,
        pacer: Arc<RequestPacer>,
        retries: usize,
        retry_delay: Duration,
    ) -> Self {
        Self {
            source,
            cache,
            exclusions,
            pacer,
            retries: retries.max(1),
            retry_delay,
        }
    }

    pub fn is_excluded(&self, symbol: &Symbol) -> bool {
        self.exclusions.is_excluded(symbol)
    }

    pub async fn resolve(&self, symbol: &Symbol) -> QuoteOutcome {
        if let Some(cached) = self.cache.get(symbol).await {
            return cached;
        }

        if self.exclusions.is_excluded(symbol) {
            debug!("{symbol} is on the exclusion list, skipping lookup");
            self.cache.put(symbol.clone(), QuoteOutcome::Unresolved).await;
            return QuoteOutcome::Unresolved;
        }

        for attempt in 1..=self.retries {
            self.pacer.acquire().await;
            match self.source.fetch_price(symbol).await {
                Ok(price) if price.is_finite() && price > 0.0 => {
                    let outcome = QuoteOutcome::Resolved(price);
                    self.cache.put(symbol.clone(), outcome).await;
                    return outcome;
                }
                Ok(price) => {
                    debug!(
                        "Attempt {attempt}/{} for {symbol} returned unusable price {price}",
                        self.retries
                    );
                }
                Err(e) => {
                    debug!("Attempt {attempt}/{} for {symbol} failed: {e}", self.retries);
                }
            }
            if attempt < self.retries {
                tokio::time::sleep(self.retry_delay).await;
            }
        }

        warn!(
            "No usable price for {symbol} after {} attempts, giving up for this session",
            self.retries
        );
        self.cache.put(symbol.clone(), QuoteOutcome::Unresolved).await;
        QuoteOutcome::Unresolved
    }
}
