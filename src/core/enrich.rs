//! Joins resolved prices onto wallet rows to produce a valued snapshot.

use crate::core::price::{QuoteOutcome, Symbol};
use crate::core::resolver::PriceResolver;
use crate::core::wallet::WalletRow;
use futures::StreamExt;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::warn;

/// One valued holding. `total_value` is exactly `balance * price`.
#[derive(Debug, Clone, Serialize)]
pub struct EnrichedRow {
    pub symbol: Symbol,
    pub balance: f64,
    pub price: f64,
    pub total_value: f64,
}

/// The cleaned, valued snapshot plus the symbols the exclusion registry
/// short-circuited. Symbols that merely failed to resolve are dropped and
/// logged, but not reported here: `skipped` feeds a "not available on the
/// price source" notice, and a transient outage is not that.
#[derive(Debug)]
pub struct EnrichedPortfolio {
    pub rows: Vec<EnrichedRow>,
    pub skipped: BTreeSet<Symbol>,
}

impl EnrichedPortfolio {
    pub fn total_value(&self) -> f64 {
        self.rows.iter().map(|r| r.total_value).sum()
    }
}

/// Orchestrates price resolution across a wallet snapshot.
pub struct PortfolioEnricher {
    resolver: Arc<PriceResolver>,
    concurrency: usize,
}

impl PortfolioEnricher {
    pub fn new(resolver: Arc<PriceResolver>, concurrency: usize) -> Self {
        Self {
            resolver,
            concurrency: concurrency.max(1),
        }
    }

    /// Resolves every distinct symbol, then joins prices back onto the rows
    /// by symbol, preserving input order. `on_progress` is called with
    /// `(completed, total)` after each symbol finishes; with the default
    /// sequential mode the completed count is strictly increasing and
    /// reaches `total`.
    pub async fn enrich(
        &self,
        rows: &[WalletRow],
        on_progress: &(dyn Fn(usize, usize) + Sync),
    ) -> EnrichedPortfolio {
        let mut distinct: Vec<Symbol> = Vec::new();
        for row in rows {
            let symbol = Symbol::new(&row.symbol);
            if !distinct.contains(&symbol) {
                distinct.push(symbol);
            }
        }

        let total = distinct.len();
        let completed = AtomicUsize::new(0);

        let outcomes: HashMap<Symbol, QuoteOutcome> = futures::stream::iter(distinct.iter())
            .map(|symbol| {
                let resolver = Arc::clone(&self.resolver);
                let completed = &completed;
                async move {
                    let outcome = resolver.resolve(symbol).await;
                    let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
                    on_progress(done, total);
                    (symbol.clone(), outcome)
                }
            })
            .buffer_unordered(self.concurrency)
            .collect()
            .await;

        let mut skipped = BTreeSet::new();
        for symbol in &distinct {
            if self.resolver.is_excluded(symbol) {
                skipped.insert(symbol.clone());
            } else if outcomes.get(symbol) == Some(&QuoteOutcome::Unresolved) {
                warn!("Dropping {symbol} from the snapshot: no price this session");
            }
        }

        let enriched = rows
            .iter()
            .filter_map(|row| {
                let symbol = Symbol::new(&row.symbol);
                let balance = row.balance?;
                let price = match outcomes.get(&symbol) {
                    Some(QuoteOutcome::Resolved(price)) => *price,
                    _ => return None,
                };
                let total_value = balance * price;
                if !total_value.is_finite() || total_value <= 0.0 {
                    return None;
                }
                Some(EnrichedRow {
                    symbol,
                    balance,
                    price,
                    total_value,
                })
            })
            .collect();

        EnrichedPortfolio {
            rows: enriched,
            skipped,
        }
    }
}
