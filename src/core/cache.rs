use crate::core::price::{QuoteOutcome, Symbol};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// Session-lifetime memoization of price lookups. No expiry, no eviction;
/// bounded in practice by the number of distinct portfolio symbols.
///
/// Writes are idempotent (a symbol always resolves to the same outcome
/// within a session), so last-writer-wins under concurrent first
/// resolutions is safe.
#[derive(Clone)]
pub struct QuoteCache {
    inner: Arc<Mutex<HashMap<Symbol, QuoteOutcome>>>,
}

impl QuoteCache {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub async fn get(&self, symbol: &Symbol) -> Option<QuoteOutcome> {
        let cache = self.inner.lock().await;
        let value = cache.get(symbol).copied();
        if value.is_some() {
            debug!("Quote cache HIT for {symbol}");
        } else {
            debug!("Quote cache MISS for {symbol}");
        }
        value
    }

    pub async fn put(&self, symbol: Symbol, outcome: QuoteOutcome) {
        let mut cache = self.inner.lock().await;
        debug!("Quote cache PUT for {symbol}: {outcome:?}");
        cache.insert(symbol, outcome);
    }
}

impl Default for QuoteCache {
    fn default() -> Self {
        Self::new()
    }
}
