//! Pricing abstractions and core types

use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;
use std::fmt::Display;

/// Canonical uppercase ticker for a tradable asset.
///
/// Every cache key, exclusion membership test and network lookup goes through
/// this type, so all three subsystems agree on one canonical form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(raw: &str) -> Self {
        Symbol(raw.trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Terminal outcome of a price lookup for one symbol within a session.
///
/// `Unresolved` is a cacheable result in its own right, distinct from
/// "not yet attempted" (absence from the cache).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuoteOutcome {
    /// A usable market price. Always strictly positive and finite.
    Resolved(f64),
    /// No usable price for this session.
    Unresolved,
}

/// A live market price source. One lookup per call; retries, pacing, caching
/// and exclusions all live in the resolver.
#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn fetch_price(&self, symbol: &Symbol) -> Result<f64>;
}
