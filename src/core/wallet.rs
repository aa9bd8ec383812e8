//! Wallet input abstractions

use anyhow::Result;
use async_trait::async_trait;

/// One raw wallet holding as delivered by a wallet source. The symbol is not
/// yet normalized; the enricher takes care of that.
#[derive(Debug, Clone)]
pub struct WalletRow {
    pub symbol: String,
    pub balance: Option<f64>,
}

/// A source of wallet holdings, e.g. the Bitpanda API or a saved export.
/// Fetch failures propagate as errors; the enrichment core never runs
/// without an input sequence.
#[async_trait]
pub trait WalletSource: Send + Sync {
    async fn fetch_wallets(&self) -> Result<Vec<WalletRow>>;
}

/// Lenient balance coercion: unparseable or non-finite values become `None`
/// and the row is later excluded from valuation.
pub fn coerce_balance(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|b| b.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerce_balance_accepts_decimal_strings() {
        assert_eq!(coerce_balance("0.5"), Some(0.5));
        assert_eq!(coerce_balance(" 12 "), Some(12.0));
        assert_eq!(coerce_balance("0"), Some(0.0));
    }

    #[test]
    fn coerce_balance_rejects_garbage() {
        assert_eq!(coerce_balance(""), None);
        assert_eq!(coerce_balance("n/a"), None);
        assert_eq!(coerce_balance("NaN"), None);
        assert_eq!(coerce_balance("inf"), None);
    }
}
