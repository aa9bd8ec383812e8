use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::wallet::{WalletRow, WalletSource};
use crate::providers::bitpanda::parse_wallets;

/// Wallet holdings from a saved /wallets JSON export on disk. Useful for
/// offline runs and for keeping the API key off a machine entirely.
pub struct ExportFileSource {
    path: PathBuf,
}

impl ExportFileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        ExportFileSource {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl WalletSource for ExportFileSource {
    async fn fetch_wallets(&self) -> Result<Vec<WalletRow>> {
        debug!("Reading wallet export from {}", self.path.display());
        let body = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read wallet export: {}", self.path.display()))?;
        parse_wallets(&body)
    }
}
