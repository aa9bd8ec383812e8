use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct WalletConfig {
    #[serde(default = "default_wallet_base_url")]
    pub base_url: String,
    /// Bitpanda API key; the BITPANDA_API_KEY environment variable is used
    /// when unset.
    pub api_key: Option<String>,
    /// Read wallets from a saved /wallets JSON export instead of the API.
    pub export_file: Option<String>,
}

impl Default for WalletConfig {
    fn default() -> Self {
        WalletConfig {
            base_url: default_wallet_base_url(),
            api_key: None,
            export_file: None,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProviderConfig {
    #[serde(default = "default_provider_base_url")]
    pub base_url: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig {
            base_url: default_provider_base_url(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LookupConfig {
    /// Total network attempts per symbol before it is given up for the
    /// session.
    #[serde(default = "default_retries")]
    pub retries: usize,
    #[serde(default = "default_retry_delay_secs")]
    pub retry_delay_secs: u64,
    /// Minimum interval between consecutive price lookups.
    #[serde(default = "default_pacing_ms")]
    pub pacing_ms: u64,
    /// Parallel lookups. The pacing interval still bounds the aggregate
    /// request rate.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

impl Default for LookupConfig {
    fn default() -> Self {
        LookupConfig {
            retries: default_retries(),
            retry_delay_secs: default_retry_delay_secs(),
            pacing_ms: default_pacing_ms(),
            concurrency: default_concurrency(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub wallet: WalletConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default = "default_quote_currency")]
    pub quote_currency: String,
    #[serde(default)]
    pub lookup: LookupConfig,
    pub exclusions_file: Option<String>,
    pub data_path: Option<String>,
}

fn default_wallet_base_url() -> String {
    "https://api.bitpanda.com/v1".to_string()
}

fn default_provider_base_url() -> String {
    "https://query1.finance.yahoo.com".to_string()
}

fn default_quote_currency() -> String {
    "EUR".to_string()
}

fn default_retries() -> usize {
    3
}

fn default_retry_delay_secs() -> u64 {
    2
}

fn default_pacing_ms() -> u64 {
    1000
}

fn default_concurrency() -> usize {
    1
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("dev", "coinfolio", "coinfolio")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn default_data_path(&self) -> Result<PathBuf> {
        if let Some(custom_path) = &self.data_path {
            return Ok(PathBuf::from(custom_path));
        }
        let proj_dirs = ProjectDirs::from("dev", "coinfolio", "coinfolio")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    /// Location of the exclusion override file: the configured path, or
    /// exclusions.txt in the data directory.
    pub fn exclusions_path(&self) -> Result<PathBuf> {
        if let Some(custom_path) = &self.exclusions_file {
            return Ok(PathBuf::from(custom_path));
        }
        Ok(self.default_data_path()?.join("exclusions.txt"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
wallet:
  api_key: "secret"
provider:
  base_url: "http://example.com/yahoo"
quote_currency: "USD"
lookup:
  retries: 5
  pacing_ms: 250
exclusions_file: "/tmp/exclusions.txt"
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.wallet.base_url, "https://api.bitpanda.com/v1");
        assert_eq!(config.wallet.api_key.as_deref(), Some("secret"));
        assert!(config.wallet.export_file.is_none());
        assert_eq!(config.provider.base_url, "http://example.com/yahoo");
        assert_eq!(config.quote_currency, "USD");
        assert_eq!(config.lookup.retries, 5);
        assert_eq!(config.lookup.pacing_ms, 250);
        // Untouched knobs keep their defaults
        assert_eq!(config.lookup.retry_delay_secs, 2);
        assert_eq!(config.lookup.concurrency, 1);
        assert_eq!(
            config.exclusions_path().unwrap(),
            PathBuf::from("/tmp/exclusions.txt")
        );
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = serde_yaml::from_str("{}").expect("Failed to deserialize");
        assert_eq!(config.provider.base_url, "https://query1.finance.yahoo.com");
        assert_eq!(config.quote_currency, "EUR");
        assert_eq!(config.lookup.retries, 3);
        assert_eq!(config.lookup.pacing_ms, 1000);
    }

    #[test]
    fn test_data_path_override() {
        let config: AppConfig = serde_yaml::from_str("data_path: /tmp/coinfolio").unwrap();
        assert_eq!(
            config.default_data_path().unwrap(),
            PathBuf::from("/tmp/coinfolio")
        );
        assert_eq!(
            config.exclusions_path().unwrap(),
            PathBuf::from("/tmp/coinfolio/exclusions.txt")
        );
    }
}
