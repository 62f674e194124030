//! # Shop Configuration
//!
//! Configuration loaded at startup by whatever shell embeds the store.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`SOLE_*`)
//! 2. Defaults (this file)
//!
//! Read-only after initialization, so no interior mutability is needed.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Application configuration.
///
/// Most fields have sensible defaults for development; a deployment
/// overrides them through the environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopConfig {
    /// Shop name (displayed in the dashboard header and on exports).
    pub store_name: String,

    /// Currency symbol (for display).
    pub currency_symbol: String,

    /// Number of decimal places for currency.
    pub currency_decimals: u8,

    /// Directory the file-backed snapshot store writes into.
    pub data_dir: PathBuf,

    /// Key the live shop snapshot is stored under.
    pub snapshot_key: String,
}

impl Default for ShopConfig {
    /// Returns default configuration suitable for development.
    fn default() -> Self {
        ShopConfig {
            store_name: "Sole POS Dev Shop".to_string(),
            currency_symbol: "$".to_string(),
            currency_decimals: 2,
            data_dir: PathBuf::from("./data"),
            snapshot_key: "shop".to_string(),
        }
    }
}

impl ShopConfig {
    /// Creates a ShopConfig from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `SOLE_STORE_NAME`: Override the shop name
    /// - `SOLE_DATA_DIR`: Override the snapshot directory
    pub fn from_env() -> Self {
        let mut config = ShopConfig::default();

        if let Ok(store_name) = std::env::var("SOLE_STORE_NAME") {
            config.store_name = store_name;
        }

        if let Ok(data_dir) = std::env::var("SOLE_DATA_DIR") {
            config.data_dir = PathBuf::from(data_dir);
        }

        config
    }

    /// Formats a cent amount as a currency string.
    ///
    /// ## Example
    /// ```rust
    /// use sole_store::config::ShopConfig;
    ///
    /// let config = ShopConfig::default();
    /// assert_eq!(config.format_currency(1234), "$12.34");
    /// ```
    pub fn format_currency(&self, cents: i64) -> String {
        let divisor = 10_i64.pow(self.currency_decimals as u32);
        let whole = cents / divisor;
        let frac = (cents % divisor).abs();

        format!(
            "{}{}{}",
            if cents < 0 { "-" } else { "" },
            self.currency_symbol,
            if self.currency_decimals > 0 {
                format!(
                    "{}.{:0width$}",
                    whole.abs(),
                    frac,
                    width = self.currency_decimals as usize
                )
            } else {
                whole.abs().to_string()
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency_positive() {
        let config = ShopConfig::default();
        assert_eq!(config.format_currency(1234), "$12.34");
        assert_eq!(config.format_currency(100), "$1.00");
        assert_eq!(config.format_currency(1), "$0.01");
        assert_eq!(config.format_currency(0), "$0.00");
    }

    #[test]
    fn test_format_currency_negative() {
        let config = ShopConfig::default();
        assert_eq!(config.format_currency(-1234), "-$12.34");
    }
}
