//! Configuration management
//!
//! Display settings live in an optional settings.json next to the snapshot
//! document:
//! ```json
//! {
//!   "currencySymbol": "£",
//!   "pageSize": 25
//! }
//! ```
//! A missing or unreadable-as-JSON file falls back to defaults; settings
//! are cosmetic and must never block a load.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::result::Result;

fn default_currency_symbol() -> String {
    "£".to_string()
}

fn default_page_size() -> usize {
    25
}

/// Raw settings.json structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default = "default_currency_symbol")]
    currency_symbol: String,
    #[serde(default = "default_page_size")]
    page_size: usize,
}

impl Default for SettingsFile {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
            page_size: default_page_size(),
        }
    }
}

/// Tally configuration (simplified view of settings)
#[derive(Debug, Clone)]
pub struct Config {
    /// Symbol prefixed to money in terminal output; never written to CSV
    pub currency_symbol: String,
    /// Default rows per page for the invoice table
    pub page_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
            page_size: default_page_size(),
        }
    }
}

impl Config {
    /// Load config from the directory holding settings.json.
    ///
    /// The page size can be overridden via TALLY_PAGE_SIZE (for CI/testing).
    pub fn load(dir: &Path) -> Result<Self> {
        let settings_path = dir.join("settings.json");

        let raw: SettingsFile = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str(&content).unwrap_or_default()
        } else {
            SettingsFile::default()
        };

        let page_size = match std::env::var("TALLY_PAGE_SIZE")
            .ok()
            .and_then(|value| value.parse::<usize>().ok())
        {
            Some(size) if size > 0 => size,
            _ => raw.page_size,
        };

        Ok(Self {
            currency_symbol: raw.currency_symbol,
            page_size,
        })
    }
}
