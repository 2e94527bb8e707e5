use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::sync::RwLock;

use crate::paths;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub sync: SyncConfig,
    #[serde(default)]
    pub webserver: WebserverConfig,
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub filters: FilterConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    pub enabled: bool,
    /// DeFiLlama protocols endpoint
    pub api_url: String,
    /// HTTP timeout for the fetch
    pub timeout_secs: u64,
    /// Hour of day (local time) for the scheduled daily sync
    pub sync_hour: u32,
    /// Minute of the scheduled daily sync
    pub sync_minute: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebserverConfig {
    pub enabled: bool,
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TelegramConfig {
    pub enabled: bool,
    /// Bot token from @BotFather
    pub bot_token: String,
    /// Chat ID for weekly report notifications
    pub chat_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Category allow-list, matched case-insensitively
    pub allowed_categories: Vec<String>,
    /// Default minimum TVL for reports when the request omits min_tvl
    pub default_min_tvl: f64,
    /// Default top-N truncation for the weekly notification report
    pub weekly_top_n: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_url: "https://api.llama.fi/protocols".to_string(),
            timeout_secs: 30,
            sync_hour: 4,
            sync_minute: 5,
        }
    }
}

impl Default for WebserverConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            allowed_categories: vec![
                "lending".to_string(),
                "options".to_string(),
                "rwa lending".to_string(),
                "cdp".to_string(),
                "derivatives".to_string(),
                "yield aggregator".to_string(),
                "yield".to_string(),
                "dexs".to_string(),
                "algo-stables".to_string(),
                "anchor btc".to_string(),
                "indexes".to_string(),
                "leveraged farming".to_string(),
                "liquid restaking".to_string(),
                "liquid staking".to_string(),
                "liquidity manager".to_string(),
            ],
            default_min_tvl: 0.0,
            weekly_top_n: 10,
        }
    }
}

// =============================================================================
// GLOBAL CONFIG ACCESS
// =============================================================================

static CONFIG: Lazy<RwLock<Option<Config>>> = Lazy::new(|| RwLock::new(None));

/// Load config.toml from the data directory into the global slot
///
/// A missing file is not an error: defaults are written back so the user
/// has a file to edit.
pub fn load_config() -> Result<()> {
    let path = paths::get_config_path();

    let config = if path.exists() {
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("Failed to parse {}", path.display()))?
    } else {
        let config = Config::default();
        let raw = toml::to_string_pretty(&config).context("Failed to serialize default config")?;
        fs::write(&path, raw).with_context(|| format!("Failed to write {}", path.display()))?;
        config
    };

    if let Ok(mut guard) = CONFIG.write() {
        *guard = Some(config);
    }

    Ok(())
}

/// Whether load_config has run
pub fn is_config_initialized() -> bool {
    CONFIG.read().map(|c| c.is_some()).unwrap_or(false)
}

/// Replace the global config (tests and the manual-settings path)
pub fn set_config(config: Config) {
    if let Ok(mut guard) = CONFIG.write() {
        *guard = Some(config);
    }
}

/// Access the global config through a closure, falling back to defaults
/// when load_config has not run (unit tests, one-shot tools)
pub fn with_config<T>(f: impl FnOnce(&Config) -> T) -> T {
    if let Ok(guard) = CONFIG.read() {
        if let Some(config) = guard.as_ref() {
            return f(config);
        }
    }
    f(&Config::default())
}
