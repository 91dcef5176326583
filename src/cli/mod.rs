//! CLI command implementations

pub mod achievements;
pub mod award;
pub mod catalog;
pub mod chains;
pub mod init;
pub mod level;
pub mod points;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;

use woofadaar_points::config::Config;
use woofadaar_points::gamification::{GamificationEngine, UserStatsSnapshot};
use woofadaar_points::ledger::LedgerStore;

/// Load the config from `--config`, or the global one
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    Config::load_from(config_path)
}

/// Validate the catalogs and wrap them in an engine
pub fn build_engine(config: &Config) -> Result<GamificationEngine> {
    let catalog = config
        .build_catalog()
        .context("Invalid catalog in configuration")?;
    Ok(GamificationEngine::new(Arc::new(catalog)))
}

/// `--ledger` wins over `settings.ledger_path`
pub fn ledger_store(config: &Config, ledger_override: Option<&PathBuf>) -> LedgerStore {
    let path = ledger_override
        .cloned()
        .unwrap_or_else(|| config.ledger_path());
    LedgerStore::new(path)
}

/// Read a statistics snapshot (`{"as_of": ..., "metrics": {...}}`)
pub fn read_stats(path: &Path) -> Result<UserStatsSnapshot> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read stats file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse stats file: {}", path.display()))
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
