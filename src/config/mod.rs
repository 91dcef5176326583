//! Configuration loading and management
//!
//! The configuration file holds every catalog the engine evaluates plus a few
//! application settings. Built-in defaults are embedded at compile time and
//! merged into whatever the user provides.

mod internal;
mod io;

pub use internal::{InternalDefaults, INTERNAL_DEFAULTS_TOML};
pub(crate) use io::{open_lock_file, write_atomic};

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::gamification::{
    AchievementDefinition, ActionCatalog, Catalog, ChainDefinition, ContextMultipliers,
    InvalidCatalogError, LevelThresholds, RegionalBonusTable, DEFAULT_OVERFLOW_STEP,
};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Action id -> base points
    #[serde(default)]
    pub actions: BTreeMap<String, u32>,

    /// Context multipliers
    #[serde(default)]
    pub multipliers: ContextMultipliers,

    /// Regional bonuses
    #[serde(default)]
    pub regional: RegionalBonusTable,

    /// Level table
    #[serde(default)]
    pub levels: LevelConfig,

    /// Standalone achievements
    #[serde(default)]
    pub achievement: Vec<AchievementDefinition>,

    /// Achievement chains
    #[serde(default)]
    pub chain: Vec<ChainDefinition>,

    /// General settings
    #[serde(default)]
    pub settings: Settings,
}

/// Level thresholds as written in the config file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelConfig {
    #[serde(default)]
    pub thresholds: Vec<u64>,
    #[serde(default)]
    pub titles: Vec<String>,
    #[serde(default = "default_overflow_step")]
    pub overflow_step: u64,
}

fn default_overflow_step() -> u64 {
    DEFAULT_OVERFLOW_STEP
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            thresholds: Vec::new(),
            titles: Vec::new(),
            overflow_step: default_overflow_step(),
        }
    }
}

/// General settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Ledger file used by the CLI (defaults to ~/.woofadaar/ledger.json)
    #[serde(default)]
    pub ledger_path: Option<PathBuf>,
}

impl Config {
    /// Validate and freeze the catalogs into an engine [`Catalog`]
    pub fn build_catalog(&self) -> Result<Catalog, InvalidCatalogError> {
        Catalog::new(
            ActionCatalog::new(self.actions.clone())?,
            self.multipliers,
            self.regional.clone(),
            LevelThresholds::new(
                self.levels.thresholds.clone(),
                self.levels.titles.clone(),
                self.levels.overflow_step,
            )?,
            self.achievement.clone(),
            self.chain.clone(),
        )
    }

    /// Ledger location from settings, falling back to the global default
    pub fn ledger_path(&self) -> PathBuf {
        self.settings
            .ledger_path
            .clone()
            .unwrap_or_else(|| Self::global_config_dir().join("ledger.json"))
    }

    pub fn get_achievement(&self, id: &str) -> Option<&AchievementDefinition> {
        self.achievement.iter().find(|a| a.id == id)
    }

    pub fn get_chain(&self, id: &str) -> Option<&ChainDefinition> {
        self.chain.iter().find(|c| c.id == id)
    }

    /// Merge the embedded defaults into this config. Returns true if anything changed.
    pub fn merge_internal_defaults(&mut self) -> bool {
        match InternalDefaults::load() {
            Ok(defaults) => defaults.merge_into(self),
            Err(e) => {
                tracing::error!("Failed to parse internal defaults: {}", e);
                false
            }
        }
    }
}
