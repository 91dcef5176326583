//! Configuration file I/O operations

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;

use super::Config;

impl Config {
    /// Get the global config directory path (~/.woofadaar/)
    pub fn global_config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".woofadaar")
    }

    /// Get the global config file path (~/.woofadaar/config.toml)
    pub fn global_config_path() -> PathBuf {
        Self::global_config_dir().join("config.toml")
    }

    /// Load configuration from a file without merging internal defaults.
    pub fn from_file_raw(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load configuration from a file and merge the built-in defaults into it.
    pub fn from_file(path: &Path) -> Result<Self> {
        let mut config = Self::from_file_raw(path)?;
        config.merge_internal_defaults();
        Ok(config)
    }

    /// Load configuration from `path`, or from the global location when `None`.
    ///
    /// A missing file is not an error: the built-in defaults are used.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::global_config_path);

        if !path.exists() {
            tracing::debug!("No config at {}, using built-in defaults", path.display());
            return Ok(Self::with_defaults());
        }

        tracing::debug!("Loading config from {}", path.display());
        Self::from_file(&path)
    }

    /// Create a config containing only the embedded defaults
    pub fn with_defaults() -> Self {
        let mut config = Self::default();
        config.merge_internal_defaults();
        config
    }

    /// Save configuration to a file with atomic write and file locking.
    ///
    /// The exclusive lock lives on a sibling `.lock` file so the rename below
    /// never replaces a locked inode.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).with_context(|| "Failed to serialize config")?;
        write_locked_atomic(path, content.as_bytes())
    }
}

/// Write `content` to `path` under an exclusive lock, via temp file + rename.
///
/// Shared with the ledger, which needs the same crash-safety.
pub(crate) fn write_locked_atomic(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create directory: {}", parent.display())
            })?;
        }
    }

    let lock_file = open_lock_file(path)?;
    lock_file
        .lock_exclusive()
        .with_context(|| format!("Failed to acquire lock for {}", path.display()))?;

    write_atomic(path, content)
    // Lock is released when lock_file is dropped
}

/// Temp file + fsync + rename. Caller must already hold the lock.
pub(crate) fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let temp_path = sibling(path, "tmp");
    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

    temp_file
        .write_all(content)
        .with_context(|| format!("Failed to write {}", temp_path.display()))?;

    temp_file
        .sync_all()
        .with_context(|| format!("Failed to sync {}", temp_path.display()))?;

    std::fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to rename into place: {}", path.display()))?;

    Ok(())
}

/// Open (creating if needed) the lock file that guards `path`
pub(crate) fn open_lock_file(path: &Path) -> Result<std::fs::File> {
    let lock_path = sibling(path, "lock");
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&lock_path)
        .with_context(|| format!("Failed to create lock file: {}", lock_path.display()))
}

/// `config.toml` -> `config.toml.<suffix>`
fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".");
    name.push(suffix);
    PathBuf::from(name)
}
