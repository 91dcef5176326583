//! JSON file store for the ledger
//!
//! Every mutation runs as load, check, write under one exclusive lock so two
//! processes can never credit the same (user, source, source_id) twice.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;

use super::models::Ledger;
use crate::config::{open_lock_file, write_atomic};

#[derive(Debug, Clone)]
pub struct LedgerStore {
    path: PathBuf,
}

impl LedgerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the ledger. A missing file is an empty ledger.
    pub fn load(&self) -> Result<Ledger> {
        read_ledger(&self.path)
    }

    /// Run `f` against the ledger while holding the exclusive lock, then
    /// persist the result atomically.
    ///
    /// Nothing is written when `f` fails.
    pub fn update<T>(&self, f: impl FnOnce(&mut Ledger) -> Result<T>) -> Result<T> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create ledger dir: {}", parent.display())
                })?;
            }
        }

        let lock_file = open_lock_file(&self.path)?;
        lock_file
            .lock_exclusive()
            .with_context(|| format!("Failed to lock ledger: {}", self.path.display()))?;

        let mut ledger = read_ledger(&self.path)?;
        let value = f(&mut ledger)?;

        let content =
            serde_json::to_vec_pretty(&ledger).with_context(|| "Failed to serialize ledger")?;
        write_atomic(&self.path, &content)?;

        tracing::debug!("Ledger written to {}", self.path.display());
        Ok(value)
    }
}

fn read_ledger(path: &Path) -> Result<Ledger> {
    if !path.exists() {
        return Ok(Ledger::default());
    }

    let content = std::fs::read(path)
        .with_context(|| format!("Failed to read ledger: {}", path.display()))?;
    if content.is_empty() {
        return Ok(Ledger::default());
    }

    serde_json::from_slice(&content)
        .with_context(|| format!("Failed to parse ledger: {}", path.display()))
}
