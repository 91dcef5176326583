//! Action catalog: which user behaviours earn points, and how many

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::error::{InvalidActionError, InvalidCatalogError};

/// Minimum Jaro-Winkler similarity for an "unknown action" suggestion
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Immutable mapping from action id to base points
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionCatalog {
    actions: BTreeMap<String, u32>,
}

impl ActionCatalog {
    /// Build a catalog, rejecting empty ids and zero-point actions
    pub fn new(actions: BTreeMap<String, u32>) -> Result<Self, InvalidCatalogError> {
        for (id, points) in &actions {
            if id.trim().is_empty() {
                return Err(InvalidCatalogError::EmptyActionId);
            }
            if *points == 0 {
                return Err(InvalidCatalogError::ZeroBasePoints(id.clone()));
            }
        }
        Ok(Self { actions })
    }

    /// Base points for an action, or an error naming the closest known id
    pub fn base_points(&self, action: &str) -> Result<u32, InvalidActionError> {
        self.actions
            .get(action)
            .copied()
            .ok_or_else(|| InvalidActionError {
                action: action.to_string(),
                suggestion: self.closest(action),
            })
    }

    pub fn contains(&self, action: &str) -> bool {
        self.actions.contains_key(action)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.actions.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    fn closest(&self, action: &str) -> Option<String> {
        let needle = action.to_lowercase();
        self.actions
            .keys()
            .map(|k| (k, strsim::jaro_winkler(&needle, &k.to_lowercase())))
            .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(k, _)| k.clone())
    }
}
