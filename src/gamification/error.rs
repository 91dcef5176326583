//! Engine error types
//!
//! Only two things can go wrong inside the engine: a caller names an action the
//! catalog does not know, or the catalog itself is malformed. Everything else
//! ("not achieved yet", missing metrics) is a normal result.

/// An action id that is not present in the action catalog.
///
/// Callers must not award points when they get this back.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown action: {action}{}", suggestion_suffix(.suggestion))]
pub struct InvalidActionError {
    pub action: String,
    /// Closest known action id, if one is similar enough
    pub suggestion: Option<String>,
}

fn suggestion_suffix(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(s) => format!(" (did you mean '{}'?)", s),
        None => String::new(),
    }
}

/// Catalog authoring mistakes, detected once when the catalog is built
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidCatalogError {
    #[error("Action id must not be empty")]
    EmptyActionId,

    #[error("Action '{0}' must award at least one point")]
    ZeroBasePoints(String),

    #[error("Multiplier '{name}' must be greater than 1.0 (got {value})")]
    MultiplierNotAboveOne { name: &'static str, value: f64 },

    #[error("Regional bonus '{name}' must be at least 1.0 (got {value})")]
    RegionalBonusBelowOne { name: String, value: f64 },

    #[error("Level thresholds must not be empty")]
    EmptyThresholds,

    #[error("First level threshold must be 0 (got {0})")]
    FirstThresholdNotZero(u64),

    #[error("Level thresholds must be strictly increasing (index {index}: {value} <= {previous})")]
    NonIncreasingThresholds { index: usize, previous: u64, value: u64 },

    #[error("Level overflow step must be positive")]
    ZeroOverflowStep,

    #[error("Duplicate achievement id: {0}")]
    DuplicateAchievement(String),

    #[error("Duplicate chain id: {0}")]
    DuplicateChain(String),

    #[error("Achievement '{0}' has an empty condition metric")]
    EmptyMetric(String),

    #[error("Achievement '{id}' has an invalid target {target}")]
    InvalidTarget { id: String, target: f64 },

    #[error("Chain '{chain}' declares {declared} levels but defines {defined}")]
    LevelCountMismatch {
        chain: String,
        declared: u32,
        defined: usize,
    },

    #[error("Chain '{chain}' level at position {position} is numbered {found}")]
    LevelNumbering {
        chain: String,
        position: usize,
        found: u32,
    },

    #[error("Chain '{chain}' target for level {level} ({target}) does not exceed the previous level ({previous})")]
    NonIncreasingChainTargets {
        chain: String,
        level: u32,
        previous: f64,
        target: f64,
    },
}
