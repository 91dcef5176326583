//! Woofadaar points - gamification engine for the Woofadaar dog-parent community
//!
//! Community activity earns points, points resolve to levels, and statistics
//! snapshots unlock achievements and advance multi-level achievement chains.
//!
//! ## Layers
//!
//! 1. **[`gamification`]**: the pure engine. Every operation takes a validated
//!    [`gamification::Catalog`] plus caller-supplied state and returns a value;
//!    nothing is persisted or sent.
//!
//! 2. **[`config`]**: TOML catalogs with built-in defaults merged in.
//!
//! 3. **[`ledger`]**: a local JSON ledger that plays the caller's part,
//!    crediting each (user, action, source id) at most once.

pub mod config;
pub mod gamification;
pub mod ledger;

pub use gamification::{
    Catalog, ContextFlags, GamificationEngine, GamificationEvent, InvalidActionError,
    InvalidCatalogError, UserStatsSnapshot,
};
