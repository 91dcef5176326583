//! Local award ledger
//!
//! The engine never persists anything; this module is the reference sink the
//! CLI uses. Records live in a single JSON file (`~/.woofadaar/ledger.json`
//! by default) guarded by an exclusive file lock.

mod models;
mod recorder;
mod store;

pub use models::{Ledger, PointTransaction, UserRecord, SOURCE_ACHIEVEMENT, SOURCE_CHAIN};
pub use recorder::{
    AwardOutcome, AwardRecorder, AwardRequest, LIFETIME_POINTS_METRIC, STREAK_DAYS_METRIC,
};
pub use store::LedgerStore;
