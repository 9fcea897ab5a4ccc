//! # Roster Store
//!
//! This module provides the NBA player roster domain types and a persistence
//! layer for caching roster snapshots between runs.
//!
//! The roster is expensive to fetch (the stats API is slow and rate limited),
//! so snapshots are kept on disk with a timestamp and reused until they expire.

mod domain;
mod store;

pub use domain::{CachedRoster, Player, Season, DEFAULT_CACHE_TTL};
pub use store::file::FileRosterStore;
pub use store::RosterStore;
