use std::{fmt, time::Duration};

use chrono::{DateTime, Datelike, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// How long a roster snapshot is trusted before the stats API is queried again
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub player_id: i64,
    pub full_name: String,
    pub team_id: i64,
    pub team: String,
    pub is_active: bool,
}

/// An NBA season label in the `YYYY-YY` form used by the stats API, e.g. `2024-25`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Season(String);

impl Season {
    /// Seasons tip off in October; anything before that belongs to the
    /// season that started the previous calendar year.
    pub fn for_date(date: NaiveDate) -> Self {
        let year = date.year();
        let start = if date.month() >= 10 { year } else { year - 1 };
        let end = (start + 1).rem_euclid(100);

        Season(format!("{start}-{end:02}"))
    }

    pub fn current() -> Self {
        Self::for_date(Local::now().date_naive())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The calendar year the season started in, as reported in `TO_YEAR`
    pub fn start_year(&self) -> &str {
        self.0.get(..4).unwrap_or(&self.0)
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A timestamped roster snapshot as persisted by a [`crate::RosterStore`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedRoster {
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "data")]
    pub players: Vec<Player>,
}

impl CachedRoster {
    pub fn new(players: Vec<Player>) -> Self {
        Self {
            timestamp: Utc::now(),
            players,
        }
    }

    /// Snapshots stamped in the future (clock skew) are treated as brand new
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        (now - self.timestamp).to_std().unwrap_or(Duration::ZERO)
    }

    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        self.age(now) < ttl
    }
}
