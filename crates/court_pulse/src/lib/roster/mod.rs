pub mod nba_stats;

use std::{fmt::Debug, future::Future, time::Duration};

use court_roster::{Player, Season};
use itertools::Itertools;

pub trait PlayerDirectory {
    type Error: Debug;

    fn fetch_players(
        &self,
        season: &Season,
    ) -> impl Future<Output = Result<Vec<Player>, Self::Error>> + Send;
}

/// How much to trust the on-disk roster snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RosterPolicy {
    /// Use a fresh snapshot, fetch otherwise, fall back to any snapshot on failure
    #[default]
    Cached,
    /// Always fetch; fall back only to a fresh snapshot
    Refresh,
    /// Never touch the network; any snapshot will do
    Offline,
}

/// Where a loaded roster came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterOrigin {
    Fetched,
    Cache { age: Duration },
    StaleCache { age: Duration },
}

#[derive(Debug, Clone)]
pub struct Roster {
    pub players: Vec<Player>,
    pub origin: RosterOrigin,
}

impl Roster {
    pub fn new(players: Vec<Player>, origin: RosterOrigin) -> Self {
        Self { players, origin }
    }

    /// Sorted, de-duplicated player names used as the matching vocabulary
    pub fn names(&self) -> Vec<String> {
        self.players
            .iter()
            .map(|p| p.full_name.clone())
            .sorted()
            .dedup()
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(id: i64, name: &str) -> Player {
        Player {
            player_id: id,
            full_name: name.into(),
            team_id: 1,
            team: "Team".into(),
            is_active: true,
        }
    }

    #[test]
    fn test_names_are_sorted_and_unique() {
        let roster = Roster::new(
            vec![
                player(3, "Stephen Curry"),
                player(1, "Anthony Davis"),
                player(2, "Stephen Curry"),
            ],
            RosterOrigin::Fetched,
        );

        assert_eq!(roster.names(), vec!["Anthony Davis", "Stephen Curry"]);
        assert_eq!(roster.len(), 3);
    }
}
