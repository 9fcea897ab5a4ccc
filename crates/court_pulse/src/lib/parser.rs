//! # Stats Parser
//!
//! Turns the tabular `commonallplayers` payload from `stats.nba.com` into
//! [`Player`] records for the requested season.

use court_roster::{Player, Season};
use serde::Deserialize;
use serde_json::Value;

use crate::{
    error::Error,
    types::{ResultSet, StatsResponse},
};

const FREE_AGENT: &str = "Free Agent";

/// Column positions of the fields we read from a `commonallplayers` row
struct Columns {
    person_id: usize,
    display_name: usize,
    team_id: usize,
    team_name: usize,
    to_year: usize,
}

impl Columns {
    fn locate(headers: &[String]) -> Result<Self, Error> {
        let find = |name: &'static str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or(Error::MissingColumn(name))
        };

        Ok(Columns {
            person_id: find("PERSON_ID")?,
            display_name: find("DISPLAY_FIRST_LAST")?,
            team_id: find("TEAM_ID")?,
            team_name: find("TEAM_NAME")?,
            to_year: find("TO_YEAR")?,
        })
    }
}

/// Parses the players active in `season` from a `commonallplayers` response.
///
/// # Parameters
/// * `json`: The decoded response body.
/// * `season`: Only players whose `TO_YEAR` matches the season's start year are kept.
///
/// # Returns
/// * `Ok(Vec<Player>)` with every well-formed row for the season.
/// * `Err(Error)` if the payload has no result set or lacks a required column.
#[tracing::instrument(skip_all, fields(season = %season))]
pub fn parse_players(json: &Value, season: &Season) -> Result<Vec<Player>, Error> {
    let response = StatsResponse::deserialize(json)?;
    let result_set = response
        .result_sets
        .first()
        .ok_or(Error::ParseError("Response contains no 'resultSets'"))?;

    parse_result_set(result_set, season)
}

fn parse_result_set(result_set: &ResultSet, season: &Season) -> Result<Vec<Player>, Error> {
    let columns = Columns::locate(&result_set.headers)?;
    let mut players = Vec::new();

    for row in &result_set.row_set {
        let Some(to_year) = row.get(columns.to_year).and_then(value_as_string) else {
            continue;
        };
        if to_year != season.start_year() {
            continue;
        }

        match player_from_row(row, &columns) {
            Some(player) => players.push(player),
            None => tracing::debug!(?row, "Skipping malformed player row"),
        }
    }

    Ok(players)
}

fn player_from_row(row: &[Value], columns: &Columns) -> Option<Player> {
    let player_id = row.get(columns.person_id).and_then(value_as_i64)?;
    let full_name = row.get(columns.display_name)?.as_str()?.trim().to_string();
    let team_id = row.get(columns.team_id).and_then(value_as_i64)?;

    if full_name.is_empty() {
        return None;
    }

    let team = if team_id == 0 {
        FREE_AGENT.to_string()
    } else {
        row.get(columns.team_name)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };

    Some(Player {
        player_id,
        full_name,
        team_id,
        team,
        is_active: true,
    })
}

/// The stats API is inconsistent about quoting numbers
fn value_as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn value_as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
