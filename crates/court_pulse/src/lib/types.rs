//! Raw payload shapes of the `stats.nba.com` endpoints

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub result_sets: Vec<ResultSet>,
}

/// A tabular result: column names in `headers`, one positional array per row
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSet {
    #[serde(default)]
    pub name: Option<String>,
    pub headers: Vec<String>,
    pub row_set: Vec<Vec<Value>>,
}
