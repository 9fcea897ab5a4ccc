use std::time::Duration;

use court_roster::{Player, Season};
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, ORIGIN, REFERER, USER_AGENT,
};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use reqwest_retry_after::RetryAfterMiddleware;

use crate::{error::Error, parser::parse_players, roster::PlayerDirectory};

#[derive(Debug, thiserror::Error)]
pub enum NbaStatsError {
    #[error("HTTP error: {0}")]
    Request(#[from] reqwest_middleware::Error),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("API response format error: {0}")]
    Parse(#[from] Error),
}

/// Client for the `commonallplayers` endpoint of `stats.nba.com`.
///
/// The endpoint is flaky and rejects requests that do not look like they come
/// from the nba.com frontend, so every request carries browser headers and
/// transient failures are retried with exponential backoff.
#[derive(Clone)]
pub struct NbaStatsClient {
    client: ClientWithMiddleware,
    base_url: String,
}

impl NbaStatsClient {
    const DEFAULT_BASE_URL: &str = "https://stats.nba.com/stats";
    const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
    const MAX_RETRIES: u32 = 5;
    const BACKOFF_BASE: Duration = Duration::from_millis(500);
    const BACKOFF_CAP: Duration = Duration::from_secs(30);

    pub fn new() -> Self {
        let retry_policy = ExponentialBackoff::builder()
            .retry_bounds(Self::BACKOFF_BASE, Self::BACKOFF_CAP)
            .build_with_max_retries(Self::MAX_RETRIES);

        let client = ClientBuilder::new(reqwest::Client::new())
            .with(RetryAfterMiddleware::new())
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Self {
            client,
            base_url: Self::DEFAULT_BASE_URL.into(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    fn browser_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
            ),
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json, text/plain, */*"));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        headers.insert(ORIGIN, HeaderValue::from_static("https://www.nba.com"));
        headers.insert(REFERER, HeaderValue::from_static("https://www.nba.com/"));
        headers.insert(
            HeaderName::from_static("x-nba-stats-origin"),
            HeaderValue::from_static("stats"),
        );
        headers.insert(
            HeaderName::from_static("x-nba-stats-token"),
            HeaderValue::from_static("true"),
        );
        headers
    }

    #[tracing::instrument(skip_all, fields(season = %season))]
    pub async fn send_players_request(
        &self,
        season: &Season,
    ) -> Result<serde_json::Value, NbaStatsError> {
        let resp = self
            .client
            .get(format!("{}/commonallplayers", self.base_url))
            .query(&[
                ("LeagueID", "00"),
                ("Season", season.as_str()),
                ("IsOnlyCurrentSeason", "1"),
            ])
            .headers(Self::browser_headers())
            .timeout(Self::REQUEST_TIMEOUT)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(NbaStatsError::Api { status, message });
        }

        Ok(resp.json::<serde_json::Value>().await?)
    }
}

impl Default for NbaStatsClient {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerDirectory for NbaStatsClient {
    type Error = NbaStatsError;

    async fn fetch_players(&self, season: &Season) -> Result<Vec<Player>, Self::Error> {
        let json = self.send_players_request(season).await?;

        let players = parse_players(&json, season)
            .inspect_err(|e| tracing::error!(error = %e, "Unexpected stats response format"))?;

        tracing::info!(count = players.len(), season = %season, "Fetched active players");

        Ok(players)
    }
}
