use std::sync::LazyLock;

use regex::Regex;

use crate::error::Error;

/// Matches `watch?v=ID`, `youtu.be/ID`, `/embed/ID`, `/shorts/ID`, `/live/ID`
static VIDEO_ID_IN_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:v=|/)([0-9A-Za-z_-]{11}).*").unwrap());

static BARE_VIDEO_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9A-Za-z_-]{11}$").unwrap());

/// Extracts the 11 character video id from a YouTube URL, or accepts a bare id.
pub fn extract_video_id(url: &str) -> Result<String, Error> {
    let url = url.trim();

    if BARE_VIDEO_ID_RE.is_match(url) {
        return Ok(url.to_string());
    }

    VIDEO_ID_IN_URL_RE
        .captures(url)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| Error::InvalidUrl(url.to_string()))
}
