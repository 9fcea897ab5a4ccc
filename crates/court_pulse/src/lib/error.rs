#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Parse error: {0}")]
    ParseError(&'static str),

    #[error("Missing column '{0}' in stats response")]
    MissingColumn(&'static str),

    #[error("Could not extract a YouTube video id from '{0}'")]
    InvalidUrl(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
