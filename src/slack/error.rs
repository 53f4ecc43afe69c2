//! Errors returned by Slack API calls

use thiserror::Error;

/// Failure of a single Slack Web API call
#[derive(Debug, Error)]
pub enum SlackError {
    /// Transport failure (connect, timeout, body read)
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx HTTP status
    #[error("HTTP error: {0}")]
    Status(u16),

    /// `"ok": false` envelope, carrying Slack's error code
    #[error("Slack API error: {0}")]
    Api(String),

    /// Body was not the JSON we expected
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl SlackError {
    /// Slack error code for `ok=false` responses
    pub fn api_code(&self) -> Option<&str> {
        match self {
            Self::Api(code) => Some(code),
            _ => None,
        }
    }
}
