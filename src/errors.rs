//! Error types for quakefeed.
//!
//! Uses `thiserror` for library-style error definitions. Pipeline entry
//! points collapse every variant into "no data"; the variants exist so the
//! reason can be logged and asserted on.

use thiserror::Error;

/// Errors that can occur while building, fetching, or decoding a query.
#[derive(Error, Debug)]
pub enum QuakeError {
    /// The request URL could not be parsed
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// HTTP request failed (connect, timeout, or body read)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Service answered with something other than 200
    #[error("USGS API error (HTTP {status})")]
    Status { status: u16 },

    /// Nothing to decode
    #[error("empty response body")]
    EmptyBody,

    /// JSON parsing failed or a required field was missing
    #[error("failed to parse JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

impl QuakeError {
    /// Build a [`QuakeError::InvalidUrl`] from any displayable parse failure.
    pub(crate) fn invalid_url(url: &str, reason: impl std::fmt::Display) -> Self {
        Self::InvalidUrl {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }
}
