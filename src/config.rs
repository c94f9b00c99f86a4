//! Runtime configuration for the query pipeline.

use std::time::Duration;

/// USGS FDSN event query endpoint.
pub const USGS_QUERY_URL: &str = "https://earthquake.usgs.gov/fdsnws/event/1/query";

/// Number of results requested per query.
pub const DEFAULT_LIMIT: u32 = 50;

/// Connect timeout in milliseconds.
pub const CONNECT_TIMEOUT_MS: u64 = 15_000;

/// Read timeout in milliseconds.
pub const READ_TIMEOUT_MS: u64 = 10_000;

/// User agent string for API requests.
pub const USER_AGENT: &str = concat!("quakefeed/", env!("CARGO_PKG_VERSION"));

/// Settings shared by the query builder and the fetcher.
#[derive(Debug, Clone)]
pub struct QuakeConfig {
    /// Query endpoint, without parameters
    pub base_url: String,
    /// Value of the `limit` query parameter
    pub limit: u32,
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
    pub user_agent: String,
}

impl Default for QuakeConfig {
    fn default() -> Self {
        Self {
            base_url: USGS_QUERY_URL.to_string(),
            limit: DEFAULT_LIMIT,
            connect_timeout: Duration::from_millis(CONNECT_TIMEOUT_MS),
            read_timeout: Duration::from_millis(READ_TIMEOUT_MS),
            user_agent: USER_AGENT.to_string(),
        }
    }
}
