//! Query URL construction for the USGS event service.
//!
//! The service validates magnitude and ordering values itself, so both are
//! passed through verbatim.

use std::fmt::Display;

use chrono::{DateTime, Days, TimeDelta, TimeZone};
use reqwest::Url;
use tracing::{debug, warn};

use crate::errors::QuakeError;

/// Timestamp layout expected by the `starttime` parameter.
pub const STARTTIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// How far back a query reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeWindow {
    /// Up to 24 hours
    Day,
    /// Up to 48 hours
    TwoDays,
    /// Within this week
    Week,
    /// Within this fortnight
    Fortnight,
}

impl TimeWindow {
    /// Map a stored preference code to a window. Unknown codes yield `None`.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "24" => Some(Self::Day),
            "48" => Some(Self::TwoDays),
            "7" => Some(Self::Week),
            "14" => Some(Self::Fortnight),
            _ => None,
        }
    }

    /// Preference code for this window.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Day => "24",
            Self::TwoDays => "48",
            Self::Week => "7",
            Self::Fortnight => "14",
        }
    }

    /// Number of calendar days subtracted from "now".
    #[must_use]
    pub const fn days(self) -> u32 {
        match self {
            Self::Day => 1,
            Self::TwoDays => 2,
            Self::Week => 7,
            Self::Fortnight => 14,
        }
    }
}

impl std::str::FromStr for TimeWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| format!("unknown time window: {s} (expected: 24, 48, 7, 14)"))
    }
}

/// User-chosen query filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryFilters {
    /// `None` queries from "now" (unrecognised preference code)
    pub time_window: Option<TimeWindow>,
    /// Minimum magnitude, passed through as typed
    pub min_magnitude: String,
    /// Service sort order (`time`, `time-asc`, `magnitude`, `magnitude-asc`)
    pub order_by: String,
}

impl Default for QueryFilters {
    fn default() -> Self {
        Self {
            time_window: Some(TimeWindow::Day),
            min_magnitude: "2.5".to_string(),
            order_by: "time".to_string(),
        }
    }
}

/// Compute the `starttime` value for a window relative to `now`.
///
/// Days are calendar days in `now`'s zone, so the wall-clock time is kept
/// across a daylight-saving change and the offset printed is the one in
/// force at the start instant.
#[must_use]
pub fn start_time<Tz>(window: Option<TimeWindow>, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let start = window
        .and_then(|w| {
            now.clone()
                .checked_sub_days(Days::new(u64::from(w.days())))
                // Wall-clock time skipped or repeated on the target day.
                .or_else(|| {
                    now.clone()
                        .checked_sub_signed(TimeDelta::days(i64::from(w.days())))
                })
        })
        .unwrap_or_else(|| now.clone());
    start.format(STARTTIME_FORMAT).to_string()
}

/// Build the full query URL.
///
/// # Errors
///
/// Returns [`QuakeError::InvalidUrl`] if `base_url` cannot be parsed.
pub fn build_query_url<Tz>(
    base_url: &str,
    filters: &QueryFilters,
    limit: u32,
    now: &DateTime<Tz>,
) -> Result<Url, QuakeError>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut url = Url::parse(base_url).map_err(|e| QuakeError::invalid_url(base_url, e))?;

    url.query_pairs_mut()
        .append_pair("format", "geojson")
        .append_pair("starttime", &start_time(filters.time_window, now))
        .append_pair("limit", &limit.to_string())
        .append_pair("minmagnitude", &filters.min_magnitude)
        .append_pair("orderby", &filters.order_by);

    debug!("built query url {}", url);
    Ok(url)
}

/// Build the query URL, logging a failure and collapsing it to `None`.
#[must_use]
pub fn query_url<Tz>(
    base_url: &str,
    filters: &QueryFilters,
    limit: u32,
    now: &DateTime<Tz>,
) -> Option<Url>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match build_query_url(base_url, filters, limit, now) {
        Ok(url) => Some(url),
        Err(e) => {
            warn!("problem building the query url: {}", e);
            None
        }
    }
}
