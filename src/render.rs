//! List row rendering.
//!
//! Combines the formatting helpers with the user's display preferences and
//! the tsunami banner rule into a single row value that output writers can
//! print without further decisions.

use std::fmt::Display;

use chrono::{DateTime, TimeZone};
use serde::Serialize;

use crate::format::{self, MagnitudeBucket};
use crate::models::EarthquakeRecord;

/// Circle colour used for same-day tsunami warnings.
pub const TSUNAMI_ALERT_HEX: &str = "#000000";

/// How event times are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeDisplay {
    /// "5 minutes ago"
    #[default]
    Ago,
    /// Local clock time plus date
    Clock,
}

impl std::str::FromStr for TimeDisplay {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ago" => Ok(Self::Ago),
            "clock" => Ok(Self::Clock),
            _ => Err(format!("unknown time display: {s} (expected: ago, clock)")),
        }
    }
}

/// User-facing strings that vary by locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    /// Offset shown for locations without a distance prefix
    pub near_the: String,
    /// Offset replacement for same-day tsunami warnings
    pub tsunami_header: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            near_the: "Near the".to_string(),
            tsunami_header: "Check for Tsunamis".to_string(),
        }
    }
}

/// Display preferences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayOptions {
    pub time_display: TimeDisplay,
    pub hour24: bool,
    /// Highlight same-day tsunami warnings
    pub tsunami_theme: bool,
    pub labels: Labels,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            time_display: TimeDisplay::Ago,
            hour24: true,
            tsunami_theme: true,
            labels: Labels::default(),
        }
    }
}

/// Colour of the magnitude circle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowColor {
    Bucket(MagnitudeBucket),
    TsunamiAlert,
}

impl RowColor {
    #[must_use]
    pub const fn hex(self) -> &'static str {
        match self {
            Self::Bucket(bucket) => bucket.hex(),
            Self::TsunamiAlert => TSUNAMI_ALERT_HEX,
        }
    }

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Bucket(bucket) => bucket.key(),
            Self::TsunamiAlert => "tsunami",
        }
    }
}

impl Serialize for RowColor {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

/// One display-ready list row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuakeRow {
    pub magnitude: String,
    pub color: RowColor,
    pub offset: String,
    pub primary: String,
    /// Relative time, or clock time in [`TimeDisplay::Clock`] mode
    pub time: String,
    /// Only populated in [`TimeDisplay::Clock`] mode
    pub date: String,
    pub tsunami: bool,
    pub url: Option<String>,
}

impl QuakeRow {
    /// Whether the tsunami banner replaced the normal styling.
    #[must_use]
    pub fn is_tsunami_banner(&self) -> bool {
        self.color == RowColor::TsunamiAlert
    }
}

/// Render one record as a list row.
#[must_use]
pub fn render_row<Tz>(
    record: &EarthquakeRecord,
    now: &DateTime<Tz>,
    options: &DisplayOptions,
) -> QuakeRow
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let tz = now.timezone();
    let (mut offset, primary) = format::split_location(&record.location, &options.labels.near_the);

    let (time, date) = match options.time_display {
        TimeDisplay::Ago => (
            format::relative_time(record.time, now.timestamp_millis()).unwrap_or_default(),
            String::new(),
        ),
        TimeDisplay::Clock => (
            format::clock_time(record.time, &tz, options.hour24).unwrap_or_default(),
            format::date_label(record.time, &tz).unwrap_or_default(),
        ),
    };

    let banner = options.tsunami_theme
        && record.tsunami_warning
        && format::is_same_local_day(record.time, now);

    let color = if banner {
        offset.clone_from(&options.labels.tsunami_header);
        RowColor::TsunamiAlert
    } else {
        RowColor::Bucket(format::magnitude_bucket(record.magnitude))
    };

    QuakeRow {
        magnitude: format::magnitude_label(record.magnitude),
        color,
        offset,
        primary,
        time,
        date,
        tsunami: record.tsunami_warning,
        url: record.detail_link().map(String::from),
    }
}

/// Render a whole record set in order.
#[must_use]
pub fn render_rows<Tz>(
    records: &[EarthquakeRecord],
    now: &DateTime<Tz>,
    options: &DisplayOptions,
) -> Vec<QuakeRow>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    records.iter().map(|r| render_row(r, now, options)).collect()
}
