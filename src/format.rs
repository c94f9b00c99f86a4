//! Display formatting for earthquake records.
//!
//! Everything here is a pure function of its arguments. Wall-clock time and
//! the local time zone are always passed in by the caller. Conversions use
//! the zone's offset at each event's own instant.

use std::fmt::Display;

use chrono::{DateTime, TimeZone};

/// Separator between a location offset and the primary place name.
pub const LOCATION_SEPARATOR: &str = " of ";

/// Epoch values below this are taken to be seconds rather than milliseconds.
const MILLIS_THRESHOLD: i64 = 1_000_000_000_000;

const SECOND_MILLIS: i64 = 1000;
const MINUTE_MILLIS: i64 = 60 * SECOND_MILLIS;
const HOUR_MILLIS: i64 = 60 * MINUTE_MILLIS;
const DAY_MILLIS: i64 = 24 * HOUR_MILLIS;

/// Split `"10km SSW of Basilisa, Philippines"` into
/// `("10km SSW of ", "Basilisa, Philippines")`.
///
/// Locations without a separator get `near_label` as their offset.
#[must_use]
pub fn split_location(location: &str, near_label: &str) -> (String, String) {
    match location.split_once(LOCATION_SEPARATOR) {
        Some((offset, primary)) => (
            format!("{offset}{LOCATION_SEPARATOR}"),
            primary.to_string(),
        ),
        None => (near_label.to_string(), location.to_string()),
    }
}

/// Magnitude to one decimal place, rounding halves up.
#[must_use]
pub fn magnitude_label(magnitude: f64) -> String {
    // Adding 0.0 turns -0.0 into 0.0.
    let rounded = (magnitude * 10.0).round() / 10.0 + 0.0;
    format!("{rounded:.1}")
}

/// Colour bucket for a magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MagnitudeBucket {
    /// Magnitudes below 2.0
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    /// 10 and above, plus negative and NaN inputs
    TenPlus,
}

impl MagnitudeBucket {
    /// Bucket by the floor of the magnitude.
    #[must_use]
    pub fn from_magnitude(magnitude: f64) -> Self {
        if magnitude.is_nan() || magnitude < 0.0 {
            return Self::TenPlus;
        }
        match magnitude.floor() {
            f if f < 2.0 => Self::One,
            f if f < 3.0 => Self::Two,
            f if f < 4.0 => Self::Three,
            f if f < 5.0 => Self::Four,
            f if f < 6.0 => Self::Five,
            f if f < 7.0 => Self::Six,
            f if f < 8.0 => Self::Seven,
            f if f < 9.0 => Self::Eight,
            f if f < 10.0 => Self::Nine,
            _ => Self::TenPlus,
        }
    }

    /// Stable key for this bucket.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::One => "1",
            Self::Two => "2",
            Self::Three => "3",
            Self::Four => "4",
            Self::Five => "5",
            Self::Six => "6",
            Self::Seven => "7",
            Self::Eight => "8",
            Self::Nine => "9",
            Self::TenPlus => "10-plus",
        }
    }

    /// Circle colour as `#RRGGBB`.
    #[must_use]
    pub const fn hex(self) -> &'static str {
        match self {
            Self::One => "#4A7BA7",
            Self::Two => "#04B4B3",
            Self::Three => "#10CAC9",
            Self::Four => "#F5A623",
            Self::Five => "#FF7D50",
            Self::Six => "#FC6644",
            Self::Seven => "#E75F40",
            Self::Eight => "#E13A20",
            Self::Nine => "#D93218",
            Self::TenPlus => "#C03823",
        }
    }
}

/// Shorthand for [`MagnitudeBucket::from_magnitude`].
#[must_use]
pub fn magnitude_bucket(magnitude: f64) -> MagnitudeBucket {
    MagnitudeBucket::from_magnitude(magnitude)
}

/// Normalise an epoch value to milliseconds.
#[must_use]
pub fn to_millis(time: i64) -> i64 {
    if time < MILLIS_THRESHOLD {
        time.saturating_mul(1000)
    } else {
        time
    }
}

/// "5 minutes ago" style description of `time` relative to `now_millis`.
///
/// Returns `None` for future or non-positive timestamps.
#[must_use]
pub fn relative_time(time: i64, now_millis: i64) -> Option<String> {
    let time = to_millis(time);
    if time > now_millis || time <= 0 {
        return None;
    }

    let diff = now_millis - time;
    let text = if diff < MINUTE_MILLIS {
        "just now".to_string()
    } else if diff < 2 * MINUTE_MILLIS {
        "a minute ago".to_string()
    } else if diff < 50 * MINUTE_MILLIS {
        format!("{} minutes ago", diff / MINUTE_MILLIS)
    } else if diff < 120 * MINUTE_MILLIS {
        "an hour ago".to_string()
    } else if diff < 24 * HOUR_MILLIS {
        format!("{} hours ago", diff / HOUR_MILLIS)
    } else if diff < 48 * HOUR_MILLIS {
        "yesterday".to_string()
    } else {
        format!("{} days ago", diff / DAY_MILLIS)
    };
    Some(text)
}

fn local_time<Tz: TimeZone>(time: i64, tz: &Tz) -> Option<DateTime<Tz>> {
    DateTime::from_timestamp_millis(to_millis(time)).map(|t| t.with_timezone(tz))
}

/// Local clock time: `14:05` in 24-hour mode, `02:05 PM` otherwise.
#[must_use]
pub fn clock_time<Tz>(time: i64, tz: &Tz, hour24: bool) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let pattern = if hour24 { "%H:%M" } else { "%I:%M %p" };
    local_time(time, tz).map(|t| t.format(pattern).to_string())
}

/// Local calendar date such as `Feb 11, 2017`.
#[must_use]
pub fn date_label<Tz>(time: i64, tz: &Tz) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    local_time(time, tz).map(|t| t.format("%b %-d, %Y").to_string())
}

/// Whether `time` falls on the same local calendar day as `now`.
#[must_use]
pub fn is_same_local_day<Tz: TimeZone>(time: i64, now: &DateTime<Tz>) -> bool {
    local_time(time, &now.timezone()).is_some_and(|t| t.date_naive() == now.date_naive())
}
