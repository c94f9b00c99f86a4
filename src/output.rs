//! Output writers for rendered rows.
//!
//! Supports human-readable (with colors), JSON, and NDJSON formats.

use std::io::{self, Write};

use crate::format::MagnitudeBucket;
use crate::render::{QuakeRow, RowColor};

// ANSI color codes
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

// Tsunami banner: black circle, accent header
const ALERT_CIRCLE: &str = "\x1b[40;97m";
const ALERT_ACCENT: &str = "\x1b[95m";

const ICON_TSUNAMI: &str = "🌊";

/// Output format selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// Human-readable terminal output (default)
    #[default]
    Human,
    /// JSON array
    Json,
    /// Newline-delimited JSON (one object per line)
    Ndjson,
}

impl std::str::FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            "ndjson" => Ok(Self::Ndjson),
            _ => Err(format!("unknown format: {s} (expected: human, json, ndjson)")),
        }
    }
}

/// 256-colour foreground closest to each bucket's circle colour.
fn bucket_color(bucket: MagnitudeBucket) -> &'static str {
    match bucket {
        MagnitudeBucket::One => "\x1b[38;5;67m",
        MagnitudeBucket::Two => "\x1b[38;5;37m",
        MagnitudeBucket::Three => "\x1b[38;5;44m",
        MagnitudeBucket::Four => "\x1b[38;5;214m",
        MagnitudeBucket::Five => "\x1b[38;5;209m",
        MagnitudeBucket::Six => "\x1b[38;5;203m",
        MagnitudeBucket::Seven => "\x1b[38;5;167m",
        MagnitudeBucket::Eight => "\x1b[38;5;160m",
        MagnitudeBucket::Nine => "\x1b[38;5;124m",
        MagnitudeBucket::TenPlus => "\x1b[38;5;88m",
    }
}

/// Write rows in human-readable format.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_human<W: Write>(writer: &mut W, rows: &[QuakeRow], empty_message: &str) -> io::Result<()> {
    if rows.is_empty() {
        return writeln!(writer, "{DIM}{empty_message}{RESET}");
    }

    for row in rows {
        let (circle, offset_color) = match row.color {
            RowColor::Bucket(bucket) => (bucket_color(bucket), DIM),
            RowColor::TsunamiAlert => (ALERT_CIRCLE, ALERT_ACCENT),
        };

        let tsunami = if row.tsunami {
            format!(" {ICON_TSUNAMI}")
        } else {
            String::new()
        };

        let when = if row.date.is_empty() {
            row.time.clone()
        } else {
            format!("{} {}", row.time, row.date)
        };

        writeln!(
            writer,
            "{circle}{BOLD} {} {RESET} {offset_color}{}{RESET}{BOLD}{}{RESET}{tsunami} │ {when}",
            row.magnitude, row.offset, row.primary
        )?;

        if let Some(url) = &row.url {
            writeln!(writer, "      {DIM}{url}{RESET}")?;
        }
    }
    Ok(())
}

/// Write the separator printed before each refreshed list.
///
/// Only human output gets one; JSON and NDJSON stay machine-readable.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_refresh_header<W: Write>(writer: &mut W, format: Format, stamp: &str) -> io::Result<()> {
    if format != Format::Human {
        return Ok(());
    }
    writeln!(writer, "{DIM}── {stamp} ──{RESET}")
}

/// Write rows as a JSON array.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_json<W: Write>(writer: &mut W, rows: &[QuakeRow]) -> io::Result<()> {
    let json = serde_json::to_string_pretty(rows)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(writer, "{json}")
}

/// Write rows as newline-delimited JSON.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_ndjson<W: Write>(writer: &mut W, rows: &[QuakeRow]) -> io::Result<()> {
    for row in rows {
        let json = serde_json::to_string(row)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        writeln!(writer, "{json}")?;
    }
    Ok(())
}

/// Write rows in the specified format.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_rows<W: Write>(
    writer: &mut W,
    rows: &[QuakeRow],
    format: Format,
    empty_message: &str,
) -> io::Result<()> {
    match format {
        Format::Human => write_human(writer, rows, empty_message),
        Format::Json => write_json(writer, rows),
        Format::Ndjson => write_ndjson(writer, rows),
    }
}
