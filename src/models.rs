//! Data models for USGS event query responses.
//!
//! Only the fields the list needs are decoded. Decoding is all-or-nothing:
//! a document with a single malformed feature yields no records at all.

use reqwest::Url;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::errors::QuakeError;

/// Top-level GeoJSON response.
#[derive(Debug, Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

/// A single earthquake feature.
#[derive(Debug, Deserialize)]
struct Feature {
    properties: Properties,
}

/// Event properties used by quakefeed.
#[derive(Debug, Deserialize)]
struct Properties {
    /// Magnitude value
    mag: f64,

    /// Human-readable place description
    place: String,

    /// Event time as delivered (ms since epoch for USGS)
    time: i64,

    /// Tsunami flag: 0 or 1
    tsunami: i64,

    /// Event page URL
    url: Option<String>,
}

/// One decoded earthquake event.
#[derive(Debug, Clone, PartialEq)]
pub struct EarthquakeRecord {
    pub magnitude: f64,
    /// e.g. `"10km SSW of Basilisa, Philippines"`
    pub location: String,
    /// Epoch time exactly as delivered, no unit conversion
    pub time: i64,
    pub tsunami_warning: bool,
    pub detail_url: Option<String>,
}

impl EarthquakeRecord {
    /// The detail page, if it is an absolute http(s) URL.
    #[must_use]
    pub fn detail_link(&self) -> Option<Url> {
        let url = Url::parse(self.detail_url.as_deref()?).ok()?;
        matches!(url.scheme(), "http" | "https").then_some(url)
    }
}

impl Properties {
    fn into_record(self) -> EarthquakeRecord {
        EarthquakeRecord {
            magnitude: self.mag,
            location: self.place,
            time: self.time,
            tsunami_warning: self.tsunami != 0,
            detail_url: self.url,
        }
    }
}

/// Decode a response body into records.
///
/// # Errors
///
/// Returns [`QuakeError::EmptyBody`] for blank input and
/// [`QuakeError::Parse`] if the document or any feature is malformed.
pub fn try_parse_records(raw: &str) -> Result<Vec<EarthquakeRecord>, QuakeError> {
    if raw.trim().is_empty() {
        return Err(QuakeError::EmptyBody);
    }

    let collection: FeatureCollection = serde_json::from_str(raw)?;
    let records: Vec<EarthquakeRecord> = collection
        .features
        .into_iter()
        .map(|f| f.properties.into_record())
        .collect();

    debug!("parsed {} records", records.len());
    Ok(records)
}

/// Decode a response body, collapsing every failure into `None`.
#[must_use]
pub fn parse_records(raw: &str) -> Option<Vec<EarthquakeRecord>> {
    match try_parse_records(raw) {
        Ok(records) => Some(records),
        Err(QuakeError::EmptyBody) => {
            debug!("no response body to parse");
            None
        }
        Err(e) => {
            warn!("problem parsing earthquake results: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_FEATURE: &str = r#"{"features":[{"properties":{"mag":5.2,"place":"10km SSW of Basilisa, Philippines","time":1480000000000,"tsunami":0}}]}"#;

    #[test]
    fn test_parse_single_feature() {
        let records = parse_records(ONE_FEATURE).expect("expected records");
        assert_eq!(records.len(), 1);

        let record = &records[0];
        assert!((record.magnitude - 5.2).abs() < f64::EPSILON);
        assert_eq!(record.location, "10km SSW of Basilisa, Philippines");
        assert_eq!(record.time, 1_480_000_000_000);
        assert!(!record.tsunami_warning);
        assert_eq!(record.detail_url, None);
    }

    #[test]
    fn test_parse_optional_url_and_tsunami() {
        let json = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "id": "us7000abcd",
                "properties": {
                    "mag": 7.1,
                    "place": "Off the coast of Chile",
                    "time": 1700000000000,
                    "tsunami": 1,
                    "url": "https://earthquake.usgs.gov/earthquakes/eventpage/us7000abcd",
                    "status": "reviewed"
                },
                "geometry": {"type": "Point", "coordinates": [-72.0, -33.0, 10.0]}
            }]
        }"#;
        let records = parse_records(json).expect("expected records");
        assert!(records[0].tsunami_warning);
        assert_eq!(
            records[0].detail_url.as_deref(),
            Some("https://earthquake.usgs.gov/earthquakes/eventpage/us7000abcd")
        );
        assert!(records[0].detail_link().is_some());
    }

    #[test]
    fn test_null_url_is_absent() {
        let json = r#"{"features":[{"properties":{"mag":1.0,"place":"Alaska","time":1,"tsunami":0,"url":null}}]}"#;
        let records = parse_records(json).unwrap();
        assert_eq!(records[0].detail_url, None);
    }

    #[test]
    fn test_missing_features_is_sentinel() {
        assert_eq!(parse_records(r#"{"type":"FeatureCollection"}"#), None);
        assert!(matches!(
            try_parse_records(r#"{"type":"FeatureCollection"}"#),
            Err(QuakeError::Parse(_))
        ));
    }

    #[test]
    fn test_one_bad_feature_discards_all() {
        let json = r#"{"features":[
            {"properties":{"mag":3.0,"place":"Nevada","time":1,"tsunami":0}},
            {"properties":{"place":"Utah","time":2,"tsunami":0}}
        ]}"#;
        assert_eq!(parse_records(json), None);
    }

    #[test]
    fn test_null_magnitude_is_malformed() {
        let json = r#"{"features":[{"properties":{"mag":null,"place":"Nevada","time":1,"tsunami":0}}]}"#;
        assert!(matches!(try_parse_records(json), Err(QuakeError::Parse(_))));
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(try_parse_records(""), Err(QuakeError::EmptyBody)));
        assert!(matches!(try_parse_records("  \n"), Err(QuakeError::EmptyBody)));
        assert_eq!(parse_records(""), None);
    }

    #[test]
    fn test_not_json() {
        assert!(matches!(
            try_parse_records("<html>oops</html>"),
            Err(QuakeError::Parse(_))
        ));
    }

    #[test]
    fn test_empty_feature_list() {
        assert_eq!(parse_records(r#"{"features":[]}"#), Some(Vec::new()));
    }

    #[test]
    fn test_detail_link_rejects_non_http() {
        let record = EarthquakeRecord {
            magnitude: 1.0,
            location: "Somewhere".into(),
            time: 1,
            tsunami_warning: false,
            detail_url: Some("ftp://example.com/event".into()),
        };
        assert!(record.detail_link().is_none());

        let relative = EarthquakeRecord {
            detail_url: Some("/earthquakes/eventpage/x".into()),
            ..record
        };
        assert!(relative.detail_link().is_none());
    }
}
