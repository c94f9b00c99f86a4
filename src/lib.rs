//! Recent earthquakes from the USGS event service.
//!
//! The pipeline is: [`query`] builds the request URL, [`client`] fetches the
//! body, [`models`] decodes it into records, and [`format`]/[`render`] turn
//! each record into display strings. [`loader`] runs fetches in the
//! background so that only the newest request's result is ever shown.

pub mod cli;
pub mod client;
pub mod config;
pub mod errors;
pub mod format;
pub mod loader;
pub mod models;
pub mod output;
pub mod query;
pub mod render;

pub use client::QuakeClient;
pub use config::QuakeConfig;
pub use errors::QuakeError;
pub use models::EarthquakeRecord;
pub use query::{QueryFilters, TimeWindow};
