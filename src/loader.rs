//! Background loading with "latest request wins" semantics.
//!
//! Each [`QuakeLoader::request`] bumps a generation counter, aborts the
//! previous task, and spawns a new fetch+parse task on the Tokio runtime.
//! Completions travel over a single channel to whoever owns the displayed
//! list; [`QuakeList`] only accepts the newest generation.

use std::fmt::Display;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, TimeZone};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::client::QuakeClient;
use crate::config::QuakeConfig;
use crate::models::EarthquakeRecord;
use crate::query::{self, QueryFilters};

/// Completions buffered before a slow receiver applies backpressure.
const CHANNEL_CAPACITY: usize = 4;

/// Result of one load request.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadOutcome {
    pub generation: u64,
    /// `None` when there is nothing to display (empty or failed fetch)
    pub records: Option<Vec<EarthquakeRecord>>,
}

/// Spawns fetch+parse tasks, superseding any load still in flight.
pub struct QuakeLoader {
    client: QuakeClient,
    base_url: String,
    limit: u32,
    generation: Arc<AtomicU64>,
    in_flight: Option<JoinHandle<()>>,
    tx: mpsc::Sender<LoadOutcome>,
}

impl QuakeLoader {
    /// Create a loader and the receiving end of its completion channel.
    #[must_use]
    pub fn new(client: QuakeClient, config: &QuakeConfig) -> (Self, mpsc::Receiver<LoadOutcome>) {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let loader = Self {
            client,
            base_url: config.base_url.clone(),
            limit: config.limit,
            generation: Arc::new(AtomicU64::new(0)),
            in_flight: None,
            tx,
        };
        (loader, rx)
    }

    /// Generation of the most recent request, 0 before the first one.
    #[must_use]
    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Start a load, cancelling the previous one. Returns its generation.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn request<Tz>(&mut self, filters: &QueryFilters, now: &DateTime<Tz>) -> u64
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }

        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        let url = query::query_url(&self.base_url, filters, self.limit, now);

        let client = self.client.clone();
        let latest = Arc::clone(&self.generation);
        let tx = self.tx.clone();

        self.in_flight = Some(tokio::spawn(async move {
            let records = match url {
                Some(url) => client.fetch_records(url.as_str()).await,
                None => None,
            };

            if latest.load(Ordering::Acquire) != generation {
                debug!("discarding superseded load #{}", generation);
                return;
            }

            let count = records.as_ref().map_or(0, Vec::len);
            if tx.send(LoadOutcome { generation, records }).await.is_err() {
                debug!("no receiver for load #{}, dropping result", generation);
            } else {
                debug!("load #{} delivered {} records", generation, count);
            }
        }));

        generation
    }
}

impl Drop for QuakeLoader {
    fn drop(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}

/// The displayed record set. Only replaced by the newest completed load.
#[derive(Debug, Default)]
pub struct QuakeList {
    records: Vec<EarthquakeRecord>,
    expected: u64,
}

impl QuakeList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Note that `generation` is now the only load whose result is wanted.
    pub fn expect(&mut self, generation: u64) {
        self.expected = self.expected.max(generation);
    }

    /// Apply a completion. Returns `false` if it was stale and ignored.
    pub fn apply(&mut self, outcome: LoadOutcome) -> bool {
        if outcome.generation != self.expected {
            debug!(
                "ignoring stale load #{} (want #{})",
                outcome.generation, self.expected
            );
            return false;
        }
        self.records = outcome.records.unwrap_or_default();
        true
    }

    #[must_use]
    pub fn records(&self) -> &[EarthquakeRecord] {
        &self.records
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
