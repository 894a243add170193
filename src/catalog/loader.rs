//! Two-tier catalog loading.
//!
//! [`CatalogLoader`] answers every read instantly from whichever tier is
//! resident. The lightweight index is parsed at construction; the full
//! record set loads at most once, on demand or via a delayed
//! [`preload`](CatalogLoader::preload), through a single shared flight.
//! A failed load logs a warning and pins the index as a permanent
//! fallback; callers of the load path never see an error.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::{Duration, Instant};

use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use super::{Catalog, CatalogSource, CatalogTier};
use crate::error::Result;
use crate::telemetry;
use crate::types::{DiseaseRecord, DiseaseSummary};

/// Configuration for the catalog loader.
///
/// ```rust
/// # use phytodex::LoaderConfig;
/// # use std::time::Duration;
/// let config = LoaderConfig::new().preload_delay(Duration::from_millis(250));
/// ```
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Delay before [`preload`](CatalogLoader::preload) starts the full
    /// load. Default: 1 second.
    pub preload_delay: Duration,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            preload_delay: Duration::from_secs(1),
        }
    }
}

impl LoaderConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the preload delay.
    pub fn preload_delay(mut self, delay: Duration) -> Self {
        self.preload_delay = delay;
        self
    }
}

/// Point-in-time view of loader activity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadMetrics {
    /// Time spent parsing the index and precomputing its aggregates.
    pub index_load: Duration,
    /// Duration of the full-catalog load, once one has succeeded.
    pub full_load: Option<Duration>,
    /// Core-database reads answered from the cached full catalog.
    pub cache_hits: u64,
    /// Whether the full catalog is resident (false after a failed load).
    pub full_loaded: bool,
    /// Whether a load is currently in flight.
    pub loading: bool,
    /// Records in the index tier.
    pub index_len: usize,
    /// Records in the full tier, once loaded.
    pub full_len: Option<usize>,
}

struct Inner {
    source: Arc<dyn CatalogSource>,
    index: Arc<[DiseaseSummary]>,
    index_catalog: Catalog,
    /// Count of index records per primary crop name, in key order.
    crop_stats: BTreeMap<String, usize>,
    /// Memoized load outcome: `Some(catalog)` on success, `None` after a
    /// failure (fallback pinned, no retry).
    full: OnceCell<Option<Catalog>>,
    loading: AtomicBool,
    preload_delay: Duration,
    index_load: Duration,
    full_load_nanos: AtomicU64,
    cache_hits: AtomicU64,
}

/// Two-tier disease catalog loader.
///
/// Cheap to clone; clones share all state, including the memoized full
/// catalog.
#[derive(Clone)]
pub struct CatalogLoader {
    inner: Arc<Inner>,
}

impl CatalogLoader {
    /// Build a loader over the embedded index dataset.
    pub(crate) fn from_embedded(
        source: Arc<dyn CatalogSource>,
        config: &LoaderConfig,
    ) -> Result<Self> {
        let started = Instant::now();
        let index = super::parse_index()?;
        super::validate_index(&index)?;
        Ok(Self::build(source, index, config, started))
    }

    /// Build a loader over an explicit index, for tests.
    #[cfg(test)]
    pub(crate) fn with_index(
        source: Arc<dyn CatalogSource>,
        index: Vec<DiseaseSummary>,
        config: &LoaderConfig,
    ) -> Self {
        Self::build(source, index, config, Instant::now())
    }

    fn build(
        source: Arc<dyn CatalogSource>,
        index: Vec<DiseaseSummary>,
        config: &LoaderConfig,
        started: Instant,
    ) -> Self {
        let records: Vec<DiseaseRecord> = index.iter().map(DiseaseRecord::from).collect();
        let index_catalog = Catalog::new(CatalogTier::Index, records);

        let mut crop_stats = BTreeMap::new();
        for hosts in index_catalog.hosts() {
            *crop_stats.entry(hosts.primary.clone()).or_insert(0) += 1;
        }

        let index_load = started.elapsed();
        metrics::histogram!(telemetry::INDEX_PARSE_SECONDS).record(index_load.as_secs_f64());
        debug!(
            count = index.len(),
            elapsed_us = index_load.as_micros() as u64,
            "disease index ready"
        );

        Self {
            inner: Arc::new(Inner {
                source,
                index: index.into(),
                index_catalog,
                crop_stats,
                full: OnceCell::new(),
                loading: AtomicBool::new(false),
                preload_delay: config.preload_delay,
                index_load,
                full_load_nanos: AtomicU64::new(0),
                cache_hits: AtomicU64::new(0),
            }),
        }
    }

    /// The lightweight index, always available.
    pub fn instant_index(&self) -> &[DiseaseSummary] {
        &self.inner.index
    }

    /// Precomputed record count per primary crop name, in key order.
    pub fn instant_crop_stats(&self) -> &BTreeMap<String, usize> {
        &self.inner.crop_stats
    }

    /// Crop names covered by the index, in key order.
    pub fn instant_supported_crops(&self) -> Vec<&str> {
        self.inner.crop_stats.keys().map(String::as_str).collect()
    }

    /// Classifier label universe, projected from the index.
    pub fn model_class_names(&self) -> Vec<&str> {
        self.inner
            .index
            .iter()
            .map(|s| s.model_class_name.as_str())
            .collect()
    }

    /// The best catalog available right now, without waiting.
    ///
    /// Returns the full catalog when cached; otherwise returns the index
    /// tier and, when no load has run yet, fires one off in the
    /// background. Never blocks.
    pub fn core_database(&self) -> Catalog {
        match self.inner.full.get() {
            Some(Some(full)) => {
                self.inner.cache_hits.fetch_add(1, Ordering::Relaxed);
                metrics::counter!(telemetry::CORE_DB_CACHE_HITS_TOTAL).increment(1);
                full.clone()
            }
            // Load already failed; the index is pinned as the fallback.
            Some(None) => self.inner.index_catalog.clone(),
            None => {
                self.trigger_background_load();
                self.inner.index_catalog.clone()
            }
        }
    }

    /// Load the full catalog, sharing one flight across concurrent callers.
    ///
    /// The outcome is memoized for the process lifetime: a successful load
    /// caches the full tier; a failed one logs a warning and permanently
    /// resolves to the index tier. This method never errors.
    pub async fn load_full_database(&self) -> Catalog {
        let outcome = self.inner.full.get_or_init(|| self.run_load()).await;
        match outcome {
            Some(full) => full.clone(),
            None => self.inner.index_catalog.clone(),
        }
    }

    async fn run_load(&self) -> Option<Catalog> {
        self.inner.loading.store(true, Ordering::Release);
        let started = Instant::now();
        let result = self.inner.source.load().await;
        let elapsed = started.elapsed();
        self.inner.loading.store(false, Ordering::Release);

        match result {
            Ok(records) => {
                self.inner
                    .full_load_nanos
                    .store(elapsed.as_nanos() as u64, Ordering::Relaxed);
                metrics::histogram!(telemetry::CATALOG_LOAD_SECONDS)
                    .record(elapsed.as_secs_f64());
                metrics::counter!(telemetry::CATALOG_LOADS_TOTAL, "status" => "ok").increment(1);
                info!(
                    count = records.len(),
                    source = self.inner.source.name(),
                    elapsed_ms = elapsed.as_millis() as u64,
                    "full disease catalog loaded"
                );
                Some(Catalog::new(CatalogTier::Full, records))
            }
            Err(e) => {
                metrics::counter!(telemetry::CATALOG_LOADS_TOTAL, "status" => "fallback")
                    .increment(1);
                warn!(
                    error = %e,
                    source = self.inner.source.name(),
                    "full catalog load failed; serving the lightweight index"
                );
                None
            }
        }
    }

    /// Schedule a background full load after the configured delay.
    ///
    /// No-op when the outcome is already memoized or a load is in flight;
    /// the check is repeated after the delay. Requires a tokio runtime.
    pub fn preload(&self) {
        if self.inner.full.initialized() || self.inner.loading.load(Ordering::Acquire) {
            return;
        }
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            debug!("no async runtime; skipping catalog preload");
            return;
        };
        let loader = self.clone();
        let delay = self.inner.preload_delay;
        handle.spawn(async move {
            tokio::time::sleep(delay).await;
            if loader.inner.full.initialized() {
                return;
            }
            loader.load_full_database().await;
        });
        debug!(delay_ms = self.inner.preload_delay.as_millis() as u64, "catalog preload scheduled");
    }

    /// Find a disease by id: the index answers instantly (warming the full
    /// catalog behind it); ids missing from the index wait for the full
    /// load.
    pub async fn disease_by_id(&self, id: u32) -> Option<DiseaseRecord> {
        if let Some(summary) = self.inner.index.iter().find(|s| s.id == id) {
            self.trigger_background_load();
            return Some(DiseaseRecord::from(summary));
        }
        let catalog = self.load_full_database().await;
        catalog.disease_by_id(id).cloned()
    }

    /// Substring search that prefers an instant index answer.
    ///
    /// Matches name, crop, and pathogen label against the index; a
    /// non-empty hit set is returned immediately (warming the full catalog
    /// behind it). Only when the index yields nothing does this wait for
    /// the full catalog, where descriptions and symptoms join the match
    /// set. For ranked results use
    /// [`SearchEngine::search`](crate::SearchEngine::search).
    pub async fn quick_search(&self, query: &str) -> Vec<DiseaseRecord> {
        let needle = query.trim().to_lowercase();
        let hits: Vec<DiseaseRecord> = self
            .inner
            .index
            .iter()
            .filter(|s| summary_matches(s, &needle))
            .map(DiseaseRecord::from)
            .collect();
        if !hits.is_empty() {
            self.trigger_background_load();
            return hits;
        }
        let catalog = self.load_full_database().await;
        catalog
            .records()
            .iter()
            .filter(|r| record_matches(r, &needle))
            .cloned()
            .collect()
    }

    /// Snapshot of loader timings and state.
    pub fn metrics(&self) -> LoadMetrics {
        let full = self.inner.full.get();
        let nanos = self.inner.full_load_nanos.load(Ordering::Relaxed);
        LoadMetrics {
            index_load: self.inner.index_load,
            full_load: (nanos > 0).then(|| Duration::from_nanos(nanos)),
            cache_hits: self.inner.cache_hits.load(Ordering::Relaxed),
            full_loaded: matches!(full, Some(Some(_))),
            loading: self.inner.loading.load(Ordering::Acquire),
            index_len: self.inner.index.len(),
            full_len: full.and_then(|outcome| outcome.as_ref().map(Catalog::len)),
        }
    }

    /// Whether the full catalog is resident.
    pub fn full_loaded(&self) -> bool {
        matches!(self.inner.full.get(), Some(Some(_)))
    }

    /// Fire-and-forget full load. Outside a tokio runtime this is a no-op;
    /// the next awaited load path still works.
    fn trigger_background_load(&self) {
        if self.inner.full.initialized() || self.inner.loading.load(Ordering::Acquire) {
            return;
        }
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            debug!("no async runtime; skipping background catalog load");
            return;
        };
        let loader = self.clone();
        handle.spawn(async move {
            loader.load_full_database().await;
        });
    }
}

fn summary_matches(summary: &DiseaseSummary, needle: &str) -> bool {
    summary.name.to_lowercase().contains(needle)
        || summary.crop.to_lowercase().contains(needle)
        || summary.pathogen_type.label().to_lowercase().contains(needle)
}

fn record_matches(record: &DiseaseRecord, needle: &str) -> bool {
    record.name.to_lowercase().contains(needle)
        || record.crop.to_lowercase().contains(needle)
        || record
            .pathogen_type
            .label()
            .to_lowercase()
            .contains(needle)
        || text_matches(record.description.as_deref(), needle)
        || text_matches(record.symptoms.as_deref(), needle)
}

fn text_matches(field: Option<&str>, needle: &str) -> bool {
    field.is_some_and(|text| text.to_lowercase().contains(needle))
}
