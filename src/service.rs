//! Service construction and the public facade.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use crate::catalog::{
    BundledCatalog, Catalog, CatalogLoader, CatalogSource, LoadMetrics, LoaderConfig,
};
use crate::error::{PhytodexError, Result};
use crate::search::{CacheConfig, CacheSizes, SearchEngine};
use crate::stats::{CatalogStatistics, catalog_statistics};
use crate::types::{
    CropCount, DiseasePage, DiseaseRecord, DiseaseSummary, LabelResolution,
};

/// Main entry point for creating disease services.
pub struct Phytodex;

impl Phytodex {
    /// Create a new builder for configuring a service.
    pub fn builder() -> PhytodexBuilder {
        PhytodexBuilder::new()
    }
}

/// Builder for configuring [`DiseaseService`] instances.
///
/// ```rust
/// # use phytodex::Phytodex;
/// # fn main() -> phytodex::Result<()> {
/// let service = Phytodex::builder().cache_max_entries(200).build()?;
/// assert_eq!(service.instant_index().len(), 50);
/// # Ok(())
/// # }
/// ```
pub struct PhytodexBuilder {
    source: Option<Arc<dyn CatalogSource>>,
    cache: CacheConfig,
    loader: LoaderConfig,
}

impl PhytodexBuilder {
    pub fn new() -> Self {
        Self {
            source: None,
            cache: CacheConfig::default(),
            loader: LoaderConfig::default(),
        }
    }

    /// Replace the bundled full-catalog source.
    pub fn catalog_source(mut self, source: impl CatalogSource + 'static) -> Self {
        self.source = Some(Arc::new(source));
        self
    }

    /// Set the capacity of each bounded result cache.
    pub fn cache_max_entries(mut self, n: u64) -> Self {
        self.cache = self.cache.max_entries(n);
        self
    }

    /// Set the delay before [`DiseaseService::preload`] starts the full
    /// load.
    pub fn preload_delay(mut self, delay: Duration) -> Self {
        self.loader = self.loader.preload_delay(delay);
        self
    }

    /// Build the service: parse and validate the embedded index, then wire
    /// the loader and engine together.
    pub fn build(self) -> Result<DiseaseService> {
        if self.cache.max_entries == 0 {
            return Err(PhytodexError::Configuration(
                "cache capacity must be at least 1 entry".into(),
            ));
        }
        let source = self.source.unwrap_or_else(|| Arc::new(BundledCatalog));
        let loader = CatalogLoader::from_embedded(source, &self.loader)?;
        let engine = SearchEngine::new(loader.clone(), &self.cache);
        Ok(DiseaseService { loader, engine })
    }
}

impl Default for PhytodexBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Long-lived disease catalog service.
///
/// Owns the two-tier [`CatalogLoader`] and the [`SearchEngine`] and
/// delegates to them. Construct once via [`Phytodex::builder`] and share
/// by reference: every method takes `&self` and is thread-safe.
pub struct DiseaseService {
    loader: CatalogLoader,
    engine: SearchEngine,
}

impl std::fmt::Debug for DiseaseService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiseaseService").finish_non_exhaustive()
    }
}

impl DiseaseService {
    // ========================================================================
    // Instant index surface
    // ========================================================================

    /// The lightweight index, always available.
    pub fn instant_index(&self) -> &[DiseaseSummary] {
        self.loader.instant_index()
    }

    /// Precomputed record count per primary crop name, in key order.
    pub fn instant_crop_stats(&self) -> &BTreeMap<String, usize> {
        self.loader.instant_crop_stats()
    }

    /// Crop names covered by the index, in key order.
    pub fn instant_supported_crops(&self) -> Vec<&str> {
        self.loader.instant_supported_crops()
    }

    /// Classifier label universe, projected from the index.
    pub fn model_class_names(&self) -> Vec<&str> {
        self.loader.model_class_names()
    }

    // ========================================================================
    // Catalog lifecycle
    // ========================================================================

    /// The best catalog available right now, without waiting. See
    /// [`CatalogLoader::core_database`].
    pub fn core_database(&self) -> Catalog {
        self.loader.core_database()
    }

    /// Load the full catalog through the shared single flight. See
    /// [`CatalogLoader::load_full_database`].
    pub async fn load_full_database(&self) -> Catalog {
        self.loader.load_full_database().await
    }

    /// Schedule a delayed background full load.
    pub fn preload(&self) {
        self.loader.preload();
    }

    /// Snapshot of loader timings and state.
    pub fn load_metrics(&self) -> LoadMetrics {
        self.loader.metrics()
    }

    /// Find a disease by id, answering from the index when possible.
    pub async fn disease_by_id(&self, id: u32) -> Option<DiseaseRecord> {
        self.loader.disease_by_id(id).await
    }

    /// Substring search that prefers an instant index answer. For ranked
    /// results use [`search`](Self::search).
    pub async fn quick_search(&self, query: &str) -> Vec<DiseaseRecord> {
        self.loader.quick_search(query).await
    }

    // ========================================================================
    // Query surface
    // ========================================================================

    /// Weighted substring search over the resident catalog, best match
    /// first. Cached; repeated queries return the identical sequence.
    pub fn search(&self, query: &str) -> Arc<[DiseaseRecord]> {
        self.engine.search(query)
    }

    /// One page of the whole resident catalog.
    pub fn all_diseases(&self, page: usize, page_size: usize) -> DiseasePage {
        self.engine.all_diseases(page, page_size)
    }

    /// One page of the records matching a crop term.
    pub fn diseases_by_crop(&self, crop: &str, page: usize, page_size: usize) -> DiseasePage {
        self.engine.diseases_by_crop(crop, page, page_size)
    }

    /// Every primary crop name with its record count, most records first.
    pub fn unique_crops(&self) -> Arc<[CropCount]> {
        self.engine.unique_crops()
    }

    /// Resolve a classifier output label to a catalog record.
    pub fn resolve_label(&self, raw: &str) -> LabelResolution {
        self.engine.resolve_label(raw)
    }

    /// Crop and pathogen distributions of the resident catalog, recomputed
    /// per call.
    pub fn statistics(&self) -> CatalogStatistics {
        catalog_statistics(&self.loader.core_database())
    }

    /// Entry counts of the engine's bounded caches.
    pub fn cache_sizes(&self) -> CacheSizes {
        self.engine.cache_sizes()
    }

    // ========================================================================
    // Direct access
    // ========================================================================

    /// The underlying catalog loader.
    pub fn loader(&self) -> &CatalogLoader {
        &self.loader
    }

    /// The underlying search engine.
    pub fn engine(&self) -> &SearchEngine {
        &self.engine
    }
}
