//! Search and filter engine over the resident catalog.
//!
//! Every operation reads whichever catalog tier the loader currently
//! holds. Computed result sets go into bounded moka caches keyed on
//! `hash(tier, term)`; a hit hands back the identical shared sequence.
//! Keys carry the tier, so results computed against the index are not
//! served again once the full catalog has resolved.

use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, OnceLock};

use moka::sync::Cache;
use tracing::debug;

use super::score;
use crate::catalog::{CatalogLoader, CatalogTier};
use crate::telemetry;
use crate::types::{ClassLabel, CropCount, DiseasePage, DiseaseRecord, LabelResolution};

/// Configuration for the engine's bounded result caches.
///
/// One capacity applies to each cache (scored search and crop filter)
/// independently.
///
/// ```rust
/// # use phytodex::CacheConfig;
/// let config = CacheConfig::new().max_entries(250);
/// ```
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum entries per cache. Default: 100.
    pub max_entries: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { max_entries: 100 }
    }
}

impl CacheConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of entries per cache.
    pub fn max_entries(mut self, n: u64) -> Self {
        self.max_entries = n;
        self
    }
}

/// Entry counts of the engine's bounded caches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheSizes {
    pub search: u64,
    pub crop_filter: u64,
}

/// Weighted search, crop filtering, and pagination.
///
/// Reads go against [`CatalogLoader::core_database`], so the first queries
/// of a session run over the lightweight index and transparently upgrade
/// once the full catalog is resident.
pub struct SearchEngine {
    loader: CatalogLoader,
    search_cache: Cache<u64, Arc<[DiseaseRecord]>>,
    crop_cache: Cache<u64, Arc<[DiseaseRecord]>>,
    unique_crops: OnceLock<Arc<[CropCount]>>,
}

impl SearchEngine {
    /// Create an engine over a loader.
    pub(crate) fn new(loader: CatalogLoader, config: &CacheConfig) -> Self {
        let search_cache = Cache::builder().max_capacity(config.max_entries).build();
        let crop_cache = Cache::builder().max_capacity(config.max_entries).build();
        Self {
            loader,
            search_cache,
            crop_cache,
            unique_crops: OnceLock::new(),
        }
    }

    /// Weighted substring search.
    ///
    /// The query is trimmed and lowercased; an empty query returns the
    /// whole resident catalog unranked. Otherwise records are scored (see
    /// [`score`]), zero scores dropped, and the rest ordered best first
    /// with catalog-order ties. Results are cached: repeating a query
    /// returns the identical shared sequence.
    pub fn search(&self, query: &str) -> Arc<[DiseaseRecord]> {
        let catalog = self.loader.core_database();
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return catalog.shared_records();
        }

        let key = cache_key(catalog.tier(), &needle);
        if let Some(hit) = self.search_cache.get(&key) {
            metrics::counter!(telemetry::CACHE_HITS_TOTAL, "cache" => "search").increment(1);
            return hit;
        }
        metrics::counter!(telemetry::CACHE_MISSES_TOTAL, "cache" => "search").increment(1);

        let results: Arc<[DiseaseRecord]> = score::rank(catalog.records(), &needle).into();
        metrics::counter!(telemetry::SEARCHES_TOTAL, "tier" => catalog.tier().as_str())
            .increment(1);
        debug!(
            query = %needle,
            hits = results.len(),
            tier = %catalog.tier(),
            "search executed"
        );
        self.search_cache.insert(key, Arc::clone(&results));
        results
    }

    /// One page of the whole resident catalog, in catalog order.
    pub fn all_diseases(&self, page: usize, page_size: usize) -> DiseasePage {
        let catalog = self.loader.core_database();
        DiseasePage::slice(catalog.records(), page, page_size)
    }

    /// One page of the records whose crop field matches `crop`.
    ///
    /// The term is trimmed and lowercased; an empty term falls back to
    /// [`all_diseases`](Self::all_diseases). The literal term `"multiple"`
    /// selects records naming several hosts. The unpaginated filtered set
    /// is cached per (tier, term); pagination slices the cached set.
    pub fn diseases_by_crop(&self, crop: &str, page: usize, page_size: usize) -> DiseasePage {
        let term = crop.trim().to_lowercase();
        if term.is_empty() {
            return self.all_diseases(page, page_size);
        }
        let filtered = self.filtered_by_crop(&term);
        DiseasePage::slice(&filtered, page, page_size)
    }

    fn filtered_by_crop(&self, term: &str) -> Arc<[DiseaseRecord]> {
        let catalog = self.loader.core_database();
        let key = cache_key(catalog.tier(), term);
        if let Some(hit) = self.crop_cache.get(&key) {
            metrics::counter!(telemetry::CACHE_HITS_TOTAL, "cache" => "crop_filter").increment(1);
            return hit;
        }
        metrics::counter!(telemetry::CACHE_MISSES_TOTAL, "cache" => "crop_filter").increment(1);

        let records = catalog.records();
        let hosts = catalog.hosts();
        let filtered: Arc<[DiseaseRecord]> = if term == "multiple" {
            records
                .iter()
                .zip(hosts)
                .filter(|(_, h)| h.multi_host)
                .map(|(r, _)| r.clone())
                .collect()
        } else {
            records
                .iter()
                .zip(hosts)
                .filter(|(_, h)| h.matches(term))
                .map(|(r, _)| r.clone())
                .collect()
        };
        debug!(crop = %term, hits = filtered.len(), tier = %catalog.tier(), "crop filter executed");
        self.crop_cache.insert(key, Arc::clone(&filtered));
        filtered
    }

    /// Every primary crop name with its record count, most records first;
    /// equal counts keep first-encountered order.
    ///
    /// Memoized for the engine's lifetime. The index and full tiers carry
    /// the same id/name/crop projection, so the answer is tier-independent.
    pub fn unique_crops(&self) -> Arc<[CropCount]> {
        self.unique_crops
            .get_or_init(|| {
                let catalog = self.loader.core_database();
                let mut counts: HashMap<&str, usize> = HashMap::new();
                let mut order: Vec<&str> = Vec::new();
                for hosts in catalog.hosts() {
                    let entry = counts.entry(&hosts.primary).or_insert(0);
                    if *entry == 0 {
                        order.push(&hosts.primary);
                    }
                    *entry += 1;
                }
                let mut list: Vec<CropCount> = order
                    .into_iter()
                    .map(|name| CropCount {
                        name: name.to_string(),
                        count: counts[name],
                    })
                    .collect();
                list.sort_by(|a, b| b.count.cmp(&a.count));
                list.into()
            })
            .clone()
    }

    /// Look up a record by id in the resident catalog.
    pub fn disease_by_id(&self, id: u32) -> Option<DiseaseRecord> {
        self.loader.core_database().disease_by_id(id).cloned()
    }

    /// Resolve a classifier output label to a catalog record.
    ///
    /// The label is parsed, the disease part is run through
    /// [`search`](Self::search), and the first hit whose crop and name
    /// contain the label's parts wins; failing that, the top-scored hit.
    /// The parsed label always comes back, matched or not.
    pub fn resolve_label(&self, raw: &str) -> LabelResolution {
        let label = ClassLabel::parse(raw);
        let hits = self.search(&label.disease);
        let crop_term = label.crop.to_lowercase();
        let name_term = label.disease.to_lowercase();
        let record = hits
            .iter()
            .find(|r| {
                r.crop.to_lowercase().contains(&crop_term)
                    && r.name.to_lowercase().contains(&name_term)
            })
            .or_else(|| hits.first())
            .cloned();
        debug!(
            label = raw,
            matched = record.as_ref().map(|r| r.id),
            "classifier label resolved"
        );
        LabelResolution { label, record }
    }

    /// Current entry counts of the bounded caches, after flushing pending
    /// maintenance.
    pub fn cache_sizes(&self) -> CacheSizes {
        self.search_cache.run_pending_tasks();
        self.crop_cache.run_pending_tasks();
        CacheSizes {
            search: self.search_cache.entry_count(),
            crop_filter: self.crop_cache.entry_count(),
        }
    }
}

/// Compute a cache key from `(tier, term)`.
///
/// Uses `DefaultHasher` (SipHash), deterministic within a process
/// lifetime, which is sufficient for an in-memory cache.
fn cache_key(tier: CatalogTier, term: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    tier.hash(&mut hasher);
    term.hash(&mut hasher);
    hasher.finish()
}
