//! Disease catalog: two-tier record storage with embedded datasets.
//!
//! The catalog ships in two tiers, both compiled into the binary:
//! 1. **Index**: lightweight summaries (`index.json`), parsed at service
//!    construction, always available
//! 2. **Full**: complete reference records (`diseases.json`), parsed once
//!    on first demand
//!
//! Both tiers surface through the same [`Catalog`] snapshot type, so the
//! search and statistics layers never care which tier is resident. The
//! index projection of every full record (`id`, `name`, `crop`) is kept in
//! sync with the full dataset at authoring time; `pathogen_type` may differ
//! between tiers and the full value wins once loaded.

mod loader;
mod source;

pub use loader::{CatalogLoader, LoadMetrics, LoaderConfig};
pub use source::{BundledCatalog, CatalogSource};

use std::collections::HashSet;
use std::sync::Arc;

use crate::error::{PhytodexError, Result};
use crate::types::{CropHosts, DiseaseRecord, DiseaseSummary};

/// Which record set a catalog snapshot holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogTier {
    /// Lightweight summaries promoted to thin records.
    Index,
    /// Complete reference records.
    Full,
}

impl CatalogTier {
    /// Short name for logs, metrics labels, and cache keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Index => "index",
            Self::Full => "full",
        }
    }
}

impl std::fmt::Display for CatalogTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable snapshot of disease records plus their parsed crop fields.
///
/// Cheap to clone: the contents are shared. `hosts()[i]` is the canonical
/// parse of `records()[i].crop`, computed once when the snapshot is built
/// so no consumer re-splits crop strings at query time.
#[derive(Debug, Clone)]
pub struct Catalog {
    tier: CatalogTier,
    records: Arc<[DiseaseRecord]>,
    hosts: Arc<[CropHosts]>,
}

impl Catalog {
    /// Build a snapshot, parsing every crop field.
    pub fn new(tier: CatalogTier, records: Vec<DiseaseRecord>) -> Self {
        let hosts: Arc<[CropHosts]> = records
            .iter()
            .map(|r| CropHosts::parse(&r.crop))
            .collect();
        Self {
            tier,
            records: records.into(),
            hosts,
        }
    }

    /// Which tier this snapshot holds.
    pub fn tier(&self) -> CatalogTier {
        self.tier
    }

    /// The records, in catalog order.
    pub fn records(&self) -> &[DiseaseRecord] {
        &self.records
    }

    /// Shared handle to the records. Two clones of the same snapshot hand
    /// out pointer-identical sequences.
    pub fn shared_records(&self) -> Arc<[DiseaseRecord]> {
        Arc::clone(&self.records)
    }

    /// Parsed crop fields, parallel to [`records`](Self::records).
    pub fn hosts(&self) -> &[CropHosts] {
        &self.hosts
    }

    /// Look up a record by id.
    pub fn disease_by_id(&self, id: u32) -> Option<&DiseaseRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Number of records in the snapshot.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the snapshot holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Parse the embedded index dataset.
pub(crate) fn parse_index() -> Result<Vec<DiseaseSummary>> {
    Ok(serde_json::from_str(EMBEDDED_INDEX)?)
}

/// Parse the embedded full dataset.
pub(crate) fn parse_diseases() -> Result<Vec<DiseaseRecord>> {
    Ok(serde_json::from_str(EMBEDDED_DISEASES)?)
}

/// Reject an index that cannot back a catalog: empty, or with duplicate ids.
pub(crate) fn validate_index(index: &[DiseaseSummary]) -> Result<()> {
    if index.is_empty() {
        return Err(PhytodexError::Dataset("index dataset is empty".into()));
    }
    let mut seen = HashSet::with_capacity(index.len());
    for summary in index {
        if !seen.insert(summary.id) {
            return Err(PhytodexError::Dataset(format!(
                "duplicate disease id {} in index",
                summary.id
            )));
        }
    }
    Ok(())
}

/// Raw JSON index dataset compiled into the binary.
const EMBEDDED_INDEX: &str = include_str!("index.json");

/// Raw JSON full dataset compiled into the binary.
const EMBEDDED_DISEASES: &str = include_str!("diseases.json");
