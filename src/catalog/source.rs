//! Catalog sources: where the full record set comes from.

use async_trait::async_trait;

use crate::error::{PhytodexError, Result};
use crate::types::DiseaseRecord;

/// Provider of the full disease record set.
///
/// The default [`BundledCatalog`] parses the compiled-in dataset; tests
/// substitute counting, failing, or slow sources to exercise the load path.
/// [`CatalogLoader`](super::CatalogLoader) calls [`load`](Self::load) at
/// most once per service and memoizes the outcome, failures included.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Produce every full record, in catalog order.
    async fn load(&self) -> Result<Vec<DiseaseRecord>>;

    /// Short name for logs.
    fn name(&self) -> &str {
        "custom"
    }
}

/// The compiled-in full dataset.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledCatalog;

#[async_trait]
impl CatalogSource for BundledCatalog {
    async fn load(&self) -> Result<Vec<DiseaseRecord>> {
        tokio::task::spawn_blocking(super::parse_diseases)
            .await
            .map_err(|e| PhytodexError::Load(format!("dataset parse task failed: {e}")))?
    }

    fn name(&self) -> &str {
        "bundled"
    }
}
