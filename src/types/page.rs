//! Pagination envelope.

use serde::{Deserialize, Serialize};

use super::DiseaseRecord;

/// One page of disease records plus enough context to drive infinite
/// scrolling: the unpaginated result size and whether another page exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiseasePage {
    pub diseases: Vec<DiseaseRecord>,
    /// Size of the full (unpaginated) result set.
    pub total_count: usize,
    /// Whether a later page would be non-empty.
    pub has_more: bool,
}

impl DiseasePage {
    /// Cut one page out of an already-filtered result set.
    ///
    /// Pages are zero-based fixed-size slices. A page past the end yields
    /// an empty page; so does a zero page size.
    pub(crate) fn slice(records: &[DiseaseRecord], page: usize, page_size: usize) -> Self {
        let total_count = records.len();
        if page_size == 0 {
            return Self {
                diseases: Vec::new(),
                total_count,
                has_more: false,
            };
        }
        let start = page.saturating_mul(page_size);
        let diseases: Vec<DiseaseRecord> =
            records.iter().skip(start).take(page_size).cloned().collect();
        let has_more = start.saturating_add(page_size) < total_count;
        Self {
            diseases,
            total_count,
            has_more,
        }
    }
}
