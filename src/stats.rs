//! Catalog statistics.
//!
//! Pure aggregation over a catalog snapshot: no caching, recomputed per
//! call, so the numbers always reflect the records actually resident.
//! Crop counts follow the canonical host parse, one count per host
//! mention; pathogen counts group absent classifications under `Unknown`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;

/// How many crop groups the distribution keeps.
const TOP_CROPS: usize = 10;

/// A group name with its record count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupCount {
    pub name: String,
    pub count: usize,
}

/// Aggregated distributions of a catalog snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStatistics {
    /// Records per host crop, most first, truncated to the top ten.
    pub by_crop: Vec<GroupCount>,
    /// Records per pathogen class, most first, untruncated.
    pub by_pathogen: Vec<GroupCount>,
    /// Total records in the snapshot.
    pub total: usize,
}

/// Compute the crop and pathogen distributions of a catalog snapshot.
///
/// A record naming several hosts counts once per host. Groups sort by
/// descending count; equal counts keep first-encountered order.
pub fn catalog_statistics(catalog: &Catalog) -> CatalogStatistics {
    let mut by_crop = tally(
        catalog
            .hosts()
            .iter()
            .flat_map(|h| h.hosts.iter().map(String::as_str)),
    );
    by_crop.truncate(TOP_CROPS);

    let by_pathogen = tally(catalog.records().iter().map(|r| r.pathogen_type.label()));

    CatalogStatistics {
        by_crop,
        by_pathogen,
        total: catalog.len(),
    }
}

/// Count occurrences, sorted by descending count with first-encountered
/// tie order.
fn tally<'a>(names: impl Iterator<Item = &'a str>) -> Vec<GroupCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();
    for name in names {
        let entry = counts.entry(name).or_insert(0);
        if *entry == 0 {
            order.push(name);
        }
        *entry += 1;
    }
    let mut groups: Vec<GroupCount> = order
        .into_iter()
        .map(|name| GroupCount {
            name: name.to_string(),
            count: counts[name],
        })
        .collect();
    groups.sort_by(|a, b| b.count.cmp(&a.count));
    groups
}
