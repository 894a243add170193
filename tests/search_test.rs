//! Tests for weighted search over the bundled catalog.
//!
//! Expected orderings are pinned against the shipped dataset: scores rank
//! descending, equal scores keep catalog order.

use std::sync::Arc;

use phytodex::{DiseaseService, Phytodex};

async fn loaded_service() -> DiseaseService {
    let service = Phytodex::builder().build().unwrap();
    service.load_full_database().await;
    service
}

// ============================================================================
// Ranking
// ============================================================================

#[tokio::test]
async fn blight_returns_every_name_match() {
    let service = loaded_service().await;
    let hits = service.search("blight");

    let ids: Vec<u32> = hits.iter().map(|r| r.id).collect();
    // Nine records also mention blight in their cause or symptom text and
    // tie at the top in catalog order; the last three match on name alone.
    assert_eq!(ids, vec![7, 10, 14, 15, 31, 38, 39, 43, 47, 19, 20, 29]);
    assert!(
        hits.iter()
            .all(|r| r.name.to_lowercase().contains("blight"))
    );
}

#[tokio::test]
async fn multi_keyword_queries_prefer_whole_phrase_matches() {
    let service = loaded_service().await;
    let hits = service.search("late blight");

    let top: Vec<u32> = hits.iter().take(3).map(|r| r.id).collect();
    assert_eq!(top, vec![15, 39, 20]);
}

#[tokio::test]
async fn powdery_mildew_matches_exactly_two_records() {
    let service = loaded_service().await;
    let ids: Vec<u32> = service
        .search("powdery mildew")
        .iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(ids, vec![4, 16]);
}

#[tokio::test]
async fn rust_ranks_the_corn_rusts_first() {
    let service = loaded_service().await;
    let ids: Vec<u32> = service.search("rust").iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![6, 27, 3, 49, 50]);
}

#[tokio::test]
async fn pathogen_class_is_searchable() {
    let service = loaded_service().await;
    let hits = service.search("oomycete");

    assert_eq!(hits.len(), 13);
    // One record also names the class in its cause text and outranks the
    // label-only matches.
    assert_eq!(hits[0].id, 20);
}

// ============================================================================
// Tier behavior
// ============================================================================

#[tokio::test]
async fn index_tier_serves_thin_results_before_the_load_lands() {
    let service = Phytodex::builder().build().unwrap();

    let hits = service.search("blight");
    let ids: Vec<u32> = hits.iter().map(|r| r.id).collect();
    // Thin records expose no text fields, so all twelve tie and keep
    // catalog order.
    assert_eq!(ids, vec![7, 10, 14, 15, 19, 20, 29, 31, 38, 39, 43, 47]);
    assert!(hits.iter().all(|r| r.description.is_none()));
}

#[tokio::test]
async fn tier_upgrade_recomputes_cached_results() {
    let service = Phytodex::builder().build().unwrap();

    let interim = service.search("blight");
    assert!(interim.iter().all(|r| r.description.is_none()));

    service.load_full_database().await;

    let upgraded = service.search("blight");
    assert!(!Arc::ptr_eq(&interim, &upgraded));
    assert!(upgraded.iter().all(|r| r.description.is_some()));
}

// ============================================================================
// Caching
// ============================================================================

#[tokio::test]
async fn repeated_queries_share_one_result_sequence() {
    let service = loaded_service().await;

    let first = service.search("blight");
    let second = service.search("  BLIGHT ");
    assert!(Arc::ptr_eq(&first, &second));
}

#[tokio::test]
async fn result_cache_is_bounded() {
    let service = loaded_service().await;

    for i in 0..150 {
        let _ = service.search(&format!("query {i}"));
    }

    let sizes = service.cache_sizes();
    assert!(
        sizes.search <= 100,
        "cache grew past its bound: {}",
        sizes.search
    );
    assert_eq!(sizes.crop_filter, 0);
}

// ============================================================================
// Edge cases
// ============================================================================

#[tokio::test]
async fn empty_query_returns_the_catalog_unranked() {
    let service = loaded_service().await;

    let all = service.search("");
    assert_eq!(all.len(), 50);
    assert_eq!(all[0].id, 1);
    assert_eq!(all[49].id, 50);

    let spaces = service.search("   ");
    assert_eq!(spaces.len(), 50);
}

#[tokio::test]
async fn unmatched_queries_return_nothing() {
    let service = loaded_service().await;
    assert!(service.search("zzzqx").is_empty());
}
