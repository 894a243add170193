//! Tests for metrics integration.
//!
//! Uses `metrics_util::debugging::DebuggingRecorder` to capture and assert
//! on emitted metrics without needing a real exporter.

use async_trait::async_trait;
use metrics_util::MetricKind;
use metrics_util::debugging::{DebugValue, DebuggingRecorder};

use phytodex::telemetry;
use phytodex::{CatalogSource, DiseaseRecord, Phytodex, PhytodexError, Result};

// ============================================================================
// Mock sources
// ============================================================================

/// Pins the index tier: the load fails, so cache keys never change tier.
struct FailingSource;

#[async_trait]
impl CatalogSource for FailingSource {
    async fn load(&self) -> Result<Vec<DiseaseRecord>> {
        Err(PhytodexError::Load("record store unreachable".into()))
    }

    fn name(&self) -> &str {
        "failing"
    }
}

// ============================================================================
// Snapshot type alias for readability
// ============================================================================

type SnapshotVec = Vec<(
    metrics_util::CompositeKey,
    Option<metrics::Unit>,
    Option<metrics::SharedString>,
    DebugValue,
)>;

// ============================================================================
// Helpers
// ============================================================================

/// Sum all counter values matching a given metric name.
fn counter_total(snapshot: &SnapshotVec, name: &str) -> u64 {
    snapshot
        .iter()
        .filter(|(key, _, _, _)| key.kind() == MetricKind::Counter && key.key().name() == name)
        .map(|(_, _, _, value)| match value {
            DebugValue::Counter(v) => *v,
            _ => 0,
        })
        .sum()
}

/// Check if any histogram entries exist for a given metric name.
fn has_histogram(snapshot: &SnapshotVec, name: &str) -> bool {
    snapshot
        .iter()
        .any(|(key, _, _, _)| key.kind() == MetricKind::Histogram && key.key().name() == name)
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn search_cache_traffic_is_counted() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    // Searching is synchronous, so no block_on is needed inside the
    // thread-local recorder scope.
    metrics::with_local_recorder(&recorder, || {
        let service = Phytodex::builder()
            .catalog_source(FailingSource)
            .build()
            .unwrap();
        let _ = service.search("blight");
        let _ = service.search("blight");
    });

    let snapshot = snapshotter.snapshot().into_vec();
    assert_eq!(counter_total(&snapshot, telemetry::CACHE_MISSES_TOTAL), 1);
    assert_eq!(counter_total(&snapshot, telemetry::CACHE_HITS_TOTAL), 1);
    assert_eq!(
        counter_total(&snapshot, telemetry::SEARCHES_TOTAL),
        1,
        "only the miss executes a scored search"
    );
    assert!(
        has_histogram(&snapshot, telemetry::INDEX_PARSE_SECONDS),
        "expected an index parse histogram entry"
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn crop_filter_cache_traffic_is_counted() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    metrics::with_local_recorder(&recorder, || {
        let service = Phytodex::builder()
            .catalog_source(FailingSource)
            .build()
            .unwrap();
        let _ = service.diseases_by_crop("corn", 0, 10);
        let _ = service.diseases_by_crop("corn", 1, 10);
    });

    let snapshot = snapshotter.snapshot().into_vec();
    assert_eq!(counter_total(&snapshot, telemetry::CACHE_MISSES_TOTAL), 1);
    assert_eq!(counter_total(&snapshot, telemetry::CACHE_HITS_TOTAL), 1);
    // Crop filtering is not a scored search.
    assert_eq!(counter_total(&snapshot, telemetry::SEARCHES_TOTAL), 0);
}

/// Runs async code within a local recorder scope on the multi-thread
/// runtime.
///
/// `block_in_place` ensures the sync `with_local_recorder` closure stays
/// on the current thread while `block_on` drives the inner async work.
#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn successful_load_records_outcome_metrics() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    metrics::with_local_recorder(&recorder, || {
        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async {
                let service = Phytodex::builder().build().unwrap();
                service.load_full_database().await;
                service.core_database();
            })
        })
    });

    let snapshot = snapshotter.snapshot().into_vec();
    assert_eq!(counter_total(&snapshot, telemetry::CATALOG_LOADS_TOTAL), 1);
    assert!(
        has_histogram(&snapshot, telemetry::CATALOG_LOAD_SECONDS),
        "expected a load duration histogram entry"
    );
    assert_eq!(
        counter_total(&snapshot, telemetry::CORE_DB_CACHE_HITS_TOTAL),
        1
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn failed_load_records_the_fallback_outcome() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    metrics::with_local_recorder(&recorder, || {
        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async {
                let service = Phytodex::builder()
                    .catalog_source(FailingSource)
                    .build()
                    .unwrap();
                service.load_full_database().await;
                service.core_database();
            })
        })
    });

    let snapshot = snapshotter.snapshot().into_vec();
    assert_eq!(counter_total(&snapshot, telemetry::CATALOG_LOADS_TOTAL), 1);
    // No duration histogram for a failed load, and index-tier reads do not
    // count as full-catalog cache hits.
    assert!(!has_histogram(&snapshot, telemetry::CATALOG_LOAD_SECONDS));
    assert_eq!(
        counter_total(&snapshot, telemetry::CORE_DB_CACHE_HITS_TOTAL),
        0
    );
}

#[tokio::test]
async fn metrics_are_noop_without_recorder() {
    // Verify no panics when no recorder is installed.
    let service = Phytodex::builder().build().unwrap();
    let _ = service.search("blight");
    let _ = service.search("blight");
    let _ = service.diseases_by_crop("corn", 0, 10);
    service.load_full_database().await;
    let _ = service.statistics();
}
