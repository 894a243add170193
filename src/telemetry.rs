//! Telemetry metric name constants.
//!
//! Centralised metric names for phytodex operations. Consumers install
//! their own `metrics` recorder (e.g. prometheus, statsd); without a
//! recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `phytodex_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).
//!
//! # Common labels
//!
//! - `cache`: which bounded cache, "search" or "crop_filter"
//! - `tier`: resident catalog tier, "index" or "full"
//! - `status`: load outcome, "ok" or "fallback"

/// Total scored search executions (cache misses included).
///
/// Labels: `tier`.
pub const SEARCHES_TOTAL: &str = "phytodex_searches_total";

/// Total bounded-cache hits.
///
/// Labels: `cache` ("search" | "crop_filter").
pub const CACHE_HITS_TOTAL: &str = "phytodex_cache_hits_total";

/// Total bounded-cache misses.
///
/// Labels: `cache` ("search" | "crop_filter").
pub const CACHE_MISSES_TOTAL: &str = "phytodex_cache_misses_total";

/// Full-catalog load attempts, including the memoized fallback outcome.
///
/// Labels: `status` ("ok" | "fallback").
pub const CATALOG_LOADS_TOTAL: &str = "phytodex_catalog_loads_total";

/// Full-catalog load duration in seconds.
pub const CATALOG_LOAD_SECONDS: &str = "phytodex_catalog_load_seconds";

/// Index parse and aggregate precompute duration in seconds, recorded once
/// at service construction.
pub const INDEX_PARSE_SECONDS: &str = "phytodex_index_parse_seconds";

/// Core-database reads answered from the cached full catalog.
pub const CORE_DB_CACHE_HITS_TOTAL: &str = "phytodex_core_db_cache_hits_total";
