//! Weighted search, crop filtering, and pagination.

mod engine;
mod score;

pub use engine::{CacheConfig, CacheSizes, SearchEngine};
