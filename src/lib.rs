//! Phytodex - Two-tier crop disease catalog with weighted search
//!
//! This crate embeds a lightweight disease index that is ready the moment
//! the service is built, and lazily loads the full record set behind it.
//! Reads never wait: every query runs against the best catalog resident
//! at that moment and upgrades transparently once the full tier arrives.
//! A failed full load is absorbed; the index keeps serving.
//!
//! # Search Example
//!
//! ```rust
//! use phytodex::Phytodex;
//!
//! #[tokio::main]
//! async fn main() -> phytodex::Result<()> {
//!     let service = Phytodex::builder().build()?;
//!     service.preload();
//!
//!     let hits = service.search("blight");
//!     for disease in hits.iter().take(3) {
//!         println!("{} ({})", disease.name, disease.crop);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Classifier Label Example
//!
//! ```rust
//! use phytodex::Phytodex;
//!
//! #[tokio::main]
//! async fn main() -> phytodex::Result<()> {
//!     let service = Phytodex::builder().build()?;
//!
//!     let catalog = service.load_full_database().await;
//!     println!("catalog tier: {}", catalog.tier());
//!
//!     let resolved = service.resolve_label("Tomato___Late_blight");
//!     if let Some(record) = resolved.record {
//!         println!("{} affects {}", record.name, record.crop);
//!     }
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod error;
pub mod search;
pub mod service;
pub mod stats;
pub mod telemetry;
pub mod types;

// Re-export main types at crate root
pub use error::{PhytodexError, Result};
pub use service::{DiseaseService, Phytodex, PhytodexBuilder};

// Re-export catalog machinery
pub use catalog::{
    BundledCatalog, Catalog, CatalogLoader, CatalogSource, CatalogTier, LoadMetrics, LoaderConfig,
};

// Re-export the query surface
pub use search::{CacheConfig, CacheSizes, SearchEngine};
pub use stats::{CatalogStatistics, GroupCount, catalog_statistics};

// Re-export all types
pub use types::{
    ClassLabel, CropCount, CropHosts, DiseasePage, DiseaseRecord, DiseaseSummary, LabelResolution,
    PathogenType,
};
