//! Public types for the phytodex API.

mod crop;
mod label;
mod page;
mod record;

pub use crop::{CropCount, CropHosts};
pub use label::{ClassLabel, LabelResolution};
pub use page::DiseasePage;
pub use record::{DiseaseRecord, DiseaseSummary, PathogenType};
