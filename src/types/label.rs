//! Classifier label parsing.
//!
//! The image classifier emits labels of the form `"<Crop>___<DiseaseSlug>"`
//! with single underscores standing in for spaces, e.g.
//! `"Tomato___Late_blight"` or `"Corn_(maize)___Common_rust_"`.

use super::DiseaseRecord;

/// A classifier output label, split into display-ready parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassLabel {
    /// Crop part, underscores replaced by spaces, trimmed.
    pub crop: String,
    /// Disease part, underscores replaced by spaces, trimmed.
    pub disease: String,
}

impl ClassLabel {
    /// Split a raw label on the first `"___"` and de-slug both halves.
    ///
    /// A label without the separator is treated as a bare disease name.
    pub fn parse(raw: &str) -> Self {
        let (crop, disease) = match raw.split_once("___") {
            Some((crop, disease)) => (crop, disease),
            None => ("", raw),
        };
        Self {
            crop: despace(crop),
            disease: despace(disease),
        }
    }
}

fn despace(part: &str) -> String {
    part.replace('_', " ").trim().to_string()
}

/// Outcome of resolving a classifier label against the catalog.
///
/// The parsed label is always returned, so an unmatched prediction can
/// still be rendered with its crop and disease names.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelResolution {
    pub label: ClassLabel,
    /// Best-matching catalog record, if any search hit existed.
    pub record: Option<DiseaseRecord>,
}
