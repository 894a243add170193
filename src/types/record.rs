//! Disease record types.
//!
//! Types for the two catalog tiers: the lightweight index summary and the
//! full reference record.

use serde::{Deserialize, Serialize};

/// Causal agent class of a disease.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum PathogenType {
    Fungal,
    Bacterial,
    Viral,
    Oomycete,
    Nematode,
    Pest,
    Nutritional,
    Environmental,
    /// Absent or unrecognised pathogen classification.
    #[default]
    Unknown,
}

impl PathogenType {
    /// Parse a pathogen label, case-insensitively. Anything unrecognised
    /// maps to [`PathogenType::Unknown`].
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "fungal" => Self::Fungal,
            "bacterial" => Self::Bacterial,
            "viral" => Self::Viral,
            "oomycete" => Self::Oomycete,
            "nematode" => Self::Nematode,
            "pest" => Self::Pest,
            "nutritional" => Self::Nutritional,
            "environmental" => Self::Environmental,
            _ => Self::Unknown,
        }
    }

    /// Display label, as stored in the datasets.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Fungal => "Fungal",
            Self::Bacterial => "Bacterial",
            Self::Viral => "Viral",
            Self::Oomycete => "Oomycete",
            Self::Nematode => "Nematode",
            Self::Pest => "Pest",
            Self::Nutritional => "Nutritional",
            Self::Environmental => "Environmental",
            Self::Unknown => "Unknown",
        }
    }
}

impl From<String> for PathogenType {
    fn from(label: String) -> Self {
        Self::from_label(&label)
    }
}

impl std::fmt::Display for PathogenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Lightweight index entry: just enough to render a list row or resolve a
/// classifier label, available before the full catalog has loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiseaseSummary {
    pub id: u32,
    pub name: String,
    pub crop: String,
    /// Classifier output label this record corresponds to.
    pub model_class_name: String,
    #[serde(default)]
    pub pathogen_type: PathogenType,
}

/// Full reference record for a single disease.
///
/// Every text field beyond the identity fields is optional; an absent field
/// never matches a search. The `id`/`name`/`crop` projection of each record
/// is identical to its index entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiseaseRecord {
    pub id: u32,
    pub name: String,
    pub crop: String,
    /// Classifier output label this record corresponds to.
    #[serde(default)]
    pub model_class_name: String,
    #[serde(default)]
    pub pathogen_type: PathogenType,
    #[serde(default)]
    pub cause: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub symptoms: Option<String>,
    #[serde(default)]
    pub favorable_conditions: Option<String>,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub season: Option<String>,
    #[serde(default)]
    pub economic_impact: Option<String>,
    #[serde(default)]
    pub geographic_distribution: Option<String>,
    #[serde(default)]
    pub affected_parts: Vec<String>,
    #[serde(default)]
    pub solutions: Vec<String>,
    #[serde(default)]
    pub preventions: Vec<String>,
}

impl DiseaseRecord {
    /// Create a record with the identity fields; everything else empty.
    pub fn new(id: u32, name: impl Into<String>, crop: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            crop: crop.into(),
            model_class_name: String::new(),
            pathogen_type: PathogenType::Unknown,
            cause: None,
            description: None,
            symptoms: None,
            favorable_conditions: None,
            severity: None,
            season: None,
            economic_impact: None,
            geographic_distribution: None,
            affected_parts: Vec::new(),
            solutions: Vec::new(),
            preventions: Vec::new(),
        }
    }

    /// Set the classifier label.
    pub fn with_model_class_name(mut self, label: impl Into<String>) -> Self {
        self.model_class_name = label.into();
        self
    }

    /// Set the pathogen classification.
    pub fn with_pathogen(mut self, pathogen: PathogenType) -> Self {
        self.pathogen_type = pathogen;
        self
    }

    /// Set the causal agent text.
    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    /// Set the description text.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the symptoms text.
    pub fn with_symptoms(mut self, symptoms: impl Into<String>) -> Self {
        self.symptoms = Some(symptoms.into());
        self
    }

    /// Set the favourable-conditions text.
    pub fn with_favorable_conditions(mut self, conditions: impl Into<String>) -> Self {
        self.favorable_conditions = Some(conditions.into());
        self
    }

    /// Append a treatment recommendation.
    pub fn with_solution(mut self, solution: impl Into<String>) -> Self {
        self.solutions.push(solution.into());
        self
    }

    /// Append a prevention recommendation.
    pub fn with_prevention(mut self, prevention: impl Into<String>) -> Self {
        self.preventions.push(prevention.into());
        self
    }
}

impl From<&DiseaseSummary> for DiseaseRecord {
    /// Promote an index entry to a thin record. Used for the interim
    /// catalog before the full record set has loaded.
    fn from(summary: &DiseaseSummary) -> Self {
        DiseaseRecord::new(summary.id, summary.name.clone(), summary.crop.clone())
            .with_model_class_name(summary.model_class_name.clone())
            .with_pathogen(summary.pathogen_type)
    }
}
