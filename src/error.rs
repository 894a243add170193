//! Phytodex error types

/// Phytodex error types
#[derive(Debug, thiserror::Error)]
pub enum PhytodexError {
    // Data errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Bundled or injected dataset failed validation (duplicate ids,
    /// index/full projection mismatch, empty record set).
    #[error("dataset error: {0}")]
    Dataset(String),

    /// A catalog source failed to produce the full record set.
    ///
    /// Never escapes the loader: the public load path logs it and falls
    /// back to the lightweight index.
    #[error("catalog load failed: {0}")]
    Load(String),

    // Configuration errors
    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Result type alias for phytodex operations
pub type Result<T> = std::result::Result<T, PhytodexError>;
