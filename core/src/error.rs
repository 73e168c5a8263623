use thiserror::Error;

/// Result type for cobbmap operations
pub type Result<T> = std::result::Result<T, CobbmapError>;

/// Error types for cobbmap operations
///
/// A missing `metadata` or `data` block is not an error: the mapper logs a
/// warning and returns `Ok(None)` so the caller can skip the event.
#[derive(Error, Debug)]
pub enum CobbmapError {
    /// Tool name is not in the supported-tool allow-list
    #[error("Tool not supported: {0}")]
    UnsupportedTool(String),

    /// Referenced image could not be resolved to a series/study
    #[error("Unresolved image: {0}")]
    UnresolvedImage(String),

    /// No display set owns the resolved image
    #[error("Display set not found for series {0}")]
    DisplaySetNotFound(String),

    /// Tag not found in DICOM file
    #[error("Tag not found: {0}")]
    TagNotFound(String),

    /// Event payload does not have the expected shape
    #[error("Invalid event: {0}")]
    InvalidEvent(String),

    /// DICOM reading error
    #[error("DICOM error: {0}")]
    DicomError(String),

    /// Invalid tag or configuration value
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<String> for CobbmapError {
    fn from(s: String) -> Self {
        CobbmapError::InvalidValue(s)
    }
}

impl From<&str> for CobbmapError {
    fn from(s: &str) -> Self {
        CobbmapError::InvalidValue(s.to_string())
    }
}

// Convert dicom-object errors
impl From<dicom_object::ReadError> for CobbmapError {
    fn from(e: dicom_object::ReadError) -> Self {
        CobbmapError::DicomError(format!("{}", e))
    }
}
