/// Constants for recognized tag fields and their canonical values.
pub mod tags {
    /// Tag field for the folder-derived document type.
    pub const TAG_DOC_TYPE: &str = "DocType";
    /// Tag field for the extraction pipeline version.
    pub const TAG_EXTRACT_VERSION: &str = "Extract Version";
    /// Tag field for the OCR engine that produced output artifacts.
    pub const TAG_OCR_ENGINE: &str = "OCRengine";
    /// Tag field for the redaction flag (`True`/`False`).
    pub const TAG_REDACTED: &str = "Redacted";
    /// Tag field for the top-level project a document belongs to.
    pub const TAG_PROJECT_NAME: &str = "Project Name";
    /// Tag field for train/test membership (`Train`/`Test`).
    pub const TAG_SET: &str = "Set";

    /// Sentinel default value replaced by derived values during merges.
    pub const TBA: &str = "TBA";
    /// Canonical `Redacted` value for redacted documents.
    pub const REDACTED_TRUE: &str = "True";
    /// Canonical `Redacted` value for unredacted documents.
    pub const REDACTED_FALSE: &str = "False";
    /// File-name marker that forces `Redacted=True` during migration.
    pub const REDACTED_MARKER: &str = "redacted";
    /// OCR engine recorded on freshly built default tag sets.
    pub const DEFAULT_OCR_ENGINE: &str = "ABBYY";
}

/// Constants for well-known store locations.
pub mod store {
    /// Source container scanned by inbox migration.
    pub const INBOX_CONTAINER: &str = "inbox";
}

/// Constants for train/test balancing.
pub mod balance {
    /// Default target fraction of a container assigned to the test set.
    pub const DEFAULT_TEST_FRACTION: f64 = 0.3;
}
