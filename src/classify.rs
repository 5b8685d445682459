//! Path-derived document classification.
//!
//! Classification is computed purely from a `/`-separated path string and is
//! never stored: two documents with identical directory structure always
//! classify identically.

use serde::{Deserialize, Serialize};

use crate::constants::tags::{REDACTED_MARKER, TAG_DOC_TYPE, TAG_PROJECT_NAME};
use crate::errors::TaggerError;
use crate::tags::TagSet;
use crate::types::{ContainerName, Extension, LanguageCode, ObjectKey};

/// Classification derived from a document's original folder path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// Lowercased file extension.
    pub extension: Extension,
    /// File name including its extension.
    pub file_name: String,
    /// Name of the file's immediate parent directory.
    pub doc_type: String,
    /// Top-level directory name in the supplied path.
    pub project_name: String,
    /// True when the file name carries the redaction marker.
    pub is_redacted: bool,
}

impl Classification {
    /// Object key under the type-prefix convention: `<ext>/<file_name>`.
    pub fn object_key(&self) -> ObjectKey {
        format!("{}/{}", self.extension, self.file_name)
    }

    /// Migration destination container: `<language>-<doctype>`, with the
    /// document type lowercased and spaces removed.
    pub fn destination_container(&self, language: &LanguageCode) -> ContainerName {
        format!(
            "{}-{}",
            language,
            self.doc_type.to_lowercase().replace(' ', "")
        )
    }

    /// Derived tag fields used to fill `TBA` defaults during migration.
    pub fn derived_tags(&self) -> TagSet {
        TagSet::from_entries([
            (TAG_DOC_TYPE, self.doc_type.as_str()),
            (TAG_PROJECT_NAME, self.project_name.as_str()),
        ])
    }
}

/// Classify a `/`-separated path string.
///
/// Requires a file extension and at least two directory levels above the
/// file (project and document type); anything less is a
/// [`TaggerError::MalformedPath`]. Deterministic, no side effects.
pub fn classify(path: &str) -> Result<Classification, TaggerError> {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if segments.len() < 3 {
        return Err(TaggerError::MalformedPath {
            path: path.to_string(),
            reason: "expected at least two directory levels above the file".to_string(),
        });
    }
    let file_name = segments[segments.len() - 1];
    let extension = match file_name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => ext.to_lowercase(),
        _ => {
            return Err(TaggerError::MalformedPath {
                path: path.to_string(),
                reason: "file has no extension".to_string(),
            });
        }
    };
    Ok(Classification {
        extension,
        file_name: file_name.to_string(),
        doc_type: segments[segments.len() - 2].to_string(),
        project_name: segments[0].to_string(),
        is_redacted: file_name.contains(REDACTED_MARKER),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_is_deterministic() {
        let first = classify("ProjectX/Invoices/scan1.pdf").unwrap();
        let second = classify("ProjectX/Invoices/scan1.pdf").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn fields_are_derived_from_path_structure() {
        let classification = classify("ProjectX/2021/Invoices/scan1.PDF").unwrap();
        assert_eq!(classification.extension, "pdf");
        assert_eq!(classification.file_name, "scan1.PDF");
        assert_eq!(classification.doc_type, "Invoices");
        assert_eq!(classification.project_name, "ProjectX");
        assert!(!classification.is_redacted);
        assert_eq!(classification.object_key(), "pdf/scan1.PDF");
    }

    #[test]
    fn destination_container_lowercases_and_strips_spaces() {
        let classification = classify("ProjectX/Bank Statements/stmt.pdf").unwrap();
        assert_eq!(
            classification.destination_container(&"en".to_string()),
            "en-bankstatements"
        );
    }

    #[test]
    fn redaction_marker_in_file_name_is_detected() {
        let classification = classify("ProjectX/Invoices/scan1_redacted.pdf").unwrap();
        assert!(classification.is_redacted);
    }

    #[test]
    fn missing_extension_is_malformed() {
        let err = classify("ProjectX/Invoices/scan1").unwrap_err();
        assert!(matches!(
            err,
            TaggerError::MalformedPath { reason, .. } if reason.contains("no extension")
        ));
        let err = classify("ProjectX/Invoices/scan1.").unwrap_err();
        assert!(matches!(err, TaggerError::MalformedPath { .. }));
    }

    #[test]
    fn insufficient_depth_is_malformed() {
        for path in ["scan1.pdf", "Invoices/scan1.pdf", "/Invoices/scan1.pdf"] {
            let err = classify(path).unwrap_err();
            assert!(matches!(
                err,
                TaggerError::MalformedPath { reason, .. } if reason.contains("directory levels")
            ));
        }
    }

    #[test]
    fn leading_and_duplicate_separators_are_ignored() {
        let classification = classify("/ProjectX//Invoices/scan1.pdf").unwrap();
        assert_eq!(classification.project_name, "ProjectX");
        assert_eq!(classification.doc_type, "Invoices");
    }
}
