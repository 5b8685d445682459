//! Object-key conventions and input/output artifact pairing.
//!
//! An output artifact (for example an OCR rendering) pairs with its input
//! document by stem: `pdf/report.pdf` ↔ `html/report.html`. Pairing is
//! discovered at migration or rebalance time and never persisted.

use crate::types::{Extension, ObjectKey};

/// File-name portion of an object key (everything after the last `/`).
pub fn file_name(key: &str) -> &str {
    key.rsplit_once('/').map_or(key, |(_, name)| name)
}

/// Base name of a file name, without its extension.
pub fn stem(name: &str) -> &str {
    name.rsplit_once('.').map_or(name, |(stem, _)| stem)
}

/// Lowercased extension of a file name or key, if it has one.
pub fn extension(name: &str) -> Option<Extension> {
    match file_name(name).rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => Some(ext.to_lowercase()),
        _ => None,
    }
}

/// Object key under the type-prefix convention: `<ext>/<file_name>`.
pub fn object_key(ext: &str, file_name: &str) -> ObjectKey {
    format!("{ext}/{file_name}")
}

/// Key of the paired output artifact for `stem` in `output_type`:
/// `<output_type>/<stem>.<output_type>`.
pub fn output_key(stem: &str, output_type: &str) -> ObjectKey {
    format!("{output_type}/{stem}.{output_type}")
}

/// True when the name's extension belongs to the configured output types.
pub fn is_output_type(name: &str, output_types: &[Extension]) -> bool {
    extension(name).is_some_and(|ext| output_types.iter().any(|ot| *ot == ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_helpers_split_on_expected_boundaries() {
        assert_eq!(file_name("pdf/report.pdf"), "report.pdf");
        assert_eq!(file_name("report.pdf"), "report.pdf");
        assert_eq!(stem("report.pdf"), "report");
        assert_eq!(stem("archive.tar.gz"), "archive.tar");
        assert_eq!(extension("pdf/report.PDF"), Some("pdf".to_string()));
        assert_eq!(extension("pdf/report"), None);
        assert_eq!(object_key("pdf", "report.pdf"), "pdf/report.pdf");
    }

    #[test]
    fn output_key_uses_stem_and_output_extension() {
        assert_eq!(output_key("report", "html"), "html/report.html");
        assert_eq!(output_key("report", "txt"), "txt/report.txt");
    }

    #[test]
    fn output_type_membership_is_case_insensitive_on_extension() {
        let output_types = vec!["html".to_string(), "txt".to_string()];
        assert!(is_output_type("html/report.HTML", &output_types));
        assert!(!is_output_type("pdf/report.pdf", &output_types));
        assert!(!is_output_type("noext", &output_types));
    }
}
