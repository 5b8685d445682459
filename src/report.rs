//! Structured per-document outcomes for batch operations.
//!
//! Batch operations (migration, tag propagation, balancing) record one
//! outcome per document instead of logging failures to the console; a
//! failed document never aborts the remaining documents.

use crate::errors::TaggerError;
use crate::types::ObjectKey;

/// Outcome of one per-document step within a batch operation.
#[derive(Debug)]
pub struct DocumentOutcome {
    /// The document (or path) the step applied to.
    pub key: ObjectKey,
    /// Success, or the error that made this document fail.
    pub result: Result<(), TaggerError>,
}

impl DocumentOutcome {
    /// Successful outcome for `key`.
    pub fn ok(key: impl Into<ObjectKey>) -> Self {
        Self {
            key: key.into(),
            result: Ok(()),
        }
    }

    /// Failed outcome for `key`.
    pub fn failed(key: impl Into<ObjectKey>, err: TaggerError) -> Self {
        Self {
            key: key.into(),
            result: Err(err),
        }
    }

    /// True when the step succeeded.
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Aggregated outcomes for a batch operation over many documents.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Per-document outcomes in processing order.
    pub outcomes: Vec<DocumentOutcome>,
}

impl BatchReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful document.
    pub fn record_ok(&mut self, key: impl Into<ObjectKey>) {
        self.outcomes.push(DocumentOutcome::ok(key));
    }

    /// Record a failed document.
    pub fn record_err(&mut self, key: impl Into<ObjectKey>, err: TaggerError) {
        self.outcomes.push(DocumentOutcome::failed(key, err));
    }

    /// Number of successful documents.
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_ok()).count()
    }

    /// Number of failed documents.
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    /// Iterate only the failed outcomes.
    pub fn failures(&self) -> impl Iterator<Item = &DocumentOutcome> {
        self.outcomes.iter().filter(|o| !o.is_ok())
    }

    /// True when every document succeeded.
    pub fn is_clean(&self) -> bool {
        self.failed() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_counts_successes_and_failures() {
        let mut report = BatchReport::new();
        report.record_ok("pdf/a.pdf");
        report.record_err(
            "pdf/b.pdf",
            TaggerError::NotFound {
                container: "en-invoices".to_string(),
                key: "pdf/b.pdf".to_string(),
            },
        );
        report.record_ok("pdf/c.pdf");

        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.failed(), 1);
        assert!(!report.is_clean());
        let failures: Vec<&str> = report.failures().map(|o| o.key.as_str()).collect();
        assert_eq!(failures, vec!["pdf/b.pdf"]);
    }
}
