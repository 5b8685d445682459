//! Tag-equality lookup and corpus inventory operations.

use tracing::{debug, warn};

use crate::cancel::CancelToken;
use crate::constants::tags::TAG_DOC_TYPE;
use crate::errors::TaggerError;
use crate::report::BatchReport;
use crate::store::{ObjectInfo, ObjectStore, collect_objects, ensure_container};
use crate::tags::SetLabel;

/// Train/test population counts for one container.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SetCounts {
    /// Documents tagged `Set=Train`.
    pub train: usize,
    /// Documents tagged `Set=Test`.
    pub test: usize,
}

/// Find every document in `container` whose `field` tag equals `value`.
///
/// Documents whose tags cannot be read are skipped with a warning; the
/// lookup itself is exact-match only.
pub fn find_by_tag(
    store: &dyn ObjectStore,
    container: &str,
    field: &str,
    value: &str,
) -> Result<Vec<ObjectInfo>, TaggerError> {
    let mut found = Vec::new();
    for info in collect_objects(store, container)? {
        match store.get_tags(container, &info.key) {
            Ok(tags) if tags.get(field) == Some(value) => found.push(info),
            Ok(_) => {}
            Err(err) => {
                warn!(container, key = %info.key, error = %err, "unreadable tags, skipping");
            }
        }
    }
    debug!(container, field, value, matches = found.len(), "tag lookup");
    Ok(found)
}

/// Distinct `DocType` values present in `container`, in first-seen order.
pub fn doc_types(store: &dyn ObjectStore, container: &str) -> Result<Vec<String>, TaggerError> {
    let mut names: Vec<String> = Vec::new();
    for info in collect_objects(store, container)? {
        match store.get_tags(container, &info.key) {
            Ok(tags) => {
                if let Some(doc_type) = tags.get(TAG_DOC_TYPE)
                    && !names.iter().any(|name| name == doc_type)
                {
                    names.push(doc_type.to_string());
                }
            }
            Err(err) => {
                warn!(container, key = %info.key, error = %err, "unreadable tags, skipping");
            }
        }
    }
    Ok(names)
}

/// Count documents assigned to each train/test set in `container`.
pub fn set_counts(store: &dyn ObjectStore, container: &str) -> Result<SetCounts, TaggerError> {
    let mut counts = SetCounts::default();
    for info in collect_objects(store, container)? {
        match store.get_tags(container, &info.key) {
            Ok(tags) => match tags.set_label() {
                Some(SetLabel::Train) => counts.train += 1,
                Some(SetLabel::Test) => counts.test += 1,
                None => {}
            },
            Err(err) => {
                warn!(container, key = %info.key, error = %err, "unreadable tags, skipping");
            }
        }
    }
    Ok(counts)
}

/// Copy every document in `src_container` tagged `DocType=doc_type` into
/// `dest_container` (created on demand), preserving keys and tag sets.
///
/// Per-document copy or tagging failures are recorded in the returned
/// report and do not abort the remaining documents.
pub fn regroup(
    store: &dyn ObjectStore,
    doc_type: &str,
    src_container: &str,
    dest_container: &str,
    cancel: &CancelToken,
) -> Result<BatchReport, TaggerError> {
    ensure_container(store, dest_container)?;
    let matches = find_by_tag(store, src_container, TAG_DOC_TYPE, doc_type)?;
    let mut report = BatchReport::new();
    for info in matches {
        if cancel.is_cancelled() {
            warn!(src_container, dest_container, "regroup cancelled");
            break;
        }
        let result = store
            .copy_object(src_container, &info.key, dest_container, &info.key)
            .and_then(|()| {
                let tags = store.get_tags(src_container, &info.key)?;
                store.set_tags(dest_container, &info.key, &tags)
            });
        match result {
            Ok(()) => {
                debug!(key = %info.key, dest_container, "document regrouped");
                report.record_ok(info.key);
            }
            Err(err) => {
                warn!(key = %info.key, error = %err, "regroup failed");
                report.record_err(info.key, err);
            }
        }
    }
    Ok(report)
}
