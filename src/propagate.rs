//! Tag propagation over single documents and whole containers.

use tracing::{debug, warn};

use crate::cancel::CancelToken;
use crate::errors::TaggerError;
use crate::report::BatchReport;
use crate::store::{ObjectStore, collect_objects};
use crate::tags::TagSet;

/// Overwrite one document's tag set. Idempotent: re-applying the same set
/// is a no-op at the store level.
pub fn apply_tags(
    store: &dyn ObjectStore,
    container: &str,
    key: &str,
    tags: &TagSet,
) -> Result<(), TaggerError> {
    store.set_tags(container, key, tags)
}

/// Set `field=value` on every document in `container`, preserving all other
/// tag fields. Per-document failures are recorded and do not abort the rest.
pub fn apply_tags_to_container(
    store: &dyn ObjectStore,
    container: &str,
    field: &str,
    value: &str,
) -> Result<BatchReport, TaggerError> {
    apply_tags_to_matching(
        store,
        container,
        field,
        value,
        |_| true,
        &CancelToken::new(),
    )
}

/// Set `field=value` on every document whose key satisfies `predicate`.
///
/// Each document is read, updated in the targeted field only, and written
/// back. A write error on one document is recorded in the returned
/// [`BatchReport`] and processing continues; failing to list the container
/// at all aborts the operation.
pub fn apply_tags_to_matching(
    store: &dyn ObjectStore,
    container: &str,
    field: &str,
    value: &str,
    mut predicate: impl FnMut(&str) -> bool,
    cancel: &CancelToken,
) -> Result<BatchReport, TaggerError> {
    let objects = collect_objects(store, container)?;
    let mut report = BatchReport::new();
    for info in objects {
        if cancel.is_cancelled() {
            warn!(container, "tag propagation cancelled");
            break;
        }
        if !predicate(&info.key) {
            continue;
        }
        let result = retag_document(store, container, &info.key, field, value);
        match result {
            Ok(()) => {
                debug!(container, key = %info.key, field, value, "tag updated");
                report.record_ok(info.key);
            }
            Err(err) => {
                warn!(container, key = %info.key, error = %err, "tag update failed");
                report.record_err(info.key, err);
            }
        }
    }
    Ok(report)
}

fn retag_document(
    store: &dyn ObjectStore,
    container: &str,
    key: &str,
    field: &str,
    value: &str,
) -> Result<(), TaggerError> {
    let mut tags = store.get_tags(container, key)?;
    tags.set(field, value);
    store.set_tags(container, key, &tags)
}
