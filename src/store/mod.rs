//! Object store adapter interface.
//!
//! The store is an external collaborator; this module specifies only the
//! operations the core needs. Implementations own all persisted state —
//! the core holds nothing across calls beyond one operation's working set.

use chrono::{DateTime, Utc};

use crate::errors::TaggerError;
use crate::tags::TagSet;
use crate::types::ObjectKey;

mod memory;
pub use memory::MemoryStore;

/// Descriptor for one stored object, as produced by listings.
#[derive(Clone, Debug)]
pub struct ObjectInfo {
    /// Object key within its container.
    pub key: ObjectKey,
    /// Object size in bytes.
    pub size: u64,
    /// Last modification time reported by the store.
    pub last_modified: DateTime<Utc>,
}

/// Lazy object listing. The outer [`Result`] on the producing call reports
/// structural failure (the container cannot be listed at all); items carry
/// per-object errors.
pub type ObjectIter<'a> = Box<dyn Iterator<Item = Result<ObjectInfo, TaggerError>> + 'a>;

/// Adapter over a tagged object store.
///
/// Tag reads and writes have full-overwrite semantics; there is no
/// compare-and-swap, so read-modify-write cycles on the same document must
/// be serialized by the caller.
pub trait ObjectStore: Send + Sync {
    /// List the objects in `container`.
    fn list_objects(&self, container: &str) -> Result<ObjectIter<'_>, TaggerError>;

    /// Read the tag set of one object. [`TaggerError::NotFound`] when absent.
    fn get_tags(&self, container: &str, key: &str) -> Result<TagSet, TaggerError>;

    /// Overwrite the tag set of one object.
    fn set_tags(&self, container: &str, key: &str, tags: &TagSet) -> Result<(), TaggerError>;

    /// Upload an object. The container must already exist.
    fn put_object(&self, container: &str, key: &str, contents: &[u8]) -> Result<(), TaggerError>;

    /// Copy an object between containers.
    ///
    /// Must return only once the copy has completed, so the destination can
    /// be tagged immediately afterwards.
    fn copy_object(
        &self,
        src_container: &str,
        src_key: &str,
        dest_container: &str,
        dest_key: &str,
    ) -> Result<(), TaggerError>;

    /// Create a container. [`TaggerError::AlreadyExists`] on duplicates;
    /// callers wanting idempotent creation use [`ensure_container`].
    fn create_container(&self, name: &str) -> Result<(), TaggerError>;

    /// True when `name` exists.
    fn container_exists(&self, name: &str) -> Result<bool, TaggerError>;
}

/// Create `name` if needed. `AlreadyExists` is success, not an error, and
/// leaves existing contents untouched.
pub fn ensure_container(store: &dyn ObjectStore, name: &str) -> Result<(), TaggerError> {
    match store.create_container(name) {
        Ok(()) => Ok(()),
        Err(TaggerError::AlreadyExists { .. }) => Ok(()),
        Err(err) => Err(err),
    }
}

/// Collect a full listing, treating any per-item error as structural.
pub(crate) fn collect_objects(
    store: &dyn ObjectStore,
    container: &str,
) -> Result<Vec<ObjectInfo>, TaggerError> {
    store.list_objects(container)?.collect()
}
