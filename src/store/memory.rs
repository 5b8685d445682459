use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use crate::errors::TaggerError;
use crate::store::{ObjectInfo, ObjectIter, ObjectStore};
use crate::tags::TagSet;
use crate::types::{ContainerName, ObjectKey};

#[derive(Clone, Debug)]
struct StoredObject {
    contents: Vec<u8>,
    tags: TagSet,
    last_modified: DateTime<Utc>,
}

/// In-memory object store for tests and small corpora.
#[derive(Debug, Default)]
pub struct MemoryStore {
    containers: RwLock<HashMap<ContainerName, BTreeMap<ObjectKey, StoredObject>>>,
}

impl MemoryStore {
    /// Create an empty store with no containers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw contents of one object, for assertions in tests.
    pub fn contents(&self, container: &str, key: &str) -> Result<Vec<u8>, TaggerError> {
        let guard = self.read_lock()?;
        let objects = guard
            .get(container)
            .ok_or_else(|| TaggerError::ContainerNotFound {
                container: container.to_string(),
            })?;
        objects
            .get(key)
            .map(|object| object.contents.clone())
            .ok_or_else(|| TaggerError::NotFound {
                container: container.to_string(),
                key: key.to_string(),
            })
    }

    fn read_lock(
        &self,
    ) -> Result<
        std::sync::RwLockReadGuard<'_, HashMap<ContainerName, BTreeMap<ObjectKey, StoredObject>>>,
        TaggerError,
    > {
        self.containers
            .read()
            .map_err(|_| TaggerError::StoreUnavailable {
                reason: "memory store lock poisoned".to_string(),
            })
    }

    fn write_lock(
        &self,
    ) -> Result<
        std::sync::RwLockWriteGuard<'_, HashMap<ContainerName, BTreeMap<ObjectKey, StoredObject>>>,
        TaggerError,
    > {
        self.containers
            .write()
            .map_err(|_| TaggerError::StoreUnavailable {
                reason: "memory store lock poisoned".to_string(),
            })
    }
}

fn container_not_found(container: &str) -> TaggerError {
    TaggerError::ContainerNotFound {
        container: container.to_string(),
    }
}

fn object_not_found(container: &str, key: &str) -> TaggerError {
    TaggerError::NotFound {
        container: container.to_string(),
        key: key.to_string(),
    }
}

impl ObjectStore for MemoryStore {
    fn list_objects(&self, container: &str) -> Result<ObjectIter<'_>, TaggerError> {
        let guard = self.read_lock()?;
        let objects = guard
            .get(container)
            .ok_or_else(|| container_not_found(container))?;
        let infos: Vec<ObjectInfo> = objects
            .iter()
            .map(|(key, object)| ObjectInfo {
                key: key.clone(),
                size: object.contents.len() as u64,
                last_modified: object.last_modified,
            })
            .collect();
        Ok(Box::new(infos.into_iter().map(Ok)))
    }

    fn get_tags(&self, container: &str, key: &str) -> Result<TagSet, TaggerError> {
        let guard = self.read_lock()?;
        let objects = guard
            .get(container)
            .ok_or_else(|| container_not_found(container))?;
        objects
            .get(key)
            .map(|object| object.tags.clone())
            .ok_or_else(|| object_not_found(container, key))
    }

    fn set_tags(&self, container: &str, key: &str, tags: &TagSet) -> Result<(), TaggerError> {
        let mut guard = self.write_lock()?;
        let objects = guard
            .get_mut(container)
            .ok_or_else(|| container_not_found(container))?;
        let object = objects
            .get_mut(key)
            .ok_or_else(|| object_not_found(container, key))?;
        object.tags = tags.clone();
        Ok(())
    }

    fn put_object(&self, container: &str, key: &str, contents: &[u8]) -> Result<(), TaggerError> {
        let mut guard = self.write_lock()?;
        let objects = guard
            .get_mut(container)
            .ok_or_else(|| container_not_found(container))?;
        objects.insert(
            key.to_string(),
            StoredObject {
                contents: contents.to_vec(),
                tags: TagSet::new(),
                last_modified: Utc::now(),
            },
        );
        Ok(())
    }

    fn copy_object(
        &self,
        src_container: &str,
        src_key: &str,
        dest_container: &str,
        dest_key: &str,
    ) -> Result<(), TaggerError> {
        let mut guard = self.write_lock()?;
        let source = guard
            .get(src_container)
            .ok_or_else(|| container_not_found(src_container))?
            .get(src_key)
            .cloned()
            .ok_or_else(|| object_not_found(src_container, src_key))?;
        let dest = guard
            .get_mut(dest_container)
            .ok_or_else(|| container_not_found(dest_container))?;
        dest.insert(
            dest_key.to_string(),
            StoredObject {
                last_modified: Utc::now(),
                ..source
            },
        );
        Ok(())
    }

    fn create_container(&self, name: &str) -> Result<(), TaggerError> {
        let mut guard = self.write_lock()?;
        if guard.contains_key(name) {
            return Err(TaggerError::AlreadyExists {
                container: name.to_string(),
            });
        }
        guard.insert(name.to_string(), BTreeMap::new());
        Ok(())
    }

    fn container_exists(&self, name: &str) -> Result<bool, TaggerError> {
        Ok(self.read_lock()?.contains_key(name))
    }
}
