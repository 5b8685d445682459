use std::io;

use thiserror::Error;

use crate::types::{ContainerName, ObjectKey};

/// Error type for classification, store access, and batch operation failures.
#[derive(Debug, Error)]
pub enum TaggerError {
    /// A path string lacks the structure classification needs.
    #[error("malformed path '{path}': {reason}")]
    MalformedPath {
        /// The offending path.
        path: String,
        /// What the path is missing.
        reason: String,
    },
    /// No object with this key exists in the container.
    #[error("object '{key}' not found in container '{container}'")]
    NotFound {
        /// Container that was searched.
        container: ContainerName,
        /// Key that was looked up.
        key: ObjectKey,
    },
    /// The named container does not exist.
    #[error("container '{container}' not found")]
    ContainerNotFound {
        /// Container that was looked up.
        container: ContainerName,
    },
    /// A container with this name already exists.
    #[error("container '{container}' already exists")]
    AlreadyExists {
        /// Container that was being created.
        container: ContainerName,
    },
    /// The store rejected or could not service a request.
    #[error("object store unavailable: {reason}")]
    StoreUnavailable {
        /// Store-reported failure detail.
        reason: String,
    },
    /// An output artifact has no input document sharing its stem.
    #[error("no paired input document for output artifact '{key}'")]
    PairingNotFound {
        /// Key of the orphaned output artifact.
        key: ObjectKey,
    },
    /// An operation was invoked with unusable parameters.
    #[error("configuration error: {0}")]
    Configuration(String),
    /// Local file or directory access failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}
