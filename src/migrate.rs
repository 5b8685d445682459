//! Migration engines: local folder trees and the `inbox` container.
//!
//! Both entry points share the same semantics: classify each document from
//! its folder-derived path, place it in a per-type destination container
//! (created on demand), merge caller defaults with derived tag values, and
//! give every deferred output artifact a copy of its paired input's final
//! tag set. Per-document failures never abort the batch.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::cancel::CancelToken;
use crate::classify::{Classification, classify};
use crate::constants::store::INBOX_CONTAINER;
use crate::constants::tags::{REDACTED_TRUE, TAG_REDACTED};
use crate::errors::TaggerError;
use crate::pairing::stem;
use crate::report::BatchReport;
use crate::store::{ObjectStore, collect_objects, ensure_container};
use crate::tags::TagSet;
use crate::types::{ContainerName, Extension, LanguageCode, Stem};

/// Configuration for one migration pass.
///
/// Passed explicitly into each operation; the engine keeps no ambient
/// process-wide default state.
#[derive(Clone, Debug)]
pub struct MigrationConfig {
    /// Default tag set applied to every document before derived values are
    /// merged. Fields valued `TBA` take the classification-derived value.
    pub defaults: TagSet,
    /// Language code prefixed to destination container names.
    pub language: LanguageCode,
    /// Extensions of derived output artifacts (for example OCR renderings).
    pub output_types: Vec<Extension>,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            defaults: TagSet::tba_defaults(),
            language: "en".to_string(),
            output_types: vec!["html".to_string(), "txt".to_string()],
        }
    }
}

/// Result of one migration pass.
#[derive(Debug, Default)]
pub struct MigrationReport {
    /// Input documents migrated successfully.
    pub migrated: usize,
    /// Output artifacts paired with an input and tagged.
    pub outputs_paired: usize,
    /// Per-document outcomes, inputs first, deferred outputs last.
    pub outcomes: BatchReport,
}

/// Migration engine over an [`ObjectStore`].
pub struct Migrator<'a> {
    store: &'a dyn ObjectStore,
    config: MigrationConfig,
    cancel: CancelToken,
}

impl<'a> Migrator<'a> {
    /// Create a migrator for `store` with the given configuration.
    pub fn new(store: &'a dyn ObjectStore, config: MigrationConfig) -> Self {
        Self {
            store,
            config,
            cancel: CancelToken::new(),
        }
    }

    /// Attach a cancellation token checked between documents.
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Migrate a local folder tree into per-type containers.
    ///
    /// The root folder name becomes the derived project name (used when the
    /// caller's `Project Name` default is `TBA`). Files whose extension is
    /// an output type are deferred until every input has been uploaded and
    /// tagged, then uploaded next to their paired input.
    pub fn migrate_tree(&self, root: &Path) -> Result<MigrationReport, TaggerError> {
        let root_name = root
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                TaggerError::Configuration(format!(
                    "migration root '{}' has no usable folder name",
                    root.display()
                ))
            })?;

        let mut report = MigrationReport::default();
        let mut inputs: HashMap<Stem, (ContainerName, TagSet)> = HashMap::new();
        let mut deferred: Vec<(PathBuf, Classification)> = Vec::new();

        for entry in WalkDir::new(root) {
            if self.cancel.is_cancelled() {
                warn!(root = %root.display(), "tree migration cancelled");
                break;
            }
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    let key = err
                        .path()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| root.display().to_string());
                    warn!(path = %key, error = %err, "unreadable tree entry");
                    report.outcomes.record_err(key, TaggerError::Io(err.into()));
                    continue;
                }
            };
            if entry.file_type().is_dir() {
                continue;
            }
            let rel_key = match relative_key(root, root_name, entry.path()) {
                Some(key) => key,
                None => continue,
            };
            if !entry.file_type().is_file() {
                report.outcomes.record_err(
                    rel_key.clone(),
                    TaggerError::MalformedPath {
                        path: rel_key,
                        reason: "neither a regular file nor a directory".to_string(),
                    },
                );
                continue;
            }
            let classification = match classify(&rel_key) {
                Ok(classification) => classification,
                Err(err) => {
                    warn!(path = %rel_key, error = %err, "unclassifiable file");
                    report.outcomes.record_err(rel_key, err);
                    continue;
                }
            };
            if self.is_output(&classification.extension) {
                deferred.push((entry.path().to_path_buf(), classification));
                continue;
            }
            match self.upload_input(entry.path(), &classification) {
                Ok((container, tags)) => {
                    debug!(key = %classification.object_key(), container, "input migrated");
                    inputs.insert(stem(&classification.file_name).to_string(), (container, tags));
                    report.migrated += 1;
                    report.outcomes.record_ok(rel_key);
                }
                Err(err) => {
                    warn!(path = %rel_key, error = %err, "input migration failed");
                    report.outcomes.record_err(rel_key, err);
                }
            }
        }

        for (path, classification) in deferred {
            if self.cancel.is_cancelled() {
                break;
            }
            let key = classification.object_key();
            match self.upload_output(&path, &classification, &inputs) {
                Ok(()) => {
                    report.outputs_paired += 1;
                    report.outcomes.record_ok(key);
                }
                Err(err) => {
                    warn!(key = %key, error = %err, "output pairing failed");
                    report.outcomes.record_err(key, err);
                }
            }
        }
        Ok(report)
    }

    /// Migrate every object in the `inbox` container into per-type
    /// containers, preserving the `<ext>/<file_name>` key convention.
    pub fn migrate_inbox(&self) -> Result<MigrationReport, TaggerError> {
        let objects = collect_objects(self.store, INBOX_CONTAINER)?;
        let mut report = MigrationReport::default();
        let mut inputs: HashMap<Stem, (ContainerName, TagSet)> = HashMap::new();
        let mut deferred = Vec::new();

        for info in objects {
            if self.cancel.is_cancelled() {
                warn!("inbox migration cancelled");
                break;
            }
            let classification = match classify(&info.key) {
                Ok(classification) => classification,
                Err(err) => {
                    warn!(key = %info.key, error = %err, "unclassifiable inbox object");
                    report.outcomes.record_err(info.key, err);
                    continue;
                }
            };
            if self.is_output(&classification.extension) {
                deferred.push((info, classification));
                continue;
            }
            match self.copy_input(&info.key, &classification) {
                Ok((container, tags)) => {
                    debug!(key = %info.key, container, "inbox object migrated");
                    inputs.insert(stem(&classification.file_name).to_string(), (container, tags));
                    report.migrated += 1;
                    report.outcomes.record_ok(info.key);
                }
                Err(err) => {
                    warn!(key = %info.key, error = %err, "inbox migration failed");
                    report.outcomes.record_err(info.key, err);
                }
            }
        }

        for (info, classification) in deferred {
            if self.cancel.is_cancelled() {
                break;
            }
            let result = match inputs.get(stem(&classification.file_name)) {
                None => Err(TaggerError::PairingNotFound {
                    key: info.key.clone(),
                }),
                Some((container, tags)) => {
                    let dest_key = classification.object_key();
                    self.store
                        .copy_object(INBOX_CONTAINER, &info.key, container, &dest_key)
                        .and_then(|()| self.store.set_tags(container, &dest_key, tags))
                }
            };
            match result {
                Ok(()) => {
                    report.outputs_paired += 1;
                    report.outcomes.record_ok(info.key);
                }
                Err(err) => {
                    warn!(key = %info.key, error = %err, "output pairing failed");
                    report.outcomes.record_err(info.key, err);
                }
            }
        }
        Ok(report)
    }

    fn is_output(&self, extension: &str) -> bool {
        self.config.output_types.iter().any(|ot| ot == extension)
    }

    /// Caller defaults merged with derived values; a redaction marker in
    /// the file name always forces `Redacted=True`.
    fn merged_tags(&self, classification: &Classification) -> TagSet {
        let mut tags =
            TagSet::merge_defaults(&self.config.defaults, &classification.derived_tags());
        if classification.is_redacted {
            tags.set(TAG_REDACTED, REDACTED_TRUE);
        }
        tags
    }

    fn upload_input(
        &self,
        path: &Path,
        classification: &Classification,
    ) -> Result<(ContainerName, TagSet), TaggerError> {
        let container = classification.destination_container(&self.config.language);
        ensure_container(self.store, &container)?;
        let contents = fs::read(path)?;
        let key = classification.object_key();
        self.store.put_object(&container, &key, &contents)?;
        let tags = self.merged_tags(classification);
        self.store.set_tags(&container, &key, &tags)?;
        Ok((container, tags))
    }

    fn upload_output(
        &self,
        path: &Path,
        classification: &Classification,
        inputs: &HashMap<Stem, (ContainerName, TagSet)>,
    ) -> Result<(), TaggerError> {
        let key = classification.object_key();
        let (container, tags) =
            inputs
                .get(stem(&classification.file_name))
                .ok_or_else(|| TaggerError::PairingNotFound {
                    key: key.clone(),
                })?;
        let contents = fs::read(path)?;
        self.store.put_object(container, &key, &contents)?;
        self.store.set_tags(container, &key, tags)
    }

    fn copy_input(
        &self,
        src_key: &str,
        classification: &Classification,
    ) -> Result<(ContainerName, TagSet), TaggerError> {
        let container = classification.destination_container(&self.config.language);
        ensure_container(self.store, &container)?;
        let dest_key = classification.object_key();
        self.store
            .copy_object(INBOX_CONTAINER, src_key, &container, &dest_key)?;
        let tags = self.merged_tags(classification);
        self.store.set_tags(&container, &dest_key, &tags)?;
        Ok((container, tags))
    }
}

/// Path of `entry` relative to the migration root, prefixed with the root
/// folder name and joined with `/` so it classifies like an original path.
fn relative_key(root: &Path, root_name: &str, entry: &Path) -> Option<String> {
    let rel = entry.strip_prefix(root).ok()?;
    let mut key = String::from(root_name);
    for component in rel.components() {
        key.push('/');
        key.push_str(&component.as_os_str().to_string_lossy());
    }
    Some(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn default_config_uses_tba_defaults_and_ocr_output_types() {
        let config = MigrationConfig::default();
        assert!(config.defaults.is_tba("DocType"));
        assert_eq!(config.language, "en");
        assert_eq!(config.output_types, vec!["html", "txt"]);
    }

    #[test]
    fn relative_keys_are_rooted_at_the_folder_name() {
        let root = PathBuf::from("/data/ProjectX");
        let entry = root.join("Invoices").join("scan1.pdf");
        assert_eq!(
            relative_key(&root, "ProjectX", &entry),
            Some("ProjectX/Invoices/scan1.pdf".to_string())
        );
    }
}
