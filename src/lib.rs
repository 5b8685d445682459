#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Train/test rebalancing over tagged containers.
pub mod balance;
/// Cooperative cancellation for batch operations.
pub mod cancel;
/// Path-derived document classification.
pub mod classify;
/// Centralized constants for tag fields, store names, and balancing.
pub mod constants;
/// Migration engines for local trees and the inbox container.
pub mod migrate;
/// Object-key conventions and input/output artifact pairing.
pub mod pairing;
/// Tag propagation over single documents and whole containers.
pub mod propagate;
/// Tag-equality lookup and corpus inventory queries.
pub mod query;
/// Structured per-document batch outcome reporting.
pub mod report;
/// Object store adapter interface and in-memory implementation.
pub mod store;
/// Tag set data model and merge rules.
pub mod tags;
/// Shared type aliases.
pub mod types;

mod errors;

pub use balance::{BalanceReport, balance, balance_with_rng};
pub use cancel::CancelToken;
pub use classify::{Classification, classify};
pub use errors::TaggerError;
pub use migrate::{MigrationConfig, MigrationReport, Migrator};
pub use propagate::{apply_tags, apply_tags_to_container, apply_tags_to_matching};
pub use query::{SetCounts, doc_types, find_by_tag, regroup, set_counts};
pub use report::{BatchReport, DocumentOutcome};
pub use store::{MemoryStore, ObjectInfo, ObjectIter, ObjectStore, ensure_container};
pub use tags::{SetLabel, TagSet};
pub use types::{
    ContainerName, Extension, LanguageCode, ObjectKey, Stem, TagName, TagValue,
};
