//! Train/test rebalancing over a tagged container.
//!
//! Moves randomly sampled input documents from `Set=Train` to `Set=Test`
//! until the container is within one document of the target test fraction.
//! Output artifacts are never selected directly; they follow their paired
//! input. Sampling is without replacement over a pool that shrinks on every
//! draw, so a pass always terminates even when the eligible pool is smaller
//! than the number of documents needed.

use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::{debug, warn};

use crate::cancel::CancelToken;
use crate::constants::balance::DEFAULT_TEST_FRACTION;
use crate::constants::tags::TAG_SET;
use crate::errors::TaggerError;
use crate::pairing::{file_name, is_output_type, output_key, stem};
use crate::report::BatchReport;
use crate::store::{ObjectInfo, ObjectStore, collect_objects};
use crate::tags::{SetLabel, TagSet};
use crate::types::Extension;

/// Result of one balancing pass.
#[derive(Debug, Default)]
pub struct BalanceReport {
    /// Input documents whose `Set` tag was changed to `Test`.
    pub transferred: usize,
    /// Total documents listed in the container.
    pub total: usize,
    /// Per-document outcomes for transfers and pairing mirrors.
    pub outcomes: BatchReport,
}

/// Rebalance `container` toward the default 70/30 train/test ratio using a
/// thread-local RNG.
pub fn balance(
    store: &dyn ObjectStore,
    container: &str,
    output_types: &[Extension],
) -> Result<BalanceReport, TaggerError> {
    balance_with_rng(
        store,
        container,
        output_types,
        DEFAULT_TEST_FRACTION,
        &mut rand::rng(),
        &CancelToken::new(),
    )
}

/// Rebalance `container` toward `target_test_fraction` with a caller RNG,
/// for reproducible passes.
///
/// Samples `floor(n × fraction) − current test count` distinct documents
/// uniformly from the eligible pool (not an output type, not already in
/// `Test`), retags each as `Set=Test` preserving all other fields, and
/// mirrors the updated tag set onto every existing paired output artifact.
/// When the pool is smaller than the needed count, the smaller number is
/// transferred and the pass still terminates.
pub fn balance_with_rng<R: Rng + ?Sized>(
    store: &dyn ObjectStore,
    container: &str,
    output_types: &[Extension],
    target_test_fraction: f64,
    rng: &mut R,
    cancel: &CancelToken,
) -> Result<BalanceReport, TaggerError> {
    if !(0.0..=1.0).contains(&target_test_fraction) {
        return Err(TaggerError::Configuration(format!(
            "target test fraction {target_test_fraction} is outside 0.0..=1.0"
        )));
    }
    let objects = collect_objects(store, container)?;
    let total = objects.len();
    let mut report = BalanceReport {
        total,
        ..BalanceReport::default()
    };
    if total <= 1 {
        debug!(container, total, "nothing to balance");
        return Ok(report);
    }

    // One tag read per document; unreadable documents drop out of the pool
    // but still count toward the listing total.
    let mut docs: Vec<(ObjectInfo, TagSet)> = Vec::with_capacity(total);
    for info in objects {
        match store.get_tags(container, &info.key) {
            Ok(tags) => docs.push((info, tags)),
            Err(err) => {
                warn!(container, key = %info.key, error = %err, "unreadable tags");
                report.outcomes.record_err(info.key, err);
            }
        }
    }

    let test_count = docs
        .iter()
        .filter(|(_, tags)| tags.set_label() == Some(SetLabel::Test))
        .count();
    let target_test = (total as f64 * target_test_fraction).floor() as usize;
    let needed = target_test.saturating_sub(test_count);
    if needed == 0 {
        debug!(container, test_count, target_test, "already balanced");
        return Ok(report);
    }

    let eligible: Vec<&(ObjectInfo, TagSet)> = docs
        .iter()
        .filter(|(info, tags)| {
            !is_output_type(&info.key, output_types)
                && tags.set_label() != Some(SetLabel::Test)
        })
        .collect();

    // Distinct draws; `choose_multiple` caps at the pool size, so an
    // exhausted pool yields a smaller transfer count instead of retrying.
    let selected: Vec<&(ObjectInfo, TagSet)> = eligible
        .choose_multiple(rng, needed)
        .copied()
        .collect();

    let mut transferred: Vec<(&ObjectInfo, TagSet)> = Vec::with_capacity(selected.len());
    for (info, tags) in selected {
        if cancel.is_cancelled() {
            warn!(container, "balancing cancelled");
            break;
        }
        let mut updated = tags.clone();
        updated.set(TAG_SET, SetLabel::Test.as_str());
        match store.set_tags(container, &info.key, &updated) {
            Ok(()) => {
                debug!(container, key = %info.key, "transferred to test set");
                report.transferred += 1;
                report.outcomes.record_ok(info.key.clone());
                transferred.push((info, updated));
            }
            Err(err) => {
                warn!(container, key = %info.key, error = %err, "transfer failed");
                report.outcomes.record_err(info.key.clone(), err);
            }
        }
    }

    // Mirror the updated tag set onto paired output artifacts.
    for (info, tags) in transferred {
        let base = stem(file_name(&info.key));
        for output_type in output_types {
            let out_key = output_key(base, output_type);
            match store.get_tags(container, &out_key) {
                Ok(_) => match store.set_tags(container, &out_key, &tags) {
                    Ok(()) => report.outcomes.record_ok(out_key),
                    Err(err) => report.outcomes.record_err(out_key, err),
                },
                Err(TaggerError::NotFound { .. }) => continue,
                Err(err) => {
                    warn!(container, key = %out_key, error = %err, "pair lookup failed");
                    report.outcomes.record_err(out_key, err);
                }
            }
        }
    }

    debug!(
        container,
        transferred = report.transferred,
        total,
        "balancing pass complete"
    );
    Ok(report)
}
