//! Cleanup planner: turns a backup set into an ordered deletion list.

use chrono::NaiveDateTime;
use tracing::debug;

use crate::config::RetentionConfig;
use crate::retention::evaluator;
use crate::retention::set::{BackupRecord, BackupSet};
use crate::utils::errors::{Result, RotateError};

/// Decide which backups to delete so the set shrinks to `max_kept`.
///
/// Runs one evaluator round per excess record: the age-based check first,
/// the logarithmic check when nothing is outdated. Each victim is removed
/// from the in-memory set before the next round, so later rounds score the
/// already-shrunk set. Returns victims in decision order; physical deletion
/// is the caller's job and happens strictly after planning.
pub fn plan_deletions(
    mut set: BackupSet,
    retention: &RetentionConfig,
    now: NaiveDateTime,
) -> Result<Vec<BackupRecord>> {
    if retention.max_kept < 2 {
        return Err(RotateError::Config(format!(
            "max_kept must be at least 2, got {}",
            retention.max_kept
        )));
    }

    let excess = set.len().saturating_sub(retention.max_kept);
    let mut victims = Vec::with_capacity(excess);

    for _ in 0..excess {
        let index = match evaluator::outdated_index(&set, retention.outdated_age(), now) {
            Some(index) => {
                debug!(index, "Oldest backup past outdated threshold");
                index
            }
            None => evaluator::logarithmic_index(&set, retention.expected_interval(), now)?,
        };
        let victim = set.remove(index);
        debug!(name = %victim.name, "Planned deletion");
        victims.push(victim);
    }

    Ok(victims)
}
