//! Eviction evaluators: which single backup should go next.
//!
//! Two policies, consulted in priority order by the planner:
//! 1. Age-based: the oldest backup goes once it exceeds the outdated
//!    threshold.
//! 2. Logarithmic: fit the set against an ideal schedule whose spacing grows
//!    geometrically into the past, and drop the record whose removal leaves
//!    the smallest total deviation.
//!
//! The logarithmic model follows the Neil Fraser / Christopher Allen backup
//! algorithm (<https://neil.fraser.name/software/backup/>).

use chrono::{Duration, NaiveDateTime};

use crate::retention::set::BackupSet;
use crate::utils::errors::{Result, RotateError};

/// Age-based eviction check.
///
/// Returns `Some(0)` when the oldest record is older than `outdated_age`
/// relative to `now`, `None` otherwise. The set is ascending, so if the
/// oldest record is within the threshold every other record is too.
pub fn outdated_index(
    set: &BackupSet,
    outdated_age: Duration,
    now: NaiveDateTime,
) -> Option<usize> {
    let oldest = set.oldest()?;
    if now - oldest.timestamp > outdated_age {
        Some(0)
    } else {
        None
    }
}

/// Logarithmic-shape eviction.
///
/// Computes a per-step decay rate from how far the set's span overshoots the
/// expected interval, derives the ideal timestamp for every slot, and scores
/// each candidate deletion by the total absolute deviation the remaining
/// records would have against that schedule. The oldest record (the
/// historical anchor) and the newest record are never selected, so the set
/// must hold at least 3 records.
pub fn logarithmic_index(
    set: &BackupSet,
    expected_interval: Duration,
    now: NaiveDateTime,
) -> Result<usize> {
    let n = set.len();
    // Indices 0 and n-1 are protected; anything smaller has no candidate.
    if n < 3 {
        return Err(RotateError::TooFewBackups(n));
    }

    let interval = expected_interval.num_seconds() as f64;
    let actual: Vec<f64> = set
        .records()
        .iter()
        .map(|r| r.timestamp.and_utc().timestamp() as f64)
        .collect();
    let now_secs = now.and_utc().timestamp() as f64;

    // Decay rate: how much older each retained backup should ideally be than
    // its successor. A rate of 2.0 means each archive is twice the age of
    // the one after it.
    let desired_count = (n - 1) as f64;
    let span = now_secs - actual[0];
    let excess = (span / interval - desired_count).max(0.0);
    let decay_rate = (excess + 1.0).powf(1.0 / desired_count);

    // Ideal schedule: slot n-1 (newest) lands on `now`, spacing between
    // consecutive slots grows by `decay_rate` toward the past.
    let ideal: Vec<f64> = (0..n)
        .map(|i| {
            let steps_back = (n - 1 - i) as f64;
            now_secs - interval * (steps_back + decay_rate.powf(steps_back) - 1.0)
        })
        .collect();

    // right_error[i]: deviation of records i..n-1 kept in their own slots.
    let mut right_error = vec![0.0; n];
    right_error[n - 1] = (actual[n - 1] - ideal[n - 1]).abs();
    for i in (0..n - 1).rev() {
        right_error[i] = (actual[i] - ideal[i]).abs() + right_error[i + 1];
    }

    // left_error[i]: deviation of records 0..i-1 after each shifts one slot
    // later, as happens to everything before a deleted record.
    let mut left_error = vec![0.0; n];
    for i in 1..n {
        left_error[i] = left_error[i - 1] + (actual[i - 1] - ideal[i]).abs();
    }

    // score[i]: total deviation if record i is deleted.
    let score: Vec<f64> = (0..n - 1)
        .map(|i| left_error[i] + right_error[i + 1])
        .collect();

    // Argmin restricted to 1..=n-2; both the search and the reported index
    // stay inside that range, so a protected slot can never win on a tie.
    let mut best = 1;
    for i in 2..n - 1 {
        if score[i] < score[best] {
            best = i;
        }
    }
    Ok(best)
}
