//! The backup set: an ordered sequence of timestamped records.

use chrono::NaiveDateTime;

use crate::utils::errors::{Result, RotateError};

/// One existing backup: a second-granularity timestamp and the archive
/// filename it was parsed from. The timestamp is both the identity key and
/// the sort key; the name is opaque to the retention logic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupRecord {
    pub timestamp: NaiveDateTime,
    pub name: String,
}

impl BackupRecord {
    pub fn new(timestamp: NaiveDateTime, name: impl Into<String>) -> Self {
        Self {
            timestamp,
            name: name.into(),
        }
    }
}

/// An ordered sequence of backup records, strictly ascending by timestamp
/// (index 0 = oldest). The directory listing arrives in unspecified order,
/// so the constructor sorts and enforces the invariant instead of trusting
/// the caller.
#[derive(Debug, Clone)]
pub struct BackupSet {
    records: Vec<BackupRecord>,
}

impl BackupSet {
    /// Build a set from an unordered listing. Sorts by timestamp and rejects
    /// duplicates (two archives cannot share a second-granularity name).
    pub fn new(mut records: Vec<BackupRecord>) -> Result<Self> {
        records.sort_by_key(|r| r.timestamp);
        for pair in records.windows(2) {
            if pair[0].timestamp == pair[1].timestamp {
                return Err(RotateError::DuplicateTimestamp(pair[0].timestamp));
            }
        }
        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[BackupRecord] {
        &self.records
    }

    pub fn oldest(&self) -> Option<&BackupRecord> {
        self.records.first()
    }

    /// Remove and return the record at `index`. Later records shift down one
    /// slot, preserving the ascending-order invariant.
    pub fn remove(&mut self, index: usize) -> BackupRecord {
        self.records.remove(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(secs: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
            + chrono::Duration::seconds(secs as i64)
    }

    #[test]
    fn test_new_sorts_unordered_listing() {
        let set = BackupSet::new(vec![
            BackupRecord::new(ts(20), "c"),
            BackupRecord::new(ts(0), "a"),
            BackupRecord::new(ts(10), "b"),
        ])
        .unwrap();

        let names: Vec<&str> = set.records().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_new_rejects_duplicate_timestamps() {
        let result = BackupSet::new(vec![
            BackupRecord::new(ts(5), "x"),
            BackupRecord::new(ts(5), "y"),
        ]);
        assert!(matches!(result, Err(RotateError::DuplicateTimestamp(_))));
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut set = BackupSet::new(vec![
            BackupRecord::new(ts(0), "a"),
            BackupRecord::new(ts(10), "b"),
            BackupRecord::new(ts(20), "c"),
        ])
        .unwrap();

        let removed = set.remove(1);
        assert_eq!(removed.name, "b");
        assert_eq!(set.len(), 2);
        assert_eq!(set.oldest().unwrap().name, "a");
        assert_eq!(set.records()[1].name, "c");
    }
}
