//! Archive store: the physical tar files behind the retention logic.
//!
//! Creates archives by shelling out to `tar`, lists the backup directory for
//! records matching the naming scheme, and removes decided victims. All
//! decisions live in [`retention`](crate::retention); this module only moves
//! files.

pub mod naming;

use std::path::PathBuf;
use std::process::Command;

use chrono::NaiveDateTime;
use tracing::{info, warn};

use crate::config::BackupConfig;
use crate::retention::set::BackupRecord;
use crate::utils::errors::{Result, RotateError};
use naming::ArchiveNaming;

pub struct ArchiveStore {
    src_dir: PathBuf,
    backup_dir: PathBuf,
    naming: ArchiveNaming,
    compress: bool,
}

impl ArchiveStore {
    pub fn new(backup: &BackupConfig) -> Self {
        Self {
            src_dir: backup.src_dir.clone(),
            backup_dir: backup.backup_dir.clone(),
            naming: ArchiveNaming::new(backup.prefix.clone(), backup.compress),
            compress: backup.compress,
        }
    }

    /// List existing backups, in directory order. Entries that do not match
    /// the naming scheme are skipped.
    pub fn list(&self) -> Result<Vec<BackupRecord>> {
        let mut records = Vec::new();
        for entry in std::fs::read_dir(&self.backup_dir)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if let Some(timestamp) = self.naming.parse(&name) {
                records.push(BackupRecord::new(timestamp, name));
            }
        }
        Ok(records)
    }

    /// Archive `src_dir` into a new timestamped tar file.
    pub fn create(&self, now: NaiveDateTime) -> Result<BackupRecord> {
        std::fs::create_dir_all(&self.backup_dir)?;

        let name = self.naming.file_name(now);
        let target = self.backup_dir.join(&name);
        let flags = if self.compress { "-czf" } else { "-cf" };

        let output = Command::new("tar")
            .arg(flags)
            .arg(&target)
            .arg("-C")
            .arg(&self.src_dir)
            .arg(".")
            .output()?;

        if !output.status.success() {
            return Err(RotateError::Archive {
                command: format!("tar {} {}", flags, target.display()),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
            });
        }

        info!(src = %self.src_dir.display(), archive = %target.display(), "Created backup");
        Ok(BackupRecord::new(now, name))
    }

    /// Delete one decided victim from disk.
    pub fn remove(&self, record: &BackupRecord) -> Result<()> {
        let target = self.backup_dir.join(&record.name);
        std::fs::remove_file(&target)?;
        info!(archive = %target.display(), "Removed backup");
        Ok(())
    }

    /// Delete every planned victim, continuing past individual failures.
    /// Returns the number of failed removals; the plan is already final, so
    /// one stubborn file must not shield the others.
    pub fn remove_all(&self, victims: &[BackupRecord]) -> usize {
        let mut failures = 0;
        for victim in victims {
            if let Err(e) = self.remove(victim) {
                warn!(archive = %victim.name, error = %e, "Failed to remove backup");
                failures += 1;
            }
        }
        failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::fs;
    use tempfile::TempDir;

    fn store_for(temp: &TempDir, compress: bool) -> ArchiveStore {
        ArchiveStore::new(&BackupConfig {
            src_dir: temp.path().join("src"),
            backup_dir: temp.path().join("backups"),
            prefix: "backup".to_string(),
            compress,
        })
    }

    fn ts(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 1)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_list_skips_foreign_files() -> std::io::Result<()> {
        let temp = TempDir::new()?;
        let backups = temp.path().join("backups");
        fs::create_dir_all(&backups)?;
        fs::write(backups.join("backup_2026-03-01_10-00-00.tar"), b"")?;
        fs::write(backups.join("backup_2026-03-01_11-00-00.tar"), b"")?;
        fs::write(backups.join("unrelated.txt"), b"")?;
        fs::write(backups.join("backup_garbage.tar"), b"")?;

        let store = store_for(&temp, false);
        let mut records = store.list().unwrap();
        records.sort_by_key(|r| r.timestamp);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].timestamp, ts(10, 0, 0));
        assert_eq!(records[1].timestamp, ts(11, 0, 0));
        Ok(())
    }

    #[test]
    fn test_create_then_list_round_trip() -> std::io::Result<()> {
        let temp = TempDir::new()?;
        fs::create_dir_all(temp.path().join("src"))?;
        fs::write(temp.path().join("src/data.txt"), b"payload")?;

        let store = store_for(&temp, false);
        let created = store.create(ts(12, 30, 0)).unwrap();
        assert_eq!(created.name, "backup_2026-03-01_12-30-00.tar");

        let records = store.list().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].timestamp, ts(12, 30, 0));
        Ok(())
    }

    #[test]
    fn test_create_fails_on_missing_source() -> std::io::Result<()> {
        let temp = TempDir::new()?;
        let store = store_for(&temp, false);
        let result = store.create(ts(12, 0, 0));
        assert!(result.is_err());
        Ok(())
    }

    #[test]
    fn test_remove_all_continues_past_missing_files() -> std::io::Result<()> {
        let temp = TempDir::new()?;
        let backups = temp.path().join("backups");
        fs::create_dir_all(&backups)?;
        fs::write(backups.join("backup_2026-03-01_10-00-00.tar"), b"")?;

        let store = store_for(&temp, false);
        let victims = vec![
            BackupRecord::new(ts(9, 0, 0), "backup_2026-03-01_09-00-00.tar".to_string()),
            BackupRecord::new(ts(10, 0, 0), "backup_2026-03-01_10-00-00.tar".to_string()),
        ];

        // First victim never existed; the second must still be removed.
        let failures = store.remove_all(&victims);
        assert_eq!(failures, 1);
        assert!(!backups.join("backup_2026-03-01_10-00-00.tar").exists());
        Ok(())
    }
}
