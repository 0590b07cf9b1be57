//! Archive filename scheme: `<prefix>_<timestamp>.<suffix>`.

use chrono::NaiveDateTime;

/// Fielded timestamp embedded in archive names, e.g. `2026-03-01_12-30-00`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Formats and parses the archive filenames managed by this tool. Anything
/// in the backup directory that does not match is left alone.
#[derive(Debug, Clone)]
pub struct ArchiveNaming {
    prefix: String,
    suffix: &'static str,
}

impl ArchiveNaming {
    pub fn new(prefix: impl Into<String>, compress: bool) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: if compress { "tar.gz" } else { "tar" },
        }
    }

    /// Archive filename for a backup taken at `timestamp`.
    pub fn file_name(&self, timestamp: NaiveDateTime) -> String {
        format!(
            "{}_{}.{}",
            self.prefix,
            timestamp.format(TIMESTAMP_FORMAT),
            self.suffix
        )
    }

    /// Parse a directory entry back into its timestamp. Returns `None` for
    /// names with the wrong prefix, suffix, or timestamp shape.
    pub fn parse(&self, file_name: &str) -> Option<NaiveDateTime> {
        let rest = file_name.strip_prefix(&self.prefix)?.strip_prefix('_')?;
        let stamp = rest.strip_suffix(self.suffix)?.strip_suffix('.')?;
        NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT).ok()
    }
}
