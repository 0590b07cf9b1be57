//! Custom error types for backup rotation.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RotateError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Duplicate backup timestamp: {0}")]
    DuplicateTimestamp(chrono::NaiveDateTime),

    #[error("Logarithmic eviction needs at least 3 backups, got {0}")]
    TooFewBackups(usize),

    #[error("Archive command `{command}` failed with {status}: {stderr}")]
    Archive {
        command: String,
        status: std::process::ExitStatus,
        stderr: String,
    },
}

pub type Result<T> = std::result::Result<T, RotateError>;
