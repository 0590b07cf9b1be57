//! Backup Rotate Library
//!
//! Rotates a directory of timestamped tar archives, keeping recent backups
//! dense and older ones sparse along a logarithmic decay curve.
//!
//! Adapted from the Neil Fraser / Christopher Allen logarithmic backup
//! algorithm: <https://neil.fraser.name/software/backup/>

pub mod config;
pub mod retention;
pub mod store;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use utils::errors::RotateError;
pub type Result<T> = std::result::Result<T, RotateError>;
