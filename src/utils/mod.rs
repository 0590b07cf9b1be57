//! Utility modules for backup rotation.

pub mod errors;
pub mod logger;

pub use errors::{Result, RotateError};
