//! Retention policy core.
//!
//! Pure, clock-injected decision logic over the set of existing backup
//! timestamps. No I/O happens here; the [`store`](crate::store) collaborator
//! owns the physical files.

pub mod evaluator;
pub mod plan;
pub mod set;

pub use plan::plan_deletions;
pub use set::{BackupRecord, BackupSet};
