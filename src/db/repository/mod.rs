//! Repository layer — entity-scoped database operations.
//!
//! Free functions over a `rusqlite::Connection`, one sub-module per
//! entity. All public functions are re-exported here.

mod history;
mod patient;
mod professional;
mod report;

pub use history::*;
pub use patient::*;
pub use professional::*;
pub use report::*;
