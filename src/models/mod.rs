//! Domain entities persisted by the portal.
//!
//! Wire shape is camelCase JSON (the contract the SPA speaks); column
//! names stay snake_case in SQLite.

mod history;
mod patient;
mod professional;
mod report;

pub use history::*;
pub use patient::*;
pub use professional::*;
pub use report::*;
