//! API endpoint handlers, grouped by resource.

pub mod health;
pub mod history;
pub mod medical;
pub mod patients;
pub mod reports;
