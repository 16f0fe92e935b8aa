//! Portal REST API.
//!
//! Routes are nested under `/api/` with a stand-alone `/health` probe.
//! The router is composable — `portal_router()` returns a `Router` that
//! can be mounted on any axum server instance.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod server;
pub mod types;

pub use router::portal_router;
pub use server::{start_portal_server, PortalServer};
pub use types::ApiContext;
