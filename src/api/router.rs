//! Portal API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! Resource routes are nested under `/api/`; `/health` and the static
//! `/uploads/` file service sit at the root.
//!
//! NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::api::endpoints;
use crate::api::endpoints::reports::MAX_FILE_BYTES;
use crate::api::types::ApiContext;

/// Build the portal router.
///
/// The body limit leaves headroom above the file cap for multipart
/// framing and the metadata fields.
pub fn portal_router(ctx: ApiContext) -> Router {
    let api = Router::new()
        .route("/patients/login", post(endpoints::patients::login))
        .route(
            "/patients/:aadhaar",
            get(endpoints::patients::detail).put(endpoints::patients::update),
        )
        .route("/medical/login", post(endpoints::medical::login))
        .route("/medical/patients", get(endpoints::medical::patients))
        .route("/reports/upload", post(endpoints::reports::upload))
        .route(
            "/reports/patient/:aadhaar",
            get(endpoints::reports::patient_reports),
        )
        .route("/history", post(endpoints::history::record))
        .route(
            "/history/patient/:aadhaar",
            get(endpoints::history::patient_history),
        )
        .with_state(ctx.clone());

    Router::new()
        .route("/health", get(endpoints::health::check))
        .nest("/api", api)
        .nest_service("/uploads", ServeDir::new(&ctx.uploads_dir))
        .layer(DefaultBodyLimit::max(MAX_FILE_BYTES + 1024 * 1024))
        .layer(CorsLayer::permissive())
}
