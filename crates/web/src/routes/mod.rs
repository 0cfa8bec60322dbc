//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health              - Liveness check
//! GET  /health/ready        - Readiness check (verifies the database)
//!
//! GET  /                    - Redirect to the shoe listing
//!
//! # Shoes
//! GET  /shoes               - Shoe listing
//! GET  /shoes/new           - Empty creation form
//! POST /shoes               - Create a shoe
//! GET  /shoes/{id}          - Shoe detail
//! GET  /shoes/{id}/edit     - Populated edit form
//! POST /shoes/{id}          - Update a shoe
//! GET  /shoes/{id}/delete   - Deletion confirmation page
//! POST /shoes/{id}/delete   - Delete a shoe
//! ```

use axum::{Router, extract::State, http::StatusCode, response::Redirect, routing::get};

pub mod shoes;

use crate::state::AppState;

/// Build the application routes (everything below `/`).
pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(root)).merge(shoes::router())
}

/// Build the full application router, health endpoints included.
///
/// This is the router the binary serves and the one the integration tests
/// drive directly.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(routes())
        .with_state(state)
}

/// GET / - The listing is the landing page.
async fn root() -> Redirect {
    Redirect::to("/shoes")
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies database connectivity before returning OK.
/// Returns 503 Service Unavailable if the database is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match sqlx::query("SELECT 1").fetch_one(state.pool()).await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}
