//! API router.
//!
//! Returns a composable `Router` with all endpoints nested under `/api/`.
//! Handlers take `State<ApiContext>`; tests inject a mock completion client.

use axum::routing::{get, post};
use axum::Router;

use crate::api::endpoints;
use crate::api::types::ApiContext;

pub fn api_router(ctx: ApiContext) -> Router {
    let routes = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/reports", post(endpoints::reports::generate))
        .route("/batch/extract", post(endpoints::batch::extract))
        .route("/batch/generate", post(endpoints::batch::generate))
        .with_state(ctx);

    Router::new().nest("/api", routes)
}
