use axum::{routing::get, Router};
use tower_http::services::ServeDir;

use crate::handlers;

/// All application routes. The fallback serves the rendering host's
/// static bundle.
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // D410 Delivery Overview Dashboard
        .route(
            "/api/d410/overview",
            get(handlers::d410_delivery_overview::get_overview),
        )
        .fallback_service(ServeDir::new("dist"))
}
