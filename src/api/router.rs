use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::auth::require_auth;
use super::handlers;
use crate::AppState;

pub fn create_router(state: AppState) -> Router {
    // Public routes — storefront + operational endpoints, no authentication
    let public = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/metrics", get(handlers::metrics::render))
        .route("/storefront/cars", get(handlers::storefront::list_cars))
        .route("/storefront/cars/:id", get(handlers::storefront::car_detail))
        .route("/storefront/registrations", post(handlers::storefront::submit_registration));

    // Admin API — requires Bearer token when API_TOKEN is set
    let protected = Router::new()
        // Inventory
        .route("/api/cars", get(handlers::cars::list).post(handlers::cars::create))
        .route("/api/cars/:id", get(handlers::cars::detail).put(handlers::cars::update).delete(handlers::cars::remove))
        .route("/api/cars/:id/status", post(handlers::cars::set_status))
        // Clients (registration/contact submissions)
        .route("/api/clients", get(handlers::clients::list))
        .route("/api/clients/:id", delete(handlers::clients::remove))
        .route("/api/clients/:id/handled", post(handlers::clients::mark_handled))
        // Sales orders
        .route("/api/orders", get(handlers::orders::list).post(handlers::orders::create))
        .route("/api/orders/:id", get(handlers::orders::detail).delete(handlers::orders::remove))
        .route("/api/orders/:id/status", post(handlers::orders::set_status))
        .route("/api/orders/:id/finance", get(handlers::orders::finance_status))
        // Finance ledger
        .route("/api/finance", get(handlers::finance::list).post(handlers::finance::create))
        .route("/api/finance/summary", get(handlers::finance::summary))
        .route("/api/finance/:id", get(handlers::finance::detail).put(handlers::finance::update).delete(handlers::finance::remove))
        // Transitaires
        .route("/api/transitaires", get(handlers::transitaires::list).post(handlers::transitaires::create))
        .route("/api/transitaires/:id", get(handlers::transitaires::detail).put(handlers::transitaires::update).delete(handlers::transitaires::remove))
        // Documents
        .route("/api/documents", get(handlers::documents::list).post(handlers::documents::upload))
        .route("/api/documents/:id", delete(handlers::documents::remove))
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes + 64 * 1024))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    // CORS: nginx proxies from same origin; direct API access needs the token
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    public
        .merge(protected)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
