use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::catalog::handlers;
use crate::features::catalog::services::CatalogService;

/// Create routes for the catalog feature
pub fn routes(service: Arc<CatalogService>) -> Router {
    Router::new()
        .route("/api/services/upload", post(handlers::upload_services))
        .route("/api/services/types", get(handlers::list_service_types))
        .route("/api/services", get(handlers::list_all_services))
        .with_state(service)
}
