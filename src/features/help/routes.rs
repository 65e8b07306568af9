use std::sync::Arc;

use axum::{routing::post, Router};

use crate::features::help::handlers;
use crate::features::help::services::HelpService;

/// Create routes for the help feature
pub fn routes(service: Arc<HelpService>) -> Router {
    Router::new()
        .route("/api/help", post(handlers::submit_help_query))
        .with_state(service)
}
