//! REST API for the lead funnel
//!
//! Funnel sessions live in memory on the server; the durable lead log and
//! the webhook sit behind the shared [`FunnelService`].

pub mod handlers;
pub mod service;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use service::FunnelService;

pub fn router(service: Arc<FunnelService>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/v1/health", get(handlers::health))
        // Directory
        .route("/api/v1/providers/:zip", get(handlers::get_providers))
        .route("/api/v1/states/:code", get(handlers::get_state))
        // Funnel
        .route("/api/v1/funnel", post(handlers::start_funnel))
        .route("/api/v1/funnel/:id", get(handlers::get_funnel))
        .route("/api/v1/funnel/:id/steps", post(handlers::submit_step))
        .route("/api/v1/funnel/:id/back", post(handlers::go_back))
        // Direct capture
        .route("/api/v1/leads", post(handlers::submit_lead))
        .route("/api/v1/newsletter", post(handlers::subscribe))
        .with_state(service)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
