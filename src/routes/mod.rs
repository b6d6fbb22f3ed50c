//! Rutas HTTP
//!
//! `create_app` arma el router completo: `/health` público y todo `/api`
//! protegido con bearer token.

pub mod driver_assignment_routes;
pub mod management_routes;

use axum::{middleware::from_fn_with_state, response::Json, routing::get, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::middleware::{auth_middleware, cors_middleware};
use crate::state::AppState;

pub fn create_app(state: AppState) -> Router {
    let api = Router::new()
        .nest(
            "/driver-assignment",
            driver_assignment_routes::create_driver_assignment_router(),
        )
        .nest("/management", management_routes::create_management_router())
        .merge(driver_assignment_routes::create_history_router())
        .route_layer(from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors_middleware(&state.config.cors_origins))
        .with_state(state)
}

/// Health check público
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "service": "fleet-assignments",
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
