use axum::{extract::State, routing::get, Json, Router};

use crate::controllers::DriverAssignmentController;
use crate::dto::driver_assignment_dto::ManagementMetricsResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_management_router() -> Router<AppState> {
    Router::new().route("/metrics", get(get_metrics))
}

async fn get_metrics(State(state): State<AppState>) -> Result<Json<ManagementMetricsResponse>, AppError> {
    let controller = DriverAssignmentController::new(state.assignments.clone());
    Ok(Json(controller.metrics().await?))
}
