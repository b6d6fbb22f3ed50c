use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use tracing::info;

use crate::controllers::driver_assignment_controller::{assignment_id_from_path, DriverAssignmentController};
use crate::dto::driver_assignment_dto::{
    CreateDriverAssignmentRequest, DriverAssignmentListQuery, DriverAssignmentResponse, RouteFieldsRequest,
};
use crate::dto::ApiResponse;
use crate::middleware::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_driver_assignment_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_assignments).post(create_assignment))
        .route(
            "/:driver_id/:vehicle_id/:travel_date",
            get(get_assignment).put(update_assignment).delete(retire_assignment),
        )
}

/// Historial por conductor y por vehículo
pub fn create_history_router() -> Router<AppState> {
    Router::new()
        .route("/driver/:driver_id/assignments", get(driver_history))
        .route("/vehicle/:vehicle_id/assignments", get(vehicle_history))
}

fn controller(state: &AppState) -> DriverAssignmentController {
    DriverAssignmentController::new(state.assignments.clone())
}

async fn create_assignment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateDriverAssignmentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<DriverAssignmentResponse>>), AppError> {
    info!(
        "👤 {} asigna conductor {} y vehículo {} para {}",
        user.subject, request.driver_id, request.vehicle_id, request.travel_date
    );
    let response = controller(&state).create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_assignments(
    State(state): State<AppState>,
    Query(query): Query<DriverAssignmentListQuery>,
) -> Result<Json<Vec<DriverAssignmentResponse>>, AppError> {
    let response = controller(&state).list(query).await?;
    Ok(Json(response))
}

async fn get_assignment(
    State(state): State<AppState>,
    Path(key): Path<(i64, i64, NaiveDate)>,
) -> Result<Json<DriverAssignmentResponse>, AppError> {
    let response = controller(&state).get(assignment_id_from_path(key)).await?;
    Ok(Json(response))
}

async fn update_assignment(
    State(state): State<AppState>,
    Path(key): Path<(i64, i64, NaiveDate)>,
    Json(request): Json<RouteFieldsRequest>,
) -> Result<Json<ApiResponse<DriverAssignmentResponse>>, AppError> {
    let response = controller(&state)
        .update(assignment_id_from_path(key), request)
        .await?;
    Ok(Json(response))
}

async fn retire_assignment(
    State(state): State<AppState>,
    Path(key): Path<(i64, i64, NaiveDate)>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let response = controller(&state).retire(assignment_id_from_path(key)).await?;
    Ok(Json(response))
}

async fn driver_history(
    State(state): State<AppState>,
    Path(driver_id): Path<i64>,
) -> Result<Json<Vec<DriverAssignmentResponse>>, AppError> {
    let response = controller(&state).history_for_driver(driver_id).await?;
    Ok(Json(response))
}

async fn vehicle_history(
    State(state): State<AppState>,
    Path(vehicle_id): Path<i64>,
) -> Result<Json<Vec<DriverAssignmentResponse>>, AppError> {
    let response = controller(&state).history_for_vehicle(vehicle_id).await?;
    Ok(Json(response))
}
