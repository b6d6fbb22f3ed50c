use chrono::NaiveDate;
use std::sync::Arc;
use validator::Validate;

use crate::dto::driver_assignment_dto::{
    CreateDriverAssignmentRequest, DriverAssignmentListQuery, DriverAssignmentResponse,
    ManagementMetricsResponse, RouteFieldsRequest,
};
use crate::dto::ApiResponse;
use crate::models::{DriverAssignment, DriverAssignmentId};
use crate::services::DriverAssignmentService;
use crate::utils::errors::AppError;

fn to_responses(assignments: Vec<DriverAssignment>) -> Vec<DriverAssignmentResponse> {
    assignments.into_iter().map(DriverAssignmentResponse::from).collect()
}

pub struct DriverAssignmentController {
    service: Arc<DriverAssignmentService>,
}

impl DriverAssignmentController {
    pub fn new(service: Arc<DriverAssignmentService>) -> Self {
        Self { service }
    }

    pub async fn create(
        &self,
        request: CreateDriverAssignmentRequest,
    ) -> Result<ApiResponse<DriverAssignmentResponse>, AppError> {
        request.validate()?;

        let assignment = self.service.create(request.into()).await?;

        Ok(ApiResponse::success_with_message(
            assignment.into(),
            "Asignación creada exitosamente".to_string(),
        ))
    }

    pub async fn list(&self, query: DriverAssignmentListQuery) -> Result<Vec<DriverAssignmentResponse>, AppError> {
        let assignments = self.service.list(query.only_active, query.travel_date).await?;
        Ok(to_responses(assignments))
    }

    pub async fn get(&self, id: DriverAssignmentId) -> Result<DriverAssignmentResponse, AppError> {
        let assignment = self
            .service
            .get(id.driver_id, id.vehicle_id, id.travel_date)
            .await?;
        Ok(assignment.into())
    }

    pub async fn update(
        &self,
        id: DriverAssignmentId,
        request: RouteFieldsRequest,
    ) -> Result<ApiResponse<DriverAssignmentResponse>, AppError> {
        request.validate()?;

        let assignment = self.service.update(id, request.into()).await?;

        Ok(ApiResponse::success_with_message(
            assignment.into(),
            "Asignación actualizada exitosamente".to_string(),
        ))
    }

    pub async fn retire(&self, id: DriverAssignmentId) -> Result<ApiResponse<()>, AppError> {
        self.service
            .retire(id.driver_id, id.vehicle_id, id.travel_date)
            .await?;
        Ok(ApiResponse::message("Asignación retirada exitosamente".to_string()))
    }

    pub async fn history_for_driver(&self, driver_id: i64) -> Result<Vec<DriverAssignmentResponse>, AppError> {
        Ok(to_responses(self.service.history_for_driver(driver_id).await?))
    }

    pub async fn history_for_vehicle(&self, vehicle_id: i64) -> Result<Vec<DriverAssignmentResponse>, AppError> {
        Ok(to_responses(self.service.history_for_vehicle(vehicle_id).await?))
    }

    pub async fn metrics(&self) -> Result<ManagementMetricsResponse, AppError> {
        Ok(ManagementMetricsResponse {
            number_of_today_assignments: self.service.count_for_today().await?,
        })
    }
}

/// Clave compuesta tal como llega en la ruta
pub fn assignment_id_from_path((driver_id, vehicle_id, travel_date): (i64, i64, NaiveDate)) -> DriverAssignmentId {
    DriverAssignmentId::new(driver_id, vehicle_id, travel_date)
}
