use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{DriverAssignment, Location, NewDriverAssignment, RouteDetails};
use crate::utils::validation::{validate_location, validate_not_blank};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LocationDto {
    pub latitude: Decimal,
    pub longitude: Decimal,
}

impl From<LocationDto> for Location {
    fn from(dto: LocationDto) -> Self {
        Location::new(dto.latitude, dto.longitude)
    }
}

impl From<Location> for LocationDto {
    fn from(location: Location) -> Self {
        Self {
            latitude: location.latitude,
            longitude: location.longitude,
        }
    }
}

// Campos de ruta: cuerpo del PUT y parte del POST
#[derive(Debug, Deserialize, Validate)]
pub struct RouteFieldsRequest {
    #[validate(length(min = 1, max = 100), custom = "validate_not_blank")]
    pub route_name: String,

    #[validate(custom = "validate_location")]
    pub origin_location: LocationDto,

    #[validate(custom = "validate_location")]
    pub destination_location: LocationDto,

    #[serde(default)]
    pub completed_successfully: bool,

    #[validate(length(max = 500))]
    pub problem_description: Option<String>,

    #[validate(length(max = 500))]
    pub comments: Option<String>,
}

impl From<RouteFieldsRequest> for RouteDetails {
    fn from(request: RouteFieldsRequest) -> Self {
        Self {
            route_name: request.route_name.trim().to_string(),
            origin_location: request.origin_location.into(),
            destination_location: request.destination_location.into(),
            completed_successfully: request.completed_successfully,
            problem_description: request.problem_description,
            comments: request.comments,
        }
    }
}

// Request para asignar conductor y vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateDriverAssignmentRequest {
    #[validate(range(min = 1))]
    pub driver_id: i64,

    #[validate(range(min = 1))]
    pub vehicle_id: i64,

    pub travel_date: NaiveDate,

    #[serde(flatten)]
    #[validate]
    pub route: RouteFieldsRequest,
}

impl From<CreateDriverAssignmentRequest> for NewDriverAssignment {
    fn from(request: CreateDriverAssignmentRequest) -> Self {
        Self {
            driver_id: request.driver_id,
            vehicle_id: request.vehicle_id,
            travel_date: request.travel_date,
            details: request.route.into(),
        }
    }
}

// Filtros del listado
#[derive(Debug, Default, Deserialize)]
pub struct DriverAssignmentListQuery {
    #[serde(default)]
    pub only_active: bool,
    pub travel_date: Option<NaiveDate>,
}

// Response de asignación
#[derive(Debug, Serialize, Deserialize)]
pub struct DriverAssignmentResponse {
    pub driver_id: i64,
    pub vehicle_id: i64,
    pub travel_date: NaiveDate,
    pub route_name: String,
    pub origin_location: LocationDto,
    pub destination_location: LocationDto,
    pub completed_successfully: bool,
    pub problem_description: Option<String>,
    pub comments: Option<String>,
    pub creation_date: DateTime<Utc>,
    pub active: bool,
}

impl From<DriverAssignment> for DriverAssignmentResponse {
    fn from(assignment: DriverAssignment) -> Self {
        Self {
            driver_id: assignment.driver_id,
            vehicle_id: assignment.vehicle_id,
            travel_date: assignment.travel_date,
            route_name: assignment.route_name,
            origin_location: assignment.origin_location.into(),
            destination_location: assignment.destination_location.into(),
            completed_successfully: assignment.completed_successfully,
            problem_description: assignment.problem_description,
            comments: assignment.comments,
            creation_date: assignment.creation_date,
            active: assignment.active,
        }
    }
}

// Métricas del panel de gestión
#[derive(Debug, Serialize, Deserialize)]
pub struct ManagementMetricsResponse {
    pub number_of_today_assignments: i64,
}
