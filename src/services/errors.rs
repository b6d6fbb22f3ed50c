//! Errores del dominio de asignaciones

use thiserror::Error;

use crate::models::DriverAssignmentId;
use crate::repositories::GatewayError;

pub const RESOURCE_TAKEN: &str =
    "Driver assignment vehicle or driver is already taken by another driver assignment at the same day";
pub const ROUTE_TAKEN: &str =
    "Driver assignment route is already taken by another driver assignment at the same day";
pub const ASSIGNMENT_NOT_FOUND: &str = "Driver assignment not found";
pub const DRIVER_OR_VEHICLE_NOT_FOUND: &str = "Driver or vehicle to assign not found";
pub const NOT_EDITABLE: &str = "Driver assignment is not editable";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssignmentError {
    /// Conductor, vehículo o destino ya comprometido ese día
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// La clave compuesta ya existe (aunque la asignación esté retirada)
    #[error("Driver assignment {0} already exists")]
    DuplicateKey(DriverAssignmentId),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

pub type AssignmentResult<T> = Result<T, AssignmentError>;

impl From<GatewayError> for AssignmentError {
    fn from(e: GatewayError) -> Self {
        AssignmentError::Storage(e.to_string())
    }
}
