//! Utilidades de validación
//!
//! Validadores custom para los DTOs de asignaciones.

use validator::ValidationError;

use crate::dto::driver_assignment_dto::LocationDto;
use crate::models::Location;

/// Validar que un string no esté vacío
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_blank");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar latitud [-90, 90] y longitud [-180, 180]
pub fn validate_location(value: &LocationDto) -> Result<(), ValidationError> {
    let location = Location::from(*value);
    if !location.has_valid_range() {
        let mut error = ValidationError::new("location_range");
        error.add_param("latitude".into(), &value.latitude.to_string());
        error.add_param("longitude".into(), &value.longitude.to_string());
        return Err(error);
    }
    Ok(())
}
