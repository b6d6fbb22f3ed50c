//! Detección de conflictos de asignación
//!
//! Predicados puros sobre los registros que el orquestador ya leyó del
//! almacén. No consultan ni modifican nada; aplican el criterio exacto aunque
//! el adaptador devuelva candidatos de más.

use chrono::NaiveDate;

use crate::models::{DriverAssignment, DriverAssignmentId, Location};

/// ¿Hay una asignación activa con ese destino ese día, distinta de `exclude`?
pub fn destination_taken(
    candidates: &[DriverAssignment],
    location: &Location,
    travel_date: NaiveDate,
    exclude: Option<&DriverAssignmentId>,
) -> bool {
    candidates.iter().any(|candidate| {
        candidate.active
            && candidate.travel_date == travel_date
            && candidate.destination_location == *location
            && exclude.map_or(true, |id| candidate.id() != *id)
    })
}

/// ¿El conductor O el vehículo ya tienen una asignación activa ese día?
pub fn resource_taken(
    candidates: &[DriverAssignment],
    driver_id: i64,
    vehicle_id: i64,
    travel_date: NaiveDate,
) -> bool {
    candidates.iter().any(|candidate| {
        candidate.active
            && candidate.travel_date == travel_date
            && (candidate.driver_id == driver_id || candidate.vehicle_id == vehicle_id)
    })
}
