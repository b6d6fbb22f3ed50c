//! Modelo de DriverAssignment
//!
//! Asignación de un conductor y un vehículo a una ruta en una fecha de viaje.
//! La clave compuesta `(driver_id, vehicle_id, travel_date)` identifica la fila
//! de forma permanente: retirar una asignación no libera la clave.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::location::Location;

/// Clave compuesta de una asignación
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DriverAssignmentId {
    pub driver_id: i64,
    pub vehicle_id: i64,
    pub travel_date: NaiveDate,
}

impl DriverAssignmentId {
    pub fn new(driver_id: i64, vehicle_id: i64, travel_date: NaiveDate) -> Self {
        Self {
            driver_id,
            vehicle_id,
            travel_date,
        }
    }
}

impl fmt::Display for DriverAssignmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "driver {} / vehicle {} / {}",
            self.driver_id, self.vehicle_id, self.travel_date
        )
    }
}

/// Campos editables de una asignación
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteDetails {
    pub route_name: String,
    pub origin_location: Location,
    pub destination_location: Location,
    pub completed_successfully: bool,
    pub problem_description: Option<String>,
    pub comments: Option<String>,
}

/// Datos para crear una asignación; `creation_date` lo pone la base de datos
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDriverAssignment {
    pub driver_id: i64,
    pub vehicle_id: i64,
    pub travel_date: NaiveDate,
    pub details: RouteDetails,
}

impl NewDriverAssignment {
    pub fn id(&self) -> DriverAssignmentId {
        DriverAssignmentId::new(self.driver_id, self.vehicle_id, self.travel_date)
    }
}

/// Asignación persistida
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverAssignment {
    pub driver_id: i64,
    pub vehicle_id: i64,
    pub travel_date: NaiveDate,
    pub route_name: String,
    pub origin_location: Location,
    pub destination_location: Location,
    pub creation_date: DateTime<Utc>,
    pub completed_successfully: bool,
    pub problem_description: Option<String>,
    pub comments: Option<String>,
    pub active: bool,
}

impl DriverAssignment {
    /// Construir el registro tal como queda tras el INSERT
    pub fn from_new(new: NewDriverAssignment, creation_date: DateTime<Utc>) -> Self {
        let NewDriverAssignment {
            driver_id,
            vehicle_id,
            travel_date,
            details,
        } = new;

        Self {
            driver_id,
            vehicle_id,
            travel_date,
            route_name: details.route_name,
            origin_location: details.origin_location,
            destination_location: details.destination_location,
            creation_date,
            completed_successfully: details.completed_successfully,
            problem_description: details.problem_description,
            comments: details.comments,
            active: true,
        }
    }

    pub fn id(&self) -> DriverAssignmentId {
        DriverAssignmentId::new(self.driver_id, self.vehicle_id, self.travel_date)
    }
}
