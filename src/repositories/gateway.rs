//! Puerto de persistencia de asignaciones
//!
//! El orquestador de asignaciones sólo habla con la base de datos a través de
//! este trait. Hay dos adaptadores: PostgreSQL (`PgDriverAssignmentRepository`)
//! y uno en memoria (`InMemoryDriverAssignmentRepository`).

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{DriverAssignment, DriverAssignmentId, Location, NewDriverAssignment};

/// Restricciones de unicidad que el almacén puede reportar
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UniqueConstraint {
    /// Clave primaria `(driver_id, vehicle_id, travel_date)`, activa o no
    AssignmentKey,
    /// Índice parcial: un conductor activo por día
    DriverPerDay,
    /// Índice parcial: un vehículo activo por día
    VehiclePerDay,
    /// Índice parcial: un destino activo por día
    DestinationPerDay,
    Other(String),
}

impl UniqueConstraint {
    pub const ASSIGNMENT_KEY: &'static str = "driver_assignment_pkey";
    pub const DRIVER_PER_DAY: &'static str = "driver_assignment_active_driver_day";
    pub const VEHICLE_PER_DAY: &'static str = "driver_assignment_active_vehicle_day";
    pub const DESTINATION_PER_DAY: &'static str = "driver_assignment_active_destination_day";

    pub fn from_name(name: Option<&str>) -> Self {
        match name {
            Some(Self::ASSIGNMENT_KEY) => Self::AssignmentKey,
            Some(Self::DRIVER_PER_DAY) => Self::DriverPerDay,
            Some(Self::VEHICLE_PER_DAY) => Self::VehiclePerDay,
            Some(Self::DESTINATION_PER_DAY) => Self::DestinationPerDay,
            Some(other) => Self::Other(other.to_string()),
            None => Self::Other("unknown".to_string()),
        }
    }
}

/// Errores del adaptador de persistencia
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    #[error("unique constraint violated: {0:?}")]
    UniqueViolation(UniqueConstraint),

    #[error("foreign key violated")]
    ForeignKeyViolation,

    #[error("database error: {0}")]
    Database(String),
}

/// Filtros del listado general
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssignmentFilter {
    pub only_active: bool,
    pub travel_date: Option<NaiveDate>,
}

#[async_trait]
pub trait DriverAssignmentGateway: Send + Sync {
    /// Insertar; la base de datos asigna `creation_date` y `active = true`
    async fn insert(&self, assignment: &NewDriverAssignment) -> Result<DriverAssignment, GatewayError>;

    async fn find_by_key(&self, id: &DriverAssignmentId) -> Result<Option<DriverAssignment>, GatewayError>;

    /// Ordenado por `travel_date DESC, creation_date DESC`
    async fn list(&self, filter: AssignmentFilter) -> Result<Vec<DriverAssignment>, GatewayError>;

    /// Asignaciones activas del día con el mismo conductor O el mismo vehículo
    async fn find_active_by_driver_or_vehicle(
        &self,
        driver_id: i64,
        vehicle_id: i64,
        travel_date: NaiveDate,
    ) -> Result<Vec<DriverAssignment>, GatewayError>;

    async fn find_active_by_destination(
        &self,
        location: &Location,
        travel_date: NaiveDate,
        exclude: Option<&DriverAssignmentId>,
    ) -> Result<Vec<DriverAssignment>, GatewayError>;

    /// Sobrescribe los campos editables y `active`; `None` si la fila no existe
    async fn update(&self, assignment: &DriverAssignment) -> Result<Option<DriverAssignment>, GatewayError>;

    async fn find_by_driver(&self, driver_id: i64) -> Result<Vec<DriverAssignment>, GatewayError>;

    async fn find_by_vehicle(&self, vehicle_id: i64) -> Result<Vec<DriverAssignment>, GatewayError>;

    async fn count_by_travel_date(&self, travel_date: NaiveDate) -> Result<i64, GatewayError>;
}
