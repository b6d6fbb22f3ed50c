//! Adaptador de persistencia en memoria
//!
//! Sirve para desarrollo local (`STORAGE_BACKEND=memory`) y para los tests de
//! integración. Sólo aplica la unicidad de la clave compuesta; las reglas de
//! "un conductor / vehículo / destino por día" quedan en manos del
//! orquestador. No valida claves foráneas.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use super::gateway::{AssignmentFilter, DriverAssignmentGateway, GatewayError, UniqueConstraint};
use crate::models::{DriverAssignment, DriverAssignmentId, Location, NewDriverAssignment};

#[derive(Clone, Default)]
pub struct InMemoryDriverAssignmentRepository {
    // Orden de inserción
    rows: Arc<RwLock<Vec<DriverAssignment>>>,
}

impl InMemoryDriverAssignmentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DriverAssignmentGateway for InMemoryDriverAssignmentRepository {
    async fn insert(&self, assignment: &NewDriverAssignment) -> Result<DriverAssignment, GatewayError> {
        let id = assignment.id();
        let mut rows = self.rows.write().await;

        if rows.iter().any(|row| row.id() == id) {
            return Err(GatewayError::UniqueViolation(UniqueConstraint::AssignmentKey));
        }

        let record = DriverAssignment::from_new(assignment.clone(), Utc::now());
        rows.push(record.clone());
        debug!("💾 Asignación {} guardada en memoria ({} filas)", id, rows.len());

        Ok(record)
    }

    async fn find_by_key(&self, id: &DriverAssignmentId) -> Result<Option<DriverAssignment>, GatewayError> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|row| row.id() == *id).cloned())
    }

    async fn list(&self, filter: AssignmentFilter) -> Result<Vec<DriverAssignment>, GatewayError> {
        let rows = self.rows.read().await;
        // Recorrido inverso: en empates de creation_date gana la última inserción
        let mut result: Vec<DriverAssignment> = rows
            .iter()
            .rev()
            .filter(|row| filter.travel_date.map_or(true, |date| row.travel_date == date))
            .filter(|row| !filter.only_active || row.active)
            .cloned()
            .collect();

        result.sort_by(|a, b| {
            b.travel_date
                .cmp(&a.travel_date)
                .then_with(|| b.creation_date.cmp(&a.creation_date))
        });

        Ok(result)
    }

    async fn find_active_by_driver_or_vehicle(
        &self,
        driver_id: i64,
        vehicle_id: i64,
        travel_date: NaiveDate,
    ) -> Result<Vec<DriverAssignment>, GatewayError> {
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .filter(|row| row.active && row.travel_date == travel_date)
            .filter(|row| row.driver_id == driver_id || row.vehicle_id == vehicle_id)
            .cloned()
            .collect())
    }

    async fn find_active_by_destination(
        &self,
        location: &Location,
        travel_date: NaiveDate,
        exclude: Option<&DriverAssignmentId>,
    ) -> Result<Vec<DriverAssignment>, GatewayError> {
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .filter(|row| row.active && row.travel_date == travel_date)
            .filter(|row| row.destination_location == *location)
            .filter(|row| exclude.map_or(true, |id| row.id() != *id))
            .cloned()
            .collect())
    }

    async fn update(&self, assignment: &DriverAssignment) -> Result<Option<DriverAssignment>, GatewayError> {
        let id = assignment.id();
        let mut rows = self.rows.write().await;

        let Some(row) = rows.iter_mut().find(|row| row.id() == id) else {
            return Ok(None);
        };

        row.route_name = assignment.route_name.clone();
        row.origin_location = assignment.origin_location;
        row.destination_location = assignment.destination_location;
        row.completed_successfully = assignment.completed_successfully;
        row.problem_description = assignment.problem_description.clone();
        row.comments = assignment.comments.clone();
        row.active = assignment.active;

        Ok(Some(row.clone()))
    }

    async fn find_by_driver(&self, driver_id: i64) -> Result<Vec<DriverAssignment>, GatewayError> {
        let rows = self.rows.read().await;
        Ok(rows.iter().filter(|row| row.driver_id == driver_id).cloned().collect())
    }

    async fn find_by_vehicle(&self, vehicle_id: i64) -> Result<Vec<DriverAssignment>, GatewayError> {
        let rows = self.rows.read().await;
        Ok(rows.iter().filter(|row| row.vehicle_id == vehicle_id).cloned().collect())
    }

    async fn count_by_travel_date(&self, travel_date: NaiveDate) -> Result<i64, GatewayError> {
        let rows = self.rows.read().await;
        Ok(rows.iter().filter(|row| row.travel_date == travel_date).count() as i64)
    }
}
