//! Servicio de asignaciones de conductores
//!
//! Único componente que habla con el `DriverAssignmentGateway`. Ordena las
//! validaciones de conflicto y de ciclo de vida antes de cada escritura.
//!
//! Concurrencia: la verificación de conflictos y el INSERT son dos operaciones
//! distintas contra el almacén. Dos requests simultáneas pueden pasar ambas la
//! verificación. La clave primaria siempre frena el duplicado exacto; en
//! PostgreSQL los índices parciales `*_active_*_day` frenan además los
//! choques de conductor, vehículo y destino. El adaptador en memoria serializa
//! las escrituras pero sólo aplica la clave primaria.

use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::conflict_checker::{destination_taken, resource_taken};
use super::errors::{
    AssignmentError, AssignmentResult, ASSIGNMENT_NOT_FOUND, DRIVER_OR_VEHICLE_NOT_FOUND, NOT_EDITABLE,
    RESOURCE_TAKEN, ROUTE_TAKEN,
};
use super::lifecycle_policy::{apply_route_details, is_editable, retire};
use crate::models::{DriverAssignment, DriverAssignmentId, NewDriverAssignment, RouteDetails};
use crate::repositories::{AssignmentFilter, DriverAssignmentGateway, GatewayError, UniqueConstraint};

pub struct DriverAssignmentService {
    gateway: Arc<dyn DriverAssignmentGateway>,
    clock: Arc<dyn Clock>,
}

impl DriverAssignmentService {
    pub fn new(gateway: Arc<dyn DriverAssignmentGateway>, clock: Arc<dyn Clock>) -> Self {
        Self { gateway, clock }
    }

    fn today(&self) -> NaiveDate {
        self.clock.local().date_naive()
    }

    /// Asignar un conductor y un vehículo a una ruta
    pub async fn create(&self, new: NewDriverAssignment) -> AssignmentResult<DriverAssignment> {
        let id = new.id();
        info!("🚚 Creando asignación {}", id);

        let busy = self
            .gateway
            .find_active_by_driver_or_vehicle(new.driver_id, new.vehicle_id, new.travel_date)
            .await?;
        if resource_taken(&busy, new.driver_id, new.vehicle_id, new.travel_date) {
            warn!("⚠️ Conductor o vehículo ocupado para {}", id);
            return Err(AssignmentError::Conflict(RESOURCE_TAKEN.to_string()));
        }

        let destination = &new.details.destination_location;
        let same_destination = self
            .gateway
            .find_active_by_destination(destination, new.travel_date, None)
            .await?;
        if destination_taken(&same_destination, destination, new.travel_date, None) {
            warn!("⚠️ Destino {} ocupado el {}", destination, new.travel_date);
            return Err(AssignmentError::Conflict(ROUTE_TAKEN.to_string()));
        }

        let created = self
            .gateway
            .insert(&new)
            .await
            .map_err(|e| translate_write_error(e, &id))?;

        info!("✅ Asignación {} creada", id);
        Ok(created)
    }

    /// Listado ordenado por fecha de viaje y de creación, más recientes primero
    pub async fn list(
        &self,
        only_active: bool,
        travel_date: Option<NaiveDate>,
    ) -> AssignmentResult<Vec<DriverAssignment>> {
        let filter = AssignmentFilter {
            only_active,
            travel_date,
        };
        let assignments = self.gateway.list(filter).await?;
        debug!("📋 {} asignaciones con filtro {:?}", assignments.len(), filter);
        Ok(assignments)
    }

    pub async fn get(
        &self,
        driver_id: i64,
        vehicle_id: i64,
        travel_date: NaiveDate,
    ) -> AssignmentResult<DriverAssignment> {
        let id = DriverAssignmentId::new(driver_id, vehicle_id, travel_date);
        self.gateway
            .find_by_key(&id)
            .await?
            .ok_or_else(|| AssignmentError::NotFound(ASSIGNMENT_NOT_FOUND.to_string()))
    }

    /// Actualizar los campos de ruta de una asignación existente
    pub async fn update(&self, id: DriverAssignmentId, details: RouteDetails) -> AssignmentResult<DriverAssignment> {
        info!("✏️ Actualizando asignación {}", id);
        let current = self.get(id.driver_id, id.vehicle_id, id.travel_date).await?;

        if !is_editable(&current, self.today()) {
            warn!("🔒 Asignación {} no editable", id);
            return Err(AssignmentError::InvalidArgument(NOT_EDITABLE.to_string()));
        }

        let destination = &details.destination_location;
        let same_destination = self
            .gateway
            .find_active_by_destination(destination, id.travel_date, Some(&id))
            .await?;
        if destination_taken(&same_destination, destination, id.travel_date, Some(&id)) {
            warn!("⚠️ Destino {} ocupado el {}", destination, id.travel_date);
            return Err(AssignmentError::Conflict(ROUTE_TAKEN.to_string()));
        }

        let updated = apply_route_details(&current, details);
        self.gateway
            .update(&updated)
            .await
            .map_err(|e| translate_write_error(e, &id))?
            .ok_or_else(|| AssignmentError::NotFound(ASSIGNMENT_NOT_FOUND.to_string()))
    }

    /// Marcar una asignación como inactiva; el registro se conserva
    pub async fn retire(&self, driver_id: i64, vehicle_id: i64, travel_date: NaiveDate) -> AssignmentResult<()> {
        let current = self.get(driver_id, vehicle_id, travel_date).await?;
        let id = current.id();

        if !current.active {
            debug!("Asignación {} ya estaba inactiva", id);
        }

        self.gateway
            .update(&retire(&current))
            .await?
            .ok_or_else(|| AssignmentError::NotFound(ASSIGNMENT_NOT_FOUND.to_string()))?;

        info!("🗑️ Asignación {} retirada", id);
        Ok(())
    }

    /// Todas las asignaciones del conductor, activas e inactivas
    pub async fn history_for_driver(&self, driver_id: i64) -> AssignmentResult<Vec<DriverAssignment>> {
        Ok(self.gateway.find_by_driver(driver_id).await?)
    }

    /// Todas las asignaciones del vehículo, activas e inactivas
    pub async fn history_for_vehicle(&self, vehicle_id: i64) -> AssignmentResult<Vec<DriverAssignment>> {
        Ok(self.gateway.find_by_vehicle(vehicle_id).await?)
    }

    pub async fn count_for_date(&self, travel_date: NaiveDate) -> AssignmentResult<i64> {
        Ok(self.gateway.count_by_travel_date(travel_date).await?)
    }

    pub async fn count_for_today(&self) -> AssignmentResult<i64> {
        self.count_for_date(self.today()).await
    }
}

fn translate_write_error(e: GatewayError, id: &DriverAssignmentId) -> AssignmentError {
    match e {
        GatewayError::UniqueViolation(UniqueConstraint::AssignmentKey) => AssignmentError::DuplicateKey(*id),
        GatewayError::UniqueViolation(UniqueConstraint::DriverPerDay)
        | GatewayError::UniqueViolation(UniqueConstraint::VehiclePerDay) => {
            AssignmentError::Conflict(RESOURCE_TAKEN.to_string())
        }
        GatewayError::UniqueViolation(UniqueConstraint::DestinationPerDay) => {
            AssignmentError::Conflict(ROUTE_TAKEN.to_string())
        }
        GatewayError::ForeignKeyViolation => AssignmentError::NotFound(DRIVER_OR_VEHICLE_NOT_FOUND.to_string()),
        other => AssignmentError::from(other),
    }
}
