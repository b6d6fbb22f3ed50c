use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use tracing::{debug, info, warn};

use super::gateway::{AssignmentFilter, DriverAssignmentGateway, GatewayError, UniqueConstraint};
use crate::models::{DriverAssignment, DriverAssignmentId, Location, NewDriverAssignment};

// Fila tal cual está en la tabla driver_assignment
#[derive(Debug, FromRow)]
struct DriverAssignmentRow {
    driver_id: i64,
    vehicle_id: i64,
    travel_date: NaiveDate,
    route_name: String,
    origin_latitude: Decimal,
    origin_longitude: Decimal,
    destination_latitude: Decimal,
    destination_longitude: Decimal,
    creation_date: DateTime<Utc>,
    completed_successfully: bool,
    problem_description: Option<String>,
    comments: Option<String>,
    active: bool,
}

impl From<DriverAssignmentRow> for DriverAssignment {
    fn from(row: DriverAssignmentRow) -> Self {
        Self {
            driver_id: row.driver_id,
            vehicle_id: row.vehicle_id,
            travel_date: row.travel_date,
            route_name: row.route_name,
            origin_location: Location::new(row.origin_latitude, row.origin_longitude),
            destination_location: Location::new(row.destination_latitude, row.destination_longitude),
            creation_date: row.creation_date,
            completed_successfully: row.completed_successfully,
            problem_description: row.problem_description,
            comments: row.comments,
            active: row.active,
        }
    }
}

fn into_models(rows: Vec<DriverAssignmentRow>) -> Vec<DriverAssignment> {
    rows.into_iter().map(DriverAssignment::from).collect()
}

/// Clasificar un error de PostgreSQL por SQLSTATE y nombre de restricción
fn classify_db_error(code: Option<&str>, constraint: Option<&str>) -> Option<GatewayError> {
    match code {
        // unique_violation
        Some("23505") => Some(GatewayError::UniqueViolation(UniqueConstraint::from_name(constraint))),
        // foreign_key_violation
        Some("23503") => Some(GatewayError::ForeignKeyViolation),
        _ => None,
    }
}

/// Traducir errores de SQLx a las señales que entiende el orquestador
fn map_db_error(context: &str, e: sqlx::Error) -> GatewayError {
    if let sqlx::Error::Database(db_err) = &e {
        if let Some(signal) = classify_db_error(db_err.code().as_deref(), db_err.constraint()) {
            warn!("⚠️ {}: {} ({:?})", context, signal, db_err.constraint());
            return signal;
        }
    }
    GatewayError::Database(format!("{}: {}", context, e))
}

pub struct PgDriverAssignmentRepository {
    pool: PgPool,
}

impl PgDriverAssignmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DriverAssignmentGateway for PgDriverAssignmentRepository {
    async fn insert(&self, assignment: &NewDriverAssignment) -> Result<DriverAssignment, GatewayError> {
        info!("📝 Insertando asignación {}", assignment.id());
        let details = &assignment.details;

        let row = sqlx::query_as::<_, DriverAssignmentRow>(
            r#"
            INSERT INTO driver_assignment (
                driver_id, vehicle_id, travel_date, route_name,
                origin_latitude, origin_longitude, destination_latitude, destination_longitude,
                completed_successfully, problem_description, comments, active, creation_date
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, TRUE, NOW())
            RETURNING *
            "#
        )
        .bind(assignment.driver_id)
        .bind(assignment.vehicle_id)
        .bind(assignment.travel_date)
        .bind(&details.route_name)
        .bind(details.origin_location.latitude)
        .bind(details.origin_location.longitude)
        .bind(details.destination_location.latitude)
        .bind(details.destination_location.longitude)
        .bind(details.completed_successfully)
        .bind(&details.problem_description)
        .bind(&details.comments)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_error("Error creating driver assignment", e))?;

        debug!("✅ Asignación creada: {:?}", row);
        Ok(row.into())
    }

    async fn find_by_key(&self, id: &DriverAssignmentId) -> Result<Option<DriverAssignment>, GatewayError> {
        let row = sqlx::query_as::<_, DriverAssignmentRow>(
            "SELECT * FROM driver_assignment WHERE driver_id = $1 AND vehicle_id = $2 AND travel_date = $3"
        )
        .bind(id.driver_id)
        .bind(id.vehicle_id)
        .bind(id.travel_date)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error("Error finding driver assignment", e))?;

        Ok(row.map(DriverAssignment::from))
    }

    async fn list(&self, filter: AssignmentFilter) -> Result<Vec<DriverAssignment>, GatewayError> {
        let rows = sqlx::query_as::<_, DriverAssignmentRow>(
            r#"
            SELECT * FROM driver_assignment
            WHERE ($1::DATE IS NULL OR travel_date = $1)
              AND (NOT $2 OR active)
            ORDER BY travel_date DESC, creation_date DESC
            "#
        )
        .bind(filter.travel_date)
        .bind(filter.only_active)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_db_error("Error listing driver assignments", e))?;

        debug!("📋 {} asignaciones listadas", rows.len());
        Ok(into_models(rows))
    }

    async fn find_active_by_driver_or_vehicle(
        &self,
        driver_id: i64,
        vehicle_id: i64,
        travel_date: NaiveDate,
    ) -> Result<Vec<DriverAssignment>, GatewayError> {
        let rows = sqlx::query_as::<_, DriverAssignmentRow>(
            r#"
            SELECT * FROM driver_assignment
            WHERE (driver_id = $1 OR vehicle_id = $2)
              AND travel_date = $3
              AND active
            "#
        )
        .bind(driver_id)
        .bind(vehicle_id)
        .bind(travel_date)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_db_error("Error checking driver or vehicle availability", e))?;

        Ok(into_models(rows))
    }

    async fn find_active_by_destination(
        &self,
        location: &Location,
        travel_date: NaiveDate,
        exclude: Option<&DriverAssignmentId>,
    ) -> Result<Vec<DriverAssignment>, GatewayError> {
        let rows = sqlx::query_as::<_, DriverAssignmentRow>(
            r#"
            SELECT * FROM driver_assignment
            WHERE destination_latitude = $1
              AND destination_longitude = $2
              AND travel_date = $3
              AND active
              AND ($4::BIGINT IS NULL OR NOT (driver_id = $4 AND vehicle_id = $5))
            "#
        )
        .bind(location.latitude)
        .bind(location.longitude)
        .bind(travel_date)
        .bind(exclude.map(|id| id.driver_id))
        .bind(exclude.map(|id| id.vehicle_id))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_db_error("Error checking destination availability", e))?;

        Ok(into_models(rows))
    }

    async fn update(&self, assignment: &DriverAssignment) -> Result<Option<DriverAssignment>, GatewayError> {
        info!("✏️ Actualizando asignación {}", assignment.id());

        let row = sqlx::query_as::<_, DriverAssignmentRow>(
            r#"
            UPDATE driver_assignment
            SET route_name = $4,
                origin_latitude = $5, origin_longitude = $6,
                destination_latitude = $7, destination_longitude = $8,
                completed_successfully = $9, problem_description = $10, comments = $11,
                active = $12
            WHERE driver_id = $1 AND vehicle_id = $2 AND travel_date = $3
            RETURNING *
            "#
        )
        .bind(assignment.driver_id)
        .bind(assignment.vehicle_id)
        .bind(assignment.travel_date)
        .bind(&assignment.route_name)
        .bind(assignment.origin_location.latitude)
        .bind(assignment.origin_location.longitude)
        .bind(assignment.destination_location.latitude)
        .bind(assignment.destination_location.longitude)
        .bind(assignment.completed_successfully)
        .bind(&assignment.problem_description)
        .bind(&assignment.comments)
        .bind(assignment.active)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error("Error updating driver assignment", e))?;

        Ok(row.map(DriverAssignment::from))
    }

    async fn find_by_driver(&self, driver_id: i64) -> Result<Vec<DriverAssignment>, GatewayError> {
        let rows = sqlx::query_as::<_, DriverAssignmentRow>(
            "SELECT * FROM driver_assignment WHERE driver_id = $1 ORDER BY creation_date"
        )
        .bind(driver_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_db_error("Error listing driver history", e))?;

        Ok(into_models(rows))
    }

    async fn find_by_vehicle(&self, vehicle_id: i64) -> Result<Vec<DriverAssignment>, GatewayError> {
        let rows = sqlx::query_as::<_, DriverAssignmentRow>(
            "SELECT * FROM driver_assignment WHERE vehicle_id = $1 ORDER BY creation_date"
        )
        .bind(vehicle_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_db_error("Error listing vehicle history", e))?;

        Ok(into_models(rows))
    }

    async fn count_by_travel_date(&self, travel_date: NaiveDate) -> Result<i64, GatewayError> {
        let result: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM driver_assignment WHERE travel_date = $1"
        )
        .bind(travel_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_error("Error counting driver assignments", e))?;

        Ok(result.0)
    }
}
