mod common;

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use std::time::Duration;

use common::*;
use fleet_assignments::models::{DriverAssignment, DriverAssignmentId, Location, NewDriverAssignment};
use fleet_assignments::repositories::{
    AssignmentFilter, DriverAssignmentGateway, GatewayError, InMemoryDriverAssignmentRepository, UniqueConstraint,
};
use fleet_assignments::services::errors::{
    ASSIGNMENT_NOT_FOUND, DRIVER_OR_VEHICLE_NOT_FOUND, NOT_EDITABLE, RESOURCE_TAKEN, ROUTE_TAKEN,
};
use fleet_assignments::services::AssignmentError;

#[tokio::test]
async fn test_create_then_get_returns_active_record() {
    let service = memory_service();
    let new = new_assignment(1, 1, "2024-06-20", zocalo());

    let created = service.create(new.clone()).await.unwrap();
    let fetched = service.get(1, 1, date("2024-06-20")).await.unwrap();

    assert_eq!(created, fetched);
    assert!(fetched.active);
    assert!(!fetched.completed_successfully);
    assert_eq!(fetched.route_name, new.details.route_name);
    assert_eq!(fetched.origin_location, new.details.origin_location);
    assert_eq!(fetched.destination_location, zocalo());
}

#[tokio::test]
async fn test_same_key_while_active_is_a_conflict() {
    let service = memory_service();
    service.create(new_assignment(1, 1, "2024-06-20", zocalo())).await.unwrap();

    let err = service
        .create(new_assignment(1, 1, "2024-06-20", location("19.5000", "-99.2000")))
        .await
        .unwrap_err();

    assert_eq!(err, AssignmentError::Conflict(RESOURCE_TAKEN.to_string()));
}

#[tokio::test]
async fn test_driver_busy_with_other_vehicle_is_a_conflict() {
    let service = memory_service();
    service.create(new_assignment(1, 1, "2024-06-20", zocalo())).await.unwrap();

    let err = service
        .create(new_assignment(1, 2, "2024-06-20", location("19.5000", "-99.2000")))
        .await
        .unwrap_err();
    assert_eq!(err, AssignmentError::Conflict(RESOURCE_TAKEN.to_string()));

    let err = service
        .create(new_assignment(2, 1, "2024-06-20", location("19.5000", "-99.2000")))
        .await
        .unwrap_err();
    assert_eq!(err, AssignmentError::Conflict(RESOURCE_TAKEN.to_string()));
}

#[tokio::test]
async fn test_same_driver_on_another_day_is_allowed() {
    let service = memory_service();
    service.create(new_assignment(1, 1, "2024-06-20", zocalo())).await.unwrap();

    assert!(service.create(new_assignment(1, 1, "2024-06-21", zocalo())).await.is_ok());
}

#[tokio::test]
async fn test_destination_taken_same_day_is_a_conflict() {
    let service = memory_service();
    service.create(new_assignment(1, 1, "2024-06-20", zocalo())).await.unwrap();

    let err = service
        .create(new_assignment(2, 2, "2024-06-20", location("19.432600", "-99.133200")))
        .await
        .unwrap_err();

    assert_eq!(err, AssignmentError::Conflict(ROUTE_TAKEN.to_string()));
}

#[tokio::test]
async fn test_retired_destination_does_not_conflict() {
    let service = memory_service();
    service.create(new_assignment(1, 1, "2024-06-20", zocalo())).await.unwrap();
    service.retire(1, 1, date("2024-06-20")).await.unwrap();

    let created = service
        .create(new_assignment(2, 2, "2024-06-20", zocalo()))
        .await
        .unwrap();
    assert!(created.active);
}

#[tokio::test]
async fn test_reusing_a_retired_key_is_a_duplicate() {
    let service = memory_service();
    service.create(new_assignment(1, 1, "2024-06-20", zocalo())).await.unwrap();
    service.retire(1, 1, date("2024-06-20")).await.unwrap();

    let err = service
        .create(new_assignment(1, 1, "2024-06-20", zocalo()))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        AssignmentError::DuplicateKey(DriverAssignmentId::new(1, 1, date("2024-06-20")))
    );
}

#[tokio::test]
async fn test_scenario_route_freed_by_retirement() {
    let service = memory_service();
    service.create(new_assignment(1, 1, "2024-06-01", zocalo())).await.unwrap();

    let second = new_assignment(2, 2, "2024-06-01", zocalo());
    let err = service.create(second.clone()).await.unwrap_err();
    assert!(matches!(err, AssignmentError::Conflict(_)));

    service.retire(1, 1, date("2024-06-01")).await.unwrap();

    let created = service.create(second).await.unwrap();
    assert_eq!(created.id(), DriverAssignmentId::new(2, 2, date("2024-06-01")));
}

#[tokio::test]
async fn test_update_future_assignment_regardless_of_outcome() {
    let service = memory_service();
    service.create(new_assignment(1, 1, "2024-06-20", zocalo())).await.unwrap();
    let id = DriverAssignmentId::new(1, 1, date("2024-06-20"));

    let mut details = route(location("19.4400", "-99.1400"));
    details.route_name = "Ruta Polanco".to_string();
    let updated = service.update(id, details.clone()).await.unwrap();
    assert_eq!(updated.route_name, "Ruta Polanco");
    assert_eq!(updated.destination_location, location("19.4400", "-99.1400"));

    details.completed_successfully = true;
    details.comments = Some("Entrega adelantada".to_string());
    let updated = service.update(id, details).await.unwrap();
    assert!(updated.completed_successfully);
    assert_eq!(updated.comments.as_deref(), Some("Entrega adelantada"));
}

#[tokio::test]
async fn test_update_keeps_identity_and_creation_date() {
    let service = memory_service();
    let created = service.create(new_assignment(1, 1, "2024-06-20", zocalo())).await.unwrap();

    let updated = service.update(created.id(), route(zocalo())).await.unwrap();

    assert_eq!(updated.id(), created.id());
    assert_eq!(updated.creation_date, created.creation_date);
    assert!(updated.active);
}

#[tokio::test]
async fn test_update_past_unsuccessful_assignment_is_rejected() {
    let service = memory_service();
    service.create(new_assignment(1, 1, "2024-06-01", zocalo())).await.unwrap();
    let id = DriverAssignmentId::new(1, 1, date("2024-06-01"));

    let err = service.update(id, route(zocalo())).await.unwrap_err();

    assert_eq!(err, AssignmentError::InvalidArgument(NOT_EDITABLE.to_string()));
}

#[tokio::test]
async fn test_update_today_unsuccessful_assignment_is_rejected() {
    let service = memory_service();
    let mut new = new_assignment(1, 1, "2024-06-01", zocalo());
    new.travel_date = today();
    service.create(new.clone()).await.unwrap();

    let err = service.update(new.id(), route(zocalo())).await.unwrap_err();

    assert!(matches!(err, AssignmentError::InvalidArgument(_)));
}

#[tokio::test]
async fn test_update_past_successful_assignment_is_allowed() {
    let service = memory_service();
    let mut new = new_assignment(1, 1, "2024-06-01", zocalo());
    new.details.completed_successfully = true;
    service.create(new.clone()).await.unwrap();

    let mut details = new.details.clone();
    details.comments = Some("Cliente satisfecho".to_string());
    let updated = service.update(new.id(), details).await.unwrap();

    assert_eq!(updated.comments.as_deref(), Some("Cliente satisfecho"));
}

#[tokio::test]
async fn test_update_onto_taken_destination_is_a_conflict() {
    let service = memory_service();
    service.create(new_assignment(1, 1, "2024-06-20", zocalo())).await.unwrap();
    service
        .create(new_assignment(2, 2, "2024-06-20", location("19.5000", "-99.2000")))
        .await
        .unwrap();

    let err = service
        .update(DriverAssignmentId::new(2, 2, date("2024-06-20")), route(zocalo()))
        .await
        .unwrap_err();

    assert_eq!(err, AssignmentError::Conflict(ROUTE_TAKEN.to_string()));
}

#[tokio::test]
async fn test_missing_assignment_is_not_found() {
    let service = memory_service();
    let missing = DriverAssignmentId::new(9, 9, date("2024-06-20"));
    let not_found = AssignmentError::NotFound(ASSIGNMENT_NOT_FOUND.to_string());

    assert_eq!(service.get(9, 9, date("2024-06-20")).await.unwrap_err(), not_found);
    assert_eq!(service.update(missing, route(zocalo())).await.unwrap_err(), not_found);
    assert_eq!(service.retire(9, 9, date("2024-06-20")).await.unwrap_err(), not_found);
}

#[tokio::test]
async fn test_retire_is_idempotent() {
    let service = memory_service();
    service.create(new_assignment(1, 1, "2024-06-20", zocalo())).await.unwrap();

    service.retire(1, 1, date("2024-06-20")).await.unwrap();
    service.retire(1, 1, date("2024-06-20")).await.unwrap();

    let record = service.get(1, 1, date("2024-06-20")).await.unwrap();
    assert!(!record.active);
}

#[tokio::test]
async fn test_list_filters_and_order() {
    let service = memory_service();
    service.create(new_assignment(1, 1, "2024-06-20", zocalo())).await.unwrap();
    tokio::time::sleep(Duration::from_millis(2)).await;
    service
        .create(new_assignment(2, 2, "2024-06-20", location("19.5000", "-99.2000")))
        .await
        .unwrap();
    service.create(new_assignment(3, 3, "2024-06-22", zocalo())).await.unwrap();
    service.retire(1, 1, date("2024-06-20")).await.unwrap();

    let all = service.list(false, None).await.unwrap();
    let keys: Vec<(i64, NaiveDate)> = all.iter().map(|a| (a.driver_id, a.travel_date)).collect();
    assert_eq!(
        keys,
        vec![
            (3, date("2024-06-22")),
            (2, date("2024-06-20")),
            (1, date("2024-06-20")),
        ]
    );

    let active_on_day = service.list(true, Some(date("2024-06-20"))).await.unwrap();
    assert_eq!(active_on_day.len(), 1);
    assert!(active_on_day.iter().all(|a| a.active));
    assert_eq!(active_on_day[0].driver_id, 2);

    let on_day = service.list(false, Some(date("2024-06-20"))).await.unwrap();
    assert_eq!(on_day.len(), 2);
}

#[tokio::test]
async fn test_history_includes_retired_assignments() {
    let service = memory_service();
    service.create(new_assignment(1, 1, "2024-06-20", zocalo())).await.unwrap();
    service.retire(1, 1, date("2024-06-20")).await.unwrap();
    service.create(new_assignment(1, 2, "2024-06-21", zocalo())).await.unwrap();
    service
        .create(new_assignment(3, 1, "2024-06-22", location("19.5000", "-99.2000")))
        .await
        .unwrap();

    let driver = service.history_for_driver(1).await.unwrap();
    assert_eq!(driver.len(), 2);
    assert!(!driver[0].active);
    assert_eq!(driver[1].vehicle_id, 2);

    let vehicle = service.history_for_vehicle(1).await.unwrap();
    let drivers: Vec<i64> = vehicle.iter().map(|a| a.driver_id).collect();
    assert_eq!(drivers, vec![1, 3]);
}

#[tokio::test]
async fn test_count_includes_every_status() {
    let service = memory_service();
    service.create(new_assignment(1, 1, "2024-06-10", zocalo())).await.unwrap();
    service
        .create(new_assignment(2, 2, "2024-06-10", location("19.5000", "-99.2000")))
        .await
        .unwrap();
    service.create(new_assignment(3, 3, "2024-06-11", zocalo())).await.unwrap();
    service.retire(2, 2, today()).await.unwrap();

    assert_eq!(service.count_for_today().await.unwrap(), 2);
    assert_eq!(service.count_for_date(date("2024-06-11")).await.unwrap(), 1);
    assert_eq!(service.count_for_date(date("2024-06-12")).await.unwrap(), 0);
}

/// Simula las señales de PostgreSQL que el adaptador en memoria no emite
struct ConstraintGateway {
    inner: InMemoryDriverAssignmentRepository,
    insert_error: GatewayError,
}

#[async_trait]
impl DriverAssignmentGateway for ConstraintGateway {
    async fn insert(&self, _assignment: &NewDriverAssignment) -> Result<DriverAssignment, GatewayError> {
        Err(self.insert_error.clone())
    }

    async fn find_by_key(&self, id: &DriverAssignmentId) -> Result<Option<DriverAssignment>, GatewayError> {
        self.inner.find_by_key(id).await
    }

    async fn list(&self, filter: AssignmentFilter) -> Result<Vec<DriverAssignment>, GatewayError> {
        self.inner.list(filter).await
    }

    async fn find_active_by_driver_or_vehicle(
        &self,
        driver_id: i64,
        vehicle_id: i64,
        travel_date: NaiveDate,
    ) -> Result<Vec<DriverAssignment>, GatewayError> {
        self.inner
            .find_active_by_driver_or_vehicle(driver_id, vehicle_id, travel_date)
            .await
    }

    async fn find_active_by_destination(
        &self,
        location: &Location,
        travel_date: NaiveDate,
        exclude: Option<&DriverAssignmentId>,
    ) -> Result<Vec<DriverAssignment>, GatewayError> {
        self.inner
            .find_active_by_destination(location, travel_date, exclude)
            .await
    }

    async fn update(&self, assignment: &DriverAssignment) -> Result<Option<DriverAssignment>, GatewayError> {
        self.inner.update(assignment).await
    }

    async fn find_by_driver(&self, driver_id: i64) -> Result<Vec<DriverAssignment>, GatewayError> {
        self.inner.find_by_driver(driver_id).await
    }

    async fn find_by_vehicle(&self, vehicle_id: i64) -> Result<Vec<DriverAssignment>, GatewayError> {
        self.inner.find_by_vehicle(vehicle_id).await
    }

    async fn count_by_travel_date(&self, travel_date: NaiveDate) -> Result<i64, GatewayError> {
        self.inner.count_by_travel_date(travel_date).await
    }
}

fn failing_service(insert_error: GatewayError) -> fleet_assignments::services::DriverAssignmentService {
    service_with(Arc::new(ConstraintGateway {
        inner: InMemoryDriverAssignmentRepository::new(),
        insert_error,
    }))
}

#[tokio::test]
async fn test_unknown_driver_or_vehicle_is_not_found() {
    let service = failing_service(GatewayError::ForeignKeyViolation);

    let err = service
        .create(new_assignment(404, 1, "2024-06-20", zocalo()))
        .await
        .unwrap_err();

    assert_eq!(err, AssignmentError::NotFound(DRIVER_OR_VEHICLE_NOT_FOUND.to_string()));
}

#[tokio::test]
async fn test_concurrent_writer_caught_by_store_index() {
    let service = failing_service(GatewayError::UniqueViolation(UniqueConstraint::DriverPerDay));

    let err = service
        .create(new_assignment(1, 1, "2024-06-20", zocalo()))
        .await
        .unwrap_err();

    assert_eq!(err, AssignmentError::Conflict(RESOURCE_TAKEN.to_string()));
}

#[tokio::test]
async fn test_storage_failure_is_reported() {
    let service = failing_service(GatewayError::Database("connection reset".to_string()));

    let err = service
        .create(new_assignment(1, 1, "2024-06-20", zocalo()))
        .await
        .unwrap_err();

    assert!(matches!(err, AssignmentError::Storage(msg) if msg.contains("connection reset")));
}

#[test]
fn test_today_follows_the_local_calendar() {
    use mockable::Clock;

    assert_eq!(fixture_clock().local().date_naive(), today());
}
