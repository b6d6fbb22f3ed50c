#![allow(dead_code)]

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use mockable::Clock;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Arc;

use fleet_assignments::models::{Location, NewDriverAssignment, RouteDetails};
use fleet_assignments::repositories::{DriverAssignmentGateway, InMemoryDriverAssignmentRepository};
use fleet_assignments::services::DriverAssignmentService;

/// Reloj fijo a mediodía local del 2024-06-10, sea cual sea la zona horaria del host
pub struct FixtureClock {
    local_now: DateTime<Local>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.local_now
    }

    fn utc(&self) -> DateTime<Utc> {
        self.local_now.with_timezone(&Utc)
    }
}

pub fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock {
        local_now: Local.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap(),
    })
}

pub fn today() -> NaiveDate {
    date("2024-06-10")
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn location(lat: &str, lon: &str) -> Location {
    Location::new(Decimal::from_str(lat).unwrap(), Decimal::from_str(lon).unwrap())
}

pub fn zocalo() -> Location {
    location("19.4326", "-99.1332")
}

pub fn route(destination: Location) -> RouteDetails {
    RouteDetails {
        route_name: "Ruta Centro Histórico".to_string(),
        origin_location: location("19.3600", "-99.1800"),
        destination_location: destination,
        completed_successfully: false,
        problem_description: None,
        comments: None,
    }
}

pub fn new_assignment(driver_id: i64, vehicle_id: i64, travel_date: &str, destination: Location) -> NewDriverAssignment {
    NewDriverAssignment {
        driver_id,
        vehicle_id,
        travel_date: date(travel_date),
        details: route(destination),
    }
}

pub fn service_with(gateway: Arc<dyn DriverAssignmentGateway>) -> DriverAssignmentService {
    DriverAssignmentService::new(gateway, fixture_clock())
}

pub fn memory_service() -> DriverAssignmentService {
    service_with(Arc::new(InMemoryDriverAssignmentRepository::new()))
}
