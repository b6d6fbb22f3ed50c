//! Repositorios de persistencia
//!
//! Puerto `DriverAssignmentGateway` y sus adaptadores PostgreSQL y en memoria.

pub mod driver_assignment_repository;
pub mod gateway;
pub mod memory_repository;

pub use driver_assignment_repository::PgDriverAssignmentRepository;
pub use gateway::{AssignmentFilter, DriverAssignmentGateway, GatewayError, UniqueConstraint};
pub use memory_repository::InMemoryDriverAssignmentRepository;
