//! Servicios de negocio
//!
//! Lógica de asignación de conductores: detección de conflictos, política de
//! ciclo de vida y el servicio que las coordina con la persistencia.

pub mod conflict_checker;
pub mod driver_assignment_service;
pub mod errors;
pub mod lifecycle_policy;

pub use driver_assignment_service::DriverAssignmentService;
pub use errors::{AssignmentError, AssignmentResult};
