//! Modelos del sistema
//!
//! Este módulo contiene los modelos de dominio de las asignaciones de
//! conductores. El mapeo a filas PostgreSQL vive en los repositorios.

pub mod driver_assignment;
pub mod location;

pub use driver_assignment::{DriverAssignment, DriverAssignmentId, NewDriverAssignment, RouteDetails};
pub use location::Location;
