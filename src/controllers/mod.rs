//! Controladores MVC
//!
//! Traducen DTOs a modelos de dominio y llaman a los servicios.

pub mod driver_assignment_controller;

pub use driver_assignment_controller::DriverAssignmentController;
