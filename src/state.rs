//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. Las dependencias se inyectan en `main`.

use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::services::DriverAssignmentService;

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub assignments: Arc<DriverAssignmentService>,
}

impl AppState {
    pub fn new(config: EnvironmentConfig, assignments: DriverAssignmentService) -> Self {
        Self {
            config,
            assignments: Arc::new(assignments),
        }
    }
}
