//! Modelo de Location
//!
//! Punto geográfico con precisión fija (9 dígitos, 6 decimales), igual que
//! las columnas NUMERIC(9,6) del schema PostgreSQL.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Decimales que conserva la base de datos para latitud y longitud
pub const COORDINATE_SCALE: u32 = 6;

/// Punto geográfico comparado por igualdad numérica exacta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub latitude: Decimal,
    pub longitude: Decimal,
}

impl Location {
    /// Crear una ubicación normalizada a 6 decimales
    pub fn new(latitude: Decimal, longitude: Decimal) -> Self {
        Self {
            latitude: latitude.round_dp(COORDINATE_SCALE).normalize(),
            longitude: longitude.round_dp(COORDINATE_SCALE).normalize(),
        }
    }

    pub fn has_valid_range(&self) -> bool {
        let lat_limit = Decimal::from(90);
        let lon_limit = Decimal::from(180);
        self.latitude.abs() <= lat_limit && self.longitude.abs() <= lon_limit
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}
