//! Ciclo de vida de una asignación
//!
//! Una asignación futura siempre se puede editar. Una asignación pasada (o de
//! hoy) sólo si se marcó como completada con éxito; las que quedaron con
//! incidencia se congelan.

use chrono::NaiveDate;

use crate::models::{DriverAssignment, RouteDetails};

pub fn is_editable(assignment: &DriverAssignment, today: NaiveDate) -> bool {
    if assignment.travel_date > today {
        return true;
    }
    assignment.completed_successfully
}

/// Copia sólo los campos editables; identidad, `creation_date` y `active` se conservan
pub fn apply_route_details(current: &DriverAssignment, details: RouteDetails) -> DriverAssignment {
    DriverAssignment {
        route_name: details.route_name,
        origin_location: details.origin_location,
        destination_location: details.destination_location,
        completed_successfully: details.completed_successfully,
        problem_description: details.problem_description,
        comments: details.comments,
        ..current.clone()
    }
}

/// Retirar una asignación. Idempotente.
pub fn retire(current: &DriverAssignment) -> DriverAssignment {
    DriverAssignment {
        active: false,
        ..current.clone()
    }
}
