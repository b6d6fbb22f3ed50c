//! DTOs de la API HTTP

pub mod api_response;
pub mod driver_assignment_dto;

pub use api_response::ApiResponse;
