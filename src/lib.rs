//! Backend de operaciones de flota: asignación diaria de conductor + vehículo
//! a una ruta, sin dobles reservas de conductor, vehículo o destino.

pub mod config;
pub mod controllers;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
