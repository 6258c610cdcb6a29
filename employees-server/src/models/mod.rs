//! Domain models and wire shapes
//!
//! The same structs are used for database rows and JSON bodies; field
//! names match the column names (`id`, `name`, `phone`, `city_id`).

pub mod city;
pub mod employee;

pub use city::{City, SEED_CITIES};
pub use employee::{CreateEmployeeRequest, Employee, UpdateEmployeeRequest};
