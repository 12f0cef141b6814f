//! Calculadora module
//!
//! Arithmetic endpoints plus three named registers (`memoria`,
//! `multiplicador`, `constante`) manipulated with GET/PUT/PATCH/DELETE.
//!
//! ## Architecture
//!
//! - `domain/` - validation, register store, arithmetic and domain errors
//! - `api/rest/` - DTOs, handlers, route registration and error mapping
//!
//! The binary in `apps/calculadora-server` owns configuration, logging and
//! the middleware stack; it mounts [`api::rest::routes::register_routes`].

pub mod api;
pub mod domain;

pub use domain::{DomainError, RegisterName, RegisterStore};
