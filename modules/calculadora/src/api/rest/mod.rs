//! REST transport for the calculadora module.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod openapi;
pub mod routes;
