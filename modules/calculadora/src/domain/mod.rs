//! Domain layer for the calculadora module
//!
//! Numeric validation, the register store and the pure arithmetic the REST
//! layer builds on. Nothing here knows about HTTP.

pub mod arithmetic;
pub mod error;
pub mod registers;
pub mod validator;

pub use error::DomainError;
pub use registers::{RegisterError, RegisterName, RegisterStore};
pub use validator::ValidationError;
