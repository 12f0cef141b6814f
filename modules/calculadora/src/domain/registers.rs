//! Named, process-lifetime registers.
//!
//! The store is built once at startup and shared behind an `Arc`. Each
//! register sits behind its own lock so that read-modify-write in
//! [`RegisterStore::increment`] cannot lose updates when PATCH requests
//! race on a multi-threaded runtime. Input is validated before any lock is
//! taken, so a rejected request never touches stored state.

use std::fmt;
use std::str::FromStr;

use parking_lot::Mutex;
use serde_json::Value;
use tracing::{debug, info};

use super::validator::{self, ValidationError};

/// Body field carrying the replacement value of a PUT.
pub const REPLACE_FIELD: &str = "nuevoValor";
/// Body field carrying the delta of a PATCH.
pub const INCREMENT_FIELD: &str = "incremento";

/// The three registers exposed by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegisterName {
    /// Running accumulator.
    Memoria,
    /// Scale factor.
    Multiplicador,
    /// User-defined constant.
    Constante,
}

impl RegisterName {
    pub const ALL: [Self; 3] = [Self::Memoria, Self::Multiplicador, Self::Constante];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Memoria => "memoria",
            Self::Multiplicador => "multiplicador",
            Self::Constante => "constante",
        }
    }

    /// Value the register holds at startup and after a reset.
    #[must_use]
    pub const fn default_value(self) -> f64 {
        match self {
            Self::Memoria | Self::Constante => 0.0,
            Self::Multiplicador => 1.0,
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Memoria => 0,
            Self::Multiplicador => 1,
            Self::Constante => 2,
        }
    }
}

impl fmt::Display for RegisterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown register name.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown register '{0}'")]
pub struct UnknownRegister(pub String);

impl FromStr for RegisterName {
    type Err = UnknownRegister;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|register| register.as_str() == s)
            .ok_or_else(|| UnknownRegister(s.to_owned()))
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RegisterError {
    /// The submitted value did not pass numeric validation.
    #[error("{source}")]
    InvalidInput {
        register: RegisterName,
        #[source]
        source: ValidationError,
    },

    /// Applying the increment would leave the register non-finite.
    #[error("El resultado excede el rango num\u{e9}rico de {register}")]
    OutOfRange { register: RegisterName },
}

/// Owner of every register value.
#[derive(Debug)]
pub struct RegisterStore {
    cells: [Mutex<f64>; 3],
}

impl Default for RegisterStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterStore {
    /// Create a store with every register at its default value.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cells: RegisterName::ALL.map(|register| Mutex::new(register.default_value())),
        }
    }

    fn cell(&self, register: RegisterName) -> &Mutex<f64> {
        &self.cells[register.index()]
    }

    /// Current value of `register`.
    #[must_use]
    pub fn read(&self, register: RegisterName) -> f64 {
        *self.cell(register).lock()
    }

    /// Overwrite `register` with the validated `input` and return it.
    ///
    /// # Errors
    /// `InvalidInput` when `input` is missing or not a finite number.
    pub fn replace(
        &self,
        register: RegisterName,
        input: Option<&Value>,
    ) -> Result<f64, RegisterError> {
        let value = Self::validate(register, REPLACE_FIELD, input)?;
        *self.cell(register).lock() = value;
        info!(%register, value, "register replaced");
        Ok(value)
    }

    /// Add the validated `input` to `register` and return the new value.
    ///
    /// # Errors
    /// `InvalidInput` when `input` is missing or not a finite number,
    /// `OutOfRange` when the sum would overflow. The register is left
    /// untouched in both cases.
    pub fn increment(
        &self,
        register: RegisterName,
        input: Option<&Value>,
    ) -> Result<f64, RegisterError> {
        let delta = Self::validate(register, INCREMENT_FIELD, input)?;

        let mut current = self.cell(register).lock();
        let next = *current + delta;
        if !next.is_finite() {
            debug!(%register, current = *current, delta, "increment would overflow");
            return Err(RegisterError::OutOfRange { register });
        }
        *current = next;
        drop(current);

        info!(%register, delta, value = next, "register incremented");
        Ok(next)
    }

    /// Put `register` back to its default value and return it.
    pub fn reset(&self, register: RegisterName) -> f64 {
        let value = register.default_value();
        *self.cell(register).lock() = value;
        info!(%register, value, "register reset");
        value
    }

    fn validate(
        register: RegisterName,
        field: &'static str,
        input: Option<&Value>,
    ) -> Result<f64, RegisterError> {
        validator::require_number(field, input).map_err(|source| {
            debug!(%register, error = %source, "register input rejected");
            RegisterError::InvalidInput { register, source }
        })
    }
}
