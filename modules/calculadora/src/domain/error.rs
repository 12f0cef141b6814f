use super::arithmetic::ArithmeticError;
use super::registers::RegisterError;
use super::validator::ValidationError;

/// Every way a calculator request can fail in the domain layer.
///
/// All variants are caller errors; none of them leaves register state
/// modified.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Arithmetic(#[from] ArithmeticError),

    #[error(transparent)]
    Register(#[from] RegisterError),
}

impl DomainError {
    /// Stable, machine-readable kind used in logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Validation(ValidationError::MissingField { .. }) => "MissingField",
            Self::Validation(ValidationError::NotANumber { .. }) => "NotANumber",
            Self::Validation(ValidationError::NotAnArray { .. }) => "NotAnArray",
            Self::Validation(ValidationError::EmptyArray { .. })
            | Self::Arithmetic(ArithmeticError::EmptyArray) => "EmptyArray",
            Self::Arithmetic(ArithmeticError::DivisionByZero) => "DivisionByZero",
            Self::Arithmetic(ArithmeticError::NegativeRadicand) => "NegativeRadicand",
            Self::Arithmetic(ArithmeticError::NonFiniteResult) => "NonFiniteResult",
            Self::Register(RegisterError::InvalidInput { .. }) => "InvalidInput",
            Self::Register(RegisterError::OutOfRange { .. }) => "OutOfRange",
        }
    }
}
