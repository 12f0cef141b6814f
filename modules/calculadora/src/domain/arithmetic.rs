//! Stateless arithmetic used by the calculator endpoints.

/// Domain failure of an arithmetic operation.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticError {
    #[error("No se puede dividir entre 0")]
    DivisionByZero,

    #[error("No se puede calcular la ra\u{ed}z cuadrada de un n\u{fa}mero negativo")]
    NegativeRadicand,

    #[error("No se puede calcular el promedio de una lista vac\u{ed}a")]
    EmptyArray,

    #[error("El resultado no es un n\u{fa}mero finito")]
    NonFiniteResult,
}

/// Summary produced by [`average`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Average {
    pub mean: f64,
    pub total: f64,
    pub count: usize,
}

#[must_use]
pub fn add(a: f64, b: f64) -> f64 {
    a + b
}

#[must_use]
pub fn subtract(a: f64, b: f64) -> f64 {
    a - b
}

#[must_use]
pub fn multiply(a: f64, b: f64) -> f64 {
    a * b
}

/// # Errors
/// `DivisionByZero` when `b` is zero.
pub fn divide(a: f64, b: f64) -> Result<f64, ArithmeticError> {
    if b == 0.0 {
        return Err(ArithmeticError::DivisionByZero);
    }
    Ok(a / b)
}

/// # Errors
/// `NegativeRadicand` when `x` is below zero.
pub fn sqrt(x: f64) -> Result<f64, ArithmeticError> {
    if x < 0.0 {
        return Err(ArithmeticError::NegativeRadicand);
    }
    Ok(x.sqrt())
}

/// Raise `base` to `exponent`.
///
/// A negative base with a fractional exponent, or an overflowing result,
/// has no finite answer and is reported instead of leaking `NaN`/`inf`.
///
/// # Errors
/// `NonFiniteResult` when the power is not a finite number.
pub fn power(base: f64, exponent: f64) -> Result<f64, ArithmeticError> {
    ensure_finite(base.powf(exponent))
}

#[must_use]
pub fn sum_list(values: &[f64]) -> f64 {
    values.iter().sum()
}

/// Arithmetic mean together with the total and element count.
///
/// # Errors
/// `EmptyArray` when `values` is empty.
pub fn average(values: &[f64]) -> Result<Average, ArithmeticError> {
    if values.is_empty() {
        return Err(ArithmeticError::EmptyArray);
    }
    let total = sum_list(values);
    #[allow(clippy::cast_precision_loss)]
    let mean = total / values.len() as f64;
    Ok(Average {
        mean,
        total,
        count: values.len(),
    })
}

/// Reject `NaN` and infinities.
///
/// # Errors
/// `NonFiniteResult` when `value` is not finite.
pub fn ensure_finite(value: f64) -> Result<f64, ArithmeticError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ArithmeticError::NonFiniteResult)
    }
}
