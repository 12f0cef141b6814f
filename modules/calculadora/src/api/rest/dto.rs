//! REST DTOs for the calculadora module
//!
//! Field names are part of the public contract and stay in Spanish.
//! Numeric request fields are kept as raw JSON values so the domain
//! validator can tell a missing field from a malformed one and accept
//! numeric strings sent by form-based clients.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

use crate::domain::RegisterName;

/// Query string of the two-operand endpoints.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TwoOperandsQuery {
    /// First operand
    pub num1: Option<String>,
    /// Second operand
    pub num2: Option<String>,
}

/// Query string of `/raiz`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SquareRootQuery {
    /// Radicand
    pub numero: Option<String>,
}

/// Body of `POST /potencia`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct PowerRequest {
    #[schema(value_type = Option<f64>)]
    pub base: Option<Value>,
    #[schema(value_type = Option<f64>)]
    pub exponente: Option<Value>,
}

/// Body of `POST /sumar-lista` and `POST /promedio`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct NumberListRequest {
    #[schema(value_type = Option<Vec<f64>>)]
    pub numeros: Option<Value>,
}

/// Body of PUT and PATCH on a register.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterMutationRequest {
    /// Replacement value (PUT)
    #[schema(value_type = Option<f64>)]
    pub nuevo_valor: Option<Value>,
    /// Alias of `nuevoValor` (PUT)
    #[schema(value_type = Option<f64>)]
    pub valor: Option<Value>,
    /// Delta to add (PATCH)
    #[schema(value_type = Option<f64>)]
    pub incremento: Option<Value>,
}

impl RegisterMutationRequest {
    /// Replacement value for a PUT; `nuevoValor` wins over `valor`.
    #[must_use]
    pub fn replacement(&self) -> Option<&Value> {
        match self.nuevo_valor {
            None | Some(Value::Null) => self.valor.as_ref(),
            Some(ref value) => Some(value),
        }
    }
}

/// `{ resultado }`
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ResultResponse {
    pub resultado: f64,
}

/// `{ mensaje, resultado }` returned by the creation-style endpoints.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CreatedResultResponse {
    pub mensaje: String,
    pub resultado: f64,
}

/// `{ mensaje, promedio, total, cantidad }`
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AverageResponse {
    pub mensaje: String,
    pub promedio: f64,
    pub total: f64,
    pub cantidad: usize,
}

/// `{ error }`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Operation that produced a [`RegisterResponse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterAction {
    Read,
    Replace,
    Increment,
    Reset,
}

/// Register state as returned to the client.
///
/// The value is published under a register-specific key
/// (`valorEnMemoria`, `multiplicadorActual`, `valorConstante`); increments
/// additionally repeat it as `valorActual`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegisterResponse {
    pub register: RegisterName,
    pub action: RegisterAction,
    pub value: f64,
}

/// Key under which a register's value is published.
#[must_use]
pub const fn value_field(register: RegisterName) -> &'static str {
    match register {
        RegisterName::Memoria => "valorEnMemoria",
        RegisterName::Multiplicador => "multiplicadorActual",
        RegisterName::Constante => "valorConstante",
    }
}

impl RegisterResponse {
    #[must_use]
    pub fn message(&self) -> Option<String> {
        let verb = match self.action {
            RegisterAction::Read => return None,
            RegisterAction::Replace => "actualizado",
            RegisterAction::Increment => "incrementado",
            RegisterAction::Reset => "reiniciado",
        };
        Some(format!("Valor de {} {verb}", self.register))
    }
}

impl Serialize for RegisterResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if let Some(message) = self.message() {
            map.serialize_entry("mensaje", &message)?;
        }
        map.serialize_entry(value_field(self.register), &self.value)?;
        if self.action == RegisterAction::Increment {
            map.serialize_entry("valorActual", &self.value)?;
        }
        map.end()
    }
}
