//! REST handlers for the calculadora module
//!
//! Handlers validate their input through the domain validator, call the
//! pure arithmetic or the register store, and shape the JSON response.
//! Any failure becomes a 400 `{ error }` through [`ApiError`].

use axum::Json;
use axum::body::Bytes;
use axum::extract::Query;
use axum::extract::rejection::QueryRejection;
use http::{Method, StatusCode};
use serde::de::DeserializeOwned;

use crate::domain::arithmetic::{self, ArithmeticError};
use crate::domain::validator;
use crate::domain::{RegisterName, RegisterStore};

use super::dto::{
    AverageResponse, CreatedResultResponse, ErrorResponse, NumberListRequest, PowerRequest,
    RegisterAction, RegisterMutationRequest, RegisterResponse, ResultResponse, SquareRootQuery,
    TwoOperandsQuery,
};
use super::error::{ApiError, ApiResult};

const NUMBERS_FIELD: &str = "numeros";

/// Deserialize a JSON body, treating an empty body as an empty object.
fn parse_json_body<T: DeserializeOwned + Default>(body: &[u8]) -> ApiResult<T> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body).map_err(|e| ApiError::malformed_body(&e))
}

fn evaluate_binary(
    query: Result<Query<TwoOperandsQuery>, QueryRejection>,
    op: impl FnOnce(f64, f64) -> Result<f64, ArithmeticError>,
) -> ApiResult<Json<ResultResponse>> {
    let Query(query) = query?;
    let a = validator::require_query_number("num1", query.num1.as_deref())?;
    let b = validator::require_query_number("num2", query.num2.as_deref())?;
    let resultado = arithmetic::ensure_finite(op(a, b)?)?;
    Ok(Json(ResultResponse { resultado }))
}

#[utoipa::path(
    get,
    path = "/suma",
    tag = "aritmetica",
    params(TwoOperandsQuery),
    responses(
        (status = 200, description = "num1 + num2", body = ResultResponse),
        (status = 400, description = "Invalid operands", body = ErrorResponse),
    )
)]
pub async fn suma(
    query: Result<Query<TwoOperandsQuery>, QueryRejection>,
) -> ApiResult<Json<ResultResponse>> {
    evaluate_binary(query, |a, b| Ok(arithmetic::add(a, b)))
}

#[utoipa::path(
    get,
    path = "/resta",
    tag = "aritmetica",
    params(TwoOperandsQuery),
    responses(
        (status = 200, description = "num1 - num2", body = ResultResponse),
        (status = 400, description = "Invalid operands", body = ErrorResponse),
    )
)]
pub async fn resta(
    query: Result<Query<TwoOperandsQuery>, QueryRejection>,
) -> ApiResult<Json<ResultResponse>> {
    evaluate_binary(query, |a, b| Ok(arithmetic::subtract(a, b)))
}

#[utoipa::path(
    get,
    path = "/multiplicacion",
    tag = "aritmetica",
    params(TwoOperandsQuery),
    responses(
        (status = 200, description = "num1 * num2", body = ResultResponse),
        (status = 400, description = "Invalid operands", body = ErrorResponse),
    )
)]
pub async fn multiplicacion(
    query: Result<Query<TwoOperandsQuery>, QueryRejection>,
) -> ApiResult<Json<ResultResponse>> {
    evaluate_binary(query, |a, b| Ok(arithmetic::multiply(a, b)))
}

#[utoipa::path(
    get,
    path = "/division",
    tag = "aritmetica",
    params(TwoOperandsQuery),
    responses(
        (status = 200, description = "num1 / num2", body = ResultResponse),
        (status = 400, description = "Invalid operands or division by zero", body = ErrorResponse),
    )
)]
pub async fn division(
    query: Result<Query<TwoOperandsQuery>, QueryRejection>,
) -> ApiResult<Json<ResultResponse>> {
    evaluate_binary(query, arithmetic::divide)
}

#[utoipa::path(
    get,
    path = "/raiz",
    tag = "aritmetica",
    params(SquareRootQuery),
    responses(
        (status = 200, description = "Square root of numero", body = ResultResponse),
        (status = 400, description = "Invalid or negative radicand", body = ErrorResponse),
    )
)]
pub async fn raiz(
    query: Result<Query<SquareRootQuery>, QueryRejection>,
) -> ApiResult<Json<ResultResponse>> {
    let Query(query) = query?;
    let numero = validator::require_query_number("numero", query.numero.as_deref())?;
    let resultado = arithmetic::sqrt(numero)?;
    Ok(Json(ResultResponse { resultado }))
}

#[utoipa::path(
    post,
    path = "/potencia",
    tag = "aritmetica",
    request_body = PowerRequest,
    responses(
        (status = 201, description = "base ^ exponente", body = CreatedResultResponse),
        (status = 400, description = "Invalid operands or non-finite result", body = ErrorResponse),
    )
)]
pub async fn potencia(body: Bytes) -> ApiResult<(StatusCode, Json<CreatedResultResponse>)> {
    let request: PowerRequest = parse_json_body(&body)?;
    let base = validator::require_number("base", request.base.as_ref())?;
    let exponente = validator::require_number("exponente", request.exponente.as_ref())?;
    let resultado = arithmetic::power(base, exponente)?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedResultResponse {
            mensaje: "Potencia calculada".to_owned(),
            resultado,
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/sumar-lista",
    tag = "aritmetica",
    request_body = NumberListRequest,
    responses(
        (status = 201, description = "Sum of numeros; unparseable elements count as 0", body = CreatedResultResponse),
        (status = 400, description = "numeros is not an array", body = ErrorResponse),
    )
)]
pub async fn sumar_lista(body: Bytes) -> ApiResult<(StatusCode, Json<CreatedResultResponse>)> {
    let request: NumberListRequest = parse_json_body(&body)?;
    let items = validator::require_list(NUMBERS_FIELD, request.numeros.as_ref())?;
    let resultado =
        arithmetic::ensure_finite(arithmetic::sum_list(&validator::lenient_numbers(items)))?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedResultResponse {
            mensaje: "Lista sumada".to_owned(),
            resultado,
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/promedio",
    tag = "aritmetica",
    request_body = NumberListRequest,
    responses(
        (status = 201, description = "Mean, total and count of numeros", body = AverageResponse),
        (status = 400, description = "numeros is not an array or is empty", body = ErrorResponse),
    )
)]
pub async fn promedio(body: Bytes) -> ApiResult<(StatusCode, Json<AverageResponse>)> {
    let request: NumberListRequest = parse_json_body(&body)?;
    let items = validator::require_non_empty_list(NUMBERS_FIELD, request.numeros.as_ref())?;
    let average = arithmetic::average(&validator::lenient_numbers(items))?;
    let promedio = arithmetic::ensure_finite(average.mean)?;
    Ok((
        StatusCode::CREATED,
        Json(AverageResponse {
            mensaje: "Promedio calculado".to_owned(),
            promedio,
            total: average.total,
            cantidad: average.count,
        }),
    ))
}

/// Single handler behind every register endpoint.
///
/// | Method | Store operation | Body field            |
/// |--------|-----------------|-----------------------|
/// | GET    | `read`          | -                     |
/// | HEAD   | `read`          | -                     |
/// | PUT    | `replace`       | `nuevoValor`/`valor`  |
/// | PATCH  | `increment`     | `incremento`          |
/// | DELETE | `reset`         | -                     |
///
/// # Errors
/// 400 when a PUT/PATCH body is malformed or its value fails validation,
/// 405 for any other method.
pub fn handle_register_op(
    store: &RegisterStore,
    register: RegisterName,
    method: &Method,
    body: &[u8],
) -> ApiResult<Json<RegisterResponse>> {
    let (action, value) = match *method {
        Method::GET | Method::HEAD => (RegisterAction::Read, store.read(register)),
        Method::PUT => {
            let request: RegisterMutationRequest = parse_json_body(body)?;
            let value = store.replace(register, request.replacement())?;
            (RegisterAction::Replace, value)
        }
        Method::PATCH => {
            let request: RegisterMutationRequest = parse_json_body(body)?;
            let value = store.increment(register, request.incremento.as_ref())?;
            (RegisterAction::Increment, value)
        }
        Method::DELETE => (RegisterAction::Reset, store.reset(register)),
        _ => return Err(ApiError::method_not_allowed()),
    };

    Ok(Json(RegisterResponse {
        register,
        action,
        value,
    }))
}
