//! `OpenAPI` document for the calculadora endpoints.

use axum::Json;
use utoipa::openapi::path::{HttpMethod, Operation, OperationBuilder};
use utoipa::openapi::request_body::RequestBodyBuilder;
use utoipa::openapi::{Content, Ref, Response, ResponseBuilder};
use utoipa::{Modify, OpenApi};

use crate::domain::RegisterName;

use super::dto::{
    AverageResponse, CreatedResultResponse, ErrorResponse, NumberListRequest, PowerRequest,
    RegisterMutationRequest, ResultResponse,
};
use super::handlers;
use super::routes::register_path;

const REGISTERS_TAG: &str = "registros";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Calculadora API",
        description = "Arithmetic endpoints and named registers (memoria, multiplicador, constante)"
    ),
    paths(
        handlers::suma,
        handlers::resta,
        handlers::multiplicacion,
        handlers::division,
        handlers::raiz,
        handlers::potencia,
        handlers::sumar_lista,
        handlers::promedio,
    ),
    components(schemas(
        ResultResponse,
        CreatedResultResponse,
        AverageResponse,
        ErrorResponse,
        PowerRequest,
        NumberListRequest,
        RegisterMutationRequest,
    )),
    modifiers(&RegisterPaths),
    tags(
        (name = "aritmetica", description = "Stateless arithmetic"),
        (name = "registros", description = "Named registers: memoria, multiplicador, constante"),
    )
)]
pub struct ApiDoc;

/// Documents the register endpoints. They share one handler, so their
/// operations are built from the register table instead of per-function
/// annotations.
struct RegisterPaths;

fn json_content(schema: &str) -> Content {
    Content::new(Some(Ref::from_schema_name(schema)))
}

fn register_value(register: RegisterName) -> Response {
    ResponseBuilder::new()
        .description(format!(
            "Current value under `{}`",
            super::dto::value_field(register)
        ))
        .build()
}

fn bad_request() -> Response {
    ResponseBuilder::new()
        .description("Invalid input")
        .content("application/json", json_content("ErrorResponse"))
        .build()
}

fn register_operation(
    register: RegisterName,
    verb: &str,
    summary: String,
    body: Option<&str>,
) -> Operation {
    let mut operation = OperationBuilder::new()
        .tag(REGISTERS_TAG)
        .operation_id(Some(format!("{verb}_{register}")))
        .summary(Some(summary))
        .response("200", register_value(register));
    if let Some(field) = body {
        operation = operation
            .request_body(Some(
                RequestBodyBuilder::new()
                    .description(Some(format!("Value in `{field}`")))
                    .content("application/json", json_content("RegisterMutationRequest"))
                    .build(),
            ))
            .response("400", bad_request());
    }
    operation.build()
}

impl Modify for RegisterPaths {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        for register in RegisterName::ALL {
            let path = register_path(register);
            let operations = [
                (HttpMethod::Get, "read", format!("Read {register}"), None),
                (
                    HttpMethod::Put,
                    "replace",
                    format!("Replace {register}"),
                    Some("nuevoValor"),
                ),
                (
                    HttpMethod::Patch,
                    "increment",
                    format!("Increment {register}"),
                    Some("incremento"),
                ),
                (
                    HttpMethod::Delete,
                    "reset",
                    format!("Reset {register} to {}", register.default_value()),
                    None,
                ),
            ];
            for (method, verb, summary, body) in operations {
                openapi.paths.add_path_operation(
                    &path,
                    vec![method],
                    register_operation(register, verb, summary, body),
                );
            }
        }
    }
}

/// Handler for `GET /openapi.json`.
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
