//! Route registration for the calculadora module

use std::sync::Arc;

use axum::body::Bytes;
use axum::routing::{any, get, post};
use axum::{Extension, Router};
use http::Method;

use crate::domain::{RegisterName, RegisterStore};

use super::handlers;

/// Path of a register endpoint, e.g. `/memoria`.
#[must_use]
pub fn register_path(register: RegisterName) -> String {
    format!("/{register}")
}

/// Register all calculadora REST routes.
///
/// # Arguments
/// * `router` - Axum router to add routes to
/// * `store` - Register store shared by every register endpoint
pub fn register_routes(router: Router, store: Arc<RegisterStore>) -> Router {
    let mut router = router
        .route("/suma", get(handlers::suma))
        .route("/resta", get(handlers::resta))
        .route("/multiplicacion", get(handlers::multiplicacion))
        .route("/division", get(handlers::division))
        .route("/raiz", get(handlers::raiz))
        .route("/potencia", post(handlers::potencia))
        .route("/sumar-lista", post(handlers::sumar_lista))
        .route("/promedio", post(handlers::promedio));

    // Every method reaches the handler so unsupported ones get a JSON 405.
    for register in RegisterName::ALL {
        router = router.route(
            &register_path(register),
            any(
                move |method: Method,
                      Extension(store): Extension<Arc<RegisterStore>>,
                      body: Bytes| async move {
                    handlers::handle_register_op(&store, register, &method, &body)
                },
            ),
        );
    }

    router.layer(Extension(store))
}
