#![allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]

//! End-to-end tests for the calculadora REST routes.
//!
//! The router is driven in-process with `tower::ServiceExt::oneshot`; every
//! test builds its own `RegisterStore`, so register state never leaks
//! between tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use calculadora::RegisterStore;
use calculadora::api::rest::routes::register_routes;
use serde_json::{Value, json};
use tower::ServiceExt as _;

fn app() -> Router {
    register_routes(Router::new(), Arc::new(RegisterStore::new()))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).unwrap())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

#[tokio::test]
async fn memoria_put_get_patch_delete_scenario() {
    let app = app();

    let (status, json) = send(&app, "PUT", "/memoria", Some(json!({"nuevoValor": 5}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["valorEnMemoria"], json!(5.0));
    assert!(json["mensaje"].is_string());

    let (status, json) = send(&app, "GET", "/memoria", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"valorEnMemoria": 5.0}));

    let (status, json) = send(&app, "PATCH", "/memoria", Some(json!({"incremento": 3}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["valorActual"], json!(8.0));
    assert_eq!(json["valorEnMemoria"], json!(8.0));

    let (status, json) = send(&app, "DELETE", "/memoria", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["valorEnMemoria"], json!(0.0));
}

#[tokio::test]
async fn each_register_resets_to_its_own_default() {
    let app = app();
    let cases = [
        ("/memoria", "valorEnMemoria", 0.0),
        ("/multiplicador", "multiplicadorActual", 1.0),
        ("/constante", "valorConstante", 0.0),
    ];

    for (path, field, default) in cases {
        let (_, json) = send(&app, "GET", path, None).await;
        assert_eq!(json[field], json!(default), "{path} initial value");

        let (status, _) = send(&app, "PUT", path, Some(json!({"valor": "42"}))).await;
        assert_eq!(status, StatusCode::OK);

        for _ in 0..2 {
            let (status, json) = send(&app, "DELETE", path, None).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(json[field], json!(default), "{path} after reset");
        }
    }
}

#[tokio::test]
async fn invalid_register_input_is_400_and_keeps_state() {
    let app = app();
    send(&app, "PUT", "/constante", Some(json!({"nuevoValor": 7}))).await;

    let (status, json) = send(&app, "PUT", "/constante", Some(json!({"nuevoValor": "siete"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].is_string());

    let (status, json) = send(&app, "PATCH", "/constante", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], json!("Falta el campo 'incremento'"));

    let (_, json) = send(&app, "GET", "/constante", None).await;
    assert_eq!(json["valorConstante"], json!(7.0));
}

#[tokio::test]
async fn register_rejects_unsupported_methods_with_json_error() {
    let app = app();
    for method in ["POST", "OPTIONS"] {
        let (status, json) = send(&app, method, "/memoria", Some(json!({"nuevoValor": 1}))).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "{method}");
        assert_eq!(json, json!({"error": "M\u{e9}todo no permitido"}), "{method}");
    }

    let (_, json) = send(&app, "GET", "/memoria", None).await;
    assert_eq!(json["valorEnMemoria"], json!(0.0));
}

#[tokio::test]
async fn register_answers_head_like_get() {
    let app = app();
    send(&app, "PUT", "/constante", Some(json!({"nuevoValor": 3}))).await;

    let (status, json) = send(&app, "HEAD", "/constante", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, Value::Null);

    let (status, _) = send(&app, "HEAD", "/suma?num1=1&num2=2", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn two_operand_endpoints() {
    let app = app();
    let cases = [
        ("/suma?num1=2&num2=3", 5.0),
        ("/resta?num1=2&num2=3", -1.0),
        ("/multiplicacion?num1=2.5&num2=4", 10.0),
        ("/division?num1=9&num2=2", 4.5),
    ];
    for (uri, expected) in cases {
        let (status, json) = send(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(json, json!({"resultado": expected}), "{uri}");
    }
}

#[tokio::test]
async fn division_by_zero_is_400() {
    let app = app();
    let (status, json) = send(&app, "GET", "/division?num1=10&num2=0", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json, json!({"error": "No se puede dividir entre 0"}));
}

#[tokio::test]
async fn missing_and_non_numeric_operands_are_400() {
    let app = app();

    let (status, json) = send(&app, "GET", "/suma?num1=1", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], json!("Falta el campo 'num2'"));

    let (status, json) = send(&app, "GET", "/resta?num1=uno&num2=2", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], json!("Los valores deben ser n\u{fa}meros"));
}

#[tokio::test]
async fn overflowing_two_operand_results_are_400() {
    let app = app();
    for uri in [
        "/multiplicacion?num1=1e308&num2=10",
        "/suma?num1=1.7e308&num2=1.7e308",
        "/division?num1=1e308&num2=1e-10",
    ] {
        let (status, json) = send(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(
            json,
            json!({"error": "El resultado no es un n\u{fa}mero finito"}),
            "{uri}"
        );
    }
}

#[tokio::test]
async fn raiz_endpoint() {
    let app = app();

    let (status, json) = send(&app, "GET", "/raiz?numero=16", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"resultado": 4.0}));

    let (status, json) = send(&app, "GET", "/raiz?numero=-4", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn potencia_is_created_and_guards_non_finite() {
    let app = app();

    let (status, json) = send(
        &app,
        "POST",
        "/potencia",
        Some(json!({"base": 2, "exponente": "8"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["resultado"], json!(256.0));
    assert!(json["mensaje"].is_string());

    let (status, json) = send(
        &app,
        "POST",
        "/potencia",
        Some(json!({"base": -8, "exponente": 0.5})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].is_string());

    let (status, _) = send(&app, "POST", "/potencia", Some(json!({"base": 2}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn sumar_lista_is_lenient() {
    let app = app();

    let (status, json) = send(
        &app,
        "POST",
        "/sumar-lista",
        Some(json!({"numeros": ["10", 20, "x", null]})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["resultado"], json!(30.0));

    let (status, json) = send(&app, "POST", "/sumar-lista", Some(json!({"numeros": "1,2"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], json!("El campo 'numeros' debe ser un arreglo"));
}

#[tokio::test]
async fn promedio_reports_mean_total_and_count() {
    let app = app();

    let (status, json) = send(
        &app,
        "POST",
        "/promedio",
        Some(json!({"numeros": [10, 20, 30]})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["promedio"], json!(20.0));
    assert_eq!(json["total"], json!(60.0));
    assert_eq!(json["cantidad"], json!(3));
    assert!(json["mensaje"].is_string());

    let (status, json) = send(&app, "POST", "/promedio", Some(json!({"numeros": []}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn concurrent_patches_are_not_lost() {
    let app = app();

    let requests = (0..50).map(|_| {
        let app = app.clone();
        tokio::spawn(async move {
            send(&app, "PATCH", "/memoria", Some(json!({"incremento": 2}))).await
        })
    });
    for handle in requests.collect::<Vec<_>>() {
        let (status, _) = handle.await.unwrap();
        assert_eq!(status, StatusCode::OK);
    }

    let (_, json) = send(&app, "GET", "/memoria", None).await;
    assert_eq!(json["valorEnMemoria"], json!(100.0));
}
