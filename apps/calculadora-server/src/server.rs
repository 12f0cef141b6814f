//! Router assembly and the HTTP serve loop.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::body::Body;
use axum::extract::DefaultBodyLimit;
use axum::http::{Request, Response, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use calculadora::RegisterStore;
use calculadora::api::rest::{openapi, routes};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::field::Empty;

use crate::config::{AppConfig, HttpConfig};
use crate::cors;

const REQUEST_ID_HEADER: &str = "x-request-id";

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

fn apply_trace_layer(router: Router) -> Router {
    router.layer(
        TraceLayer::new_for_http()
            .make_span_with(|req: &Request<Body>| {
                let rid = req
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("n/a");

                tracing::info_span!(
                    "http_request",
                    method = %req.method(),
                    uri = %req.uri().path(),
                    request_id = %rid,
                    status = Empty,
                    latency_ms = Empty,
                )
            })
            .on_response(
                |res: &Response<Body>, latency: Duration, span: &tracing::Span| {
                    span.record("status", res.status().as_u16());
                    span.record("latency_ms", latency.as_millis());
                    tracing::debug!(parent: span, "response sent");
                },
            ),
    )
}

/// Build the full application router: calculadora routes, health and
/// `OpenAPI` endpoints, wrapped in the middleware stack.
///
/// Runtime order, outermost first: `SetRequestId` -> `PropagateRequestId`
/// -> Trace -> Timeout -> `BodyLimit` -> CORS -> Router.
pub fn build_router(cfg: &HttpConfig, store: Arc<RegisterStore>) -> Router {
    let mut router = routes::register_routes(Router::new(), store)
        .route("/health", get(health_check))
        .route("/openapi.json", get(openapi::openapi_json));

    if cfg.cors_enabled {
        router = router.layer(cors::build_cors_layer(&cfg.cors));
    }

    router = router
        .layer(RequestBodyLimitLayer::new(cfg.body_limit_bytes))
        .layer(DefaultBodyLimit::max(cfg.body_limit_bytes));

    router = router.layer(TimeoutLayer::with_status_code(
        StatusCode::GATEWAY_TIMEOUT,
        Duration::from_secs(cfg.request_timeout_secs),
    ));

    router = apply_trace_layer(router);

    router
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

/// Resolves on Ctrl+C or SIGTERM. A listener that cannot be installed
/// never resolves, leaving the other one in charge.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        () = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}

/// Bind, serve until a shutdown signal arrives, then drain.
///
/// # Errors
/// Returns an error if the address is invalid, binding fails or the
/// server loop fails.
pub async fn run(config: AppConfig) -> Result<()> {
    let addr = config.server.bind_addr()?;
    let store = Arc::new(RegisterStore::new());
    let router = build_router(&config.http, store);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, mode = %config.server.mode, "HTTP server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    tracing::info!("HTTP server stopped");
    Ok(())
}
