//! Common routes: greeting, health, readiness, version, and the catch-all.

use crate::state::AppState;
use axum::{
    extract::State,
    http::{Method, StatusCode},
    routing::get,
    Json, Router,
};
use serde::Serialize;

pub const GREETING: &str = "hello world";
pub const FALLBACK_MESSAGE: &str = "sorry, nothing here, try another URL";

#[derive(Serialize)]
struct HealthBody {
    status: &'static str,
}

#[derive(Serialize)]
struct ReadyBody {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    database: Option<&'static str>,
}

async fn greeting() -> &'static str {
    GREETING
}

async fn health() -> Json<HealthBody> {
    Json(HealthBody { status: "ok" })
}

async fn ready(State(state): State<AppState>) -> Result<Json<ReadyBody>, (StatusCode, Json<ReadyBody>)> {
    if let Err(e) = state.store.ping().await {
        tracing::warn!(error = %e, "readiness check failed");
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ReadyBody {
                status: "degraded",
                database: Some("unavailable"),
            }),
        ));
    }
    Ok(Json(ReadyBody {
        status: "ok",
        database: Some("ok"),
    }))
}

async fn version() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Unmatched paths. Page loads (GET/HEAD) get a friendly 200 so browsers show the
/// message; other methods get a plain 404.
pub async fn fallback(method: Method) -> (StatusCode, &'static str) {
    if method == Method::GET || method == Method::HEAD {
        (StatusCode::OK, FALLBACK_MESSAGE)
    } else {
        (StatusCode::NOT_FOUND, "not found")
    }
}

/// GET /, /health, /ready, /version.
pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(greeting))
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/version", get(version))
        .with_state(state)
}
