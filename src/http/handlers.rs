//! Request handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::context::GatewayContext;
use crate::http::server::AppState;
use crate::registry::ServicePath;

/// Liveness probe. Works with or without the gateway in front.
pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Echo the gateway context, or 204 when the request carried none.
pub async fn context(ctx: Option<GatewayContext>) -> Response {
    match ctx {
        Some(ctx) => Json(ctx).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

pub async fn service_path(State(state): State<AppState>, Path(service): Path<String>) -> Response {
    compile(&state, ServicePath::named(service))
}

pub async fn versioned_service_path(
    State(state): State<AppState>,
    Path((service, version)): Path<(String, String)>,
) -> Response {
    compile(&state, ServicePath::versioned(service, version))
}

fn compile(state: &AppState, target: ServicePath) -> Response {
    match state.registry.load().service_path(&target) {
        Some(path) => Json(json!({ "path": path })).into_response(),
        None => (StatusCode::NOT_FOUND, "No controller host configured").into_response(),
    }
}
