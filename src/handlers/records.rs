//! `/crud` handlers: list, create, update, delete.

use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::record::DeleteAck;
use crate::service::RequestValidator;
use crate::state::AppState;
use axum::{extract::State, Json};

pub async fn list(State(state): State<AppState>) -> Result<impl axum::response::IntoResponse, AppError> {
    let outcome = state.store.list().await?;
    Ok(Json(outcome))
}

pub async fn create(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let req = RequestValidator::create(&body)?;
    let rows = state.store.insert(&req.fields).await?;
    if let Some(row) = rows.first() {
        tracing::info!(id = row.id, "record created");
    }
    Ok(Json(rows))
}

pub async fn update(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let req = RequestValidator::update(&body)?;
    let rows = state.store.update(req.id, &req.fields).await?;
    tracing::info!(id = req.id, matched = rows.len(), "record update");
    Ok(Json(rows))
}

pub async fn delete(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let req = RequestValidator::delete(&body)?;
    let removed = state.store.delete(req.id).await?;
    tracing::info!(id = req.id, removed, "record delete");
    Ok(Json(DeleteAck::default()))
}
