//! Extract a JSON object body, reporting rejections as `AppError` so every
//! client error shares one response shape.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    extract::{FromRequest, Request},
    Json,
};
use serde_json::Value;
use std::collections::HashMap;

/// Top-level fields of a JSON object request body.
#[derive(Clone, Debug)]
pub struct JsonBody(pub HashMap<String, Value>);

#[async_trait]
impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        match value {
            Value::Object(m) => Ok(JsonBody(m.into_iter().collect())),
            _ => Err(AppError::BadRequest("body must be a JSON object".into())),
        }
    }
}
