//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
    #[error("listen: {0}")]
    Listen(#[from] std::io::Error),
}

/// Failure reported by a record store operation.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    BadRequest(String),
}

/// Generic body for every backend failure; the cause stays in the logs.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DbErrorBody {
    pub db_error: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationErrorBody {
    pub validation_error: String,
}

pub const DB_ERROR_MESSAGE: &str = "db error";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Store(e) => {
                tracing::error!(error = %e, "record store operation failed");
                (
                    StatusCode::BAD_REQUEST,
                    Json(DbErrorBody {
                        db_error: DB_ERROR_MESSAGE,
                    }),
                )
                    .into_response()
            }
            AppError::Validation(message) | AppError::BadRequest(message) => {
                tracing::debug!(%message, "rejected request body");
                (
                    StatusCode::BAD_REQUEST,
                    Json(ValidationErrorBody {
                        validation_error: message,
                    }),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    async fn body_json(resp: Response) -> Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn store_errors_collapse_to_generic_db_error() {
        let resp = AppError::from(StoreError::Db(sqlx::Error::PoolTimedOut)).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(resp).await, json!({ "dbError": "db error" }));

        let resp = AppError::Store(StoreError::Unavailable("connection reset".into())).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(resp).await, json!({ "dbError": "db error" }));
    }

    #[tokio::test]
    async fn validation_errors_carry_their_message() {
        let resp = AppError::Validation("first is required".into()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(resp).await,
            json!({ "validationError": "first is required" })
        );
    }
}
