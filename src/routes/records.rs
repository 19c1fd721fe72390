//! Record CRUD routes: every verb on one path, the request body carries the id.

use crate::handlers::records::{create, delete, list, update};
use crate::state::AppState;
use axum::{routing::get, Router};

pub const RECORDS_PATH: &str = "/crud";

pub fn record_routes(state: AppState) -> Router {
    Router::new()
        .route(RECORDS_PATH, get(list).post(create).put(update).delete(delete))
        .with_state(state)
}
