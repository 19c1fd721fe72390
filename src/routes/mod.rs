//! Router assembly.

pub mod common;
pub mod records;

pub use common::{common_routes, fallback};
pub use records::record_routes;

use crate::config::AppConfig;
use crate::middleware;
use crate::state::AppState;
use axum::Router;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// The full service: common and record routes, the fallback, and the middleware stack.
/// Trailing slashes are trimmed before routing, so `/crud/` is `/crud`.
pub fn app(state: AppState, config: &AppConfig) -> NormalizePath<Router> {
    let router = Router::new()
        .merge(common_routes(state.clone()))
        .merge(record_routes(state))
        .fallback(fallback);
    NormalizePathLayer::trim_trailing_slash().layer(middleware::apply(router, config))
}
