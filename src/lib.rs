//! CRUD over a single PostgreSQL table, served over HTTP.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod record;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::AppConfig;
pub use error::{AppError, ConfigError, StoreError};
pub use record::{DeleteAck, ListOutcome, NewRecord, Record};
pub use routes::{app, common_routes, record_routes};
pub use service::{RecordService, RequestValidator};
pub use state::AppState;
pub use store::{MemoryRecordStore, PgRecordStore, RecordStore};
