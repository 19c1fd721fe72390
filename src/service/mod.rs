//! Record gateway operations and request validation.

mod records;
mod validation;
pub use records::RecordService;
pub use validation::{CreateRecordRequest, DeleteRecordRequest, RequestValidator, UpdateRecordRequest};
