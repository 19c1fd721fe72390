//! HTTP handlers for the records table.

pub mod records;
pub use records::*;
