//! The persisted record and the shapes the gateway hands back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row of the records table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Record {
    pub id: i64,
    pub first: String,
    pub last: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    /// Set once at insert time.
    pub added: DateTime<Utc>,
}

/// Caller-supplied fields for insert and update. Identifier and timestamp are never part of it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewRecord {
    pub first: String,
    pub last: String,
    pub email: String,
    pub phone: String,
    pub location: String,
}

impl Record {
    pub fn from_fields(id: i64, fields: NewRecord, added: DateTime<Utc>) -> Self {
        Record {
            id,
            first: fields.first,
            last: fields.last,
            email: fields.email,
            phone: fields.phone,
            location: fields.location,
            added,
        }
    }

    /// Replace the mutable fields, leaving `id` and `added` alone.
    pub fn apply(&mut self, fields: &NewRecord) {
        self.first.clone_from(&fields.first);
        self.last.clone_from(&fields.last);
        self.email.clone_from(&fields.email);
        self.phone.clone_from(&fields.phone);
        self.location.clone_from(&fields.location);
    }
}

/// Result of listing the table: the rows, or the "no data" marker clients expect on an empty table.
#[derive(Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ListOutcome {
    Records(Vec<Record>),
    NoData(NoData),
}

#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoData {
    pub data_exists: &'static str,
}

impl From<Vec<Record>> for ListOutcome {
    fn from(rows: Vec<Record>) -> Self {
        if rows.is_empty() {
            ListOutcome::NoData(NoData { data_exists: "false" })
        } else {
            ListOutcome::Records(rows)
        }
    }
}

/// Acknowledgment sent for every successful delete, whether or not a row matched.
#[derive(Debug, Serialize)]
pub struct DeleteAck {
    pub delete: &'static str,
}

impl Default for DeleteAck {
    fn default() -> Self {
        DeleteAck { delete: "true" }
    }
}
