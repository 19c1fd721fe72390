//! Turns request bodies into typed requests. Only presence and JSON type are checked;
//! field contents are free-form.

use crate::error::AppError;
use crate::record::NewRecord;
use serde_json::Value;
use std::collections::HashMap;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreateRecordRequest {
    pub fields: NewRecord,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpdateRecordRequest {
    pub id: i64,
    pub fields: NewRecord,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeleteRecordRequest {
    pub id: i64,
}

pub struct RequestValidator;

impl RequestValidator {
    pub fn create(body: &HashMap<String, Value>) -> Result<CreateRecordRequest, AppError> {
        Ok(CreateRecordRequest {
            fields: record_fields(body)?,
        })
    }

    pub fn update(body: &HashMap<String, Value>) -> Result<UpdateRecordRequest, AppError> {
        let id = required_id(body)?;
        Ok(UpdateRecordRequest {
            id,
            fields: record_fields(body)?,
        })
    }

    pub fn delete(body: &HashMap<String, Value>) -> Result<DeleteRecordRequest, AppError> {
        Ok(DeleteRecordRequest {
            id: required_id(body)?,
        })
    }
}

fn present<'a>(body: &'a HashMap<String, Value>, col: &str) -> Result<&'a Value, AppError> {
    match body.get(col) {
        None | Some(Value::Null) => Err(AppError::Validation(format!("{} is required", col))),
        Some(v) => Ok(v),
    }
}

fn required_text(body: &HashMap<String, Value>, col: &str) -> Result<String, AppError> {
    present(body, col)?
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| AppError::Validation(format!("{} must be a string", col)))
}

/// Accepts a JSON integer or a string holding one. Ids are 64-bit, as listed.
fn required_id(body: &HashMap<String, Value>) -> Result<i64, AppError> {
    let invalid = || AppError::Validation("id must be an integer".into());
    match present(body, "id")? {
        Value::Number(n) => n.as_i64().ok_or_else(invalid),
        Value::String(s) => s.trim().parse::<i64>().map_err(|_| invalid()),
        _ => Err(invalid()),
    }
}

fn record_fields(body: &HashMap<String, Value>) -> Result<NewRecord, AppError> {
    Ok(NewRecord {
        first: required_text(body, "first")?,
        last: required_text(body, "last")?,
        email: required_text(body, "email")?,
        phone: required_text(body, "phone")?,
        location: required_text(body, "location")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(v: Value) -> HashMap<String, Value> {
        match v {
            Value::Object(m) => m.into_iter().collect(),
            _ => panic!("test body must be an object"),
        }
    }

    fn message(err: AppError) -> String {
        match err {
            AppError::Validation(m) => m,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn create_accepts_complete_body_and_ignores_extra_keys() {
        let req = RequestValidator::create(&body(json!({
            "first": "A", "last": "B", "email": "a@b.com", "phone": "555", "location": "X",
            "nickname": "ignored"
        })))
        .unwrap();
        assert_eq!(req.fields.first, "A");
        assert_eq!(req.fields.location, "X");
    }

    #[test]
    fn create_reports_first_missing_field() {
        let err = RequestValidator::create(&body(json!({
            "first": "A", "email": "a@b.com", "phone": "555"
        })))
        .unwrap_err();
        assert_eq!(message(err), "last is required");
    }

    #[test]
    fn null_counts_as_missing() {
        let err = RequestValidator::create(&body(json!({
            "first": null, "last": "B", "email": "a@b.com", "phone": "555", "location": "X"
        })))
        .unwrap_err();
        assert_eq!(message(err), "first is required");
    }

    #[test]
    fn non_string_field_is_rejected() {
        let err = RequestValidator::create(&body(json!({
            "first": "A", "last": "B", "email": "a@b.com", "phone": 555, "location": "X"
        })))
        .unwrap_err();
        assert_eq!(message(err), "phone must be a string");
    }

    #[test]
    fn empty_strings_are_free_form_text() {
        let req = RequestValidator::create(&body(json!({
            "first": "", "last": "", "email": "", "phone": "", "location": ""
        })))
        .unwrap();
        assert!(req.fields.email.is_empty());
    }

    #[test]
    fn update_requires_id_before_fields() {
        let err = RequestValidator::update(&body(json!({ "first": "A" }))).unwrap_err();
        assert_eq!(message(err), "id is required");
    }

    #[test]
    fn id_may_be_number_or_numeric_string() {
        assert_eq!(RequestValidator::delete(&body(json!({ "id": 4 }))).unwrap().id, 4);
        assert_eq!(RequestValidator::delete(&body(json!({ "id": " 12 " }))).unwrap().id, 12);
    }

    #[test]
    fn malformed_ids_are_rejected() {
        for id in [json!("abc"), json!(1.5), json!(true), json!([1])] {
            let err = RequestValidator::delete(&body(json!({ "id": id }))).unwrap_err();
            assert_eq!(message(err), "id must be an integer");
        }
        let err = RequestValidator::delete(&body(json!({ "id": u64::MAX }))).unwrap_err();
        assert_eq!(message(err), "id must be an integer");
    }

    #[test]
    fn bigserial_ids_are_accepted() {
        assert_eq!(
            RequestValidator::delete(&body(json!({ "id": 3_000_000_000_i64 }))).unwrap().id,
            3_000_000_000
        );
        assert_eq!(
            RequestValidator::delete(&body(json!({ "id": "3000000000" }))).unwrap().id,
            3_000_000_000
        );
    }
}
