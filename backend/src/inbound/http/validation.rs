//! Shared validation helpers for inbound HTTP adapters.
//!
//! Handlers deserialize loosely typed request bodies, then convert them into
//! domain values here. Every failure becomes an `invalid_request` error whose
//! `details` name the offending field and a stable code.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::domain::{EmailAddress, Error, MealDate, UserName, UserValidationError};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidUuid,
    InvalidDate,
    InvalidName,
    InvalidEmail,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::InvalidDate => "invalid_date",
            ErrorCode::InvalidName => "invalid_name",
            ErrorCode::InvalidEmail => "invalid_email",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: String,
    message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ErrorCode, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("missing required field: {field}"))
        .with_code(ErrorCode::MissingField)
}

/// Unwrap a required body field.
pub(crate) fn require<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must be a valid UUID"))
        .with_value(ErrorCode::InvalidUuid, value)
}

pub(crate) fn parse_uuid(value: &str, field: FieldName) -> Result<Uuid, Error> {
    Uuid::parse_str(value).map_err(|_| invalid_uuid_error(field, value))
}

pub(crate) fn parse_user_name(value: String, field: FieldName) -> Result<UserName, Error> {
    UserName::new(value).map_err(|err| {
        ValidationError::new(field.as_str(), err.to_string()).with_code(ErrorCode::InvalidName)
    })
}

pub(crate) fn parse_email(value: String, field: FieldName) -> Result<EmailAddress, Error> {
    EmailAddress::new(value.as_str()).map_err(|err| {
        let builder = ValidationError::new(field.as_str(), err.to_string());
        match err {
            UserValidationError::EmptyEmail => builder.with_code(ErrorCode::MissingField),
            _ => builder.with_value(ErrorCode::InvalidEmail, value),
        }
    })
}

/// Meal date as supplied by clients.
///
/// Accepts epoch milliseconds or a textual timestamp; see [`parse_meal_date`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(untagged)]
pub enum DateInput {
    /// Milliseconds since the Unix epoch.
    EpochMillis(i64),
    /// RFC 3339 timestamp, `YYYY-MM-DDTHH:MM:SS` (UTC) or `YYYY-MM-DD`.
    Text(String),
}

fn invalid_date_error(field: FieldName, value: impl Into<String>) -> Error {
    let field = field.as_str();
    ValidationError::new(
        field,
        format!("{field} must be epoch milliseconds or an ISO 8601 date or timestamp"),
    )
    .with_value(ErrorCode::InvalidDate, value)
}

fn parse_date_text(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Convert a client date into epoch milliseconds.
///
/// Naive timestamps and calendar dates are interpreted as UTC.
pub(crate) fn parse_meal_date(value: DateInput, field: FieldName) -> Result<MealDate, Error> {
    match value {
        DateInput::EpochMillis(millis) => MealDate::from_epoch_millis(millis)
            .map_err(|_| invalid_date_error(field, millis.to_string())),
        DateInput::Text(raw) => parse_date_text(&raw)
            .map(MealDate::from_datetime)
            .ok_or_else(|| invalid_date_error(field, raw)),
    }
}
