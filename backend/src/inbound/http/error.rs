//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to turn domain failures into consistent JSON responses and status
//! codes. Extractor failures (malformed JSON, bad path segments) are routed
//! through the same envelope.

use actix_web::error::{JsonPayloadError, PathError};
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use serde_json::json;
use tracing::{debug, error};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Wire body for error responses.
///
/// `not_found` responses also carry the message under `error`, the key
/// existing clients read for missing meals.
#[derive(Serialize)]
struct ErrorBody<'a> {
    #[serde(flatten)]
    payload: &'a Error,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        if matches!(self.code(), ErrorCode::InternalError) {
            error!(message = self.message(), trace_id = ?self.trace_id(), "internal error");
        }
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        let payload = self.redacted();
        let error = matches!(payload.code(), ErrorCode::NotFound).then(|| payload.message());
        builder.json(ErrorBody {
            payload: &payload,
            error,
        })
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error")
    }
}

/// Map JSON body extraction failures onto `invalid_request`.
///
/// Registered through `web::JsonConfig::error_handler`.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected request body");
    let (message, code) = match &err {
        JsonPayloadError::ContentType => ("Content type must be application/json", "content_type"),
        JsonPayloadError::Deserialize(_) => ("Request body is invalid", "invalid_body"),
        JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
            ("Request body is too large", "body_too_large")
        }
        _ => ("Request body could not be read", "unreadable_body"),
    };
    Error::invalid_request(message)
        .with_details(json!({ "code": code, "reason": err.to_string() }))
        .into()
}

/// Map path extraction failures onto `invalid_request`.
pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected path parameters");
    Error::invalid_request("Path parameters are invalid")
        .with_details(json!({ "code": "invalid_path", "reason": err.to_string() }))
        .into()
}
