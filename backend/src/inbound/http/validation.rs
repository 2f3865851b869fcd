//! Shared validation helpers for inbound HTTP adapters.

use actix_web::HttpRequest;
use actix_web::error::JsonPayloadError;
use actix_web::web::JsonConfig;
use serde_json::json;
use uuid::Uuid;

use crate::domain::Error;

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidValue,
    MalformedBody,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidValue => "invalid_value",
            ErrorCode::MalformedBody => "malformed_body",
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

    fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) fn invalid_value_error(field: FieldName, value: &str, message: &str) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("{field} {message}")).with_details(json!({
        "field": field,
        "value": value,
        "code": ErrorCode::InvalidValue.as_str(),
    }))
}

/// Parse a record id taken from the URL path.
///
/// Ids are server-generated UUIDs, so text that does not parse cannot name an
/// existing record; callers answer such requests with `null`.
pub(crate) fn parse_path_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw).ok()
}

fn malformed_body_error(err: &JsonPayloadError) -> Error {
    Error::invalid_request("request body is not valid JSON for this endpoint").with_details(
        json!({
            "reason": err.to_string(),
            "code": ErrorCode::MalformedBody.as_str(),
        }),
    )
}

/// JSON extractor configuration returning domain errors for bad bodies.
pub fn json_config() -> JsonConfig {
    JsonConfig::default().error_handler(|err, _req: &HttpRequest| {
        let error = malformed_body_error(&err);
        error.into()
    })
}
