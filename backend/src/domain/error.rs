//! Transport-agnostic error payload shared by every layer above the ports.
//!
//! Services return [`Error`]; the HTTP adapter maps it onto status codes via
//! `ResponseError` and the gRPC adapter onto `tonic::Status`. Keeping one
//! error shape guarantees the two transports can never drift in how they
//! classify failures.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::middleware::trace::TraceId;

/// Stable machine-readable error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// The caller did not present a valid API key.
    Unauthorized,
    /// The requested resource does not exist.
    NotFound,
    /// The request conflicts with existing state (duplicate profile).
    Conflict,
    /// An unexpected error occurred on the server.
    InternalError,
}

/// API error payload returned to clients on both transports.
///
/// # Examples
/// ```
/// use profile_backend::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("profile not found");
/// assert_eq!(err.code, ErrorCode::NotFound);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Error {
    /// Stable machine-readable error code.
    #[schema(example = "not_found")]
    pub code: ErrorCode,
    /// Human-readable error message.
    #[schema(example = "profile not found")]
    pub message: String,
    /// Correlation identifier for tracing this error across systems.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
    /// Supplementary structured details, e.g. the offending field.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub details: Option<Value>,
}

impl Error {
    /// Create a new error, capturing the current trace identifier when one is
    /// in scope so the payload is correlated automatically.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: None,
        }
    }

    /// Attach structured details to the error.
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Attach a trace identifier to the error.
    #[must_use]
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::Unauthorized`].
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::Conflict`].
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn constructors_set_the_expected_code() {
        assert_eq!(Error::invalid_request("x").code, ErrorCode::InvalidRequest);
        assert_eq!(Error::unauthorized("x").code, ErrorCode::Unauthorized);
        assert_eq!(Error::not_found("x").code, ErrorCode::NotFound);
        assert_eq!(Error::conflict("x").code, ErrorCode::Conflict);
        assert_eq!(Error::internal("x").code, ErrorCode::InternalError);
    }

    #[rstest]
    fn serialises_code_as_snake_case() {
        let err = Error::invalid_request("bad input");
        let value = serde_json::to_value(&err).expect("error payload serialises");
        assert_eq!(value["code"], "invalid_request");
        assert_eq!(value["message"], "bad input");
        assert!(value.get("details").is_none());
    }

    #[rstest]
    fn details_are_carried_through() {
        let err = Error::invalid_request("bad").with_details(json!({ "field": "email" }));
        let value = serde_json::to_value(&err).expect("error payload serialises");
        assert_eq!(value["details"]["field"], "email");
    }
}
