//! gRPC adapter mapping for domain errors.
//!
//! Mirrors the HTTP status mapping exactly: validation → `InvalidArgument`,
//! missing records → `NotFound`, profile uniqueness → `AlreadyExists`,
//! everything else → `Internal` with the message redacted.

use tonic::Status;
use tracing::error;

use crate::domain::requests::ValidationError;
use crate::domain::{Error, ErrorCode};

/// Convert a domain error into the transport status, hiding internal detail.
pub fn status_from(error: Error) -> Status {
    match error.code {
        ErrorCode::InvalidRequest => Status::invalid_argument(error.message),
        ErrorCode::Unauthorized => Status::unauthenticated(error.message),
        ErrorCode::NotFound => Status::not_found(error.message),
        ErrorCode::Conflict => Status::already_exists(error.message),
        ErrorCode::InternalError => {
            error!(message = %error.message, "internal error returned to grpc client");
            Status::internal("internal server error")
        }
    }
}

/// Convert a validation failure into `InvalidArgument`.
pub fn invalid(error: ValidationError) -> Status {
    Status::invalid_argument(error.to_string())
}
