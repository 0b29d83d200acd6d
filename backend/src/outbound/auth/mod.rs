//! Outbound auth adapter consulting the external access-validation service.

mod grpc_access_validator;

pub use grpc_access_validator::GrpcAccessValidator;
