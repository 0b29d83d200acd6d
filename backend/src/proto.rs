//! Generated protobuf/gRPC bindings.
//!
//! The `.proto` sources live under `proto/` and are compiled by `build.rs`
//! via `tonic-build`.

/// Bindings for the `profile.v1` package exposed by this service.
#[allow(
    missing_docs,
    clippy::pedantic,
    reason = "generated code is exempt from local style rules"
)]
pub mod profile_v1 {
    tonic::include_proto!("profile.v1");
}

/// Bindings for the external `auth.v1` access-validation service.
#[allow(
    missing_docs,
    clippy::pedantic,
    reason = "generated code is exempt from local style rules"
)]
pub mod auth_v1 {
    tonic::include_proto!("auth.v1");
}
