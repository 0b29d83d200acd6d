//! Inbound adapters translating external requests into domain service calls.
//!
//! The HTTP adapter lives under [`http`], the gRPC adapter under [`grpc`].
//! Both present the same four resources over the same service instances, so
//! an operation performed via one transport is immediately visible via the
//! other.

pub mod grpc;
pub mod http;
