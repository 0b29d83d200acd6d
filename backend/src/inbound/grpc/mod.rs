//! gRPC inbound adapter exposing the `profile.v1.ProfileService` RPCs.

pub mod error;
pub mod server;

pub use server::ProfileGrpcService;
