//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - [`persistence`]: PostgreSQL repositories via Diesel.
//! - [`auth`]: gRPC client for the external access-validation service.
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations; they contain no business logic.

pub mod auth;
pub mod persistence;
