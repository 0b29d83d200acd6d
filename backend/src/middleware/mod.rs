//! Request middleware.
//!
//! Purpose: request lifecycle concerns shared by the HTTP surface:
//! per-request tracing and API-key access validation.

pub mod api_key;
pub mod trace;

pub use api_key::ApiKeyAuth;
pub use trace::Trace;
