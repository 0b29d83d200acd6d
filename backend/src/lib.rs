//! Profile management microservice.
//!
//! CRUD and list operations over four related entities (profile, contact,
//! address, company), exposed over HTTP/JSON and gRPC against one shared
//! service layer backed by PostgreSQL.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod proto;
pub mod server;
#[cfg(feature = "test-support")]
pub mod test_support;

pub use middleware::Trace;
pub use middleware::trace::TraceId;
