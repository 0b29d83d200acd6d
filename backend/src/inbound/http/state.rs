//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data`. The same service
//! instances back the gRPC transport, so a mutation performed on one
//! transport is immediately visible on the other.

use std::sync::Arc;

use crate::domain::{AddressService, CompanyService, ContactService, ProfileService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Profile operations.
    pub profiles: Arc<ProfileService>,
    /// Contact operations.
    pub contacts: Arc<ContactService>,
    /// Address operations.
    pub addresses: Arc<AddressService>,
    /// Company operations.
    pub companies: Arc<CompanyService>,
}

impl HttpState {
    /// Bundle the four entity services.
    pub fn new(
        profiles: Arc<ProfileService>,
        contacts: Arc<ContactService>,
        addresses: Arc<AddressService>,
        companies: Arc<CompanyService>,
    ) -> Self {
        Self {
            profiles,
            contacts,
            addresses,
            companies,
        }
    }
}
