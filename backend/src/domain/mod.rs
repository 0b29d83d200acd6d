//! Domain layer: entities, request objects, validation, services and ports.
//!
//! Everything in here is transport- and storage-agnostic. Inbound adapters
//! convert wire types into [`requests`] structs and call the services;
//! outbound adapters implement the [`ports`] traits.

mod address;
mod address_service;
mod company;
mod company_service;
mod contact;
mod contact_service;
mod error;
pub mod ports;
mod profile;
mod profile_service;
pub mod requests;

pub use address::Address;
pub use address_service::AddressService;
pub use company::Company;
pub use company_service::CompanyService;
pub use contact::Contact;
pub use contact_service::ContactService;
pub use error::{Error, ErrorCode};
pub use profile::Profile;
pub use profile_service::ProfileService;
