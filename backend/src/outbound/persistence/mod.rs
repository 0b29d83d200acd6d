//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports backed by
//! PostgreSQL via `diesel-async` with bb8 connection pooling. Adapters are
//! thin translators between Diesel row structs and domain types; no business
//! logic lives here beyond error-shape translation.

mod diesel_address_repository;
mod diesel_company_repository;
mod diesel_contact_repository;
mod diesel_error;
mod diesel_profile_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_address_repository::DieselAddressRepository;
pub use diesel_company_repository::DieselCompanyRepository;
pub use diesel_contact_repository::DieselContactRepository;
pub use diesel_profile_repository::DieselProfileRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
