//! Port for address persistence.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::Address;

use super::ListFilter;
use super::macros::define_port_error;

define_port_error! {
    /// Errors raised by address repository adapters.
    pub enum AddressRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "address repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "address repository query failed: {message}",
        /// Delete matched no row.
        Missing {} =>
            "address not found",
    }
}

/// Port for address storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AddressRepository: Send + Sync {
    /// Insert an address and return the stored record with its assigned id.
    async fn create(&self, address: &Address) -> Result<Address, AddressRepositoryError>;

    /// Fetch an address by surrogate id; `Ok(None)` on a miss.
    async fn find_by_id(&self, id: u64) -> Result<Option<Address>, AddressRepositoryError>;

    /// Replace the address's mutable fields, bumping `updated_at`.
    ///
    /// Returns `Ok(None)` when zero rows matched, which callers treat as
    /// success after their own existence check.
    async fn update(&self, address: &Address) -> Result<Option<Address>, AddressRepositoryError>;

    /// Delete an address; zero affected rows yields
    /// [`AddressRepositoryError::Missing`].
    async fn delete(&self, id: u64) -> Result<(), AddressRepositoryError>;

    /// Fetch one page of addresses plus the unwindowed total, newest first.
    async fn list(
        &self,
        filter: ListFilter,
        page: PageRequest,
    ) -> Result<(Vec<Address>, u64), AddressRepositoryError>;
}
