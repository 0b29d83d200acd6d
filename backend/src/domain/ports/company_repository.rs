//! Port for company persistence.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::Company;

use super::ListFilter;
use super::macros::define_port_error;

define_port_error! {
    /// Errors raised by company repository adapters.
    pub enum CompanyRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "company repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "company repository query failed: {message}",
        /// Delete matched no row.
        Missing {} =>
            "company not found",
    }
}

/// Port for company storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    /// Insert a company and return the stored record with its assigned id.
    async fn create(&self, company: &Company) -> Result<Company, CompanyRepositoryError>;

    /// Fetch a company by surrogate id; `Ok(None)` on a miss.
    async fn find_by_id(&self, id: u64) -> Result<Option<Company>, CompanyRepositoryError>;

    /// Replace the company's mutable fields, bumping `updated_at`.
    ///
    /// Returns `Ok(None)` when zero rows matched, which callers treat as
    /// success after their own existence check.
    async fn update(&self, company: &Company) -> Result<Option<Company>, CompanyRepositoryError>;

    /// Delete a company; zero affected rows yields
    /// [`CompanyRepositoryError::Missing`].
    async fn delete(&self, id: u64) -> Result<(), CompanyRepositoryError>;

    /// Fetch one page of companies plus the unwindowed total, newest first.
    async fn list(
        &self,
        filter: ListFilter,
        page: PageRequest,
    ) -> Result<(Vec<Company>, u64), CompanyRepositoryError>;
}
