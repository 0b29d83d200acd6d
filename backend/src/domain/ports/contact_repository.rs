//! Port for contact persistence.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::Contact;

use super::ListFilter;
use super::macros::define_port_error;

define_port_error! {
    /// Errors raised by contact repository adapters.
    pub enum ContactRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "contact repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "contact repository query failed: {message}",
        /// Delete matched no row.
        Missing {} =>
            "contact not found",
    }
}

/// Port for contact storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Insert a contact and return the stored record with its assigned id.
    async fn create(&self, contact: &Contact) -> Result<Contact, ContactRepositoryError>;

    /// Fetch a contact by surrogate id; `Ok(None)` on a miss.
    async fn find_by_id(&self, id: u64) -> Result<Option<Contact>, ContactRepositoryError>;

    /// Replace the contact's mutable fields, bumping `updated_at`.
    ///
    /// Returns `Ok(None)` when zero rows matched; callers that checked
    /// existence beforehand treat that as success since the stored values may
    /// simply have been identical.
    async fn update(&self, contact: &Contact) -> Result<Option<Contact>, ContactRepositoryError>;

    /// Delete a contact; zero affected rows yields
    /// [`ContactRepositoryError::Missing`].
    async fn delete(&self, id: u64) -> Result<(), ContactRepositoryError>;

    /// Fetch one page of contacts plus the unwindowed total, newest first.
    async fn list(
        &self,
        filter: ListFilter,
        page: PageRequest,
    ) -> Result<(Vec<Contact>, u64), ContactRepositoryError>;
}
