//! Port for profile persistence.

use async_trait::async_trait;

use crate::domain::Profile;

use super::macros::define_port_error;

define_port_error! {
    /// Errors raised by profile repository adapters.
    pub enum ProfileRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "profile repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "profile repository query failed: {message}",
        /// Insert collided with the unique constraint on `user_id`.
        DuplicateUserId { user_id: u64 } =>
            "profile already exists for user {user_id}",
        /// Update or delete matched no row.
        Missing {} =>
            "profile not found",
    }
}

/// Port for profile storage and retrieval.
///
/// Lookups report a missing row as `Ok(None)`, never as an error; deciding
/// what a miss means belongs to the service layer. Mutations that must match
/// an existing row surface [`ProfileRepositoryError::Missing`] when zero rows
/// were affected.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Insert a profile and return the stored record with its assigned id.
    ///
    /// A collision on `user_id` yields
    /// [`ProfileRepositoryError::DuplicateUserId`]; this is the race-safety
    /// backstop behind the service's friendlier pre-check.
    async fn create(&self, profile: &Profile) -> Result<Profile, ProfileRepositoryError>;

    /// Fetch a profile by surrogate id.
    async fn find_by_id(&self, id: u64) -> Result<Option<Profile>, ProfileRepositoryError>;

    /// Fetch a profile by its owning user id.
    async fn find_by_user_id(
        &self,
        user_id: u64,
    ) -> Result<Option<Profile>, ProfileRepositoryError>;

    /// Replace the profile's mutable fields, bumping `updated_at`.
    ///
    /// Returns the stored record. Zero affected rows yields
    /// [`ProfileRepositoryError::Missing`]; profiles are deliberately
    /// stricter here than the other repositories.
    async fn update(&self, profile: &Profile) -> Result<Profile, ProfileRepositoryError>;

    /// Delete a profile; zero affected rows yields
    /// [`ProfileRepositoryError::Missing`].
    async fn delete(&self, id: u64) -> Result<(), ProfileRepositoryError>;
}
