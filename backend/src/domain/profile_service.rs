//! Profile business rules.

use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use crate::domain::ports::{ProfileRepository, ProfileRepositoryError};
use crate::domain::requests::{CreateProfileRequest, UpdateProfileRequest};
use crate::domain::{Error, Profile};

/// Orchestrates profile persistence and owns the one-profile-per-user rule.
#[derive(Clone)]
pub struct ProfileService {
    repo: Arc<dyn ProfileRepository>,
}

/// Map repository failures onto the transport-agnostic error taxonomy.
fn map_repo_error(error: ProfileRepositoryError) -> Error {
    match error {
        ProfileRepositoryError::DuplicateUserId { .. } => {
            Error::conflict("profile already exists for this user")
        }
        ProfileRepositoryError::Missing {} => Error::not_found("profile not found"),
        ProfileRepositoryError::Connection { message } | ProfileRepositoryError::Query { message } => {
            Error::internal(message)
        }
    }
}

impl ProfileService {
    /// Create a service backed by the given repository.
    pub fn new(repo: Arc<dyn ProfileRepository>) -> Self {
        Self { repo }
    }

    /// Create a profile, enforcing at most one profile per user.
    ///
    /// The `find_by_user_id` pre-check produces a friendly conflict in the
    /// common case; the storage-level unique constraint remains the actual
    /// race-safety backstop and maps to the same conflict.
    pub async fn create(&self, req: &CreateProfileRequest) -> Result<Profile, Error> {
        let existing = self
            .repo
            .find_by_user_id(req.user_id)
            .await
            .map_err(map_repo_error)?;
        if existing.is_some() {
            debug!(user_id = req.user_id, "profile create pre-check found an existing profile");
            return Err(Error::conflict("profile already exists for this user"));
        }

        let now = Utc::now();
        let profile = Profile {
            id: 0,
            user_id: req.user_id,
            email: req.email.clone(),
            created_at: now,
            updated_at: now,
        };

        self.repo.create(&profile).await.map_err(map_repo_error)
    }

    /// Fetch a profile by id; a repository miss becomes `NotFound`.
    pub async fn get_by_id(&self, id: u64) -> Result<Profile, Error> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(map_repo_error)?
            .ok_or_else(|| Error::not_found("profile not found"))
    }

    /// Fetch a profile by user id; a repository miss becomes `NotFound`.
    pub async fn get_by_user_id(&self, user_id: u64) -> Result<Profile, Error> {
        self.repo
            .find_by_user_id(user_id)
            .await
            .map_err(map_repo_error)?
            .ok_or_else(|| Error::not_found("profile not found"))
    }

    /// Replace the profile's mutable fields.
    pub async fn update(&self, req: &UpdateProfileRequest) -> Result<Profile, Error> {
        let mut profile = self
            .repo
            .find_by_id(req.id)
            .await
            .map_err(map_repo_error)?
            .ok_or_else(|| Error::not_found("profile not found"))?;

        profile.email = req.email.clone();

        self.repo.update(&profile).await.map_err(map_repo_error)
    }

    /// Delete a profile by id.
    pub async fn delete(&self, id: u64) -> Result<(), Error> {
        self.repo.delete(id).await.map_err(map_repo_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockProfileRepository;
    use rstest::rstest;

    fn stored(user_id: u64, email: &str) -> Profile {
        let now = Utc::now();
        Profile {
            id: 42,
            user_id,
            email: email.into(),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn create_stamps_timestamps_and_returns_stored_record() {
        let mut repo = MockProfileRepository::new();
        repo.expect_find_by_user_id()
            .returning(|_| Ok(None));
        repo.expect_create()
            .withf(|profile| {
                profile.id == 0
                    && profile.user_id == 7
                    && profile.email == "a@b.com"
                    && profile.created_at == profile.updated_at
            })
            .returning(|profile| {
                Ok(Profile {
                    id: 42,
                    ..profile.clone()
                })
            });

        let service = ProfileService::new(Arc::new(repo));
        let req = CreateProfileRequest {
            user_id: 7,
            email: "a@b.com".into(),
        };
        let profile = service.create(&req).await.expect("create should succeed");
        assert_eq!(profile.id, 42);
        assert_eq!(profile.user_id, 7);
        assert_eq!(profile.email, "a@b.com");
        assert_eq!(profile.created_at, profile.updated_at);
    }

    #[tokio::test]
    async fn create_conflicts_when_pre_check_finds_existing_profile() {
        let mut repo = MockProfileRepository::new();
        repo.expect_find_by_user_id()
            .returning(|user_id| Ok(Some(stored(user_id, "old@b.com"))));
        repo.expect_create().never();

        let service = ProfileService::new(Arc::new(repo));
        let req = CreateProfileRequest {
            user_id: 7,
            email: "a@b.com".into(),
        };
        let err = service.create(&req).await.expect_err("create should conflict");
        assert_eq!(err.code, ErrorCode::Conflict);
        assert_eq!(err.message, "profile already exists for this user");
    }

    #[tokio::test]
    async fn create_maps_duplicate_key_race_to_conflict() {
        let mut repo = MockProfileRepository::new();
        repo.expect_find_by_user_id().returning(|_| Ok(None));
        repo.expect_create()
            .returning(|profile| Err(ProfileRepositoryError::duplicate_user_id(profile.user_id)));

        let service = ProfileService::new(Arc::new(repo));
        let req = CreateProfileRequest {
            user_id: 7,
            email: "a@b.com".into(),
        };
        let err = service.create(&req).await.expect_err("create should conflict");
        assert_eq!(err.code, ErrorCode::Conflict);
    }

    #[tokio::test]
    async fn get_by_id_maps_miss_to_not_found() {
        let mut repo = MockProfileRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let service = ProfileService::new(Arc::new(repo));
        let err = service.get_by_id(9).await.expect_err("lookup should miss");
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "profile not found");
    }

    #[tokio::test]
    async fn get_by_user_id_returns_the_stored_record() {
        let mut repo = MockProfileRepository::new();
        repo.expect_find_by_user_id()
            .returning(|user_id| Ok(Some(stored(user_id, "a@b.com"))));

        let service = ProfileService::new(Arc::new(repo));
        let profile = service
            .get_by_user_id(7)
            .await
            .expect("lookup should succeed");
        assert_eq!(profile.user_id, 7);
    }

    #[tokio::test]
    async fn update_replaces_email_on_the_loaded_record() {
        let mut repo = MockProfileRepository::new();
        repo.expect_find_by_id()
            .returning(|_| Ok(Some(stored(7, "old@b.com"))));
        repo.expect_update()
            .withf(|profile| profile.id == 42 && profile.email == "new@b.com")
            .returning(|profile| Ok(profile.clone()));

        let service = ProfileService::new(Arc::new(repo));
        let req = UpdateProfileRequest {
            id: 42,
            email: "new@b.com".into(),
        };
        let profile = service.update(&req).await.expect("update should succeed");
        assert_eq!(profile.email, "new@b.com");
    }

    #[tokio::test]
    async fn update_maps_missing_row_to_not_found() {
        let mut repo = MockProfileRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let service = ProfileService::new(Arc::new(repo));
        let req = UpdateProfileRequest {
            id: 42,
            email: "new@b.com".into(),
        };
        let err = service.update(&req).await.expect_err("update should miss");
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn delete_maps_missing_row_to_not_found() {
        let mut repo = MockProfileRepository::new();
        repo.expect_delete()
            .returning(|_| Err(ProfileRepositoryError::missing()));

        let service = ProfileService::new(Arc::new(repo));
        let err = service.delete(42).await.expect_err("delete should miss");
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[rstest]
    fn repository_failures_map_to_internal_errors() {
        let err = map_repo_error(ProfileRepositoryError::query("boom"));
        assert_eq!(err.code, ErrorCode::InternalError);
        let err = map_repo_error(ProfileRepositoryError::connection("down"));
        assert_eq!(err.code, ErrorCode::InternalError);
    }
}
