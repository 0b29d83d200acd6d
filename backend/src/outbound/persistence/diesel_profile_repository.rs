//! PostgreSQL-backed `ProfileRepository` implementation.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::Profile;
use crate::domain::ports::{ProfileRepository, ProfileRepositoryError};

use super::diesel_error::{map_diesel_error, map_pool_error};
use super::models::{NewProfileRow, ProfileChangeset, ProfileRow, id_to_db};
use super::pool::{DbPool, PoolError};
use super::schema::profiles;

/// Diesel adapter for the profile port.
#[derive(Clone)]
pub struct DieselProfileRepository {
    pool: DbPool,
}

impl DieselProfileRepository {
    /// Create a repository over the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> ProfileRepositoryError {
    map_pool_error(error, ProfileRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> ProfileRepositoryError {
    map_diesel_error(
        error,
        ProfileRepositoryError::query,
        ProfileRepositoryError::connection,
    )
}

/// Insert-time mapping: a unique violation means the `user_id` is taken.
fn create_error(error: diesel::result::Error, user_id: u64) -> ProfileRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    if matches!(
        error,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
    ) {
        return ProfileRepositoryError::duplicate_user_id(user_id);
    }
    diesel_error(error)
}

#[async_trait]
impl ProfileRepository for DieselProfileRepository {
    async fn create(&self, profile: &Profile) -> Result<Profile, ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let new_row = NewProfileRow {
            user_id: id_to_db(profile.user_id),
            email: &profile.email,
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        };

        let row: ProfileRow = diesel::insert_into(profiles::table)
            .values(&new_row)
            .returning(ProfileRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| create_error(err, profile.user_id))?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<Profile>, ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row: Option<ProfileRow> = profiles::table
            .filter(profiles::id.eq(id_to_db(id)))
            .select(ProfileRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        Ok(row.map(Into::into))
    }

    async fn find_by_user_id(
        &self,
        user_id: u64,
    ) -> Result<Option<Profile>, ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row: Option<ProfileRow> = profiles::table
            .filter(profiles::user_id.eq(id_to_db(user_id)))
            .select(ProfileRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        Ok(row.map(Into::into))
    }

    async fn update(&self, profile: &Profile) -> Result<Profile, ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let changes = ProfileChangeset {
            email: &profile.email,
            updated_at: Utc::now(),
        };

        let row: Option<ProfileRow> =
            diesel::update(profiles::table.filter(profiles::id.eq(id_to_db(profile.id))))
                .set(&changes)
                .returning(ProfileRow::as_returning())
                .get_result(&mut conn)
                .await
                .optional()
                .map_err(diesel_error)?;

        // Profiles are stricter than the other entities: a vanished row is an
        // error here rather than a silent success.
        row.map(Into::into).ok_or(ProfileRepositoryError::Missing {})
    }

    async fn delete(&self, id: u64) -> Result<(), ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let affected = diesel::delete(profiles::table.filter(profiles::id.eq(id_to_db(id))))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;

        if affected == 0 {
            return Err(ProfileRepositoryError::missing());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_errors_map_to_connection_errors() {
        let err = pool_error(PoolError::Checkout {
            message: "connection refused".into(),
        });
        assert!(matches!(err, ProfileRepositoryError::Connection { .. }));
        assert!(err.to_string().contains("connection refused"));
    }

    #[rstest]
    fn unique_violations_map_to_duplicate_user_id() {
        let diesel_err = diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key value violates unique constraint".to_owned()),
        );
        let err = create_error(diesel_err, 7);
        assert_eq!(err, ProfileRepositoryError::DuplicateUserId { user_id: 7 });
    }

    #[rstest]
    fn other_database_errors_stay_query_errors() {
        let diesel_err = diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::CheckViolation,
            Box::new("boom".to_owned()),
        );
        let err = create_error(diesel_err, 7);
        assert!(matches!(err, ProfileRepositoryError::Query { .. }));
    }
}
