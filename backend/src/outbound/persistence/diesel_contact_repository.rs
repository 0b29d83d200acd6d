//! PostgreSQL-backed `ContactRepository` implementation.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::PageRequest;

use crate::domain::Contact;
use crate::domain::ports::{ContactRepository, ContactRepositoryError, ListFilter};

use super::diesel_error::{map_diesel_error, map_pool_error};
use super::models::{ContactChangeset, ContactRow, NewContactRow, count_from_db, id_to_db};
use super::pool::{DbPool, PoolError};
use super::schema::contacts;

/// Diesel adapter for the contact port.
#[derive(Clone)]
pub struct DieselContactRepository {
    pool: DbPool,
}

impl DieselContactRepository {
    /// Create a repository over the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> ContactRepositoryError {
    map_pool_error(error, ContactRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> ContactRepositoryError {
    map_diesel_error(
        error,
        ContactRepositoryError::query,
        ContactRepositoryError::connection,
    )
}

#[async_trait]
impl ContactRepository for DieselContactRepository {
    async fn create(&self, contact: &Contact) -> Result<Contact, ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let new_row = NewContactRow {
            first_name: &contact.first_name,
            last_name: &contact.last_name,
            nin: &contact.nin,
            dob: contact.dob,
            phone: &contact.phone,
            profile_id: id_to_db(contact.profile_id),
            type_: &contact.type_,
            created_at: contact.created_at,
            updated_at: contact.updated_at,
        };

        let row: ContactRow = diesel::insert_into(contacts::table)
            .values(&new_row)
            .returning(ContactRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<Contact>, ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row: Option<ContactRow> = contacts::table
            .filter(contacts::id.eq(id_to_db(id)))
            .select(ContactRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        Ok(row.map(Into::into))
    }

    async fn update(&self, contact: &Contact) -> Result<Option<Contact>, ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let changes = ContactChangeset {
            first_name: &contact.first_name,
            last_name: &contact.last_name,
            nin: &contact.nin,
            dob: contact.dob,
            phone: &contact.phone,
            profile_id: id_to_db(contact.profile_id),
            type_: &contact.type_,
            updated_at: Utc::now(),
        };

        let row: Option<ContactRow> =
            diesel::update(contacts::table.filter(contacts::id.eq(id_to_db(contact.id))))
                .set(&changes)
                .returning(ContactRow::as_returning())
                .get_result(&mut conn)
                .await
                .optional()
                .map_err(diesel_error)?;

        Ok(row.map(Into::into))
    }

    async fn delete(&self, id: u64) -> Result<(), ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let affected = diesel::delete(contacts::table.filter(contacts::id.eq(id_to_db(id))))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;

        if affected == 0 {
            return Err(ContactRepositoryError::missing());
        }
        Ok(())
    }

    async fn list(
        &self,
        filter: ListFilter,
        page: PageRequest,
    ) -> Result<(Vec<Contact>, u64), ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        // COUNT and page query share the same predicates so the total always
        // describes the filtered row set.
        let mut count_query = contacts::table
            .select(diesel::dsl::count_star())
            .into_boxed();
        if let Some(profile_id) = filter.profile_id {
            count_query = count_query.filter(contacts::profile_id.eq(id_to_db(profile_id)));
        }
        if let Some(type_) = filter.type_.clone() {
            count_query = count_query.filter(contacts::type_.eq(type_));
        }
        let total: i64 = count_query
            .first(&mut conn)
            .await
            .map_err(diesel_error)?;

        let mut page_query = contacts::table.select(ContactRow::as_select()).into_boxed();
        if let Some(profile_id) = filter.profile_id {
            page_query = page_query.filter(contacts::profile_id.eq(id_to_db(profile_id)));
        }
        if let Some(type_) = filter.type_ {
            page_query = page_query.filter(contacts::type_.eq(type_));
        }
        let rows: Vec<ContactRow> = page_query
            .order(contacts::id.desc())
            .limit(i64::from(page.limit()))
            .offset(i64::from(page.offset()))
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        Ok((
            rows.into_iter().map(Into::into).collect(),
            count_from_db(total),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_errors_map_to_connection_errors() {
        let err = pool_error(PoolError::Build {
            message: "bad dsn".into(),
        });
        assert!(matches!(err, ContactRepositoryError::Connection { .. }));
    }

    #[rstest]
    fn stray_not_found_maps_to_query_error() {
        let err = diesel_error(diesel::result::Error::NotFound);
        assert!(matches!(err, ContactRepositoryError::Query { .. }));
        assert!(err.to_string().contains("record not found"));
    }
}
