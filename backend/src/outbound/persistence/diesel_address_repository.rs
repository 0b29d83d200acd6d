//! PostgreSQL-backed `AddressRepository` implementation.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::PageRequest;

use crate::domain::Address;
use crate::domain::ports::{AddressRepository, AddressRepositoryError, ListFilter};

use super::diesel_error::{map_diesel_error, map_pool_error};
use super::models::{AddressChangeset, AddressRow, NewAddressRow, count_from_db, id_to_db};
use super::pool::{DbPool, PoolError};
use super::schema::addresses;

/// Diesel adapter for the address port.
#[derive(Clone)]
pub struct DieselAddressRepository {
    pool: DbPool,
}

impl DieselAddressRepository {
    /// Create a repository over the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> AddressRepositoryError {
    map_pool_error(error, AddressRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> AddressRepositoryError {
    map_diesel_error(
        error,
        AddressRepositoryError::query,
        AddressRepositoryError::connection,
    )
}

#[async_trait]
impl AddressRepository for DieselAddressRepository {
    async fn create(&self, address: &Address) -> Result<Address, AddressRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let new_row = NewAddressRow {
            street_name: &address.street_name,
            street_no: &address.street_no,
            city: &address.city,
            county: &address.county,
            country: &address.country,
            profile_id: id_to_db(address.profile_id),
            postal_code: &address.postal_code,
            building: &address.building,
            apartment: &address.apartment,
            additional_data: &address.additional_data,
            type_: &address.type_,
            created_at: address.created_at,
            updated_at: address.updated_at,
        };

        let row: AddressRow = diesel::insert_into(addresses::table)
            .values(&new_row)
            .returning(AddressRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<Address>, AddressRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row: Option<AddressRow> = addresses::table
            .filter(addresses::id.eq(id_to_db(id)))
            .select(AddressRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        Ok(row.map(Into::into))
    }

    async fn update(&self, address: &Address) -> Result<Option<Address>, AddressRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let changes = AddressChangeset {
            street_name: &address.street_name,
            street_no: &address.street_no,
            city: &address.city,
            county: &address.county,
            country: &address.country,
            profile_id: id_to_db(address.profile_id),
            postal_code: &address.postal_code,
            building: &address.building,
            apartment: &address.apartment,
            additional_data: &address.additional_data,
            type_: &address.type_,
            updated_at: Utc::now(),
        };

        let row: Option<AddressRow> =
            diesel::update(addresses::table.filter(addresses::id.eq(id_to_db(address.id))))
                .set(&changes)
                .returning(AddressRow::as_returning())
                .get_result(&mut conn)
                .await
                .optional()
                .map_err(diesel_error)?;

        Ok(row.map(Into::into))
    }

    async fn delete(&self, id: u64) -> Result<(), AddressRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let affected = diesel::delete(addresses::table.filter(addresses::id.eq(id_to_db(id))))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;

        if affected == 0 {
            return Err(AddressRepositoryError::missing());
        }
        Ok(())
    }

    async fn list(
        &self,
        filter: ListFilter,
        page: PageRequest,
    ) -> Result<(Vec<Address>, u64), AddressRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let mut count_query = addresses::table
            .select(diesel::dsl::count_star())
            .into_boxed();
        if let Some(profile_id) = filter.profile_id {
            count_query = count_query.filter(addresses::profile_id.eq(id_to_db(profile_id)));
        }
        if let Some(type_) = filter.type_.clone() {
            count_query = count_query.filter(addresses::type_.eq(type_));
        }
        let total: i64 = count_query
            .first(&mut conn)
            .await
            .map_err(diesel_error)?;

        let mut page_query = addresses::table
            .select(AddressRow::as_select())
            .into_boxed();
        if let Some(profile_id) = filter.profile_id {
            page_query = page_query.filter(addresses::profile_id.eq(id_to_db(profile_id)));
        }
        if let Some(type_) = filter.type_ {
            page_query = page_query.filter(addresses::type_.eq(type_));
        }
        let rows: Vec<AddressRow> = page_query
            .order(addresses::id.desc())
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
        let err = pool_error(PoolError::Checkout {
            message: "timed out".into(),
        });
        assert!(matches!(err, AddressRepositoryError::Connection { .. }));
    }
}
