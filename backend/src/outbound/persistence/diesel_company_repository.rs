//! PostgreSQL-backed `CompanyRepository` implementation.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::PageRequest;

use crate::domain::Company;
use crate::domain::ports::{CompanyRepository, CompanyRepositoryError, ListFilter};

use super::diesel_error::{map_diesel_error, map_pool_error};
use super::models::{CompanyChangeset, CompanyRow, NewCompanyRow, count_from_db, id_to_db};
use super::pool::{DbPool, PoolError};
use super::schema::companies;

/// Diesel adapter for the company port.
#[derive(Clone)]
pub struct DieselCompanyRepository {
    pool: DbPool,
}

impl DieselCompanyRepository {
    /// Create a repository over the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> CompanyRepositoryError {
    map_pool_error(error, CompanyRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> CompanyRepositoryError {
    map_diesel_error(
        error,
        CompanyRepositoryError::query,
        CompanyRepositoryError::connection,
    )
}

#[async_trait]
impl CompanyRepository for DieselCompanyRepository {
    async fn create(&self, company: &Company) -> Result<Company, CompanyRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let new_row = NewCompanyRow {
            name: &company.name,
            registration_no: &company.registration_no,
            fiscal_code: &company.fiscal_code,
            profile_id: id_to_db(company.profile_id),
            type_: &company.type_,
            created_at: company.created_at,
            updated_at: company.updated_at,
        };

        let row: CompanyRow = diesel::insert_into(companies::table)
            .values(&new_row)
            .returning(CompanyRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<Company>, CompanyRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row: Option<CompanyRow> = companies::table
            .filter(companies::id.eq(id_to_db(id)))
            .select(CompanyRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        Ok(row.map(Into::into))
    }

    async fn update(&self, company: &Company) -> Result<Option<Company>, CompanyRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let changes = CompanyChangeset {
            name: &company.name,
            registration_no: &company.registration_no,
            fiscal_code: &company.fiscal_code,
            profile_id: id_to_db(company.profile_id),
            type_: &company.type_,
            updated_at: Utc::now(),
        };

        let row: Option<CompanyRow> =
            diesel::update(companies::table.filter(companies::id.eq(id_to_db(company.id))))
                .set(&changes)
                .returning(CompanyRow::as_returning())
                .get_result(&mut conn)
                .await
                .optional()
                .map_err(diesel_error)?;

        Ok(row.map(Into::into))
    }

    async fn delete(&self, id: u64) -> Result<(), CompanyRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let affected = diesel::delete(companies::table.filter(companies::id.eq(id_to_db(id))))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;

        if affected == 0 {
            return Err(CompanyRepositoryError::missing());
        }
        Ok(())
    }

    async fn list(
        &self,
        filter: ListFilter,
        page: PageRequest,
    ) -> Result<(Vec<Company>, u64), CompanyRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let mut count_query = companies::table
            .select(diesel::dsl::count_star())
            .into_boxed();
        if let Some(profile_id) = filter.profile_id {
            count_query = count_query.filter(companies::profile_id.eq(id_to_db(profile_id)));
        }
        if let Some(type_) = filter.type_.clone() {
            count_query = count_query.filter(companies::type_.eq(type_));
        }
        let total: i64 = count_query
            .first(&mut conn)
            .await
            .map_err(diesel_error)?;

        let mut page_query = companies::table
            .select(CompanyRow::as_select())
            .into_boxed();
        if let Some(profile_id) = filter.profile_id {
            page_query = page_query.filter(companies::profile_id.eq(id_to_db(profile_id)));
        }
        if let Some(type_) = filter.type_ {
            page_query = page_query.filter(companies::type_.eq(type_));
        }
        let rows: Vec<CompanyRow> = page_query
            .order(companies::id.desc())
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
        assert!(matches!(err, CompanyRepositoryError::Connection { .. }));
    }
}
