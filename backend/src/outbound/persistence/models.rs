//! Internal Diesel row structs and domain conversions.
//!
//! These types are implementation details of the persistence layer and are
//! never exposed to the domain. PostgreSQL has no unsigned integer columns,
//! so surrogate ids are stored as `BIGINT` and cast at this boundary.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

use crate::domain::{Address, Company, Contact, Profile};

use super::schema::{addresses, companies, contacts, profiles};

/// Cast a domain id onto its `BIGINT` column representation.
#[expect(
    clippy::cast_possible_wrap,
    reason = "surrogate ids are generated by BIGSERIAL and fit in i64"
)]
pub(crate) fn id_to_db(id: u64) -> i64 {
    id as i64
}

/// Cast a `BIGINT` column value back onto the domain id type.
#[expect(
    clippy::cast_sign_loss,
    reason = "surrogate ids are generated by BIGSERIAL and never negative"
)]
pub(crate) fn id_from_db(id: i64) -> u64 {
    id as u64
}

/// Cast a `COUNT(*)` result onto the domain total type.
#[expect(clippy::cast_sign_loss, reason = "COUNT(*) is never negative")]
pub(crate) fn count_from_db(count: i64) -> u64 {
    count as u64
}

// ---------------------------------------------------------------------------
// Profile models
// ---------------------------------------------------------------------------

/// Row struct for reading from the profiles table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProfileRow {
    pub id: i64,
    pub user_id: i64,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Self {
            id: id_from_db(row.id),
            user_id: id_from_db(row.user_id),
            email: row.email,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Insertable struct for creating profile records.
#[derive(Debug, Insertable)]
#[diesel(table_name = profiles)]
pub(crate) struct NewProfileRow<'a> {
    pub user_id: i64,
    pub email: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset struct for updating profile records.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = profiles)]
pub(crate) struct ProfileChangeset<'a> {
    pub email: &'a str,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Contact models
// ---------------------------------------------------------------------------

/// Row struct for reading from the contacts table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = contacts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ContactRow {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub nin: String,
    pub dob: Option<NaiveDate>,
    pub phone: String,
    pub profile_id: i64,
    pub type_: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ContactRow> for Contact {
    fn from(row: ContactRow) -> Self {
        Self {
            id: id_from_db(row.id),
            first_name: row.first_name,
            last_name: row.last_name,
            nin: row.nin,
            dob: row.dob,
            phone: row.phone,
            profile_id: id_from_db(row.profile_id),
            type_: row.type_,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Insertable struct for creating contact records.
#[derive(Debug, Insertable)]
#[diesel(table_name = contacts)]
pub(crate) struct NewContactRow<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub nin: &'a str,
    pub dob: Option<NaiveDate>,
    pub phone: &'a str,
    pub profile_id: i64,
    pub type_: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset struct for updating contact records.
///
/// `dob` is always written, including back to null, because updates carry
/// full-replace semantics.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = contacts)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ContactChangeset<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub nin: &'a str,
    pub dob: Option<NaiveDate>,
    pub phone: &'a str,
    pub profile_id: i64,
    pub type_: &'a str,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Address models
// ---------------------------------------------------------------------------

/// Row struct for reading from the addresses table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = addresses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AddressRow {
    pub id: i64,
    pub street_name: String,
    pub street_no: String,
    pub city: String,
    pub county: String,
    pub country: String,
    pub profile_id: i64,
    pub postal_code: String,
    pub building: String,
    pub apartment: String,
    pub additional_data: String,
    pub type_: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<AddressRow> for Address {
    fn from(row: AddressRow) -> Self {
        Self {
            id: id_from_db(row.id),
            street_name: row.street_name,
            street_no: row.street_no,
            city: row.city,
            county: row.county,
            country: row.country,
            profile_id: id_from_db(row.profile_id),
            postal_code: row.postal_code,
            building: row.building,
            apartment: row.apartment,
            additional_data: row.additional_data,
            type_: row.type_,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Insertable struct for creating address records.
#[derive(Debug, Insertable)]
#[diesel(table_name = addresses)]
pub(crate) struct NewAddressRow<'a> {
    pub street_name: &'a str,
    pub street_no: &'a str,
    pub city: &'a str,
    pub county: &'a str,
    pub country: &'a str,
    pub profile_id: i64,
    pub postal_code: &'a str,
    pub building: &'a str,
    pub apartment: &'a str,
    pub additional_data: &'a str,
    pub type_: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset struct for updating address records.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = addresses)]
pub(crate) struct AddressChangeset<'a> {
    pub street_name: &'a str,
    pub street_no: &'a str,
    pub city: &'a str,
    pub county: &'a str,
    pub country: &'a str,
    pub profile_id: i64,
    pub postal_code: &'a str,
    pub building: &'a str,
    pub apartment: &'a str,
    pub additional_data: &'a str,
    pub type_: &'a str,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Company models
// ---------------------------------------------------------------------------

/// Row struct for reading from the companies table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = companies)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CompanyRow {
    pub id: i64,
    pub name: String,
    pub registration_no: String,
    pub fiscal_code: String,
    pub profile_id: i64,
    pub type_: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CompanyRow> for Company {
    fn from(row: CompanyRow) -> Self {
        Self {
            id: id_from_db(row.id),
            name: row.name,
            registration_no: row.registration_no,
            fiscal_code: row.fiscal_code,
            profile_id: id_from_db(row.profile_id),
            type_: row.type_,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Insertable struct for creating company records.
#[derive(Debug, Insertable)]
#[diesel(table_name = companies)]
pub(crate) struct NewCompanyRow<'a> {
    pub name: &'a str,
    pub registration_no: &'a str,
    pub fiscal_code: &'a str,
    pub profile_id: i64,
    pub type_: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset struct for updating company records.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = companies)]
pub(crate) struct CompanyChangeset<'a> {
    pub name: &'a str,
    pub registration_no: &'a str,
    pub fiscal_code: &'a str,
    pub profile_id: i64,
    pub type_: &'a str,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn ids_round_trip_through_their_column_representation() {
        assert_eq!(id_from_db(id_to_db(0)), 0);
        assert_eq!(id_from_db(id_to_db(42)), 42);
        assert_eq!(id_from_db(id_to_db(9_007_199_254_740_993)), 9_007_199_254_740_993);
    }

    #[rstest]
    fn contact_rows_convert_to_domain_records() {
        let now = Utc::now();
        let row = ContactRow {
            id: 11,
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            nin: "123".into(),
            dob: NaiveDate::from_ymd_opt(1990, 1, 2),
            phone: "0700".into(),
            profile_id: 5,
            type_: "personal".into(),
            created_at: now,
            updated_at: now,
        };

        let contact = Contact::from(row);
        assert_eq!(contact.id, 11);
        assert_eq!(contact.profile_id, 5);
        assert_eq!(contact.dob, NaiveDate::from_ymd_opt(1990, 1, 2));
    }

    #[rstest]
    fn null_dob_stays_absent() {
        let now = Utc::now();
        let row = ContactRow {
            id: 11,
            first_name: String::new(),
            last_name: String::new(),
            nin: String::new(),
            dob: None,
            phone: String::new(),
            profile_id: 5,
            type_: String::new(),
            created_at: now,
            updated_at: now,
        };

        assert!(Contact::from(row).dob.is_none());
    }
}
