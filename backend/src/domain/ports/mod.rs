//! Domain ports: the traits outbound adapters implement.
//!
//! Repositories translate domain operations into storage access; the access
//! validator consults the external auth service. Services depend only on
//! these traits, never on concrete adapters.

mod access_validator;
mod address_repository;
mod company_repository;
mod contact_repository;
mod macros;
mod profile_repository;

pub use access_validator::{AccessValidator, AccessValidatorError, AllowAllAccessValidator};
pub use address_repository::{AddressRepository, AddressRepositoryError};
pub use company_repository::{CompanyRepository, CompanyRepositoryError};
pub use contact_repository::{ContactRepository, ContactRepositoryError};
pub use profile_repository::{ProfileRepository, ProfileRepositoryError};

#[cfg(test)]
pub use access_validator::MockAccessValidator;
#[cfg(test)]
pub use address_repository::MockAddressRepository;
#[cfg(test)]
pub use company_repository::MockCompanyRepository;
#[cfg(test)]
pub use contact_repository::MockContactRepository;
#[cfg(test)]
pub use profile_repository::MockProfileRepository;

/// Optional predicates applied to list queries.
///
/// Both the COUNT and the page query apply exactly these predicates, so the
/// returned total always refers to the same row set as the page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListFilter {
    /// Restrict to records owned by this profile.
    pub profile_id: Option<u64>,
    /// Restrict to records with exactly this classification tag.
    pub type_: Option<String>,
}

impl ListFilter {
    /// Build a filter from raw request fields, mapping the zero / blank
    /// sentinels to "no predicate".
    #[must_use]
    pub fn from_raw(profile_id: u64, type_: &str) -> Self {
        let type_ = type_.trim();
        Self {
            profile_id: (profile_id != 0).then_some(profile_id),
            type_: (!type_.is_empty()).then(|| type_.to_owned()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ListFilter;
    use rstest::rstest;

    #[rstest]
    #[case(0, "", None, None)]
    #[case(7, "", Some(7), None)]
    #[case(0, "  home  ", None, Some("home"))]
    #[case(3, "work", Some(3), Some("work"))]
    fn from_raw_maps_sentinels_to_absent_predicates(
        #[case] profile_id: u64,
        #[case] type_: &str,
        #[case] expected_profile: Option<u64>,
        #[case] expected_type: Option<&str>,
    ) {
        let filter = ListFilter::from_raw(profile_id, type_);
        assert_eq!(filter.profile_id, expected_profile);
        assert_eq!(filter.type_.as_deref(), expected_type);
    }
}
