//! Helpers for handler unit tests.

use std::sync::Arc;

use crate::domain::ports::{
    MockAddressRepository, MockCompanyRepository, MockContactRepository, MockProfileRepository,
};
use crate::domain::{AddressService, CompanyService, ContactService, ProfileService};
use crate::inbound::http::state::HttpState;

/// Build an [`HttpState`] over the given mock repositories.
///
/// Tests that only exercise one entity pass fresh mocks for the others; any
/// unexpected call on those will panic and fail the test.
pub(crate) fn state_from_mocks(
    profiles: MockProfileRepository,
    contacts: MockContactRepository,
    addresses: MockAddressRepository,
    companies: MockCompanyRepository,
) -> HttpState {
    HttpState::new(
        Arc::new(ProfileService::new(Arc::new(profiles))),
        Arc::new(ContactService::new(Arc::new(contacts))),
        Arc::new(AddressService::new(Arc::new(addresses))),
        Arc::new(CompanyService::new(Arc::new(companies))),
    )
}

/// State where only the profile repository is scripted.
pub(crate) fn state_with_profiles(profiles: MockProfileRepository) -> HttpState {
    state_from_mocks(
        profiles,
        MockContactRepository::new(),
        MockAddressRepository::new(),
        MockCompanyRepository::new(),
    )
}

/// State where only the contact repository is scripted.
pub(crate) fn state_with_contacts(contacts: MockContactRepository) -> HttpState {
    state_from_mocks(
        MockProfileRepository::new(),
        contacts,
        MockAddressRepository::new(),
        MockCompanyRepository::new(),
    )
}

/// State where only the address repository is scripted.
pub(crate) fn state_with_addresses(addresses: MockAddressRepository) -> HttpState {
    state_from_mocks(
        MockProfileRepository::new(),
        MockContactRepository::new(),
        addresses,
        MockCompanyRepository::new(),
    )
}

/// State where only the company repository is scripted.
pub(crate) fn state_with_companies(companies: MockCompanyRepository) -> HttpState {
    state_from_mocks(
        MockProfileRepository::new(),
        MockContactRepository::new(),
        MockAddressRepository::new(),
        companies,
    )
}
