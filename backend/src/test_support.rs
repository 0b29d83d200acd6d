//! In-memory port implementations for integration tests.
//!
//! Enabled through the `test-support` feature so the integration suite can
//! drive both transports end-to-end (validation, services, adapters) without
//! a database. The in-memory repositories honour the same contracts as the
//! Diesel adapters, including the unique `user_id` backstop and the
//! newest-first list ordering.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use pagination::PageRequest;

use crate::domain::ports::{
    AccessValidator, AddressRepository, AddressRepositoryError, AllowAllAccessValidator,
    CompanyRepository, CompanyRepositoryError, ContactRepository, ContactRepositoryError,
    ListFilter, ProfileRepository, ProfileRepositoryError,
};
use crate::domain::{
    Address, AddressService, Company, CompanyService, Contact, ContactService, Profile,
    ProfileService,
};
use crate::inbound::grpc::ProfileGrpcService;
use crate::inbound::http::state::HttpState;

fn window<T: Clone>(rows: Vec<T>, page: PageRequest) -> (Vec<T>, u64) {
    let total = rows.len() as u64;
    let items = rows
        .into_iter()
        .skip(page.offset() as usize)
        .take(page.limit() as usize)
        .collect();
    (items, total)
}

/// In-memory profile store.
#[derive(Default)]
pub struct InMemoryProfileRepository {
    rows: Mutex<Vec<Profile>>,
    next_id: AtomicU64,
}

impl InMemoryProfileRepository {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn create(&self, profile: &Profile) -> Result<Profile, ProfileRepositoryError> {
        let mut rows = self.rows.lock().expect("lock poisoned");
        if rows.iter().any(|row| row.user_id == profile.user_id) {
            return Err(ProfileRepositoryError::duplicate_user_id(profile.user_id));
        }

        let mut stored = profile.clone();
        stored.id = self.next_id.fetch_add(1, Ordering::SeqCst);
        rows.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<Profile>, ProfileRepositoryError> {
        let rows = self.rows.lock().expect("lock poisoned");
        Ok(rows.iter().find(|row| row.id == id).cloned())
    }

    async fn find_by_user_id(
        &self,
        user_id: u64,
    ) -> Result<Option<Profile>, ProfileRepositoryError> {
        let rows = self.rows.lock().expect("lock poisoned");
        Ok(rows.iter().find(|row| row.user_id == user_id).cloned())
    }

    async fn update(&self, profile: &Profile) -> Result<Profile, ProfileRepositoryError> {
        let mut rows = self.rows.lock().expect("lock poisoned");
        let row = rows
            .iter_mut()
            .find(|row| row.id == profile.id)
            .ok_or(ProfileRepositoryError::Missing {})?;

        row.email.clone_from(&profile.email);
        row.updated_at = Utc::now();
        Ok(row.clone())
    }

    async fn delete(&self, id: u64) -> Result<(), ProfileRepositoryError> {
        let mut rows = self.rows.lock().expect("lock poisoned");
        let before = rows.len();
        rows.retain(|row| row.id != id);
        if rows.len() == before {
            return Err(ProfileRepositoryError::missing());
        }
        Ok(())
    }
}

/// In-memory contact store.
#[derive(Default)]
pub struct InMemoryContactRepository {
    rows: Mutex<Vec<Contact>>,
    next_id: AtomicU64,
}

impl InMemoryContactRepository {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }
}

fn matches_filter(profile_id: u64, type_: &str, filter: &ListFilter) -> bool {
    filter.profile_id.is_none_or(|want| want == profile_id)
        && filter.type_.as_deref().is_none_or(|want| want == type_)
}

#[async_trait]
impl ContactRepository for InMemoryContactRepository {
    async fn create(&self, contact: &Contact) -> Result<Contact, ContactRepositoryError> {
        let mut rows = self.rows.lock().expect("lock poisoned");
        let mut stored = contact.clone();
        stored.id = self.next_id.fetch_add(1, Ordering::SeqCst);
        rows.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<Contact>, ContactRepositoryError> {
        let rows = self.rows.lock().expect("lock poisoned");
        Ok(rows.iter().find(|row| row.id == id).cloned())
    }

    async fn update(&self, contact: &Contact) -> Result<Option<Contact>, ContactRepositoryError> {
        let mut rows = self.rows.lock().expect("lock poisoned");
        let Some(row) = rows.iter_mut().find(|row| row.id == contact.id) else {
            return Ok(None);
        };

        let created_at = row.created_at;
        *row = contact.clone();
        row.created_at = created_at;
        row.updated_at = Utc::now();
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: u64) -> Result<(), ContactRepositoryError> {
        let mut rows = self.rows.lock().expect("lock poisoned");
        let before = rows.len();
        rows.retain(|row| row.id != id);
        if rows.len() == before {
            return Err(ContactRepositoryError::missing());
        }
        Ok(())
    }

    async fn list(
        &self,
        filter: ListFilter,
        page: PageRequest,
    ) -> Result<(Vec<Contact>, u64), ContactRepositoryError> {
        let rows = self.rows.lock().expect("lock poisoned");
        let mut matching: Vec<Contact> = rows
            .iter()
            .filter(|row| matches_filter(row.profile_id, &row.type_, &filter))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(window(matching, page))
    }
}

/// In-memory address store.
#[derive(Default)]
pub struct InMemoryAddressRepository {
    rows: Mutex<Vec<Address>>,
    next_id: AtomicU64,
}

impl InMemoryAddressRepository {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }
}

#[async_trait]
impl AddressRepository for InMemoryAddressRepository {
    async fn create(&self, address: &Address) -> Result<Address, AddressRepositoryError> {
        let mut rows = self.rows.lock().expect("lock poisoned");
        let mut stored = address.clone();
        stored.id = self.next_id.fetch_add(1, Ordering::SeqCst);
        rows.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<Address>, AddressRepositoryError> {
        let rows = self.rows.lock().expect("lock poisoned");
        Ok(rows.iter().find(|row| row.id == id).cloned())
    }

    async fn update(&self, address: &Address) -> Result<Option<Address>, AddressRepositoryError> {
        let mut rows = self.rows.lock().expect("lock poisoned");
        let Some(row) = rows.iter_mut().find(|row| row.id == address.id) else {
            return Ok(None);
        };

        let created_at = row.created_at;
        *row = address.clone();
        row.created_at = created_at;
        row.updated_at = Utc::now();
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: u64) -> Result<(), AddressRepositoryError> {
        let mut rows = self.rows.lock().expect("lock poisoned");
        let before = rows.len();
        rows.retain(|row| row.id != id);
        if rows.len() == before {
            return Err(AddressRepositoryError::missing());
        }
        Ok(())
    }

    async fn list(
        &self,
        filter: ListFilter,
        page: PageRequest,
    ) -> Result<(Vec<Address>, u64), AddressRepositoryError> {
        let rows = self.rows.lock().expect("lock poisoned");
        let mut matching: Vec<Address> = rows
            .iter()
            .filter(|row| matches_filter(row.profile_id, &row.type_, &filter))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(window(matching, page))
    }
}

/// In-memory company store.
#[derive(Default)]
pub struct InMemoryCompanyRepository {
    rows: Mutex<Vec<Company>>,
    next_id: AtomicU64,
}

impl InMemoryCompanyRepository {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }
}

#[async_trait]
impl CompanyRepository for InMemoryCompanyRepository {
    async fn create(&self, company: &Company) -> Result<Company, CompanyRepositoryError> {
        let mut rows = self.rows.lock().expect("lock poisoned");
        let mut stored = company.clone();
        stored.id = self.next_id.fetch_add(1, Ordering::SeqCst);
        rows.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<Company>, CompanyRepositoryError> {
        let rows = self.rows.lock().expect("lock poisoned");
        Ok(rows.iter().find(|row| row.id == id).cloned())
    }

    async fn update(&self, company: &Company) -> Result<Option<Company>, CompanyRepositoryError> {
        let mut rows = self.rows.lock().expect("lock poisoned");
        let Some(row) = rows.iter_mut().find(|row| row.id == company.id) else {
            return Ok(None);
        };

        let created_at = row.created_at;
        *row = company.clone();
        row.created_at = created_at;
        row.updated_at = Utc::now();
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: u64) -> Result<(), CompanyRepositoryError> {
        let mut rows = self.rows.lock().expect("lock poisoned");
        let before = rows.len();
        rows.retain(|row| row.id != id);
        if rows.len() == before {
            return Err(CompanyRepositoryError::missing());
        }
        Ok(())
    }

    async fn list(
        &self,
        filter: ListFilter,
        page: PageRequest,
    ) -> Result<(Vec<Company>, u64), CompanyRepositoryError> {
        let rows = self.rows.lock().expect("lock poisoned");
        let mut matching: Vec<Company> = rows
            .iter()
            .filter(|row| matches_filter(row.profile_id, &row.type_, &filter))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(window(matching, page))
    }
}

/// One set of services over in-memory stores, shared by both transports.
pub struct FixtureBackend {
    /// Profile service instance.
    pub profiles: Arc<ProfileService>,
    /// Contact service instance.
    pub contacts: Arc<ContactService>,
    /// Address service instance.
    pub addresses: Arc<AddressService>,
    /// Company service instance.
    pub companies: Arc<CompanyService>,
}

impl Default for FixtureBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl FixtureBackend {
    /// Build services over fresh, empty in-memory stores.
    #[must_use]
    pub fn new() -> Self {
        Self {
            profiles: Arc::new(ProfileService::new(Arc::new(
                InMemoryProfileRepository::new(),
            ))),
            contacts: Arc::new(ContactService::new(Arc::new(
                InMemoryContactRepository::new(),
            ))),
            addresses: Arc::new(AddressService::new(Arc::new(
                InMemoryAddressRepository::new(),
            ))),
            companies: Arc::new(CompanyService::new(Arc::new(
                InMemoryCompanyRepository::new(),
            ))),
        }
    }

    /// HTTP state over these service instances.
    #[must_use]
    pub fn http_state(&self) -> HttpState {
        HttpState::new(
            Arc::clone(&self.profiles),
            Arc::clone(&self.contacts),
            Arc::clone(&self.addresses),
            Arc::clone(&self.companies),
        )
    }

    /// gRPC server over these service instances with a permissive validator.
    #[must_use]
    pub fn grpc_service(&self) -> ProfileGrpcService {
        self.grpc_service_with(Arc::new(AllowAllAccessValidator))
    }

    /// gRPC server over these service instances with the given validator.
    #[must_use]
    pub fn grpc_service_with(&self, access: Arc<dyn AccessValidator>) -> ProfileGrpcService {
        ProfileGrpcService::new(
            Arc::clone(&self.profiles),
            Arc::clone(&self.contacts),
            Arc::clone(&self.addresses),
            Arc::clone(&self.companies),
            access,
        )
    }
}
