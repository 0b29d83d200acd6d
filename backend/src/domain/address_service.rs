//! Address business rules.

use std::sync::Arc;

use chrono::Utc;
use pagination::{PageRequest, Paged};

use crate::domain::ports::{AddressRepository, AddressRepositoryError, ListFilter};
use crate::domain::requests::{CreateAddressRequest, ListAddressesRequest, UpdateAddressRequest};
use crate::domain::{Address, Error};

/// Orchestrates address persistence.
#[derive(Clone)]
pub struct AddressService {
    repo: Arc<dyn AddressRepository>,
}

fn map_repo_error(error: AddressRepositoryError) -> Error {
    match error {
        AddressRepositoryError::Missing {} => Error::not_found("address not found"),
        AddressRepositoryError::Connection { message } | AddressRepositoryError::Query { message } => {
            Error::internal(message)
        }
    }
}

impl AddressService {
    /// Create a service backed by the given repository.
    pub fn new(repo: Arc<dyn AddressRepository>) -> Self {
        Self { repo }
    }

    /// Create an address, stamping both timestamps with the current time.
    pub async fn create(&self, req: &CreateAddressRequest) -> Result<Address, Error> {
        let now = Utc::now();
        let address = Address {
            id: 0,
            street_name: req.street_name.clone(),
            street_no: req.street_no.clone(),
            city: req.city.clone(),
            county: req.county.clone(),
            country: req.country.clone(),
            profile_id: req.profile_id,
            postal_code: req.postal_code.clone(),
            building: req.building.clone(),
            apartment: req.apartment.clone(),
            additional_data: req.additional_data.clone(),
            type_: req.type_.clone(),
            created_at: now,
            updated_at: now,
        };

        self.repo.create(&address).await.map_err(map_repo_error)
    }

    /// Fetch an address by id; a repository miss becomes `NotFound`.
    pub async fn get_by_id(&self, id: u64) -> Result<Address, Error> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(map_repo_error)?
            .ok_or_else(|| Error::not_found("address not found"))
    }

    /// Replace every mutable field of the address (full-replace semantics).
    pub async fn update(&self, req: &UpdateAddressRequest) -> Result<Address, Error> {
        let mut address = self
            .repo
            .find_by_id(req.id)
            .await
            .map_err(map_repo_error)?
            .ok_or_else(|| Error::not_found("address not found"))?;

        address.street_name = req.street_name.clone();
        address.street_no = req.street_no.clone();
        address.city = req.city.clone();
        address.county = req.county.clone();
        address.country = req.country.clone();
        address.profile_id = req.profile_id;
        address.postal_code = req.postal_code.clone();
        address.building = req.building.clone();
        address.apartment = req.apartment.clone();
        address.additional_data = req.additional_data.clone();
        address.type_ = req.type_.clone();

        match self.repo.update(&address).await.map_err(map_repo_error)? {
            Some(stored) => Ok(stored),
            None => Ok(address),
        }
    }

    /// Delete an address by id.
    pub async fn delete(&self, id: u64) -> Result<(), Error> {
        self.repo.delete(id).await.map_err(map_repo_error)
    }

    /// List addresses newest-first with profile and optional type filters.
    pub async fn list(&self, req: &ListAddressesRequest) -> Result<Paged<Address>, Error> {
        let page = PageRequest::normalised(req.page, req.page_size);
        let filter = ListFilter::from_raw(req.profile_id, &req.type_);

        let (items, total) = self
            .repo
            .list(filter, page)
            .await
            .map_err(map_repo_error)?;

        Ok(Paged::new(items, page, total))
    }
}
