//! Contact business rules.

use std::sync::Arc;

use chrono::Utc;
use pagination::{PageRequest, Paged};

use crate::domain::ports::{ContactRepository, ContactRepositoryError, ListFilter};
use crate::domain::requests::{
    CreateContactRequest, ListContactsRequest, UpdateContactRequest, parse_optional_dob,
};
use crate::domain::{Contact, Error};

/// Orchestrates contact persistence.
///
/// The date-of-birth string from the wire is converted to a nullable date
/// here, not in the repository; a blank value means "no date".
#[derive(Clone)]
pub struct ContactService {
    repo: Arc<dyn ContactRepository>,
}

fn map_repo_error(error: ContactRepositoryError) -> Error {
    match error {
        ContactRepositoryError::Missing {} => Error::not_found("contact not found"),
        ContactRepositoryError::Connection { message } | ContactRepositoryError::Query { message } => {
            Error::internal(message)
        }
    }
}

impl ContactService {
    /// Create a service backed by the given repository.
    pub fn new(repo: Arc<dyn ContactRepository>) -> Self {
        Self { repo }
    }

    /// Create a contact, stamping both timestamps with the current time.
    pub async fn create(&self, req: &CreateContactRequest) -> Result<Contact, Error> {
        let dob = parse_optional_dob(&req.dob).map_err(|err| Error::invalid_request(err.to_string()))?;

        let now = Utc::now();
        let contact = Contact {
            id: 0,
            first_name: req.first_name.clone(),
            last_name: req.last_name.clone(),
            nin: req.nin.clone(),
            dob,
            phone: req.phone.clone(),
            profile_id: req.profile_id,
            type_: req.type_.clone(),
            created_at: now,
            updated_at: now,
        };

        self.repo.create(&contact).await.map_err(map_repo_error)
    }

    /// Fetch a contact by id; a repository miss becomes `NotFound`.
    pub async fn get_by_id(&self, id: u64) -> Result<Contact, Error> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(map_repo_error)?
            .ok_or_else(|| Error::not_found("contact not found"))
    }

    /// Replace every mutable field of the contact.
    ///
    /// Full-replace semantics: optional fields omitted from the request end
    /// up empty or null, never "left unchanged".
    pub async fn update(&self, req: &UpdateContactRequest) -> Result<Contact, Error> {
        let mut contact = self
            .repo
            .find_by_id(req.id)
            .await
            .map_err(map_repo_error)?
            .ok_or_else(|| Error::not_found("contact not found"))?;

        let dob = parse_optional_dob(&req.dob).map_err(|err| Error::invalid_request(err.to_string()))?;

        contact.first_name = req.first_name.clone();
        contact.last_name = req.last_name.clone();
        contact.nin = req.nin.clone();
        contact.dob = dob;
        contact.phone = req.phone.clone();
        contact.profile_id = req.profile_id;
        contact.type_ = req.type_.clone();

        match self.repo.update(&contact).await.map_err(map_repo_error)? {
            Some(stored) => Ok(stored),
            // Zero rows matched after the existence check above; the stored
            // values were identical, so the loaded copy is authoritative.
            None => Ok(contact),
        }
    }

    /// Delete a contact by id.
    pub async fn delete(&self, id: u64) -> Result<(), Error> {
        self.repo.delete(id).await.map_err(map_repo_error)
    }

    /// List contacts newest-first with optional profile and type filters.
    pub async fn list(&self, req: &ListContactsRequest) -> Result<Paged<Contact>, Error> {
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
