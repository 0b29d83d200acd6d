//! Company business rules.

use std::sync::Arc;

use chrono::Utc;
use pagination::{PageRequest, Paged};

use crate::domain::ports::{CompanyRepository, CompanyRepositoryError, ListFilter};
use crate::domain::requests::{CreateCompanyRequest, ListCompaniesRequest, UpdateCompanyRequest};
use crate::domain::{Company, Error};

/// Orchestrates company persistence.
#[derive(Clone)]
pub struct CompanyService {
    repo: Arc<dyn CompanyRepository>,
}

fn map_repo_error(error: CompanyRepositoryError) -> Error {
    match error {
        CompanyRepositoryError::Missing {} => Error::not_found("company not found"),
        CompanyRepositoryError::Connection { message } | CompanyRepositoryError::Query { message } => {
            Error::internal(message)
        }
    }
}

impl CompanyService {
    /// Create a service backed by the given repository.
    pub fn new(repo: Arc<dyn CompanyRepository>) -> Self {
        Self { repo }
    }

    /// Create a company, stamping both timestamps with the current time.
    pub async fn create(&self, req: &CreateCompanyRequest) -> Result<Company, Error> {
        let now = Utc::now();
        let company = Company {
            id: 0,
            name: req.name.clone(),
            registration_no: req.registration_no.clone(),
            fiscal_code: req.fiscal_code.clone(),
            profile_id: req.profile_id,
            type_: req.type_.clone(),
            created_at: now,
            updated_at: now,
        };

        self.repo.create(&company).await.map_err(map_repo_error)
    }

    /// Fetch a company by id; a repository miss becomes `NotFound`.
    pub async fn get_by_id(&self, id: u64) -> Result<Company, Error> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(map_repo_error)?
            .ok_or_else(|| Error::not_found("company not found"))
    }

    /// Replace every mutable field of the company (full-replace semantics).
    pub async fn update(&self, req: &UpdateCompanyRequest) -> Result<Company, Error> {
        let mut company = self
            .repo
            .find_by_id(req.id)
            .await
            .map_err(map_repo_error)?
            .ok_or_else(|| Error::not_found("company not found"))?;

        company.name = req.name.clone();
        company.registration_no = req.registration_no.clone();
        company.fiscal_code = req.fiscal_code.clone();
        company.profile_id = req.profile_id;
        company.type_ = req.type_.clone();

        match self.repo.update(&company).await.map_err(map_repo_error)? {
            Some(stored) => Ok(stored),
            None => Ok(company),
        }
    }

    /// Delete a company by id.
    pub async fn delete(&self, id: u64) -> Result<(), Error> {
        self.repo.delete(id).await.map_err(map_repo_error)
    }

    /// List companies newest-first with profile and optional type filters.
    pub async fn list(&self, req: &ListCompaniesRequest) -> Result<Paged<Company>, Error> {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockCompanyRepository;

    fn stored_company(id: u64) -> Company {
        let now = Utc::now();
        Company {
            id,
            name: "Acme".into(),
            registration_no: "J12/345".into(),
            fiscal_code: "RO123".into(),
            profile_id: 3,
            type_: "llc".into(),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn create_returns_the_stored_record() {
        let mut repo = MockCompanyRepository::new();
        repo.expect_create()
            .withf(|company| company.id == 0 && company.created_at == company.updated_at)
            .returning(|company| {
                Ok(Company {
                    id: 31,
                    ..company.clone()
                })
            });

        let service = CompanyService::new(Arc::new(repo));
        let req = CreateCompanyRequest {
            name: "Acme".into(),
            registration_no: "J12/345".into(),
            fiscal_code: "RO123".into(),
            profile_id: 3,
            ..CreateCompanyRequest::default()
        };
        let company = service.create(&req).await.expect("create should succeed");
        assert_eq!(company.id, 31);
        assert_eq!(company.name, "Acme");
    }

    #[tokio::test]
    async fn update_replaces_all_mutable_fields() {
        let mut repo = MockCompanyRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(stored_company(id))));
        repo.expect_update()
            .withf(|company| company.name == "New Acme" && company.type_.is_empty())
            .returning(|company| Ok(Some(company.clone())));

        let service = CompanyService::new(Arc::new(repo));
        let req = UpdateCompanyRequest {
            id: 31,
            name: "New Acme".into(),
            registration_no: "J12/345".into(),
            fiscal_code: "RO123".into(),
            profile_id: 3,
            ..UpdateCompanyRequest::default()
        };
        let company = service.update(&req).await.expect("update should succeed");
        assert_eq!(company.name, "New Acme");
        assert!(company.type_.is_empty());
    }

    #[tokio::test]
    async fn get_by_id_maps_miss_to_not_found() {
        let mut repo = MockCompanyRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let service = CompanyService::new(Arc::new(repo));
        let err = service.get_by_id(4).await.expect_err("lookup should miss");
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "company not found");
    }

    #[tokio::test]
    async fn delete_maps_missing_row_to_not_found() {
        let mut repo = MockCompanyRepository::new();
        repo.expect_delete()
            .returning(|_| Err(CompanyRepositoryError::missing()));

        let service = CompanyService::new(Arc::new(repo));
        let err = service.delete(4).await.expect_err("delete should miss");
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn list_defaults_the_window() {
        let mut repo = MockCompanyRepository::new();
        repo.expect_list()
            .withf(|filter, window| {
                filter.profile_id == Some(3) && window.page() == 1 && window.page_size() == 20
            })
            .returning(|_, _| Ok((vec![stored_company(31)], 1)));

        let service = CompanyService::new(Arc::new(repo));
        let req = ListCompaniesRequest {
            profile_id: 3,
            ..ListCompaniesRequest::default()
        };
        let paged = service.list(&req).await.expect("list should succeed");
        assert_eq!(paged.page, 1);
        assert_eq!(paged.page_size, 20);
        assert_eq!(paged.items.len(), 1);
    }
}
