//! Company HTTP handlers.
//!
//! ```text
//! POST   /companies
//! GET    /companies/{id}
//! PUT    /companies/{id}
//! DELETE /companies/{id}
//! GET    /companies?profile_id=&page=&page_size=&type=
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use crate::domain::Company;
use crate::domain::requests::{
    CreateCompanyRequest, ListCompaniesRequest, UpdateCompanyRequest, validate_id,
};
use crate::inbound::http::error::ApiResult;
use crate::inbound::http::schemas::DeleteResponse;
use crate::inbound::http::state::HttpState;

/// Request body for `POST /companies` and `PUT /companies/{id}`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CompanyBody {
    /// Legal name (required).
    #[serde(default)]
    pub name: String,
    /// Registration number (required).
    #[serde(default)]
    pub registration_no: String,
    /// Fiscal code (required).
    #[serde(default)]
    pub fiscal_code: String,
    /// Owning profile.
    #[serde(default)]
    pub profile_id: u64,
    /// Classification tag.
    #[serde(default, rename = "type")]
    pub type_: String,
}

/// Query string for `GET /companies`.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListCompaniesQuery {
    /// Owning profile (required).
    #[serde(default)]
    pub profile_id: u64,
    /// 1-based page number.
    #[serde(default)]
    pub page: u32,
    /// Window size, at most 100.
    #[serde(default)]
    pub page_size: u32,
    /// Exact-match classification filter.
    #[serde(default, rename = "type")]
    pub type_: String,
}

/// Company payload returned by every company endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct CompanyResponse {
    /// Server-assigned surrogate id.
    pub id: u64,
    /// Legal name.
    pub name: String,
    /// Registration number.
    pub registration_no: String,
    /// Fiscal code.
    pub fiscal_code: String,
    /// Owning profile.
    pub profile_id: u64,
    /// Classification tag.
    #[serde(rename = "type")]
    pub type_: String,
    /// Creation timestamp, RFC 3339.
    pub created_at: String,
    /// Last-modification timestamp, RFC 3339.
    pub updated_at: String,
}

impl From<Company> for CompanyResponse {
    fn from(value: Company) -> Self {
        Self {
            id: value.id,
            name: value.name,
            registration_no: value.registration_no,
            fiscal_code: value.fiscal_code,
            profile_id: value.profile_id,
            type_: value.type_,
            created_at: value.created_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            updated_at: value.updated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

/// One page of companies.
#[derive(Debug, Serialize, ToSchema)]
pub struct CompanyListResponse {
    /// Companies inside the requested window, newest first.
    pub companies: Vec<CompanyResponse>,
    /// 1-based page number served.
    pub page: u32,
    /// Window size served.
    pub page_size: u32,
    /// Total matching companies across all pages.
    pub total: u64,
}

/// Create a company.
#[utoipa::path(
    post,
    path = "/companies",
    request_body = CompanyBody,
    responses(
        (status = 201, description = "Company created", body = CompanyResponse),
        (status = 400, description = "Validation failure", body = crate::domain::Error),
        (status = 500, description = "Internal server error", body = crate::domain::Error)
    ),
    tags = ["companies"]
)]
#[post("/companies")]
pub async fn create_company(
    state: web::Data<HttpState>,
    body: web::Json<CompanyBody>,
) -> ApiResult<HttpResponse> {
    let body = body.into_inner();
    let req = CreateCompanyRequest {
        name: body.name,
        registration_no: body.registration_no,
        fiscal_code: body.fiscal_code,
        profile_id: body.profile_id,
        type_: body.type_,
    };
    req.validate()?;

    info!(profile_id = req.profile_id, "create company request received");
    let company = state.companies.create(&req).await?;
    Ok(HttpResponse::Created().json(CompanyResponse::from(company)))
}

/// Fetch a company by id.
#[utoipa::path(
    get,
    path = "/companies/{id}",
    params(("id" = u64, Path, description = "Company id")),
    responses(
        (status = 200, description = "Company", body = CompanyResponse),
        (status = 400, description = "Invalid id", body = crate::domain::Error),
        (status = 404, description = "Company not found", body = crate::domain::Error)
    ),
    tags = ["companies"]
)]
#[get("/companies/{id}")]
pub async fn get_company(
    state: web::Data<HttpState>,
    path: web::Path<u64>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    validate_id(id)?;

    let company = state.companies.get_by_id(id).await?;
    Ok(HttpResponse::Ok().json(CompanyResponse::from(company)))
}

/// Replace a company's mutable fields.
#[utoipa::path(
    put,
    path = "/companies/{id}",
    params(("id" = u64, Path, description = "Company id")),
    request_body = CompanyBody,
    responses(
        (status = 200, description = "Updated company", body = CompanyResponse),
        (status = 400, description = "Validation failure", body = crate::domain::Error),
        (status = 404, description = "Company not found", body = crate::domain::Error)
    ),
    tags = ["companies"]
)]
#[put("/companies/{id}")]
pub async fn update_company(
    state: web::Data<HttpState>,
    path: web::Path<u64>,
    body: web::Json<CompanyBody>,
) -> ApiResult<HttpResponse> {
    let body = body.into_inner();
    let req = UpdateCompanyRequest {
        id: path.into_inner(),
        name: body.name,
        registration_no: body.registration_no,
        fiscal_code: body.fiscal_code,
        profile_id: body.profile_id,
        type_: body.type_,
    };
    req.validate()?;

    info!(company_id = req.id, "update company request received");
    let company = state.companies.update(&req).await?;
    Ok(HttpResponse::Ok().json(CompanyResponse::from(company)))
}

/// Delete a company.
#[utoipa::path(
    delete,
    path = "/companies/{id}",
    params(("id" = u64, Path, description = "Company id")),
    responses(
        (status = 200, description = "Company deleted", body = DeleteResponse),
        (status = 400, description = "Invalid id", body = crate::domain::Error),
        (status = 404, description = "Company not found", body = crate::domain::Error)
    ),
    tags = ["companies"]
)]
#[delete("/companies/{id}")]
pub async fn delete_company(
    state: web::Data<HttpState>,
    path: web::Path<u64>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    validate_id(id)?;

    info!(company_id = id, "delete company request received");
    state.companies.delete(id).await?;
    Ok(HttpResponse::Ok().json(DeleteResponse::deleted("company")))
}

/// List a profile's companies newest-first.
#[utoipa::path(
    get,
    path = "/companies",
    params(ListCompaniesQuery),
    responses(
        (status = 200, description = "One page of companies", body = CompanyListResponse),
        (status = 400, description = "Validation failure", body = crate::domain::Error)
    ),
    tags = ["companies"]
)]
#[get("/companies")]
pub async fn list_companies(
    state: web::Data<HttpState>,
    query: web::Query<ListCompaniesQuery>,
) -> ApiResult<HttpResponse> {
    let query = query.into_inner();
    let req = ListCompaniesRequest {
        profile_id: query.profile_id,
        page: query.page,
        page_size: query.page_size,
        type_: query.type_.trim().to_owned(),
    };
    req.validate()?;

    let paged = state.companies.list(&req).await?;
    Ok(HttpResponse::Ok().json(CompanyListResponse {
        companies: paged.items.into_iter().map(CompanyResponse::from).collect(),
        page: paged.page,
        page_size: paged.page_size,
        total: paged.total,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockCompanyRepository;
    use crate::inbound::http::test_utils::state_with_companies;
    use actix_web::{App, http::StatusCode, test};
    use chrono::Utc;
    use serde_json::{Value, json};

    fn stored(id: u64, profile_id: u64) -> Company {
        let now = Utc::now();
        Company {
            id,
            name: "Acme".into(),
            registration_no: "J12/345".into(),
            fiscal_code: "RO123".into(),
            profile_id,
            type_: "llc".into(),
            created_at: now,
            updated_at: now,
        }
    }

    async fn spawn_app(
        repo: MockCompanyRepository,
    ) -> impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    > {
        test::init_service(
            App::new()
                .app_data(web::Data::new(state_with_companies(repo)))
                .service(create_company)
                .service(get_company)
                .service(update_company)
                .service(delete_company)
                .service(list_companies),
        )
        .await
    }

    #[actix_web::test]
    async fn create_returns_201_with_the_stored_company() {
        let mut repo = MockCompanyRepository::new();
        repo.expect_create().returning(|company| {
            Ok(Company {
                id: 31,
                ..company.clone()
            })
        });

        let app = spawn_app(repo).await;
        let req = test::TestRequest::post()
            .uri("/companies")
            .set_json(json!({
                "name": "Acme",
                "registration_no": "J12/345",
                "fiscal_code": "RO123",
                "profile_id": 3
            }))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["id"], 31);
        assert_eq!(body["name"], "Acme");
    }

    #[actix_web::test]
    async fn create_with_blank_name_returns_400() {
        let app = spawn_app(MockCompanyRepository::new()).await;
        let req = test::TestRequest::post()
            .uri("/companies")
            .set_json(json!({
                "name": " ",
                "registration_no": "J12/345",
                "fiscal_code": "RO123",
                "profile_id": 3
            }))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["message"], "name is required");
    }

    #[actix_web::test]
    async fn get_missing_company_returns_404() {
        let mut repo = MockCompanyRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let app = spawn_app(repo).await;
        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/companies/31").to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn list_returns_the_page_envelope() {
        let mut repo = MockCompanyRepository::new();
        repo.expect_list()
            .withf(|filter, window| {
                filter.profile_id == Some(3) && window.page() == 1 && window.page_size() == 20
            })
            .returning(|_, _| Ok((vec![stored(31, 3)], 1)));

        let app = spawn_app(repo).await;
        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/companies?profile_id=3")
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["total"], 1);
        assert_eq!(body["companies"][0]["name"], "Acme");
    }

    #[actix_web::test]
    async fn delete_returns_confirmation_message() {
        let mut repo = MockCompanyRepository::new();
        repo.expect_delete().returning(|_| Ok(()));

        let app = spawn_app(repo).await;
        let res = test::call_service(
            &app,
            test::TestRequest::delete().uri("/companies/31").to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["message"], "company deleted successfully");
    }
}
