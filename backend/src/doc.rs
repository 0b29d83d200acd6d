//! OpenAPI document for the HTTP surface.

use actix_web::{get, web};
use utoipa::OpenApi;

use crate::domain;
use crate::inbound::http::{addresses, companies, contacts, health, profiles, schemas};

/// OpenAPI description of every REST endpoint.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Profile Service API",
        description = "CRUD and list operations over profiles, contacts, addresses and companies."
    ),
    paths(
        health::health,
        health::ready,
        health::live,
        profiles::create_profile,
        profiles::get_profile,
        profiles::get_profile_by_user_id,
        profiles::update_profile,
        profiles::delete_profile,
        contacts::create_contact,
        contacts::get_contact,
        contacts::update_contact,
        contacts::delete_contact,
        contacts::list_contacts,
        addresses::create_address,
        addresses::get_address,
        addresses::update_address,
        addresses::delete_address,
        addresses::list_addresses,
        companies::create_company,
        companies::get_company,
        companies::update_company,
        companies::delete_company,
        companies::list_companies,
    ),
    components(schemas(
        domain::Error,
        domain::ErrorCode,
        schemas::DeleteResponse,
        profiles::CreateProfileBody,
        profiles::UpdateProfileBody,
        profiles::ProfileResponse,
        contacts::ContactBody,
        contacts::ContactResponse,
        contacts::ContactListResponse,
        addresses::AddressBody,
        addresses::AddressResponse,
        addresses::AddressListResponse,
        companies::CompanyBody,
        companies::CompanyResponse,
        companies::CompanyListResponse,
    )),
    tags(
        (name = "health", description = "Service health probes"),
        (name = "profiles", description = "Profile CRUD"),
        (name = "contacts", description = "Contact CRUD and listing"),
        (name = "addresses", description = "Address CRUD and listing"),
        (name = "companies", description = "Company CRUD and listing"),
    )
)]
pub struct ApiDoc;

/// Serve the generated OpenAPI document.
#[get("/api-docs/openapi.json")]
pub async fn openapi_json() -> web::Json<utoipa::openapi::OpenApi> {
    web::Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_covers_every_route() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        assert!(paths.contains_key("/health"));
        assert!(paths.contains_key("/profiles"));
        assert!(paths.contains_key("/profiles/{id}"));
        assert!(paths.contains_key("/profiles/user/{user_id}"));
        assert!(paths.contains_key("/contacts"));
        assert!(paths.contains_key("/addresses"));
        assert!(paths.contains_key("/companies"));
    }
}
