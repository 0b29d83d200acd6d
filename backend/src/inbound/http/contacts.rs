//! Contact HTTP handlers.
//!
//! ```text
//! POST   /contacts
//! GET    /contacts/{id}
//! PUT    /contacts/{id}
//! DELETE /contacts/{id}
//! GET    /contacts?profile_id=&page=&page_size=&type=
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use crate::domain::Contact;
use crate::domain::requests::{
    CreateContactRequest, ListContactsRequest, UpdateContactRequest, validate_id,
};
use crate::inbound::http::error::ApiResult;
use crate::inbound::http::schemas::DeleteResponse;
use crate::inbound::http::state::HttpState;

/// Request body for `POST /contacts` and `PUT /contacts/{id}`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ContactBody {
    /// Given name.
    #[serde(default)]
    pub first_name: String,
    /// Family name.
    #[serde(default)]
    pub last_name: String,
    /// National identification number.
    #[serde(default)]
    pub nin: String,
    /// Date of birth as `YYYY-MM-DD`; blank means not provided.
    #[serde(default)]
    pub dob: String,
    /// Phone number.
    #[serde(default)]
    pub phone: String,
    /// Owning profile.
    #[serde(default)]
    pub profile_id: u64,
    /// Classification tag.
    #[serde(default, rename = "type")]
    pub type_: String,
}

/// Query string for `GET /contacts`.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListContactsQuery {
    /// Restrict to one profile when non-zero.
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

/// Contact payload returned by every contact endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct ContactResponse {
    /// Server-assigned surrogate id.
    pub id: u64,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// National identification number.
    pub nin: String,
    /// Date of birth as `YYYY-MM-DD`; null when absent.
    pub dob: Option<String>,
    /// Phone number.
    pub phone: String,
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

impl From<Contact> for ContactResponse {
    fn from(value: Contact) -> Self {
        Self {
            id: value.id,
            first_name: value.first_name,
            last_name: value.last_name,
            nin: value.nin,
            dob: value.dob.map(|dob| dob.format("%Y-%m-%d").to_string()),
            phone: value.phone,
            profile_id: value.profile_id,
            type_: value.type_,
            created_at: value.created_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            updated_at: value.updated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

/// One page of contacts.
#[derive(Debug, Serialize, ToSchema)]
pub struct ContactListResponse {
    /// Contacts inside the requested window, newest first.
    pub contacts: Vec<ContactResponse>,
    /// 1-based page number served.
    pub page: u32,
    /// Window size served.
    pub page_size: u32,
    /// Total matching contacts across all pages.
    pub total: u64,
}

fn create_request_from(body: ContactBody) -> CreateContactRequest {
    CreateContactRequest {
        first_name: body.first_name,
        last_name: body.last_name,
        nin: body.nin,
        dob: body.dob,
        phone: body.phone,
        profile_id: body.profile_id,
        type_: body.type_,
    }
}

/// Create a contact.
#[utoipa::path(
    post,
    path = "/contacts",
    request_body = ContactBody,
    responses(
        (status = 201, description = "Contact created", body = ContactResponse),
        (status = 400, description = "Validation failure", body = crate::domain::Error),
        (status = 500, description = "Internal server error", body = crate::domain::Error)
    ),
    tags = ["contacts"]
)]
#[post("/contacts")]
pub async fn create_contact(
    state: web::Data<HttpState>,
    body: web::Json<ContactBody>,
) -> ApiResult<HttpResponse> {
    let req = create_request_from(body.into_inner());
    req.validate()?;

    info!(profile_id = req.profile_id, "create contact request received");
    let contact = state.contacts.create(&req).await?;
    Ok(HttpResponse::Created().json(ContactResponse::from(contact)))
}

/// Fetch a contact by id.
#[utoipa::path(
    get,
    path = "/contacts/{id}",
    params(("id" = u64, Path, description = "Contact id")),
    responses(
        (status = 200, description = "Contact", body = ContactResponse),
        (status = 400, description = "Invalid id", body = crate::domain::Error),
        (status = 404, description = "Contact not found", body = crate::domain::Error)
    ),
    tags = ["contacts"]
)]
#[get("/contacts/{id}")]
pub async fn get_contact(
    state: web::Data<HttpState>,
    path: web::Path<u64>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    validate_id(id)?;

    let contact = state.contacts.get_by_id(id).await?;
    Ok(HttpResponse::Ok().json(ContactResponse::from(contact)))
}

/// Replace a contact's mutable fields.
#[utoipa::path(
    put,
    path = "/contacts/{id}",
    params(("id" = u64, Path, description = "Contact id")),
    request_body = ContactBody,
    responses(
        (status = 200, description = "Updated contact", body = ContactResponse),
        (status = 400, description = "Validation failure", body = crate::domain::Error),
        (status = 404, description = "Contact not found", body = crate::domain::Error)
    ),
    tags = ["contacts"]
)]
#[put("/contacts/{id}")]
pub async fn update_contact(
    state: web::Data<HttpState>,
    path: web::Path<u64>,
    body: web::Json<ContactBody>,
) -> ApiResult<HttpResponse> {
    let body = body.into_inner();
    let req = UpdateContactRequest {
        id: path.into_inner(),
        first_name: body.first_name,
        last_name: body.last_name,
        nin: body.nin,
        dob: body.dob,
        phone: body.phone,
        profile_id: body.profile_id,
        type_: body.type_,
    };
    req.validate()?;

    info!(contact_id = req.id, "update contact request received");
    let contact = state.contacts.update(&req).await?;
    Ok(HttpResponse::Ok().json(ContactResponse::from(contact)))
}

/// Delete a contact.
#[utoipa::path(
    delete,
    path = "/contacts/{id}",
    params(("id" = u64, Path, description = "Contact id")),
    responses(
        (status = 200, description = "Contact deleted", body = DeleteResponse),
        (status = 400, description = "Invalid id", body = crate::domain::Error),
        (status = 404, description = "Contact not found", body = crate::domain::Error)
    ),
    tags = ["contacts"]
)]
#[delete("/contacts/{id}")]
pub async fn delete_contact(
    state: web::Data<HttpState>,
    path: web::Path<u64>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    validate_id(id)?;

    info!(contact_id = id, "delete contact request received");
    state.contacts.delete(id).await?;
    Ok(HttpResponse::Ok().json(DeleteResponse::deleted("contact")))
}

/// List contacts newest-first.
#[utoipa::path(
    get,
    path = "/contacts",
    params(ListContactsQuery),
    responses(
        (status = 200, description = "One page of contacts", body = ContactListResponse),
        (status = 400, description = "Validation failure", body = crate::domain::Error)
    ),
    tags = ["contacts"]
)]
#[get("/contacts")]
pub async fn list_contacts(
    state: web::Data<HttpState>,
    query: web::Query<ListContactsQuery>,
) -> ApiResult<HttpResponse> {
    let query = query.into_inner();
    let req = ListContactsRequest {
        profile_id: query.profile_id,
        page: query.page,
        page_size: query.page_size,
        type_: query.type_.trim().to_owned(),
    };
    req.validate()?;

    let paged = state.contacts.list(&req).await?;
    Ok(HttpResponse::Ok().json(ContactListResponse {
        contacts: paged.items.into_iter().map(ContactResponse::from).collect(),
        page: paged.page,
        page_size: paged.page_size,
        total: paged.total,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockContactRepository;
    use crate::inbound::http::test_utils::state_with_contacts;
    use actix_web::{App, http::StatusCode, test};
    use chrono::{NaiveDate, Utc};
    use serde_json::{Value, json};

    fn stored(id: u64, profile_id: u64) -> Contact {
        let now = Utc::now();
        Contact {
            id,
            first_name: "Ada".into(),
            last_name: String::new(),
            nin: String::new(),
            dob: NaiveDate::from_ymd_opt(1990, 1, 2),
            phone: String::new(),
            profile_id,
            type_: "personal".into(),
            created_at: now,
            updated_at: now,
        }
    }

    async fn spawn_app(
        repo: MockContactRepository,
    ) -> impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    > {
        test::init_service(
            App::new()
                .app_data(web::Data::new(state_with_contacts(repo)))
                .service(create_contact)
                .service(get_contact)
                .service(update_contact)
                .service(delete_contact)
                .service(list_contacts),
        )
        .await
    }

    #[actix_web::test]
    async fn create_returns_201_and_echoes_the_dob() {
        let mut repo = MockContactRepository::new();
        repo.expect_create().returning(|contact| {
            Ok(Contact {
                id: 11,
                ..contact.clone()
            })
        });

        let app = spawn_app(repo).await;
        let req = test::TestRequest::post()
            .uri("/contacts")
            .set_json(json!({ "profile_id": 5, "dob": "1990-01-02", "first_name": "Ada" }))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["id"], 11);
        assert_eq!(body["dob"], "1990-01-02");
        assert_eq!(body["type"], "");
    }

    #[actix_web::test]
    async fn create_with_wrong_dob_separator_returns_400() {
        let app = spawn_app(MockContactRepository::new()).await;
        let req = test::TestRequest::post()
            .uri("/contacts")
            .set_json(json!({ "profile_id": 5, "dob": "1990/01/02" }))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["message"], "dob must be in YYYY-MM-DD format");
    }

    #[actix_web::test]
    async fn create_without_dob_serialises_null() {
        let mut repo = MockContactRepository::new();
        repo.expect_create().returning(|contact| {
            Ok(Contact {
                id: 11,
                ..contact.clone()
            })
        });

        let app = spawn_app(repo).await;
        let req = test::TestRequest::post()
            .uri("/contacts")
            .set_json(json!({ "profile_id": 5 }))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(res).await;
        assert!(body["dob"].is_null());
    }

    #[actix_web::test]
    async fn list_returns_the_page_envelope() {
        let mut repo = MockContactRepository::new();
        repo.expect_list()
            .withf(|filter, window| {
                filter.profile_id == Some(5)
                    && filter.type_.as_deref() == Some("personal")
                    && window.page() == 2
                    && window.page_size() == 5
            })
            .returning(|_, _| Ok((vec![stored(6, 5)], 7)));

        let app = spawn_app(repo).await;
        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/contacts?profile_id=5&page=2&page_size=5&type=personal")
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["page"], 2);
        assert_eq!(body["page_size"], 5);
        assert_eq!(body["total"], 7);
        assert_eq!(body["contacts"][0]["id"], 6);
    }

    #[actix_web::test]
    async fn list_with_oversized_page_returns_400() {
        let app = spawn_app(MockContactRepository::new()).await;
        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/contacts?page_size=101")
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(
            body["message"],
            "page_size must be less than or equal to 100"
        );
    }

    #[actix_web::test]
    async fn update_passes_full_replacement_to_the_service() {
        let mut repo = MockContactRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(stored(id, 5))));
        repo.expect_update()
            .withf(|contact| contact.first_name.is_empty() && contact.dob.is_none())
            .returning(|contact| Ok(Some(contact.clone())));

        let app = spawn_app(repo).await;
        let req = test::TestRequest::put()
            .uri("/contacts/11")
            .set_json(json!({ "profile_id": 5 }))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["first_name"], "");
        assert!(body["dob"].is_null());
    }

    #[actix_web::test]
    async fn delete_returns_confirmation_message() {
        let mut repo = MockContactRepository::new();
        repo.expect_delete().returning(|_| Ok(()));

        let app = spawn_app(repo).await;
        let res = test::call_service(
            &app,
            test::TestRequest::delete().uri("/contacts/11").to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["message"], "contact deleted successfully");
    }
}
