//! Address HTTP handlers.
//!
//! ```text
//! POST   /addresses
//! GET    /addresses/{id}
//! PUT    /addresses/{id}
//! DELETE /addresses/{id}
//! GET    /addresses?profile_id=&page=&page_size=&type=
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use crate::domain::Address;
use crate::domain::requests::{
    CreateAddressRequest, ListAddressesRequest, UpdateAddressRequest, validate_id,
};
use crate::inbound::http::error::ApiResult;
use crate::inbound::http::schemas::DeleteResponse;
use crate::inbound::http::state::HttpState;

/// Request body for `POST /addresses` and `PUT /addresses/{id}`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct AddressBody {
    /// Street name (required).
    #[serde(default)]
    pub street_name: String,
    /// Street number (required).
    #[serde(default)]
    pub street_no: String,
    /// City (required).
    #[serde(default)]
    pub city: String,
    /// County or region (required).
    #[serde(default)]
    pub county: String,
    /// Country (required).
    #[serde(default)]
    pub country: String,
    /// Owning profile.
    #[serde(default)]
    pub profile_id: u64,
    /// Postal code.
    #[serde(default)]
    pub postal_code: String,
    /// Building identifier.
    #[serde(default)]
    pub building: String,
    /// Apartment identifier.
    #[serde(default)]
    pub apartment: String,
    /// Free text, at most 512 characters.
    #[serde(default)]
    pub additional_data: String,
    /// Classification tag.
    #[serde(default, rename = "type")]
    pub type_: String,
}

/// Query string for `GET /addresses`.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListAddressesQuery {
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

/// Address payload returned by every address endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct AddressResponse {
    /// Server-assigned surrogate id.
    pub id: u64,
    /// Street name.
    pub street_name: String,
    /// Street number.
    pub street_no: String,
    /// City.
    pub city: String,
    /// County or region.
    pub county: String,
    /// Country.
    pub country: String,
    /// Owning profile.
    pub profile_id: u64,
    /// Postal code.
    pub postal_code: String,
    /// Building identifier.
    pub building: String,
    /// Apartment identifier.
    pub apartment: String,
    /// Free text.
    pub additional_data: String,
    /// Classification tag.
    #[serde(rename = "type")]
    pub type_: String,
    /// Creation timestamp, RFC 3339.
    pub created_at: String,
    /// Last-modification timestamp, RFC 3339.
    pub updated_at: String,
}

impl From<Address> for AddressResponse {
    fn from(value: Address) -> Self {
        Self {
            id: value.id,
            street_name: value.street_name,
            street_no: value.street_no,
            city: value.city,
            county: value.county,
            country: value.country,
            profile_id: value.profile_id,
            postal_code: value.postal_code,
            building: value.building,
            apartment: value.apartment,
            additional_data: value.additional_data,
            type_: value.type_,
            created_at: value.created_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            updated_at: value.updated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

/// One page of addresses.
#[derive(Debug, Serialize, ToSchema)]
pub struct AddressListResponse {
    /// Addresses inside the requested window, newest first.
    pub addresses: Vec<AddressResponse>,
    /// 1-based page number served.
    pub page: u32,
    /// Window size served.
    pub page_size: u32,
    /// Total matching addresses across all pages.
    pub total: u64,
}

/// Create an address.
#[utoipa::path(
    post,
    path = "/addresses",
    request_body = AddressBody,
    responses(
        (status = 201, description = "Address created", body = AddressResponse),
        (status = 400, description = "Validation failure", body = crate::domain::Error),
        (status = 500, description = "Internal server error", body = crate::domain::Error)
    ),
    tags = ["addresses"]
)]
#[post("/addresses")]
pub async fn create_address(
    state: web::Data<HttpState>,
    body: web::Json<AddressBody>,
) -> ApiResult<HttpResponse> {
    let body = body.into_inner();
    let req = CreateAddressRequest {
        street_name: body.street_name,
        street_no: body.street_no,
        city: body.city,
        county: body.county,
        country: body.country,
        profile_id: body.profile_id,
        postal_code: body.postal_code,
        building: body.building,
        apartment: body.apartment,
        additional_data: body.additional_data,
        type_: body.type_,
    };
    req.validate()?;

    info!(profile_id = req.profile_id, "create address request received");
    let address = state.addresses.create(&req).await?;
    Ok(HttpResponse::Created().json(AddressResponse::from(address)))
}

/// Fetch an address by id.
#[utoipa::path(
    get,
    path = "/addresses/{id}",
    params(("id" = u64, Path, description = "Address id")),
    responses(
        (status = 200, description = "Address", body = AddressResponse),
        (status = 400, description = "Invalid id", body = crate::domain::Error),
        (status = 404, description = "Address not found", body = crate::domain::Error)
    ),
    tags = ["addresses"]
)]
#[get("/addresses/{id}")]
pub async fn get_address(
    state: web::Data<HttpState>,
    path: web::Path<u64>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    validate_id(id)?;

    let address = state.addresses.get_by_id(id).await?;
    Ok(HttpResponse::Ok().json(AddressResponse::from(address)))
}

/// Replace an address's mutable fields.
#[utoipa::path(
    put,
    path = "/addresses/{id}",
    params(("id" = u64, Path, description = "Address id")),
    request_body = AddressBody,
    responses(
        (status = 200, description = "Updated address", body = AddressResponse),
        (status = 400, description = "Validation failure", body = crate::domain::Error),
        (status = 404, description = "Address not found", body = crate::domain::Error)
    ),
    tags = ["addresses"]
)]
#[put("/addresses/{id}")]
pub async fn update_address(
    state: web::Data<HttpState>,
    path: web::Path<u64>,
    body: web::Json<AddressBody>,
) -> ApiResult<HttpResponse> {
    let body = body.into_inner();
    let req = UpdateAddressRequest {
        id: path.into_inner(),
        street_name: body.street_name,
        street_no: body.street_no,
        city: body.city,
        county: body.county,
        country: body.country,
        profile_id: body.profile_id,
        postal_code: body.postal_code,
        building: body.building,
        apartment: body.apartment,
        additional_data: body.additional_data,
        type_: body.type_,
    };
    req.validate()?;

    info!(address_id = req.id, "update address request received");
    let address = state.addresses.update(&req).await?;
    Ok(HttpResponse::Ok().json(AddressResponse::from(address)))
}

/// Delete an address.
#[utoipa::path(
    delete,
    path = "/addresses/{id}",
    params(("id" = u64, Path, description = "Address id")),
    responses(
        (status = 200, description = "Address deleted", body = DeleteResponse),
        (status = 400, description = "Invalid id", body = crate::domain::Error),
        (status = 404, description = "Address not found", body = crate::domain::Error)
    ),
    tags = ["addresses"]
)]
#[delete("/addresses/{id}")]
pub async fn delete_address(
    state: web::Data<HttpState>,
    path: web::Path<u64>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    validate_id(id)?;

    info!(address_id = id, "delete address request received");
    state.addresses.delete(id).await?;
    Ok(HttpResponse::Ok().json(DeleteResponse::deleted("address")))
}

/// List a profile's addresses newest-first.
#[utoipa::path(
    get,
    path = "/addresses",
    params(ListAddressesQuery),
    responses(
        (status = 200, description = "One page of addresses", body = AddressListResponse),
        (status = 400, description = "Validation failure", body = crate::domain::Error)
    ),
    tags = ["addresses"]
)]
#[get("/addresses")]
pub async fn list_addresses(
    state: web::Data<HttpState>,
    query: web::Query<ListAddressesQuery>,
) -> ApiResult<HttpResponse> {
    let query = query.into_inner();
    let req = ListAddressesRequest {
        profile_id: query.profile_id,
        page: query.page,
        page_size: query.page_size,
        type_: query.type_.trim().to_owned(),
    };
    req.validate()?;

    let paged = state.addresses.list(&req).await?;
    Ok(HttpResponse::Ok().json(AddressListResponse {
        addresses: paged.items.into_iter().map(AddressResponse::from).collect(),
        page: paged.page,
        page_size: paged.page_size,
        total: paged.total,
    }))
}
