//! gRPC inbound adapter.
//!
//! One `profile.v1.ProfileService` implementation covering all four
//! resources. Every RPC runs the same sequence as the HTTP adapter: API-key
//! gate, conversion into the shared request structs, `validate()`, service
//! call, domain-error-to-status mapping.

use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use tonic::{Request, Response, Status};
use tracing::{error, info};

use crate::domain::ports::{AccessValidator, AccessValidatorError};
use crate::domain::requests::{
    CreateAddressRequest, CreateCompanyRequest, CreateContactRequest, CreateProfileRequest,
    ListAddressesRequest, ListCompaniesRequest, ListContactsRequest, UpdateAddressRequest,
    UpdateCompanyRequest, UpdateContactRequest, UpdateProfileRequest, validate_id,
    validate_user_id,
};
use crate::domain::{
    Address, AddressService, Company, CompanyService, Contact, ContactService, Profile,
    ProfileService,
};
use crate::inbound::grpc::error::{invalid, status_from};
use crate::middleware::api_key::API_KEY_HEADER;
use crate::proto::profile_v1 as pb;
use crate::proto::profile_v1::profile_service_server::ProfileService as ProfileServiceGrpc;

/// gRPC server state: the same service instances the HTTP adapter uses.
pub struct ProfileGrpcService {
    profiles: Arc<ProfileService>,
    contacts: Arc<ContactService>,
    addresses: Arc<AddressService>,
    companies: Arc<CompanyService>,
    access: Arc<dyn AccessValidator>,
}

fn timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn profile_response(profile: Profile) -> pb::ProfileResponse {
    pb::ProfileResponse {
        id: profile.id,
        user_id: profile.user_id,
        email: profile.email,
        created_at: timestamp(profile.created_at),
        updated_at: timestamp(profile.updated_at),
    }
}

fn contact_response(contact: Contact) -> pb::ContactResponse {
    pb::ContactResponse {
        id: contact.id,
        first_name: contact.first_name,
        last_name: contact.last_name,
        nin: contact.nin,
        dob: contact
            .dob
            .map(|dob| dob.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
        phone: contact.phone,
        profile_id: contact.profile_id,
        r#type: contact.type_,
        created_at: timestamp(contact.created_at),
        updated_at: timestamp(contact.updated_at),
    }
}

fn address_response(address: Address) -> pb::AddressResponse {
    pb::AddressResponse {
        id: address.id,
        street_name: address.street_name,
        street_no: address.street_no,
        city: address.city,
        county: address.county,
        country: address.country,
        profile_id: address.profile_id,
        postal_code: address.postal_code,
        building: address.building,
        apartment: address.apartment,
        additional_data: address.additional_data,
        r#type: address.type_,
        created_at: timestamp(address.created_at),
        updated_at: timestamp(address.updated_at),
    }
}

fn company_response(company: Company) -> pb::CompanyResponse {
    pb::CompanyResponse {
        id: company.id,
        name: company.name,
        registration_no: company.registration_no,
        fiscal_code: company.fiscal_code,
        profile_id: company.profile_id,
        r#type: company.type_,
        created_at: timestamp(company.created_at),
        updated_at: timestamp(company.updated_at),
    }
}

fn deleted(entity: &str) -> pb::DeleteResponse {
    pb::DeleteResponse {
        message: format!("{entity} deleted successfully"),
    }
}

impl ProfileGrpcService {
    /// Bundle the entity services and the access validator.
    pub fn new(
        profiles: Arc<ProfileService>,
        contacts: Arc<ContactService>,
        addresses: Arc<AddressService>,
        companies: Arc<CompanyService>,
        access: Arc<dyn AccessValidator>,
    ) -> Self {
        Self {
            profiles,
            contacts,
            addresses,
            companies,
            access,
        }
    }

    /// Gate an RPC on the caller's `x-api-key` metadata.
    async fn authorize<T>(&self, request: &Request<T>) -> Result<(), Status> {
        let api_key = request
            .metadata()
            .get(API_KEY_HEADER)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .trim();

        match self.access.validate_access(api_key).await {
            Ok(()) => Ok(()),
            Err(AccessValidatorError::Denied { message }) => Err(Status::unauthenticated(message)),
            Err(err @ AccessValidatorError::Unavailable { .. }) => {
                error!(error = %err, "access validation backend unavailable");
                Err(Status::internal("internal server error"))
            }
        }
    }
}

#[tonic::async_trait]
impl ProfileServiceGrpc for ProfileGrpcService {
    async fn create_profile(
        &self,
        request: Request<pb::CreateProfileRequest>,
    ) -> Result<Response<pb::ProfileResponse>, Status> {
        self.authorize(&request).await?;
        let msg = request.into_inner();
        let req = CreateProfileRequest {
            user_id: msg.user_id,
            email: msg.email,
        };
        req.validate().map_err(invalid)?;

        info!(user_id = req.user_id, "create profile request received (grpc)");
        let profile = self.profiles.create(&req).await.map_err(status_from)?;
        Ok(Response::new(profile_response(profile)))
    }

    async fn get_profile(
        &self,
        request: Request<pb::GetProfileRequest>,
    ) -> Result<Response<pb::ProfileResponse>, Status> {
        self.authorize(&request).await?;
        let msg = request.into_inner();
        validate_id(msg.id).map_err(invalid)?;

        let profile = self.profiles.get_by_id(msg.id).await.map_err(status_from)?;
        Ok(Response::new(profile_response(profile)))
    }

    async fn get_profile_by_user_id(
        &self,
        request: Request<pb::GetProfileByUserIdRequest>,
    ) -> Result<Response<pb::ProfileResponse>, Status> {
        self.authorize(&request).await?;
        let msg = request.into_inner();
        validate_user_id(msg.user_id).map_err(invalid)?;

        let profile = self
            .profiles
            .get_by_user_id(msg.user_id)
            .await
            .map_err(status_from)?;
        Ok(Response::new(profile_response(profile)))
    }

    async fn update_profile(
        &self,
        request: Request<pb::UpdateProfileRequest>,
    ) -> Result<Response<pb::ProfileResponse>, Status> {
        self.authorize(&request).await?;
        let msg = request.into_inner();
        let req = UpdateProfileRequest {
            id: msg.id,
            email: msg.email,
        };
        req.validate().map_err(invalid)?;

        info!(profile_id = req.id, "update profile request received (grpc)");
        let profile = self.profiles.update(&req).await.map_err(status_from)?;
        Ok(Response::new(profile_response(profile)))
    }

    async fn delete_profile(
        &self,
        request: Request<pb::DeleteProfileRequest>,
    ) -> Result<Response<pb::DeleteResponse>, Status> {
        self.authorize(&request).await?;
        let msg = request.into_inner();
        validate_id(msg.id).map_err(invalid)?;

        info!(profile_id = msg.id, "delete profile request received (grpc)");
        self.profiles.delete(msg.id).await.map_err(status_from)?;
        Ok(Response::new(deleted("profile")))
    }

    async fn create_contact(
        &self,
        request: Request<pb::CreateContactRequest>,
    ) -> Result<Response<pb::ContactResponse>, Status> {
        self.authorize(&request).await?;
        let msg = request.into_inner();
        let req = CreateContactRequest {
            first_name: msg.first_name,
            last_name: msg.last_name,
            nin: msg.nin,
            dob: msg.dob,
            phone: msg.phone,
            profile_id: msg.profile_id,
            type_: msg.r#type,
        };
        req.validate().map_err(invalid)?;

        info!(profile_id = req.profile_id, "create contact request received (grpc)");
        let contact = self.contacts.create(&req).await.map_err(status_from)?;
        Ok(Response::new(contact_response(contact)))
    }

    async fn get_contact(
        &self,
        request: Request<pb::GetContactRequest>,
    ) -> Result<Response<pb::ContactResponse>, Status> {
        self.authorize(&request).await?;
        let msg = request.into_inner();
        validate_id(msg.id).map_err(invalid)?;

        let contact = self.contacts.get_by_id(msg.id).await.map_err(status_from)?;
        Ok(Response::new(contact_response(contact)))
    }

    async fn update_contact(
        &self,
        request: Request<pb::UpdateContactRequest>,
    ) -> Result<Response<pb::ContactResponse>, Status> {
        self.authorize(&request).await?;
        let msg = request.into_inner();
        let req = UpdateContactRequest {
            id: msg.id,
            first_name: msg.first_name,
            last_name: msg.last_name,
            nin: msg.nin,
            dob: msg.dob,
            phone: msg.phone,
            profile_id: msg.profile_id,
            type_: msg.r#type,
        };
        req.validate().map_err(invalid)?;

        info!(contact_id = req.id, "update contact request received (grpc)");
        let contact = self.contacts.update(&req).await.map_err(status_from)?;
        Ok(Response::new(contact_response(contact)))
    }

    async fn delete_contact(
        &self,
        request: Request<pb::DeleteContactRequest>,
    ) -> Result<Response<pb::DeleteResponse>, Status> {
        self.authorize(&request).await?;
        let msg = request.into_inner();
        validate_id(msg.id).map_err(invalid)?;

        info!(contact_id = msg.id, "delete contact request received (grpc)");
        self.contacts.delete(msg.id).await.map_err(status_from)?;
        Ok(Response::new(deleted("contact")))
    }

    async fn list_contacts(
        &self,
        request: Request<pb::ListContactsRequest>,
    ) -> Result<Response<pb::ListContactsResponse>, Status> {
        self.authorize(&request).await?;
        let msg = request.into_inner();
        let req = ListContactsRequest {
            profile_id: msg.profile_id,
            page: msg.page,
            page_size: msg.page_size,
            type_: msg.r#type.trim().to_owned(),
        };
        req.validate().map_err(invalid)?;

        let paged = self.contacts.list(&req).await.map_err(status_from)?;
        Ok(Response::new(pb::ListContactsResponse {
            contacts: paged.items.into_iter().map(contact_response).collect(),
            page: paged.page,
            page_size: paged.page_size,
            total: paged.total,
        }))
    }

    async fn create_address(
        &self,
        request: Request<pb::CreateAddressRequest>,
    ) -> Result<Response<pb::AddressResponse>, Status> {
        self.authorize(&request).await?;
        let msg = request.into_inner();
        let req = CreateAddressRequest {
            street_name: msg.street_name,
            street_no: msg.street_no,
            city: msg.city,
            county: msg.county,
            country: msg.country,
            profile_id: msg.profile_id,
            postal_code: msg.postal_code,
            building: msg.building,
            apartment: msg.apartment,
            additional_data: msg.additional_data,
            type_: msg.r#type,
        };
        req.validate().map_err(invalid)?;

        info!(profile_id = req.profile_id, "create address request received (grpc)");
        let address = self.addresses.create(&req).await.map_err(status_from)?;
        Ok(Response::new(address_response(address)))
    }

    async fn get_address(
        &self,
        request: Request<pb::GetAddressRequest>,
    ) -> Result<Response<pb::AddressResponse>, Status> {
        self.authorize(&request).await?;
        let msg = request.into_inner();
        validate_id(msg.id).map_err(invalid)?;

        let address = self.addresses.get_by_id(msg.id).await.map_err(status_from)?;
        Ok(Response::new(address_response(address)))
    }

    async fn update_address(
        &self,
        request: Request<pb::UpdateAddressRequest>,
    ) -> Result<Response<pb::AddressResponse>, Status> {
        self.authorize(&request).await?;
        let msg = request.into_inner();
        let req = UpdateAddressRequest {
            id: msg.id,
            street_name: msg.street_name,
            street_no: msg.street_no,
            city: msg.city,
            county: msg.county,
            country: msg.country,
            profile_id: msg.profile_id,
            postal_code: msg.postal_code,
            building: msg.building,
            apartment: msg.apartment,
            additional_data: msg.additional_data,
            type_: msg.r#type,
        };
        req.validate().map_err(invalid)?;

        info!(address_id = req.id, "update address request received (grpc)");
        let address = self.addresses.update(&req).await.map_err(status_from)?;
        Ok(Response::new(address_response(address)))
    }

    async fn delete_address(
        &self,
        request: Request<pb::DeleteAddressRequest>,
    ) -> Result<Response<pb::DeleteResponse>, Status> {
        self.authorize(&request).await?;
        let msg = request.into_inner();
        validate_id(msg.id).map_err(invalid)?;

        info!(address_id = msg.id, "delete address request received (grpc)");
        self.addresses.delete(msg.id).await.map_err(status_from)?;
        Ok(Response::new(deleted("address")))
    }

    async fn list_addresses(
        &self,
        request: Request<pb::ListAddressesRequest>,
    ) -> Result<Response<pb::ListAddressesResponse>, Status> {
        self.authorize(&request).await?;
        let msg = request.into_inner();
        let req = ListAddressesRequest {
            profile_id: msg.profile_id,
            page: msg.page,
            page_size: msg.page_size,
            type_: msg.r#type.trim().to_owned(),
        };
        req.validate().map_err(invalid)?;

        let paged = self.addresses.list(&req).await.map_err(status_from)?;
        Ok(Response::new(pb::ListAddressesResponse {
            addresses: paged.items.into_iter().map(address_response).collect(),
            page: paged.page,
            page_size: paged.page_size,
            total: paged.total,
        }))
    }

    async fn create_company(
        &self,
        request: Request<pb::CreateCompanyRequest>,
    ) -> Result<Response<pb::CompanyResponse>, Status> {
        self.authorize(&request).await?;
        let msg = request.into_inner();
        let req = CreateCompanyRequest {
            name: msg.name,
            registration_no: msg.registration_no,
            fiscal_code: msg.fiscal_code,
            profile_id: msg.profile_id,
            type_: msg.r#type,
        };
        req.validate().map_err(invalid)?;

        info!(profile_id = req.profile_id, "create company request received (grpc)");
        let company = self.companies.create(&req).await.map_err(status_from)?;
        Ok(Response::new(company_response(company)))
    }

    async fn get_company(
        &self,
        request: Request<pb::GetCompanyRequest>,
    ) -> Result<Response<pb::CompanyResponse>, Status> {
        self.authorize(&request).await?;
        let msg = request.into_inner();
        validate_id(msg.id).map_err(invalid)?;

        let company = self.companies.get_by_id(msg.id).await.map_err(status_from)?;
        Ok(Response::new(company_response(company)))
    }

    async fn update_company(
        &self,
        request: Request<pb::UpdateCompanyRequest>,
    ) -> Result<Response<pb::CompanyResponse>, Status> {
        self.authorize(&request).await?;
        let msg = request.into_inner();
        let req = UpdateCompanyRequest {
            id: msg.id,
            name: msg.name,
            registration_no: msg.registration_no,
            fiscal_code: msg.fiscal_code,
            profile_id: msg.profile_id,
            type_: msg.r#type,
        };
        req.validate().map_err(invalid)?;

        info!(company_id = req.id, "update company request received (grpc)");
        let company = self.companies.update(&req).await.map_err(status_from)?;
        Ok(Response::new(company_response(company)))
    }

    async fn delete_company(
        &self,
        request: Request<pb::DeleteCompanyRequest>,
    ) -> Result<Response<pb::DeleteResponse>, Status> {
        self.authorize(&request).await?;
        let msg = request.into_inner();
        validate_id(msg.id).map_err(invalid)?;

        info!(company_id = msg.id, "delete company request received (grpc)");
        self.companies.delete(msg.id).await.map_err(status_from)?;
        Ok(Response::new(deleted("company")))
    }

    async fn list_companies(
        &self,
        request: Request<pb::ListCompaniesRequest>,
    ) -> Result<Response<pb::ListCompaniesResponse>, Status> {
        self.authorize(&request).await?;
        let msg = request.into_inner();
        let req = ListCompaniesRequest {
            profile_id: msg.profile_id,
            page: msg.page,
            page_size: msg.page_size,
            type_: msg.r#type.trim().to_owned(),
        };
        req.validate().map_err(invalid)?;

        let paged = self.companies.list(&req).await.map_err(status_from)?;
        Ok(Response::new(pb::ListCompaniesResponse {
            companies: paged.items.into_iter().map(company_response).collect(),
            page: paged.page,
            page_size: paged.page_size,
            total: paged.total,
        }))
    }
}
