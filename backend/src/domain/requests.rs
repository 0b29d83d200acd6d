//! Request parameter objects and their validation rules.
//!
//! Both inbound adapters (HTTP and gRPC) convert their wire types into these
//! structs and call `validate()` before touching a service, so the field
//! rules live in exactly one place and cannot drift between transports.
//! Validation stops at the first violated rule and surfaces its message.

use chrono::NaiveDate;

/// Date format accepted for a contact's date of birth.
const DOB_FORMAT: &str = "%Y-%m-%d";

/// First violated validation rule for an inbound request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A required field is missing, zero or blank.
    #[error("{0} is required")]
    MissingField(&'static str),
    /// A path or message id is zero.
    #[error("invalid id provided")]
    InvalidId,
    /// A user id is zero.
    #[error("invalid user id provided")]
    InvalidUserId,
    /// An email failed validation.
    #[error("invalid email")]
    InvalidEmail,
    /// A date of birth does not parse as `YYYY-MM-DD`.
    #[error("dob must be in YYYY-MM-DD format")]
    InvalidDob,
    /// A free-text field exceeds its length cap.
    #[error("{field} must be less than or equal to {max} characters")]
    FieldTooLong {
        /// Name of the offending field.
        field: &'static str,
        /// Maximum accepted length in characters.
        max: usize,
    },
    /// The requested page window exceeds the cap.
    #[error(transparent)]
    PageSize(#[from] pagination::PageSizeError),
}

impl From<ValidationError> for crate::domain::Error {
    fn from(err: ValidationError) -> Self {
        Self::invalid_request(err.to_string())
    }
}

/// Parse an optional `YYYY-MM-DD` date-of-birth string.
///
/// Blank or whitespace-only input means "no date" and yields `Ok(None)`,
/// never an error.
pub fn parse_optional_dob(raw: &str) -> Result<Option<NaiveDate>, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw, DOB_FORMAT)
        .map(Some)
        .map_err(|_| ValidationError::InvalidDob)
}

/// Reject zero ids coming from a path segment or message field.
pub const fn validate_id(id: u64) -> Result<(), ValidationError> {
    if id == 0 {
        return Err(ValidationError::InvalidId);
    }
    Ok(())
}

/// Reject zero user ids.
pub const fn validate_user_id(user_id: u64) -> Result<(), ValidationError> {
    if user_id == 0 {
        return Err(ValidationError::InvalidUserId);
    }
    Ok(())
}

fn require_non_blank(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(())
}

const fn require_profile_id(profile_id: u64) -> Result<(), ValidationError> {
    if profile_id == 0 {
        return Err(ValidationError::MissingField("profile_id"));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

/// Payload for creating a profile.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreateProfileRequest {
    /// External identity the profile belongs to.
    pub user_id: u64,
    /// Contact email.
    pub email: String,
}

impl CreateProfileRequest {
    /// Check the create-profile field rules.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.user_id == 0 {
            return Err(ValidationError::MissingField("user_id"));
        }
        if self.email.is_empty() {
            return Err(ValidationError::MissingField("email"));
        }
        Ok(())
    }
}

/// Payload for replacing a profile's mutable fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UpdateProfileRequest {
    /// Profile to update.
    pub id: u64,
    /// Replacement email.
    pub email: String,
}

impl UpdateProfileRequest {
    /// Check the update-profile field rules.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_id(self.id)?;
        if self.email.is_empty() {
            return Err(ValidationError::InvalidEmail);
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Contact
// ---------------------------------------------------------------------------

/// Payload for creating a contact.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreateContactRequest {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// National identification number.
    pub nin: String,
    /// Date of birth as `YYYY-MM-DD`; blank means not provided.
    pub dob: String,
    /// Phone number.
    pub phone: String,
    /// Owning profile.
    pub profile_id: u64,
    /// Classification tag.
    pub type_: String,
}

impl CreateContactRequest {
    /// Check the create-contact field rules.
    pub fn validate(&self) -> Result<(), ValidationError> {
        parse_optional_dob(&self.dob)?;
        require_profile_id(self.profile_id)?;
        Ok(())
    }
}

/// Payload for replacing a contact's mutable fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UpdateContactRequest {
    /// Contact to update.
    pub id: u64,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// National identification number.
    pub nin: String,
    /// Date of birth as `YYYY-MM-DD`; blank clears any stored date.
    pub dob: String,
    /// Phone number.
    pub phone: String,
    /// Owning profile.
    pub profile_id: u64,
    /// Classification tag.
    pub type_: String,
}

impl UpdateContactRequest {
    /// Check the update-contact field rules.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_id(self.id)?;
        parse_optional_dob(&self.dob)?;
        require_profile_id(self.profile_id)?;
        Ok(())
    }
}

/// Query parameters for listing contacts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListContactsRequest {
    /// Restrict to one profile when non-zero.
    pub profile_id: u64,
    /// 1-based page number; zero means default.
    pub page: u32,
    /// Window size; zero means default.
    pub page_size: u32,
    /// Exact-match classification filter when non-blank.
    pub type_: String,
}

impl ListContactsRequest {
    /// Check the list-contacts rules.
    pub fn validate(&self) -> Result<(), ValidationError> {
        pagination::validate_page_size(self.page_size)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

/// Longest accepted `additional_data` value.
pub const MAX_ADDITIONAL_DATA_LEN: usize = 512;

/// Payload for creating an address.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreateAddressRequest {
    /// Street name (required).
    pub street_name: String,
    /// Street number (required).
    pub street_no: String,
    /// City (required).
    pub city: String,
    /// County or region (required).
    pub county: String,
    /// Country (required).
    pub country: String,
    /// Owning profile.
    pub profile_id: u64,
    /// Postal code.
    pub postal_code: String,
    /// Building identifier.
    pub building: String,
    /// Apartment identifier.
    pub apartment: String,
    /// Free text, at most 512 characters.
    pub additional_data: String,
    /// Classification tag.
    pub type_: String,
}

impl CreateAddressRequest {
    /// Check the create-address field rules.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_blank(&self.street_name, "street_name")?;
        require_non_blank(&self.street_no, "street_no")?;
        require_non_blank(&self.city, "city")?;
        require_non_blank(&self.county, "county")?;
        require_non_blank(&self.country, "country")?;
        require_profile_id(self.profile_id)?;
        if self.additional_data.chars().count() > MAX_ADDITIONAL_DATA_LEN {
            return Err(ValidationError::FieldTooLong {
                field: "additional_data",
                max: MAX_ADDITIONAL_DATA_LEN,
            });
        }
        Ok(())
    }
}

/// Payload for replacing an address's mutable fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UpdateAddressRequest {
    /// Address to update.
    pub id: u64,
    /// Street name (required).
    pub street_name: String,
    /// Street number (required).
    pub street_no: String,
    /// City (required).
    pub city: String,
    /// County or region (required).
    pub county: String,
    /// Country (required).
    pub country: String,
    /// Owning profile.
    pub profile_id: u64,
    /// Postal code.
    pub postal_code: String,
    /// Building identifier.
    pub building: String,
    /// Apartment identifier.
    pub apartment: String,
    /// Free text, at most 512 characters.
    pub additional_data: String,
    /// Classification tag.
    pub type_: String,
}

impl UpdateAddressRequest {
    /// Check the update-address field rules.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_id(self.id)?;
        require_non_blank(&self.street_name, "street_name")?;
        require_non_blank(&self.street_no, "street_no")?;
        require_non_blank(&self.city, "city")?;
        require_non_blank(&self.county, "county")?;
        require_non_blank(&self.country, "country")?;
        require_profile_id(self.profile_id)?;
        if self.additional_data.chars().count() > MAX_ADDITIONAL_DATA_LEN {
            return Err(ValidationError::FieldTooLong {
                field: "additional_data",
                max: MAX_ADDITIONAL_DATA_LEN,
            });
        }
        Ok(())
    }
}

/// Query parameters for listing addresses.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListAddressesRequest {
    /// Owning profile (required for address listings).
    pub profile_id: u64,
    /// 1-based page number; zero means default.
    pub page: u32,
    /// Window size; zero means default.
    pub page_size: u32,
    /// Exact-match classification filter when non-blank.
    pub type_: String,
}

impl ListAddressesRequest {
    /// Check the list-addresses rules.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_profile_id(self.profile_id)?;
        pagination::validate_page_size(self.page_size)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Company
// ---------------------------------------------------------------------------

/// Payload for creating a company.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreateCompanyRequest {
    /// Legal name (required).
    pub name: String,
    /// Registration number (required).
    pub registration_no: String,
    /// Fiscal code (required).
    pub fiscal_code: String,
    /// Owning profile.
    pub profile_id: u64,
    /// Classification tag.
    pub type_: String,
}

impl CreateCompanyRequest {
    /// Check the create-company field rules.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_blank(&self.name, "name")?;
        require_non_blank(&self.registration_no, "registration_no")?;
        require_non_blank(&self.fiscal_code, "fiscal_code")?;
        require_profile_id(self.profile_id)?;
        Ok(())
    }
}

/// Payload for replacing a company's mutable fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UpdateCompanyRequest {
    /// Company to update.
    pub id: u64,
    /// Legal name (required).
    pub name: String,
    /// Registration number (required).
    pub registration_no: String,
    /// Fiscal code (required).
    pub fiscal_code: String,
    /// Owning profile.
    pub profile_id: u64,
    /// Classification tag.
    pub type_: String,
}

impl UpdateCompanyRequest {
    /// Check the update-company field rules.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_id(self.id)?;
        require_non_blank(&self.name, "name")?;
        require_non_blank(&self.registration_no, "registration_no")?;
        require_non_blank(&self.fiscal_code, "fiscal_code")?;
        require_profile_id(self.profile_id)?;
        Ok(())
    }
}

/// Query parameters for listing companies.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListCompaniesRequest {
    /// Owning profile (required for company listings).
    pub profile_id: u64,
    /// 1-based page number; zero means default.
    pub page: u32,
    /// Window size; zero means default.
    pub page_size: u32,
    /// Exact-match classification filter when non-blank.
    pub type_: String,
}

impl ListCompaniesRequest {
    /// Check the list-companies rules.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_profile_id(self.profile_id)?;
        pagination::validate_page_size(self.page_size)?;
        Ok(())
    }
}
