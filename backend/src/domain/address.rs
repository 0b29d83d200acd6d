//! Address entity.

use chrono::{DateTime, Utc};

/// A postal address attached to a profile.
///
/// Street, city, county and country are required and validated non-blank;
/// the remaining string fields default to empty. `additional_data` is free
/// text capped at 512 characters by validation and by the column type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    /// Surrogate key assigned by the database.
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
    /// Postal code, empty when not provided.
    pub postal_code: String,
    /// Building identifier, empty when not provided.
    pub building: String,
    /// Apartment identifier, empty when not provided.
    pub apartment: String,
    /// Free text, at most 512 characters.
    pub additional_data: String,
    /// Free-text classification tag.
    pub type_: String,
    /// Creation timestamp, stamped by the service.
    pub created_at: DateTime<Utc>,
    /// Last-modification timestamp, bumped on every update.
    pub updated_at: DateTime<Utc>,
}
