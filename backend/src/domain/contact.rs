//! Contact entity.

use chrono::{DateTime, NaiveDate, Utc};

/// A contact record attached to a profile.
///
/// All string fields are optional from the caller's point of view and are
/// stored as empty strings when absent; `dob` is the one genuinely nullable
/// field and stays `None` end-to-end when not provided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    /// Surrogate key assigned by the database.
    pub id: u64,
    /// Given name, empty when not provided.
    pub first_name: String,
    /// Family name, empty when not provided.
    pub last_name: String,
    /// National identification number, empty when not provided.
    pub nin: String,
    /// Date of birth; `None` when not provided.
    pub dob: Option<NaiveDate>,
    /// Phone number, empty when not provided.
    pub phone: String,
    /// Owning profile.
    pub profile_id: u64,
    /// Free-text classification tag.
    pub type_: String,
    /// Creation timestamp, stamped by the service.
    pub created_at: DateTime<Utc>,
    /// Last-modification timestamp, bumped on every update.
    pub updated_at: DateTime<Utc>,
}
