//! Company entity.

use chrono::{DateTime, Utc};

/// A company record attached to a profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Company {
    /// Surrogate key assigned by the database.
    pub id: u64,
    /// Legal name (required).
    pub name: String,
    /// Registration number (required).
    pub registration_no: String,
    /// Fiscal code (required).
    pub fiscal_code: String,
    /// Owning profile.
    pub profile_id: u64,
    /// Free-text classification tag.
    pub type_: String,
    /// Creation timestamp, stamped by the service.
    pub created_at: DateTime<Utc>,
    /// Last-modification timestamp, bumped on every update.
    pub updated_at: DateTime<Utc>,
}
