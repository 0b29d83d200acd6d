//! Profile entity: the aggregate root every other record hangs off.

use chrono::{DateTime, Utc};

/// A user's profile record.
///
/// `id` is the server-generated surrogate key and stays `0` until the record
/// has been persisted. At most one profile may exist per `user_id`; the
/// service pre-checks this and the storage layer enforces it with a unique
/// constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    /// Surrogate key assigned by the database.
    pub id: u64,
    /// External identity reference; unique across profiles.
    pub user_id: u64,
    /// Contact email for the profile.
    pub email: String,
    /// Creation timestamp, stamped by the service.
    pub created_at: DateTime<Utc>,
    /// Last-modification timestamp, bumped on every update.
    pub updated_at: DateTime<Utc>,
}
