//! User domain types.

use chrono::{DateTime, Utc};

use bazaar_core::{UserId, Username};

/// A site account (domain type).
///
/// The password hash never leaves the repository layer.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Login name.
    pub username: Username,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}
