//! Administrator Entity
//!
//! Separate identity role, 1:1 with a User. `created_by` is a nullable id
//! reference to the admin who created this one, lookup-only: no ownership,
//! no cascade.

use chrono::{DateTime, Utc};
use kernel::id::{AdminId, UserId};

/// Draft of an administrator row
#[derive(Debug, Clone)]
pub struct NewAdministrator {
    pub user_id: UserId,
    pub admin_code: String,
    pub created_by: Option<AdminId>,
}

/// Persisted administrator record
#[derive(Debug, Clone)]
pub struct Administrator {
    pub id: AdminId,
    pub user_id: UserId,
    pub admin_code: String,
    pub created_by: Option<AdminId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
