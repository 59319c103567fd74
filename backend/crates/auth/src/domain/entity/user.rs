//! User Entity
//!
//! Core identity record. The store assigns the id, so a draft
//! ([`NewUser`]) and a persisted record ([`User`]) are distinct types; an
//! id only exists once a row does.

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::value_object::{
    document::Document, email::Email, user_password::UserPassword, user_role::UserRole,
    user_status::UserStatus,
};

/// Draft of a user, before the store has assigned an id
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    /// Canonical email; uniqueness applies to non-deleted users
    pub email: Email,
    pub document: Document,
    /// None until a credential is set; never plaintext
    pub password: Option<UserPassword>,
    pub role: UserRole,
    pub status: UserStatus,
    pub terms_accepted_at: DateTime<Utc>,
}

impl NewUser {
    /// Draft a client account: role Client, status Active, terms accepted now
    pub fn client(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: Email,
        document: Document,
        password: UserPassword,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email,
            document,
            password: Some(password),
            role: UserRole::Client,
            status: UserStatus::Active,
            terms_accepted_at: Utc::now(),
        }
    }
}

/// Persisted user record
#[derive(Debug, Clone)]
pub struct User {
    /// Store-assigned identifier, immutable
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub document: Document,
    pub password: Option<UserPassword>,
    pub role: UserRole,
    pub status: UserStatus,
    pub terms_accepted_at: DateTime<Utc>,
    /// Soft-delete marker; this core never hard-deletes
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check if user has been soft-deleted
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}
