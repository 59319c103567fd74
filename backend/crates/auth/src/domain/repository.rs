//! Repository Traits
//!
//! The abstract Credential Store. Implementation is in the infrastructure
//! layer; the application layer only sees these traits.

use crate::domain::entity::{
    administrator::{Administrator, NewAdministrator},
    client::{Client, NewClient, NewClientProfile},
    user::{NewUser, User},
};
use crate::domain::value_object::email::Email;
use crate::error::AuthResult;
use kernel::id::UserId;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Find a non-deleted user by canonical email
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Check if a canonical email belongs to a non-deleted user
    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;

    /// Persist a user draft; the store assigns id and timestamps
    async fn save_user(&self, user: NewUser) -> AuthResult<User>;
}

/// Client repository trait
#[trait_variant::make(ClientRepository: Send)]
pub trait LocalClientRepository {
    /// Persist a client draft; the store assigns id and timestamps
    async fn save_client(&self, client: NewClient) -> AuthResult<Client>;
}

/// Administrator repository trait
#[trait_variant::make(AdministratorRepository: Send)]
pub trait LocalAdministratorRepository {
    /// Persist an administrator draft
    async fn save_admin(&self, admin: NewAdministrator) -> AuthResult<Administrator>;

    /// Find the administrator record for a user
    async fn find_admin_by_user_id(&self, user_id: UserId) -> AuthResult<Option<Administrator>>;
}

/// Combined store for the registration transaction
#[trait_variant::make(RegistrationStore: Send)]
pub trait LocalRegistrationStore: UserRepository + ClientRepository {
    /// Persist a user and its client profile atomically: both rows exist
    /// afterwards or neither does. A uniqueness violation inside the
    /// transaction surfaces as a Conflict error, which makes the store the
    /// backstop for concurrent registrations racing past the advisory
    /// `exists_by_email` pre-check.
    async fn create_client_account(
        &self,
        user: NewUser,
        profile: NewClientProfile,
    ) -> AuthResult<(User, Client)>;
}
