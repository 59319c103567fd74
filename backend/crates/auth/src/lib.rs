//! Auth (Authentication) Backend Module
//!
//! Credential management and session issuance for the ticketing platform.
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases, token issuer, configuration
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router, middleware
//!
//! ## Features
//! - Client registration: User + Client profile created in one transaction
//! - Login with email + password, issuing a signed session token
//! - Role claim carried in tokens (CLIENT, ADMIN, SUPERADMIN)
//!
//! ## Security Model
//! - Passwords hashed with Argon2id (NIST SP 800-63B compliant)
//! - Self-contained HS256 tokens, 15 minute TTL, expiry-only invalidation
//! - Failed logins are indistinguishable between unknown email and wrong
//!   password
//! - Email uniqueness backed by a store-level unique index, so concurrent
//!   registrations resolve to exactly one winner

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::token::TokenIssuer;
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgCredentialStore;
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod store {
    pub use crate::infra::postgres::PgCredentialStore as CredentialStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}
