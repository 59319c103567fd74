//! Login Use Case
//!
//! Verifies credentials and issues a session token. Stateless: no
//! last-login tracking, no side effects beyond the token.

use std::sync::Arc;

use kernel::id::UserId;

use crate::application::token::TokenIssuer;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email, user_password::RawPassword, user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login output
#[derive(Debug)]
pub struct LoginOutput {
    pub token: String,
    pub user_id: UserId,
    pub first_name: String,
    pub role: UserRole,
}

/// Login use case
#[derive(Clone)]
pub struct LoginUseCase<U>
where
    U: UserRepository,
{
    users: Arc<U>,
    tokens: Arc<TokenIssuer>,
}

impl<U> LoginUseCase<U>
where
    U: UserRepository,
{
    pub fn new(users: Arc<U>, tokens: Arc<TokenIssuer>) -> Self {
        Self { users, tokens }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        // Unknown email, absent hash and wrong password must be
        // indistinguishable to the caller: same error, same message.
        let email = Email::new(&input.email).map_err(|_| AuthError::InvalidCredentials)?;

        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let password =
            RawPassword::new(input.password).map_err(|_| AuthError::InvalidCredentials)?;

        let stored = user
            .password
            .as_ref()
            .ok_or(AuthError::InvalidCredentials)?;

        if !stored.verify(&password) {
            tracing::warn!(user_id = %user.id, "Login with wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.issue(user.id, user.role)?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(LoginOutput {
            token,
            user_id: user.id,
            first_name: user.first_name,
            role: user.role,
        })
    }
}
