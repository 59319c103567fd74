//! Client Registration Use Case
//!
//! Creates a User and its Client profile atomically and issues a session
//! token for the new account.

use std::sync::Arc;

use chrono::NaiveDate;
use kernel::id::UserId;

use crate::application::config::AuthConfig;
use crate::application::token::TokenIssuer;
use crate::domain::entity::{client::NewClientProfile, user::NewUser};
use crate::domain::repository::RegistrationStore;
use crate::domain::value_object::{
    birth_date::BirthDate,
    document::{Document, DocumentType},
    email::Email,
    user_password::UserPassword,
    user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

/// Registration input
pub struct RegisterClientInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub document_type: DocumentType,
    pub document_number: String,
    pub birth_date: NaiveDate,
    pub phone_number: Option<String>,
}

/// Registration output
#[derive(Debug)]
pub struct RegisterClientOutput {
    pub token: String,
    pub user_id: UserId,
    pub first_name: String,
    pub role: UserRole,
}

/// Client registration use case
#[derive(Clone)]
pub struct RegisterClientUseCase<S>
where
    S: RegistrationStore,
{
    store: Arc<S>,
    tokens: Arc<TokenIssuer>,
    config: Arc<AuthConfig>,
}

impl<S> RegisterClientUseCase<S>
where
    S: RegistrationStore,
{
    pub fn new(store: Arc<S>, tokens: Arc<TokenIssuer>, config: Arc<AuthConfig>) -> Self {
        Self {
            store,
            tokens,
            config,
        }
    }

    pub async fn execute(&self, input: RegisterClientInput) -> AuthResult<RegisterClientOutput> {
        // Construction-time validation; the canonical email computed here is
        // the one used for the duplicate check AND the stored value.
        let email = Email::new(&input.email)?;
        let document = Document::new(input.document_type, &input.document_number)?;
        let birth_date = BirthDate::new(input.birth_date)?;
        let first_name = non_blank("firstName", input.first_name)?;
        let last_name = non_blank("lastName", input.last_name)?;

        // Advisory pre-check; the store's unique index is the backstop for
        // registrations racing each other past this point.
        if self.store.exists_by_email(&email).await? {
            return Err(AuthError::EmailTaken);
        }

        let password =
            UserPassword::from_plain_or_hash(input.password, self.config.hashing_cost.as_ref())?;

        let user = NewUser::client(first_name, last_name, email, document, password);
        let profile = NewClientProfile {
            birth_date,
            phone_number: input.phone_number.filter(|p| !p.trim().is_empty()),
        };

        // User and Client land in one transaction: both rows or neither.
        let (user, client) = self.store.create_client_account(user, profile).await?;

        let token = self.tokens.issue(user.id, user.role)?;

        tracing::info!(
            user_id = %user.id,
            client_id = %client.id,
            "Client registered"
        );

        Ok(RegisterClientOutput {
            token,
            user_id: user.id,
            first_name: user.first_name,
            role: user.role,
        })
    }
}

fn non_blank(field: &str, value: String) -> AuthResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AuthError::Validation(format!("{} cannot be blank", field)));
    }
    Ok(trimmed.to_string())
}
