//! PostgreSQL Repository Implementations

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;

use crate::domain::entity::{
    administrator::{Administrator, NewAdministrator},
    client::{Client, NewClient, NewClientProfile},
    user::{NewUser, User},
};
use crate::domain::repository::{
    AdministratorRepository, ClientRepository, RegistrationStore, UserRepository,
};
use crate::domain::value_object::{
    birth_date::BirthDate,
    document::{Document, DocumentType},
    email::Email,
    user_password::UserPassword,
    user_role::UserRole,
    user_status::UserStatus,
};
use crate::error::{AuthError, AuthResult};
use kernel::id::{AdminId, ClientId, UserId};

const SELECT_USER_BY_EMAIL: &str = r#"
    SELECT
        id,
        first_name,
        last_name,
        email,
        document_type,
        document_number,
        password_hash,
        user_role,
        user_status,
        terms_accepted_at,
        deleted_at,
        created_at,
        updated_at
    FROM users
    WHERE email = $1 AND deleted_at IS NULL
"#;

const INSERT_USER: &str = r#"
    INSERT INTO users (
        first_name,
        last_name,
        email,
        document_type,
        document_number,
        password_hash,
        user_role,
        user_status,
        terms_accepted_at
    ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
    RETURNING
        id,
        first_name,
        last_name,
        email,
        document_type,
        document_number,
        password_hash,
        user_role,
        user_status,
        terms_accepted_at,
        deleted_at,
        created_at,
        updated_at
"#;

const INSERT_CLIENT: &str = r#"
    INSERT INTO clients (user_id, birth_date, phone_number)
    VALUES ($1, $2, $3)
    RETURNING id, user_id, birth_date, phone_number, created_at, updated_at
"#;

/// PostgreSQL-backed credential store
#[derive(Clone)]
pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map a unique-index violation to the matching Conflict error.
///
/// The pre-check in the registration use case is advisory only; under
/// concurrent registrations this mapping is what turns the index violation
/// into a Conflict instead of a 500.
fn map_unique_violation(err: sqlx::Error) -> AuthError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some("23505") {
            return match db_err.constraint() {
                Some(name) if name.contains("email") => AuthError::EmailTaken,
                Some(name) if name.contains("doc") => AuthError::DocumentTaken,
                _ => AuthError::EmailTaken,
            };
        }
    }
    AuthError::Database(err)
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgCredentialStore {
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(SELECT_USER_BY_EMAIL)
            .bind(email.as_str())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE email = $1 AND deleted_at IS NULL)",
        )
        .bind(email.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn save_user(&self, user: NewUser) -> AuthResult<User> {
        let row = sqlx::query_as::<_, UserRow>(INSERT_USER)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(user.email.as_str())
            .bind(user.document.doc_type().code())
            .bind(user.document.number())
            .bind(user.password.as_ref().map(|p| p.as_phc_string()))
            .bind(user.role.code())
            .bind(user.status.code())
            .bind(user.terms_accepted_at)
            .fetch_one(&self.pool)
            .await
            .map_err(map_unique_violation)?;

        row.into_user()
    }
}

// ============================================================================
// Client Repository Implementation
// ============================================================================

impl ClientRepository for PgCredentialStore {
    async fn save_client(&self, client: NewClient) -> AuthResult<Client> {
        let row = sqlx::query_as::<_, ClientRow>(INSERT_CLIENT)
            .bind(client.user_id.as_i64())
            .bind(client.birth_date.as_naive())
            .bind(&client.phone_number)
            .fetch_one(&self.pool)
            .await
            .map_err(map_unique_violation)?;

        Ok(row.into_client())
    }
}

// ============================================================================
// Administrator Repository Implementation
// ============================================================================

impl AdministratorRepository for PgCredentialStore {
    async fn save_admin(&self, admin: NewAdministrator) -> AuthResult<Administrator> {
        let row = sqlx::query_as::<_, AdministratorRow>(
            r#"
            INSERT INTO administrators (user_id, admin_code, created_by_admin)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, admin_code, created_by_admin, created_at, updated_at
            "#,
        )
        .bind(admin.user_id.as_i64())
        .bind(&admin.admin_code)
        .bind(admin.created_by.map(|id| id.as_i64()))
        .fetch_one(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        Ok(row.into_administrator())
    }

    async fn find_admin_by_user_id(&self, user_id: UserId) -> AuthResult<Option<Administrator>> {
        let row = sqlx::query_as::<_, AdministratorRow>(
            r#"
            SELECT id, user_id, admin_code, created_by_admin, created_at, updated_at
            FROM administrators
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_administrator()))
    }
}

// ============================================================================
// Registration Store Implementation
// ============================================================================

impl RegistrationStore for PgCredentialStore {
    async fn create_client_account(
        &self,
        user: NewUser,
        profile: NewClientProfile,
    ) -> AuthResult<(User, Client)> {
        let mut tx = self.pool.begin().await?;

        let user_row = sqlx::query_as::<_, UserRow>(INSERT_USER)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(user.email.as_str())
            .bind(user.document.doc_type().code())
            .bind(user.document.number())
            .bind(user.password.as_ref().map(|p| p.as_phc_string()))
            .bind(user.role.code())
            .bind(user.status.code())
            .bind(user.terms_accepted_at)
            .fetch_one(&mut *tx)
            .await
            .map_err(map_unique_violation)?;

        let user = user_row.into_user()?;

        let client_row = sqlx::query_as::<_, ClientRow>(INSERT_CLIENT)
            .bind(user.id.as_i64())
            .bind(profile.birth_date.as_naive())
            .bind(&profile.phone_number)
            .fetch_one(&mut *tx)
            .await
            .map_err(map_unique_violation)?;

        tx.commit().await?;

        Ok((user, client_row.into_client()))
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    first_name: String,
    last_name: String,
    email: String,
    document_type: String,
    document_number: String,
    password_hash: Option<String>,
    user_role: String,
    user_status: String,
    terms_accepted_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let doc_type = DocumentType::from_code(&self.document_type).ok_or_else(|| {
            AuthError::Internal(format!("Invalid document_type: {}", self.document_type))
        })?;

        let role = UserRole::from_code(&self.user_role)
            .ok_or_else(|| AuthError::Internal(format!("Invalid user_role: {}", self.user_role)))?;

        let status = UserStatus::from_code(&self.user_status).ok_or_else(|| {
            AuthError::Internal(format!("Invalid user_status: {}", self.user_status))
        })?;

        let password = self
            .password_hash
            .map(UserPassword::from_phc_string)
            .transpose()?;

        Ok(User {
            id: UserId::from_i64(self.id),
            first_name: self.first_name,
            last_name: self.last_name,
            email: Email::from_db(self.email),
            document: Document::from_db(doc_type, self.document_number),
            password,
            role,
            status,
            terms_accepted_at: self.terms_accepted_at,
            deleted_at: self.deleted_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ClientRow {
    id: i64,
    user_id: i64,
    birth_date: NaiveDate,
    phone_number: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ClientRow {
    fn into_client(self) -> Client {
        Client {
            id: ClientId::from_i64(self.id),
            user_id: UserId::from_i64(self.user_id),
            birth_date: BirthDate::from_db(self.birth_date),
            phone_number: self.phone_number,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct AdministratorRow {
    id: i64,
    user_id: i64,
    admin_code: String,
    created_by_admin: Option<i64>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AdministratorRow {
    fn into_administrator(self) -> Administrator {
        Administrator {
            id: AdminId::from_i64(self.id),
            user_id: UserId::from_i64(self.user_id),
            admin_code: self.admin_code,
            created_by: self.created_by_admin.map(AdminId::from_i64),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
