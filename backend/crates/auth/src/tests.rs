//! Use-case tests for the auth crate
//!
//! Run against an in-memory store that enforces the same uniqueness rules
//! as the database indexes, so the transactional and race semantics of
//! registration can be exercised without PostgreSQL.

use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, Utc};
use kernel::id::{AdminId, ClientId, UserId};
use platform::password::HashingCost;

use crate::application::config::AuthConfig;
use crate::application::token::TokenIssuer;
use crate::application::{
    LoginInput, LoginUseCase, RegisterClientInput, RegisterClientUseCase,
};
use crate::domain::entity::{
    administrator::{Administrator, NewAdministrator},
    client::{Client, NewClient, NewClientProfile},
    user::{NewUser, User},
};
use crate::domain::repository::{
    AdministratorRepository, ClientRepository, RegistrationStore, UserRepository,
};
use crate::domain::value_object::{
    document::{Document, DocumentType},
    email::Email,
    user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

// ============================================================================
// In-memory store
// ============================================================================

#[derive(Clone, Default)]
struct MemoryStore {
    inner: Arc<Mutex<MemoryInner>>,
}

#[derive(Default)]
struct MemoryInner {
    users: Vec<User>,
    clients: Vec<Client>,
    admins: Vec<Administrator>,
}

impl MemoryInner {
    /// Mirror of the uq_users_email / uq_users_doc indexes
    fn insert_user(&mut self, user: NewUser) -> AuthResult<User> {
        let email_taken = self
            .users
            .iter()
            .any(|u| !u.is_deleted() && u.email == user.email);
        if email_taken {
            return Err(AuthError::EmailTaken);
        }

        let document_taken = self.users.iter().any(|u| u.document == user.document);
        if document_taken {
            return Err(AuthError::DocumentTaken);
        }

        let now = Utc::now();
        let persisted = User {
            id: UserId::from_i64(self.users.len() as i64 + 1),
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            document: user.document,
            password: user.password,
            role: user.role,
            status: user.status,
            terms_accepted_at: user.terms_accepted_at,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        };
        self.users.push(persisted.clone());
        Ok(persisted)
    }

    fn insert_client(&mut self, client: NewClient) -> AuthResult<Client> {
        if self.clients.iter().any(|c| c.user_id == client.user_id) {
            return Err(AuthError::Internal("Client already exists".to_string()));
        }

        let now = Utc::now();
        let persisted = Client {
            id: ClientId::from_i64(self.clients.len() as i64 + 1),
            user_id: client.user_id,
            birth_date: client.birth_date,
            phone_number: client.phone_number,
            created_at: now,
            updated_at: now,
        };
        self.clients.push(persisted.clone());
        Ok(persisted)
    }
}

impl MemoryStore {
    fn user_count(&self) -> usize {
        self.inner.lock().unwrap().users.len()
    }

    fn client_count(&self) -> usize {
        self.inner.lock().unwrap().clients.len()
    }

    fn soft_delete_all(&self) {
        let mut inner = self.inner.lock().unwrap();
        let now = Utc::now();
        for user in &mut inner.users {
            user.deleted_at = Some(now);
        }
    }
}

impl UserRepository for MemoryStore {
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .users
            .iter()
            .find(|u| !u.is_deleted() && u.email == *email)
            .cloned())
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .users
            .iter()
            .any(|u| !u.is_deleted() && u.email == *email))
    }

    async fn save_user(&self, user: NewUser) -> AuthResult<User> {
        self.inner.lock().unwrap().insert_user(user)
    }
}

impl ClientRepository for MemoryStore {
    async fn save_client(&self, client: NewClient) -> AuthResult<Client> {
        self.inner.lock().unwrap().insert_client(client)
    }
}

impl AdministratorRepository for MemoryStore {
    async fn save_admin(&self, admin: NewAdministrator) -> AuthResult<Administrator> {
        let mut inner = self.inner.lock().unwrap();
        let now = Utc::now();
        let persisted = Administrator {
            id: AdminId::from_i64(inner.admins.len() as i64 + 1),
            user_id: admin.user_id,
            admin_code: admin.admin_code,
            created_by: admin.created_by,
            created_at: now,
            updated_at: now,
        };
        inner.admins.push(persisted.clone());
        Ok(persisted)
    }

    async fn find_admin_by_user_id(&self, user_id: UserId) -> AuthResult<Option<Administrator>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .admins
            .iter()
            .find(|a| a.user_id == user_id)
            .cloned())
    }
}

impl RegistrationStore for MemoryStore {
    async fn create_client_account(
        &self,
        user: NewUser,
        profile: NewClientProfile,
    ) -> AuthResult<(User, Client)> {
        // One lock scope = one transaction: both rows or neither
        let mut inner = self.inner.lock().unwrap();
        let user = inner.insert_user(user)?;
        let client = inner.insert_client(NewClient::new(user.id, profile))?;
        Ok((user, client))
    }
}

// ============================================================================
// Fixtures
// ============================================================================

/// Low Argon2 cost so the test suite stays fast
fn fast_cost() -> HashingCost {
    HashingCost {
        memory_kib: 8192,
        iterations: 1,
        parallelism: 1,
    }
}

fn test_config() -> AuthConfig {
    let mut config = AuthConfig::with_default_ttl("test-secret").unwrap();
    config.hashing_cost = Some(fast_cost());
    config
}

fn token_issuer() -> Arc<TokenIssuer> {
    Arc::new(TokenIssuer::new(&test_config()))
}

fn register_use_case(store: &MemoryStore) -> RegisterClientUseCase<MemoryStore> {
    RegisterClientUseCase::new(Arc::new(store.clone()), token_issuer(), Arc::new(test_config()))
}

fn login_use_case(store: &MemoryStore) -> LoginUseCase<MemoryStore> {
    LoginUseCase::new(Arc::new(store.clone()), token_issuer())
}

fn sample_input() -> RegisterClientInput {
    RegisterClientInput {
        first_name: "Ana".to_string(),
        last_name: "García".to_string(),
        email: "a@x.com".to_string(),
        password: "longpass1".to_string(),
        document_type: DocumentType::Dni,
        document_number: "123".to_string(),
        birth_date: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
        phone_number: None,
    }
}

// ============================================================================
// Registration
// ============================================================================

mod register_tests {
    use super::*;

    #[tokio::test]
    async fn register_creates_user_and_client_and_issues_token() {
        let store = MemoryStore::default();
        let output = register_use_case(&store)
            .execute(sample_input())
            .await
            .unwrap();

        assert_eq!(output.user_id, UserId::from_i64(1));
        assert_eq!(output.first_name, "Ana");
        assert_eq!(output.role, UserRole::Client);
        assert_eq!(store.user_count(), 1);
        assert_eq!(store.client_count(), 1);

        // Token subject carries the stored user id, role rides along
        let claims = token_issuer().verify(&output.token).unwrap();
        assert_eq!(claims.subject_id().unwrap(), output.user_id);
        assert_eq!(claims.role, "CLIENT");
    }

    #[tokio::test]
    async fn password_is_stored_hashed_not_plaintext() {
        let store = MemoryStore::default();
        register_use_case(&store)
            .execute(sample_input())
            .await
            .unwrap();

        let email = Email::new("a@x.com").unwrap();
        let user = store.find_by_email(&email).await.unwrap().unwrap();
        let stored = user.password.unwrap();
        assert_ne!(stored.as_phc_string(), "longpass1");
        assert!(stored.as_phc_string().starts_with("$argon2"));
    }

    #[tokio::test]
    async fn duplicate_email_fails_with_conflict() {
        let store = MemoryStore::default();
        let use_case = register_use_case(&store);

        use_case.execute(sample_input()).await.unwrap();

        let second = RegisterClientInput {
            document_number: "456".to_string(),
            ..sample_input()
        };
        let err = use_case.execute(second).await.unwrap_err();
        assert!(matches!(err, AuthError::EmailTaken));

        // Exactly one User+Client pair afterwards
        assert_eq!(store.user_count(), 1);
        assert_eq!(store.client_count(), 1);
    }

    #[tokio::test]
    async fn duplicate_email_detected_across_spellings() {
        let store = MemoryStore::default();
        let use_case = register_use_case(&store);

        use_case.execute(sample_input()).await.unwrap();

        // Same address, different raw spelling: canonical forms collide
        let second = RegisterClientInput {
            email: "  A@X.COM ".to_string(),
            document_number: "456".to_string(),
            ..sample_input()
        };
        let err = use_case.execute(second).await.unwrap_err();
        assert!(matches!(err, AuthError::EmailTaken));
    }

    #[tokio::test]
    async fn duplicate_document_leaves_no_partial_user() {
        let store = MemoryStore::default();
        let use_case = register_use_case(&store);

        use_case.execute(sample_input()).await.unwrap();

        let second = RegisterClientInput {
            email: "b@x.com".to_string(),
            ..sample_input()
        };
        let err = use_case.execute(second).await.unwrap_err();
        assert!(matches!(err, AuthError::DocumentTaken));

        // The failed registration wrote nothing at all
        assert_eq!(store.user_count(), 1);
        assert_eq!(store.client_count(), 1);
    }

    #[tokio::test]
    async fn store_constraint_is_the_race_backstop() {
        // Bypass the advisory pre-check and hit the store directly, the way
        // two racing registrations would
        let store = MemoryStore::default();
        let use_case = register_use_case(&store);
        use_case.execute(sample_input()).await.unwrap();

        let email = Email::new("a@x.com").unwrap();
        let document = Document::new(DocumentType::Ce, "999").unwrap();
        let password = crate::domain::value_object::user_password::UserPassword::from_plain_or_hash(
            "otherpass1".to_string(),
            Some(&fast_cost()),
        )
        .unwrap();
        let user = NewUser::client("Eva", "López", email, document, password);
        let profile = NewClientProfile {
            birth_date: crate::domain::value_object::birth_date::BirthDate::new(
                NaiveDate::from_ymd_opt(1985, 6, 15).unwrap(),
            )
            .unwrap(),
            phone_number: None,
        };

        let err = store.create_client_account(user, profile).await.unwrap_err();
        assert!(matches!(err, AuthError::EmailTaken));
        assert_eq!(store.user_count(), 1);
        assert_eq!(store.client_count(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_registration_has_exactly_one_winner() {
        let store = MemoryStore::default();
        let use_case = register_use_case(&store);

        let mut handles = Vec::new();
        for i in 0..8 {
            let use_case = use_case.clone();
            handles.push(tokio::spawn(async move {
                let input = RegisterClientInput {
                    document_number: format!("doc-{}", i),
                    ..sample_input()
                };
                use_case.execute(input).await
            }));
        }

        let mut successes = 0;
        let mut conflicts = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => successes += 1,
                Err(AuthError::EmailTaken) => conflicts += 1,
                Err(other) => panic!("unexpected error: {other}"),
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(conflicts, 7);
        assert_eq!(store.user_count(), 1);
        assert_eq!(store.client_count(), 1);
    }

    #[tokio::test]
    async fn rejects_short_password() {
        let store = MemoryStore::default();
        let input = RegisterClientInput {
            password: "short".to_string(),
            ..sample_input()
        };
        let err = register_use_case(&store).execute(input).await.unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));
        assert_eq!(store.user_count(), 0);
    }

    #[tokio::test]
    async fn rejects_future_birth_date() {
        let store = MemoryStore::default();
        let input = RegisterClientInput {
            birth_date: Utc::now().date_naive() + chrono::Duration::days(1),
            ..sample_input()
        };
        let err = register_use_case(&store).execute(input).await.unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));
    }

    #[tokio::test]
    async fn rejects_blank_document_number() {
        let store = MemoryStore::default();
        let input = RegisterClientInput {
            document_number: "   ".to_string(),
            ..sample_input()
        };
        let err = register_use_case(&store).execute(input).await.unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));
    }

    #[tokio::test]
    async fn blank_phone_number_is_stored_as_none() {
        let store = MemoryStore::default();
        let input = RegisterClientInput {
            phone_number: Some("   ".to_string()),
            ..sample_input()
        };
        register_use_case(&store).execute(input).await.unwrap();

        let inner = store.inner.lock().unwrap();
        assert!(inner.clients[0].phone_number.is_none());
    }
}

// ============================================================================
// Login
// ============================================================================

mod login_tests {
    use super::*;

    async fn registered_store() -> MemoryStore {
        let store = MemoryStore::default();
        register_use_case(&store)
            .execute(sample_input())
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn login_with_registered_credentials_succeeds() {
        let store = registered_store().await;
        let output = login_use_case(&store)
            .execute(LoginInput {
                email: "a@x.com".to_string(),
                password: "longpass1".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(output.user_id, UserId::from_i64(1));
        assert_eq!(output.first_name, "Ana");
        assert_eq!(output.role, UserRole::Client);

        let claims = token_issuer().verify(&output.token).unwrap();
        assert_eq!(claims.subject_id().unwrap(), output.user_id);
    }

    #[tokio::test]
    async fn login_normalizes_the_email() {
        let store = registered_store().await;
        let output = login_use_case(&store)
            .execute(LoginInput {
                email: " A@X.COM ".to_string(),
                password: "longpass1".to_string(),
            })
            .await;
        assert!(output.is_ok());
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_are_indistinguishable() {
        let store = registered_store().await;
        let use_case = login_use_case(&store);

        let wrong_password = use_case
            .execute(LoginInput {
                email: "a@x.com".to_string(),
                password: "wrongpass1".to_string(),
            })
            .await
            .unwrap_err();

        let unknown_email = use_case
            .execute(LoginInput {
                email: "nobody@x.com".to_string(),
                password: "longpass1".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(wrong_password, AuthError::InvalidCredentials));
        assert!(matches!(unknown_email, AuthError::InvalidCredentials));
        // Message text must match too, or the difference leaks
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }

    #[tokio::test]
    async fn malformed_email_fails_like_bad_credentials() {
        let store = registered_store().await;
        let err = login_use_case(&store)
            .execute(LoginInput {
                email: "not-an-email".to_string(),
                password: "longpass1".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn user_without_stored_hash_cannot_login() {
        let store = MemoryStore::default();
        let email = Email::new("c@x.com").unwrap();
        let document = Document::new(DocumentType::Passport, "P-1").unwrap();
        store
            .save_user(NewUser {
                first_name: "Carlos".to_string(),
                last_name: "Ruiz".to_string(),
                email,
                document,
                password: None,
                role: UserRole::Client,
                status: Default::default(),
                terms_accepted_at: Utc::now(),
            })
            .await
            .unwrap();

        let err = login_use_case(&store)
            .execute(LoginInput {
                email: "c@x.com".to_string(),
                password: "longpass1".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn soft_deleted_user_cannot_login() {
        let store = registered_store().await;
        store.soft_delete_all();

        let err = login_use_case(&store)
            .execute(LoginInput {
                email: "a@x.com".to_string(),
                password: "longpass1".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));

        // Uniqueness only covers non-deleted users
        let email = Email::new("a@x.com").unwrap();
        assert!(!store.exists_by_email(&email).await.unwrap());
    }
}

// ============================================================================
// Administrators
// ============================================================================

mod administrator_tests {
    use super::*;

    #[tokio::test]
    async fn admin_records_chain_through_created_by() {
        let store = MemoryStore::default();
        register_use_case(&store)
            .execute(sample_input())
            .await
            .unwrap();

        let root = store
            .save_admin(NewAdministrator {
                user_id: UserId::from_i64(1),
                admin_code: "ROOT-01".to_string(),
                created_by: None,
            })
            .await
            .unwrap();
        assert!(root.created_by.is_none());

        let second = RegisterClientInput {
            email: "b@x.com".to_string(),
            document_number: "456".to_string(),
            ..sample_input()
        };
        register_use_case(&store).execute(second).await.unwrap();

        let child = store
            .save_admin(NewAdministrator {
                user_id: UserId::from_i64(2),
                admin_code: "ADM-02".to_string(),
                created_by: Some(root.id),
            })
            .await
            .unwrap();
        assert_eq!(child.created_by, Some(root.id));

        let found = store
            .find_admin_by_user_id(UserId::from_i64(2))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.admin_code, "ADM-02");
    }
}
