//! Token Issuer
//!
//! Creates and verifies self-contained session tokens: HS256-signed JWTs
//! carrying the subject id and role, valid from `iat` to `exp = iat + ttl`.
//! There is no revocation list; expiry is the only invalidation mechanism.
//! Issuance is a pure function of (subject, role, now, key, ttl).

use chrono::{DateTime, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use kernel::id::UserId;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::config::AuthConfig;
use crate::domain::value_object::user_role::UserRole;
use crate::error::{AuthError, AuthResult};

/// Claims carried by a session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user id
    pub sub: String,
    /// Role code (CLIENT, ADMIN, SUPERADMIN)
    pub role: String,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expiry (unix seconds)
    pub exp: i64,
}

impl Claims {
    /// Parse the subject back into a user id
    pub fn subject_id(&self) -> AuthResult<UserId> {
        self.sub
            .parse::<i64>()
            .map(UserId::from_i64)
            .map_err(|_| AuthError::Internal(format!("Invalid token subject: {}", self.sub)))
    }
}

/// Issues and verifies signed session tokens
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(config.token_secret()),
            decoding: DecodingKey::from_secret(config.token_secret()),
            ttl: config.token_ttl,
        }
    }

    /// Issue a token for (user, role) valid from now
    pub fn issue(&self, user_id: UserId, role: UserRole) -> AuthResult<String> {
        self.issue_at(user_id, role, Utc::now())
    }

    /// Issue a token with an explicit issue time.
    ///
    /// JWT timestamps are whole seconds, so the TTL is applied at second
    /// granularity: exp = iat + ttl.
    pub fn issue_at(
        &self,
        user_id: UserId,
        role: UserRole,
        now: DateTime<Utc>,
    ) -> AuthResult<String> {
        let iat = now.timestamp();
        let exp = iat + self.ttl.as_millis() as i64 / 1000;

        let claims = Claims {
            sub: user_id.to_string(),
            role: role.code().to_string(),
            iat,
            exp,
        };

        let token = encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AuthError::Internal(format!("Token signing failed: {}", e)))?;

        tracing::debug!(user_id = %user_id, role = %role, "Session token issued");
        Ok(token)
    }

    /// Verify signature and expiry, returning the claims.
    ///
    /// Zero leeway: a token is invalid from the first second past `exp`.
    pub fn verify(&self, token: &str) -> AuthResult<Claims> {
        let mut validation = Validation::default();
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.decoding, &validation)
            .map_err(|_| AuthError::InvalidCredentials)?;

        Ok(data.claims)
    }
}
