//! Application Configuration
//!
//! Configuration for the Auth application layer. Constructed once at
//! process start; a bad configuration fails startup, never a request.

use std::fmt;
use std::time::Duration;

use kernel::error::app_error::{AppError, AppResult};
use platform::password::HashingCost;

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// Symmetric token signing secret
    token_secret: String,
    /// Token time-to-live (15 minutes unless configured)
    pub token_ttl: Duration,
    /// Optional Argon2 cost override; `None` uses the library standard
    pub hashing_cost: Option<HashingCost>,
}

impl AuthConfig {
    /// Default token TTL in milliseconds (15 minutes)
    pub const DEFAULT_TOKEN_TTL_MS: u64 = 900_000;

    /// Create a config, rejecting an empty signing secret
    pub fn new(token_secret: impl Into<String>, token_ttl: Duration) -> AppResult<Self> {
        let token_secret = token_secret.into();
        if token_secret.trim().is_empty() {
            return Err(AppError::internal("Token signing secret must not be empty"));
        }
        Ok(Self {
            token_secret,
            token_ttl,
            hashing_cost: None,
        })
    }

    /// Create a config with the default 15 minute TTL
    pub fn with_default_ttl(token_secret: impl Into<String>) -> AppResult<Self> {
        Self::new(
            token_secret,
            Duration::from_millis(Self::DEFAULT_TOKEN_TTL_MS),
        )
    }

    /// Signing secret bytes
    pub fn token_secret(&self) -> &[u8] {
        self.token_secret.as_bytes()
    }

    /// Token TTL in milliseconds
    pub fn token_ttl_ms(&self) -> u64 {
        self.token_ttl.as_millis() as u64
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token_secret", &"[REDACTED]")
            .field("token_ttl", &self.token_ttl)
            .field("hashing_cost", &self.hashing_cost)
            .finish()
    }
}
