//! User Password Value Object
//!
//! Domain wrapper around `platform::password`. Two distinct types keep
//! plaintext and stored material apart:
//! - [`RawPassword`]: user input, policy-validated, zeroized on drop
//! - [`UserPassword`]: Argon2id PHC string, safe to store at rest
//!
//! The write path converts plaintext exclusively through
//! [`UserPassword::from_plain_or_hash`], which refuses to hash a value that
//! already is a hash. Re-saving a stored hash therefore can never corrupt
//! it into a hash-of-hash.

use kernel::error::app_error::{AppError, AppResult};
use platform::password::{
    ClearTextPassword, HashedPassword, HashingCost, PasswordHashError, PasswordPolicyError,
};
use std::fmt;

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from user input
///
/// Wrapper around `ClearTextPassword` with domain-specific error handling.
/// Memory is automatically zeroized when dropped.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Create a new raw password with policy validation
    ///
    /// ## Validation Rules (NIST SP 800-63B)
    /// - Minimum 8 characters
    /// - Maximum 128 characters
    /// - No control characters
    /// - Unicode NFKC normalized
    pub fn new(raw: String) -> AppResult<Self> {
        let clear_text = ClearTextPassword::new(raw).map_err(|e| match e {
            PasswordPolicyError::TooShort { min, actual } => AppError::bad_request(format!(
                "Password must be at least {} characters (got {})",
                min, actual
            )),

            PasswordPolicyError::TooLong { max, actual } => AppError::bad_request(format!(
                "Password must be at most {} characters (got {})",
                max, actual
            )),

            PasswordPolicyError::EmptyOrWhitespace => {
                AppError::bad_request("Password cannot be empty")
            }

            PasswordPolicyError::InvalidCharacter => {
                AppError::bad_request("Password contains invalid characters")
            }
        })?;

        Ok(Self(clear_text))
    }

    /// Access the inner ClearTextPassword
    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// User Password (Hashed, for storage)
// ============================================================================

/// Hashed user password for database storage
///
/// Stores the password in Argon2id PHC string format.
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Create from raw password by hashing
    ///
    /// ## Arguments
    /// * `raw` - The validated raw password
    /// * `cost` - Optional cost override; `None` uses the library standard
    pub fn from_raw(raw: &RawPassword, cost: Option<&HashingCost>) -> AppResult<Self> {
        let hashed = raw.inner().hash(cost).map_err(|e| match e {
            PasswordHashError::HashingFailed(msg) => {
                AppError::internal(format!("Password hashing failed: {}", msg))
            }
            _ => AppError::internal("Unexpected error during password hashing"),
        })?;

        Ok(Self(hashed))
    }

    /// Hash a plaintext value, or wrap it unchanged if it already is one.
    ///
    /// Write-path idempotency guard: a value that parses as a PHC string is
    /// a hash this module produced earlier and is stored as-is; anything
    /// else is treated as plaintext, policy-validated and hashed.
    pub fn from_plain_or_hash(value: String, cost: Option<&HashingCost>) -> AppResult<Self> {
        if HashedPassword::is_phc_string(&value) {
            return Self::from_phc_string(value);
        }
        let raw = RawPassword::new(value)?;
        Self::from_raw(&raw, cost)
    }

    /// Create from PHC string (from database)
    pub fn from_phc_string(phc_string: impl Into<String>) -> AppResult<Self> {
        let hashed = HashedPassword::from_phc_string(phc_string)
            .map_err(|_| AppError::internal("Invalid password hash in database"))?;

        Ok(Self(hashed))
    }

    /// Get PHC string for database storage
    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    /// Verify a raw password against this hash
    ///
    /// Constant-time comparison inside argon2.
    pub fn verify(&self, raw: &RawPassword) -> bool {
        self.0.verify(raw.inner())
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_password_validation() {
        assert!(RawPassword::new("ValidPass123!".to_string()).is_ok());
        assert!(RawPassword::new("short".to_string()).is_err());
        assert!(RawPassword::new("".to_string()).is_err());
        assert!(RawPassword::new("a".repeat(129)).is_err());
    }

    #[test]
    fn test_hash_and_verify() {
        let raw = RawPassword::new("TestPassword123!".to_string()).unwrap();
        let hashed = UserPassword::from_raw(&raw, None).unwrap();

        assert!(hashed.verify(&raw));

        let wrong = RawPassword::new("WrongPassword123!".to_string()).unwrap();
        assert!(!hashed.verify(&wrong));
    }

    #[test]
    fn test_phc_string_roundtrip() {
        let raw = RawPassword::new("TestPassword123!".to_string()).unwrap();
        let hashed = UserPassword::from_raw(&raw, None).unwrap();

        let phc = hashed.as_phc_string().to_string();
        let restored = UserPassword::from_phc_string(phc).unwrap();

        assert!(restored.verify(&raw));
    }

    #[test]
    fn test_from_plain_or_hash_hashes_plaintext() {
        let stored = UserPassword::from_plain_or_hash("longpass1".to_string(), None).unwrap();
        assert_ne!(stored.as_phc_string(), "longpass1");

        let raw = RawPassword::new("longpass1".to_string()).unwrap();
        assert!(stored.verify(&raw));
    }

    #[test]
    fn test_from_plain_or_hash_never_double_hashes() {
        let first = UserPassword::from_plain_or_hash("longpass1".to_string(), None).unwrap();

        // Feeding the stored value back through the write path is a no-op
        let second =
            UserPassword::from_plain_or_hash(first.as_phc_string().to_string(), None).unwrap();
        assert_eq!(first.as_phc_string(), second.as_phc_string());

        let raw = RawPassword::new("longpass1".to_string()).unwrap();
        assert!(second.verify(&raw));
    }

    #[test]
    fn test_debug_redaction() {
        let raw = RawPassword::new("SecretPassword123!".to_string()).unwrap();
        let debug = format!("{:?}", raw);
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("Secret"));

        let hashed = UserPassword::from_raw(&raw, None).unwrap();
        let debug = format!("{:?}", hashed);
        assert!(debug.contains("HASH"));
    }
}
