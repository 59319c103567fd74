//! User Status Value Object
//!
//! Account state, separate from soft deletion: a deleted account keeps its
//! last status, and `deleted_at` on the user record marks the deletion.

use serde::{Deserialize, Serialize};
use std::fmt;

/// User account status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UserStatus {
    /// Normal active account
    #[default]
    #[serde(rename = "ACTIVE")]
    Active,

    /// Disabled account
    #[serde(rename = "DISABLED")]
    Disabled,
}

impl UserStatus {
    /// String code for storage and the API
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Disabled => "DISABLED",
        }
    }

    /// Create from string code
    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ACTIVE" => Some(Self::Active),
            "DISABLED" => Some(Self::Disabled),
            _ => None,
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
