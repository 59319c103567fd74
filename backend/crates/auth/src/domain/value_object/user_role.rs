use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of a user account.
///
/// Stored and transported as the string codes `CLIENT`, `ADMIN`,
/// `SUPERADMIN`. The service only carries the role (into token claims and
/// responses); it never enforces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UserRole {
    #[default]
    #[serde(rename = "CLIENT")]
    Client,
    #[serde(rename = "ADMIN")]
    Admin,
    #[serde(rename = "SUPERADMIN")]
    SuperAdmin,
}

impl UserRole {
    #[inline]
    pub const fn code(&self) -> &'static str {
        use UserRole::*;
        match self {
            Client => "CLIENT",
            Admin => "ADMIN",
            SuperAdmin => "SUPERADMIN",
        }
    }

    #[inline]
    pub const fn is_admin_or_higher(&self) -> bool {
        use UserRole::*;
        matches!(self, Admin | SuperAdmin)
    }

    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        use UserRole::*;
        match code {
            "CLIENT" => Some(Client),
            "ADMIN" => Some(Admin),
            "SUPERADMIN" => Some(SuperAdmin),
            _ => None,
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
