//! API DTOs (Data Transfer Objects)

use chrono::NaiveDate;
use kernel::id::UserId;
use serde::{Deserialize, Serialize};

use crate::domain::value_object::{document::DocumentType, user_role::UserRole};

// ============================================================================
// Login
// ============================================================================

/// Login request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

// ============================================================================
// Client Registration
// ============================================================================

/// Client registration request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterClientRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub document_type: DocumentType,
    pub document_number: String,
    pub birth_date: NaiveDate,
    #[serde(default)]
    pub phone_number: Option<String>,
}

// ============================================================================
// Shared response
// ============================================================================

/// Response returned after login or registration
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub user_id: UserId,
    pub first_name: String,
    pub role: UserRole,
}
