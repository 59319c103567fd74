//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::TokenIssuer;
use crate::application::{
    LoginInput, LoginUseCase, RegisterClientInput, RegisterClientUseCase,
};
use crate::domain::repository::RegistrationStore;
use crate::error::AuthResult;
use crate::presentation::dto::{AuthResponse, LoginRequest, RegisterClientRequest};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<S>
where
    S: RegistrationStore + Clone + Send + Sync + 'static,
{
    pub store: Arc<S>,
    pub config: Arc<AuthConfig>,
    pub tokens: Arc<TokenIssuer>,
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/auth/login
pub async fn login<S>(
    State(state): State<AuthAppState<S>>,
    Json(req): Json<LoginRequest>,
) -> AuthResult<Json<AuthResponse>>
where
    S: RegistrationStore + Clone + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(state.store.clone(), state.tokens.clone());

    let output = use_case
        .execute(LoginInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(AuthResponse {
        token: output.token,
        user_id: output.user_id,
        first_name: output.first_name,
        role: output.role,
    }))
}

// ============================================================================
// Client Registration
// ============================================================================

/// POST /api/auth/register
pub async fn register_client<S>(
    State(state): State<AuthAppState<S>>,
    Json(req): Json<RegisterClientRequest>,
) -> AuthResult<(StatusCode, Json<AuthResponse>)>
where
    S: RegistrationStore + Clone + Send + Sync + 'static,
{
    let use_case = RegisterClientUseCase::new(
        state.store.clone(),
        state.tokens.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(RegisterClientInput {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            password: req.password,
            document_type: req.document_type,
            document_number: req.document_number,
            birth_date: req.birth_date,
            phone_number: req.phone_number,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token: output.token,
            user_id: output.user_id,
            first_name: output.first_name,
            role: output.role,
        }),
    ))
}
