//! Auth Router

use axum::{Router, routing::post};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::TokenIssuer;
use crate::domain::repository::RegistrationStore;
use crate::infra::postgres::PgCredentialStore;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::error_envelope;

/// Create the Auth router with the PostgreSQL store
pub fn auth_router(store: PgCredentialStore, config: AuthConfig) -> Router {
    auth_router_generic(store, config)
}

/// Create a generic Auth router for any store implementation
pub fn auth_router_generic<S>(store: S, config: AuthConfig) -> Router
where
    S: RegistrationStore + Clone + Send + Sync + 'static,
{
    let config = Arc::new(config);
    let tokens = Arc::new(TokenIssuer::new(&config));
    let state = AuthAppState {
        store: Arc::new(store),
        config,
        tokens,
    };

    Router::new()
        .route("/login", post(handlers::login::<S>))
        .route("/register", post(handlers::register_client::<S>))
        .layer(axum::middleware::from_fn(error_envelope))
        .with_state(state)
}
