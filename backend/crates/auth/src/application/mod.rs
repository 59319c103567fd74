//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod login;
pub mod register_client;
pub mod token;

// Re-exports
pub use config::AuthConfig;
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use register_client::{RegisterClientInput, RegisterClientOutput, RegisterClientUseCase};
pub use token::{Claims, TokenIssuer};
