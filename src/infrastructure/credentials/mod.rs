//! Credential provider implementations

mod env_provider;
mod static_provider;

pub use env_provider::{EnvCredentialProvider, NOVITA_API_KEY_VAR};
pub use static_provider::StaticCredentialProvider;
