use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;

use super::{LlmRequest, LlmResponse};
use crate::domain::{Credential, DomainError};

/// Trait for chat completion backends
#[async_trait]
pub trait LlmProvider: Send + Sync + Debug {
    /// Send a chat completion request
    async fn chat(&self, model: &str, request: LlmRequest) -> Result<LlmResponse, DomainError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;
}

/// Builds a chat backend bound to a given credential
pub trait LlmConnector: Send + Sync + Debug {
    fn connect(&self, credential: &Credential) -> Result<Arc<dyn LlmProvider>, DomainError>;
}
