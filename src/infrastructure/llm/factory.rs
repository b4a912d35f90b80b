use std::sync::Arc;

use super::{HttpClient, NovitaClient};
use crate::config::ProviderConfig;
use crate::domain::{Credential, CredentialType, DomainError, LlmConnector, LlmProvider};

/// Builds Novita clients from configuration and a credential
#[derive(Debug, Clone)]
pub struct NovitaClientFactory {
    config: ProviderConfig,
}

impl NovitaClientFactory {
    pub fn new(config: ProviderConfig) -> Self {
        Self { config }
    }

    /// Create a client bound to the given credential
    pub fn create(&self, credential: &Credential) -> Result<NovitaClient<HttpClient>, DomainError> {
        Self::validate_credential_type(credential)?;

        let http_client = HttpClient::with_timeout(self.config.timeout())?;
        Ok(NovitaClient::with_base_url(
            http_client,
            credential.api_key(),
            &self.config.base_url,
        ))
    }

    /// Create a client that sends no credentials
    pub fn create_anonymous(&self) -> Result<NovitaClient<HttpClient>, DomainError> {
        let http_client = HttpClient::with_timeout(self.config.timeout())?;
        Ok(NovitaClient::anonymous(http_client, &self.config.base_url))
    }

    fn validate_credential_type(credential: &Credential) -> Result<(), DomainError> {
        if credential.credential_type() != &CredentialType::Novita {
            return Err(DomainError::credential(format!(
                "Expected a novita credential, got {}",
                credential.credential_type()
            )));
        }
        Ok(())
    }
}

impl LlmConnector for NovitaClientFactory {
    fn connect(&self, credential: &Credential) -> Result<Arc<dyn LlmProvider>, DomainError> {
        Ok(Arc::new(self.create(credential)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_uses_configured_base_url() {
        let factory = NovitaClientFactory::new(ProviderConfig {
            base_url: "http://localhost:9000/v3/openai/".to_string(),
            ..ProviderConfig::default()
        });
        let credential = Credential::new(CredentialType::Novita, "sk_test".to_string());

        let client = factory.create(&credential).unwrap();
        assert_eq!(client.base_url(), "http://localhost:9000/v3/openai");
    }

    #[test]
    fn test_rejects_foreign_credential() {
        let factory = NovitaClientFactory::new(ProviderConfig::default());
        let credential = Credential::new(CredentialType::Custom("other".to_string()), "k".to_string());

        let err = factory.connect(&credential).unwrap_err();
        assert!(err.is_credential());
    }
}
