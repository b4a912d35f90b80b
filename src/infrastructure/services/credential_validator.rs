//! Provider credential validation

use std::sync::Arc;

use tracing::{debug, error, info};

use crate::domain::{
    Credential, CredentialProvider, CredentialType, DomainError, LlmConnector, LlmRequest,
    SamplingParams,
};

/// Prompt sent when probing a key
const PROBE_PROMPT: &str = "ping";

/// Tokens requested for the probe; the answer itself is discarded
const PROBE_MAX_TOKENS: u32 = 5;

/// Checks that a platform API key is accepted.
///
/// The probe always targets one fixed model, whichever model the key will
/// later be used with, so any key that can run chat completions passes.
#[derive(Debug, Clone)]
pub struct CredentialValidator {
    connector: Arc<dyn LlmConnector>,
    validation_model: String,
}

impl CredentialValidator {
    pub fn new(connector: Arc<dyn LlmConnector>, validation_model: impl Into<String>) -> Self {
        Self {
            connector,
            validation_model: validation_model.into(),
        }
    }

    pub fn validation_model(&self) -> &str {
        &self.validation_model
    }

    /// Validate a credential with a minimal chat completion
    pub async fn validate(&self, credential: &Credential) -> Result<(), DomainError> {
        let result = self.probe(credential).await;

        match result {
            Ok(()) => {
                info!(model = %self.validation_model, "novita credentials validated");
                Ok(())
            }
            Err(e) if e.is_credential() => Err(e),
            Err(e) => {
                error!(error = %e, "novita credentials validate failed");
                Err(DomainError::credential(format!(
                    "Credentials validation failed: {}",
                    e
                )))
            }
        }
    }

    /// Fetch the Novita credential from `source` and validate it.
    ///
    /// Returns the credential that passed.
    pub async fn validate_from(
        &self,
        source: &dyn CredentialProvider,
    ) -> Result<Credential, DomainError> {
        let credential = source.get_credential(&CredentialType::Novita).await?;
        self.validate(&credential).await?;
        Ok(credential)
    }

    async fn probe(&self, credential: &Credential) -> Result<(), DomainError> {
        let provider = self.connector.connect(credential)?;
        debug!(
            provider = provider.provider_name(),
            model = %self.validation_model,
            "Probing credentials"
        );
        let request = LlmRequest::prompt(PROBE_PROMPT)
            .with_params(SamplingParams::default().max_tokens(PROBE_MAX_TOKENS));

        provider.chat(&self.validation_model, request).await?;
        Ok(())
    }
}
