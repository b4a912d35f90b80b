use async_trait::async_trait;
use std::env::{self, VarError};

use crate::domain::{Credential, CredentialProvider, CredentialType, DomainError};

/// Environment variable holding the Novita API key
pub const NOVITA_API_KEY_VAR: &str = "NOVITA_API_KEY";

/// Reads one platform's key from an environment variable
#[derive(Debug, Clone)]
pub struct EnvCredentialProvider {
    credential_type: CredentialType,
    var: String,
}

impl EnvCredentialProvider {
    pub fn new(credential_type: CredentialType, var: impl Into<String>) -> Self {
        Self {
            credential_type,
            var: var.into(),
        }
    }

    /// `NOVITA_API_KEY`
    pub fn novita() -> Self {
        Self::new(CredentialType::Novita, NOVITA_API_KEY_VAR)
    }

    pub fn var(&self) -> &str {
        &self.var
    }
}

impl Default for EnvCredentialProvider {
    fn default() -> Self {
        Self::novita()
    }
}

#[async_trait]
impl CredentialProvider for EnvCredentialProvider {
    async fn get_credential(
        &self,
        credential_type: &CredentialType,
    ) -> Result<Credential, DomainError> {
        if credential_type != &self.credential_type {
            return Err(DomainError::credential(format!(
                "{} holds a {} key, not {}",
                self.var, self.credential_type, credential_type
            )));
        }

        let api_key = env::var(&self.var).map_err(|e| match e {
            VarError::NotPresent => DomainError::credential(format!(
                "Environment variable '{}' is not set",
                self.var
            )),
            VarError::NotUnicode(_) => DomainError::credential(format!(
                "Environment variable '{}' is not valid UTF-8",
                self.var
            )),
        })?;

        Credential::try_new(credential_type.clone(), api_key)
    }

    fn describe(&self) -> String {
        format!("environment variable {}", self.var)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_env_provider_with_set_variable() {
        // SAFETY: variable name is unique to this test
        unsafe { env::set_var("TEST_NOVITA_KEY_SET", " sk_test_123\n") };

        let provider = EnvCredentialProvider::new(CredentialType::Novita, "TEST_NOVITA_KEY_SET");

        let cred = provider.get_credential(&CredentialType::Novita).await.unwrap();
        assert_eq!(cred.api_key(), "sk_test_123");

        // SAFETY: Test cleanup
        unsafe { env::remove_var("TEST_NOVITA_KEY_SET") };
    }

    #[tokio::test]
    async fn test_env_provider_missing_variable() {
        let provider = EnvCredentialProvider::new(CredentialType::Novita, "NONEXISTENT_VAR_12345");

        let err = provider
            .get_credential(&CredentialType::Novita)
            .await
            .unwrap_err();
        assert!(err.is_credential());
        assert!(err.to_string().contains("NONEXISTENT_VAR_12345"));
    }

    #[tokio::test]
    async fn test_env_provider_blank_variable() {
        // SAFETY: variable name is unique to this test
        unsafe { env::set_var("TEST_NOVITA_KEY_BLANK", "  ") };

        let provider = EnvCredentialProvider::new(CredentialType::Novita, "TEST_NOVITA_KEY_BLANK");

        let result = provider.get_credential(&CredentialType::Novita).await;
        assert!(result.unwrap_err().is_credential());

        // SAFETY: Test cleanup
        unsafe { env::remove_var("TEST_NOVITA_KEY_BLANK") };
    }

    #[tokio::test]
    async fn test_other_platform_is_rejected() {
        let provider = EnvCredentialProvider::default();

        let result = provider
            .get_credential(&CredentialType::Custom("other".to_string()))
            .await;
        assert!(result.unwrap_err().is_credential());
    }

    #[test]
    fn test_defaults_to_novita_key() {
        let provider = EnvCredentialProvider::default();
        assert_eq!(provider.var(), NOVITA_API_KEY_VAR);
        assert_eq!(provider.describe(), "environment variable NOVITA_API_KEY");
    }
}
