use async_trait::async_trait;

use crate::domain::{Credential, CredentialProvider, CredentialType, DomainError};

/// Key pasted on the command line
#[derive(Debug, Clone)]
pub struct StaticCredentialProvider {
    credential: Credential,
}

impl StaticCredentialProvider {
    pub fn new(credential_type: CredentialType, api_key: impl Into<String>) -> Result<Self, DomainError> {
        Ok(Self {
            credential: Credential::try_new(credential_type, api_key)?,
        })
    }
}

#[async_trait]
impl CredentialProvider for StaticCredentialProvider {
    async fn get_credential(
        &self,
        credential_type: &CredentialType,
    ) -> Result<Credential, DomainError> {
        if self.credential.credential_type() != credential_type {
            return Err(DomainError::credential(format!(
                "Key given on the command line is for {}, not {}",
                self.credential.credential_type(),
                credential_type
            )));
        }

        Ok(self.credential.clone())
    }

    fn describe(&self) -> String {
        "--api-key".to_string()
    }
}
