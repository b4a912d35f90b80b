use async_trait::async_trait;
use std::fmt::Debug;

use super::{Credential, CredentialType};
use crate::domain::DomainError;

/// A place an operator can put their platform API key
#[async_trait]
pub trait CredentialProvider: Send + Sync + Debug {
    /// Resolve the key for `credential_type`.
    ///
    /// Fails with `DomainError::Credential` when this source holds no usable
    /// key for that platform.
    async fn get_credential(&self, credential_type: &CredentialType) -> Result<Credential, DomainError>;

    /// Where the key is looked up, for operator-facing messages
    fn describe(&self) -> String;
}

#[cfg(test)]
pub mod mock {
    use super::*;

    /// Holds at most one credential
    #[derive(Debug, Default)]
    pub struct MockCredentialProvider {
        credential: Option<Credential>,
    }

    impl MockCredentialProvider {
        pub fn empty() -> Self {
            Self::default()
        }

        pub fn with_credential(credential: Credential) -> Self {
            Self {
                credential: Some(credential),
            }
        }
    }

    #[async_trait]
    impl CredentialProvider for MockCredentialProvider {
        async fn get_credential(
            &self,
            credential_type: &CredentialType,
        ) -> Result<Credential, DomainError> {
            self.credential
                .as_ref()
                .filter(|c| c.credential_type() == credential_type)
                .cloned()
                .ok_or_else(|| {
                    DomainError::credential(format!("No {} key in mock", credential_type))
                })
        }

        fn describe(&self) -> String {
            "mock".to_string()
        }
    }
}
