use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Which inference platform a key belongs to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialType {
    Novita,
    Custom(String),
}

/// A platform API key
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    credential_type: CredentialType,
    api_key: String,
}

impl Credential {
    pub fn new(credential_type: CredentialType, api_key: String) -> Self {
        Self {
            credential_type,
            api_key,
        }
    }

    /// Build a credential, rejecting blank keys.
    ///
    /// Platform consoles only show a key once, so a copy/paste that loses it
    /// usually shows up here as an empty string.
    pub fn try_new(
        credential_type: CredentialType,
        api_key: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let api_key = api_key.into().trim().to_string();

        if api_key.is_empty() {
            return Err(DomainError::credential(format!(
                "API key for {} is empty",
                credential_type
            )));
        }

        Ok(Self::new(credential_type, api_key))
    }

    pub fn credential_type(&self) -> &CredentialType {
        &self.credential_type
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Key with everything but the last four characters hidden
    pub fn masked_key(&self) -> String {
        let chars: Vec<char> = self.api_key.chars().collect();
        if chars.len() <= 8 {
            return "****".to_string();
        }

        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("****{}", tail)
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("credential_type", &self.credential_type)
            .field("api_key", &self.masked_key())
            .finish()
    }
}

impl std::fmt::Display for CredentialType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CredentialType::Novita => write!(f, "novita"),
            CredentialType::Custom(name) => write!(f, "custom:{}", name),
        }
    }
}
