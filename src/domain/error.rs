use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Credential error: {message}")]
    Credential { message: String },

    #[error("Provider error: {provider} - {message}")]
    Provider { provider: String, message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn credential(message: impl Into<String>) -> Self {
        Self::Credential {
            message: message.into(),
        }
    }

    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether the error was caused by rejected or missing credentials
    pub fn is_credential(&self) -> bool {
        matches!(self, Self::Credential { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let error = DomainError::not_found("Manifest 'llama-3-8b-instruct.yaml' not found");
        assert_eq!(
            error.to_string(),
            "Not found: Manifest 'llama-3-8b-instruct.yaml' not found"
        );
    }

    #[test]
    fn test_provider_error() {
        let error = DomainError::provider("novita", "HTTP 401: unauthorized");
        assert_eq!(
            error.to_string(),
            "Provider error: novita - HTTP 401: unauthorized"
        );
        assert!(!error.is_credential());
    }

    #[test]
    fn test_credential_error() {
        let error = DomainError::credential("API key is empty");
        assert_eq!(error.to_string(), "Credential error: API key is empty");
        assert!(error.is_credential());
    }
}
