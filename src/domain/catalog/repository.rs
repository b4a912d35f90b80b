use async_trait::async_trait;
use std::fmt::Debug;

use super::ModelManifest;
use crate::domain::DomainError;

/// A manifest together with the file it was read from
#[derive(Debug, Clone, PartialEq)]
pub struct StoredManifest {
    pub file_name: String,
    pub manifest: ModelManifest,
}

/// Persistence for model manifests and the ordering file
#[async_trait]
pub trait ManifestRepository: Send + Sync + Debug {
    /// Every readable manifest. Unreadable entries are skipped, not fatal.
    async fn list(&self) -> Result<Vec<StoredManifest>, DomainError>;

    /// Names of every manifest file present, including ones `list` skipped
    async fn file_names(&self) -> Result<Vec<String>, DomainError>;

    async fn save(&self, file_name: &str, manifest: &ModelManifest) -> Result<(), DomainError>;

    async fn delete(&self, file_name: &str) -> Result<(), DomainError>;

    /// Replace the `_position.yaml` contents
    async fn write_position(&self, contents: &str) -> Result<(), DomainError>;
}
