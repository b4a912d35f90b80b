//! In-memory manifest repository

use std::collections::{BTreeMap, BTreeSet};
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::{DomainError, ManifestRepository, ModelManifest, StoredManifest};

/// Thread-safe in-memory manifest repository
///
/// Useful for testing and dry runs. Data is lost when the process terminates.
#[derive(Debug, Default)]
pub struct InMemoryManifestRepository {
    manifests: RwLock<BTreeMap<String, ModelManifest>>,
    unreadable: RwLock<BTreeSet<String>>,
    position: RwLock<Option<String>>,
}

impl InMemoryManifestRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate from existing manifests
    pub fn with_manifests(manifests: Vec<StoredManifest>) -> Self {
        let repo = Self::new();
        {
            let mut map = repo.manifests.write().unwrap_or_else(|e| e.into_inner());
            for stored in manifests {
                map.insert(stored.file_name, stored.manifest);
            }
        }
        repo
    }

    /// Occupy a file name with content `list` cannot parse
    pub fn with_unreadable(self, file_name: impl Into<String>) -> Self {
        self.unreadable
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(file_name.into());
        self
    }

    /// Last ordering file written, if any
    pub fn position(&self) -> Option<String> {
        self.position.read().ok().and_then(|p| p.clone())
    }

    pub fn get(&self, file_name: &str) -> Option<ModelManifest> {
        self.manifests
            .read()
            .ok()
            .and_then(|map| map.get(file_name).cloned())
    }
}

#[async_trait]
impl ManifestRepository for InMemoryManifestRepository {
    async fn list(&self) -> Result<Vec<StoredManifest>, DomainError> {
        let manifests = self.manifests.read().map_err(|e| {
            DomainError::storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(manifests
            .iter()
            .map(|(file_name, manifest)| StoredManifest {
                file_name: file_name.clone(),
                manifest: manifest.clone(),
            })
            .collect())
    }

    async fn file_names(&self) -> Result<Vec<String>, DomainError> {
        let manifests = self.manifests.read().map_err(|e| {
            DomainError::storage(format!("Failed to acquire read lock: {}", e))
        })?;
        let unreadable = self.unreadable.read().map_err(|e| {
            DomainError::storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let names: BTreeSet<&String> = manifests.keys().chain(unreadable.iter()).collect();
        Ok(names.into_iter().cloned().collect())
    }

    async fn save(&self, file_name: &str, manifest: &ModelManifest) -> Result<(), DomainError> {
        let mut manifests = self.manifests.write().map_err(|e| {
            DomainError::storage(format!("Failed to acquire write lock: {}", e))
        })?;

        manifests.insert(file_name.to_string(), manifest.clone());
        if let Ok(mut unreadable) = self.unreadable.write() {
            unreadable.remove(file_name);
        }
        Ok(())
    }

    async fn delete(&self, file_name: &str) -> Result<(), DomainError> {
        let mut manifests = self.manifests.write().map_err(|e| {
            DomainError::storage(format!("Failed to acquire write lock: {}", e))
        })?;

        manifests
            .remove(file_name)
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found(format!("Manifest '{}' not found", file_name)))
    }

    async fn write_position(&self, contents: &str) -> Result<(), DomainError> {
        let mut position = self.position.write().map_err(|e| {
            DomainError::storage(format!("Failed to acquire write lock: {}", e))
        })?;

        *position = Some(contents.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ApiModel;

    fn stored(file_name: &str, id: &str) -> StoredManifest {
        StoredManifest {
            file_name: file_name.to_string(),
            manifest: ModelManifest::from_api(&ApiModel::new(id, 4096), "CNY"),
        }
    }

    #[tokio::test]
    async fn test_unreadable_files_are_named_but_not_listed() {
        let repo = InMemoryManifestRepository::with_manifests(vec![stored("b.yaml", "v/b")])
            .with_unreadable("a.yaml");

        assert_eq!(repo.list().await.unwrap().len(), 1);
        assert_eq!(repo.file_names().await.unwrap(), vec!["a.yaml", "b.yaml"]);

        repo.save("a.yaml", &stored("a.yaml", "v/a").manifest).await.unwrap();
        assert_eq!(repo.list().await.unwrap().len(), 2);
        assert_eq!(repo.file_names().await.unwrap(), vec!["a.yaml", "b.yaml"]);
    }
}
