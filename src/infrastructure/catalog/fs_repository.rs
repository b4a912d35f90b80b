//! Directory-backed manifest repository

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, warn};

use crate::domain::catalog::POSITION_FILE_NAME;
use crate::domain::{DomainError, ManifestRepository, ModelManifest, StoredManifest};

const MANIFEST_EXTENSION: &str = "yaml";

/// Stores one YAML manifest per model in a flat directory
#[derive(Debug, Clone)]
pub struct FsManifestRepository {
    dir: PathBuf,
}

impl FsManifestRepository {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, file_name: &str) -> Result<PathBuf, DomainError> {
        if file_name.is_empty()
            || file_name.contains(['/', '\\'])
            || file_name == "."
            || file_name == ".."
        {
            return Err(DomainError::validation(format!(
                "Invalid manifest file name '{}'",
                file_name
            )));
        }
        Ok(self.dir.join(file_name))
    }

    async fn write_atomic(&self, path: &Path, contents: &str) -> Result<(), DomainError> {
        fs::create_dir_all(&self.dir).await.map_err(|e| {
            DomainError::storage(format!("Failed to create {}: {}", self.dir.display(), e))
        })?;

        let tmp = path.with_extension("yaml.tmp");
        fs::write(&tmp, contents)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to write {}: {}", tmp.display(), e)))?;

        fs::rename(&tmp, path).await.map_err(|e| {
            DomainError::storage(format!("Failed to replace {}: {}", path.display(), e))
        })
    }

    async fn read_manifest(path: &Path) -> Option<ModelManifest> {
        let contents = match fs::read_to_string(path).await {
            Ok(contents) => contents,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Skipping unreadable manifest");
                return None;
            }
        };

        match serde_yaml::from_str::<ModelManifest>(&contents) {
            Ok(manifest) if !manifest.model.trim().is_empty() => Some(manifest),
            Ok(_) => {
                warn!(path = %path.display(), "Skipping manifest without a model id");
                None
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Skipping invalid manifest");
                None
            }
        }
    }
}

#[async_trait]
impl ManifestRepository for FsManifestRepository {
    async fn list(&self) -> Result<Vec<StoredManifest>, DomainError> {
        let file_names = self.file_names().await?;

        let mut manifests = Vec::with_capacity(file_names.len());
        for file_name in file_names {
            let path = self.dir.join(&file_name);
            debug!(path = %path.display(), "Loading manifest");

            if let Some(manifest) = Self::read_manifest(&path).await {
                manifests.push(StoredManifest {
                    file_name,
                    manifest,
                });
            }
        }

        Ok(manifests)
    }

    async fn file_names(&self) -> Result<Vec<String>, DomainError> {
        let mut entries = match fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(DomainError::storage(format!(
                    "Failed to read {}: {}",
                    self.dir.display(),
                    e
                )))
            }
        };

        let mut file_names = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to list manifests: {}", e)))?
        {
            let path = entry.path();
            let is_manifest = path.extension().and_then(|ext| ext.to_str()) == Some(MANIFEST_EXTENSION);
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };

            if is_manifest && name != POSITION_FILE_NAME {
                file_names.push(name.to_string());
            }
        }
        file_names.sort();

        Ok(file_names)
    }

    async fn save(&self, file_name: &str, manifest: &ModelManifest) -> Result<(), DomainError> {
        let path = self.path_for(file_name)?;
        let contents = serde_yaml::to_string(manifest).map_err(|e| {
            DomainError::internal(format!("Failed to serialize {}: {}", file_name, e))
        })?;

        self.write_atomic(&path, &contents).await
    }

    async fn delete(&self, file_name: &str) -> Result<(), DomainError> {
        let path = self.path_for(file_name)?;

        fs::remove_file(&path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => DomainError::not_found(format!("Manifest '{}' not found", file_name)),
            _ => DomainError::storage(format!("Failed to delete {}: {}", path.display(), e)),
        })
    }

    async fn write_position(&self, contents: &str) -> Result<(), DomainError> {
        let path = self.dir.join(POSITION_FILE_NAME);
        self.write_atomic(&path, contents).await
    }
}
