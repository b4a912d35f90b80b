//! Catalog sync service - mirrors the remote model list into manifests

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::catalog::manifest_file_name;
use crate::domain::{
    render_position_file, ApiModel, DomainError, ManifestChange, ManifestRepository,
    ModelManifest, ModelSource,
};

/// Options for a single sync run
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncOptions {
    /// Compute the report without writing anything
    pub dry_run: bool,
}

/// Manifest updated during a sync
#[derive(Debug, Clone, PartialEq)]
pub struct UpdatedManifest {
    pub file_name: String,
    pub changes: Vec<ManifestChange>,
}

/// Outcome of a sync run, by file name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncReport {
    pub created: Vec<String>,
    pub updated: Vec<UpdatedManifest>,
    pub unchanged: Vec<String>,
    pub deleted: Vec<String>,
    pub dry_run: bool,
}

impl SyncReport {
    pub fn has_changes(&self) -> bool {
        !(self.created.is_empty() && self.updated.is_empty() && self.deleted.is_empty())
    }
}

/// Keeps a manifest directory in step with the platform's model list.
///
/// Existing manifests are matched by their `model` key, not their file
/// name, so renamed files keep being updated in place.
#[derive(Debug, Clone)]
pub struct CatalogSyncService {
    source: Arc<dyn ModelSource>,
    repository: Arc<dyn ManifestRepository>,
    currency: String,
}

impl CatalogSyncService {
    pub fn new(
        source: Arc<dyn ModelSource>,
        repository: Arc<dyn ManifestRepository>,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            source,
            repository,
            currency: currency.into(),
        }
    }

    pub async fn sync(&self, options: SyncOptions) -> Result<SyncReport, DomainError> {
        let models = dedup_models(self.source.list_models().await?);

        // An empty list is far more likely an upstream fault than a real
        // catalog, and acting on it would delete every manifest.
        if models.is_empty() {
            return Err(DomainError::provider(
                "novita",
                "Model list is empty, refusing to sync",
            ));
        }

        let mut report = SyncReport {
            dry_run: options.dry_run,
            ..SyncReport::default()
        };

        let position = render_position_file(models.iter().map(|m| m.id.as_str()));
        if !options.dry_run {
            self.repository.write_position(&position).await?;
        }

        let mut taken_names: HashSet<String> =
            self.repository.file_names().await?.into_iter().collect();
        let mut existing: HashMap<String, (String, ModelManifest)> = HashMap::new();
        for stored in self.repository.list().await? {
            taken_names.insert(stored.file_name.clone());
            if let Some((previous, _)) = existing.get(&stored.manifest.model) {
                warn!(
                    model = %stored.manifest.model,
                    kept = %stored.file_name,
                    ignored = %previous,
                    "Model has more than one manifest"
                );
            }
            existing.insert(
                stored.manifest.model.clone(),
                (stored.file_name, stored.manifest),
            );
        }

        for model in &models {
            match existing.get(&model.id) {
                Some((file_name, manifest)) => {
                    let mut manifest = manifest.clone();
                    let changes = manifest.reconcile(model, &self.currency);

                    if changes.is_empty() {
                        info!(file = %file_name, "No changes needed");
                        report.unchanged.push(file_name.clone());
                        continue;
                    }

                    if !options.dry_run {
                        self.repository.save(file_name, &manifest).await?;
                    }
                    info!(file = %file_name, changes = changes.len(), "Updated manifest");
                    for change in &changes {
                        info!(file = %file_name, "  - {}", change);
                    }
                    report.updated.push(UpdatedManifest {
                        file_name: file_name.clone(),
                        changes,
                    });
                }
                None => {
                    let file_name = unique_file_name(model, &taken_names);
                    let manifest = ModelManifest::from_api(model, &self.currency);

                    if !options.dry_run {
                        self.repository.save(&file_name, &manifest).await?;
                    }
                    info!(file = %file_name, model = %model.id, "Created manifest");
                    taken_names.insert(file_name.clone());
                    report.created.push(file_name);
                }
            }
        }

        let live: HashSet<&str> = models.iter().map(|m| m.id.as_str()).collect();
        let mut stale: Vec<(&String, &String)> = existing
            .iter()
            .filter(|(model_id, _)| !live.contains(model_id.as_str()))
            .map(|(model_id, (file_name, _))| (file_name, model_id))
            .collect();
        stale.sort();

        for (file_name, model_id) in stale {
            if !options.dry_run {
                self.repository.delete(file_name).await?;
            }
            info!(file = %file_name, model = %model_id, "Deleted manifest (model no longer exists)");
            report.deleted.push(file_name.clone());
        }

        Ok(report)
    }
}

/// Drop repeated ids, keeping the first position and the last record
fn dedup_models(models: Vec<ApiModel>) -> Vec<ApiModel> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut unique: Vec<ApiModel> = Vec::with_capacity(models.len());

    for model in models {
        match index.get(&model.id) {
            Some(&i) => unique[i] = model,
            None => {
                index.insert(model.id.clone(), unique.len());
                unique.push(model);
            }
        }
    }

    unique
}

/// File name for a new manifest that does not overwrite any existing file.
///
/// Tries the short name, then the family-prefixed one, then numbered
/// variants of the latter.
fn unique_file_name(model: &ApiModel, taken: &HashSet<String>) -> String {
    let short = manifest_file_name(&model.id);
    if !taken.contains(&short) {
        return short;
    }

    let stem = short.strip_suffix(".yaml").unwrap_or(short.as_str());
    let prefixed = format!("{}-{}", model.family(), stem);
    let mut file_name = format!("{}.yaml", prefixed);
    let mut suffix = 2u32;
    while taken.contains(&file_name) {
        file_name = format!("{}-{}.yaml", prefixed, suffix);
        suffix += 1;
    }

    warn!(model = %model.id, file = %file_name, "Manifest name {} already taken", short);
    file_name
}
