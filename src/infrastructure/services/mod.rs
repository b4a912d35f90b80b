//! Application services

mod catalog_sync_service;
mod credential_validator;

pub use catalog_sync_service::{CatalogSyncService, SyncOptions, SyncReport, UpdatedManifest};
pub use credential_validator::CredentialValidator;
