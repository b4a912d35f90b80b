//! Validate command - check that an API key is accepted

use std::sync::Arc;

use anyhow::Context;
use clap::Args;

use crate::config::AppConfig;
use crate::domain::{CredentialProvider, CredentialType};
use crate::infrastructure::credentials::{EnvCredentialProvider, StaticCredentialProvider};
use crate::infrastructure::llm::NovitaClientFactory;
use crate::infrastructure::services::CredentialValidator;

/// Arguments for the validate command
#[derive(Args, Clone)]
pub struct ValidateArgs {
    /// API key to check; defaults to NOVITA_API_KEY
    #[arg(long)]
    pub api_key: Option<String>,

    /// Model to probe with (overrides config)
    #[arg(long)]
    pub model: Option<String>,
}

/// Validate credentials with a minimal chat completion
pub async fn run(config: AppConfig, args: ValidateArgs) -> anyhow::Result<()> {
    let source: Box<dyn CredentialProvider> = match args.api_key {
        Some(key) => Box::new(StaticCredentialProvider::new(CredentialType::Novita, key)?),
        None => Box::new(EnvCredentialProvider::novita()),
    };

    let model = args
        .model
        .unwrap_or_else(|| config.provider.validation_model.clone());
    let connector = Arc::new(NovitaClientFactory::new(config.provider.clone()));
    let validator = CredentialValidator::new(connector, model);

    let credential = validator
        .validate_from(source.as_ref())
        .await
        .with_context(|| format!("API key from {} was rejected", source.describe()))?;

    println!(
        "API key {} is valid (probed {})",
        credential.masked_key(),
        validator.validation_model()
    );
    Ok(())
}
