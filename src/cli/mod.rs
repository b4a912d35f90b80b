//! CLI module for the Novita provider tools
//!
//! Subcommands:
//! - `sync`: mirror the remote model list into manifest files
//! - `validate`: check that an API key is accepted
//! - `models`: print the remote model list

pub mod models;
pub mod sync;
pub mod validate;

use clap::{Parser, Subcommand};
use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::domain::{CredentialProvider, CredentialType};
use crate::infrastructure::credentials::EnvCredentialProvider;
use crate::infrastructure::llm::{HttpClient, NovitaClient, NovitaClientFactory};
use crate::infrastructure::logging;

/// Novita AI model provider - credential checks and model catalog sync
#[derive(Parser)]
#[command(name = "novita-provider")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Override the API base URL from configuration
    #[arg(long, global = true, env = "NOVITA_BASE_URL")]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Sync model manifests with the remote model list
    Sync(sync::SyncArgs),

    /// Validate an API key against the platform
    Validate(validate::ValidateArgs),

    /// List models currently served by the platform
    Models(models::ModelsArgs),
}

/// Load configuration and logging, then apply global overrides.
///
/// `.env` must already be loaded so it can feed both clap and config.
pub fn bootstrap(cli: &Cli) -> AppConfig {
    let mut config = AppConfig::load().unwrap_or_default();
    if let Some(ref base_url) = cli.base_url {
        config.provider.base_url = base_url.clone();
    }

    logging::init_logging(&config.logging);
    config
}

/// Client for listing models: authenticated when `NOVITA_API_KEY` is set,
/// anonymous otherwise.
pub(crate) async fn catalog_client(config: &AppConfig) -> anyhow::Result<NovitaClient<HttpClient>> {
    let factory = NovitaClientFactory::new(config.provider.clone());

    let source = EnvCredentialProvider::novita();

    match source.get_credential(&CredentialType::Novita).await {
        Ok(credential) => {
            debug!(key = %credential.masked_key(), "Listing models with API key");
            Ok(factory.create(&credential)?)
        }
        Err(e) => {
            warn!(error = %e, source = %source.describe(), "No API key available, listing models anonymously");
            Ok(factory.create_anonymous()?)
        }
    }
}
