//! Models command - print the remote model list

use clap::Args;

use crate::config::AppConfig;
use crate::domain::{convert_price, determine_features, ModelSource};

/// Arguments for the models command
#[derive(Args, Clone)]
pub struct ModelsArgs {
    /// Print raw JSON records instead of a table
    #[arg(long)]
    pub json: bool,
}

/// List remote models
pub async fn run(config: AppConfig, args: ModelsArgs) -> anyhow::Result<()> {
    let client = super::catalog_client(&config).await?;
    let models = client.list_models().await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&models)?);
        return Ok(());
    }

    for model in &models {
        let features: Vec<&str> = determine_features(model)
            .iter()
            .map(|f| f.as_str())
            .collect();

        println!(
            "{:<48} ctx={:<8} in={:<10} out={:<10} {}",
            model.id,
            model.context_size,
            convert_price(model.input_token_price_per_m),
            convert_price(model.output_token_price_per_m),
            features.join(",")
        );
    }
    println!("{} models", models.len());

    Ok(())
}
