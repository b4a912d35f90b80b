use clap::Parser;
use novita_provider::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = cli::bootstrap(&cli);

    match cli.command {
        Command::Sync(args) => cli::sync::run(config, args).await,
        Command::Validate(args) => cli::validate::run(config, args).await,
        Command::Models(args) => cli::models::run(config, args).await,
    }
}
