mod cli;
mod commands;
mod inference;
mod input;
mod output;
mod pipeline;
mod serp;
mod store;
mod template;

pub const USER_AGENT: &str = concat!("autoretrieve/", env!("CARGO_PKG_VERSION"));

use clap::Parser;
use cli::{Cli, Commands};
use commands::Retriever;
use store::ResultStore;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(format!("autoretrieve={level}").parse()?),
        )
        .init();

    let output = run(cli)
        .await
        .inspect_err(|e| tracing::error!("{e}"))?;

    print!("{output}");
    Ok(())
}

/// Dispatch one subcommand. The store is opened only by actions that read or write it.
async fn run(cli: Cli) -> Result<String, Box<dyn std::error::Error>> {
    let command = match cli.command {
        Commands::Columns(params) => return Ok(commands::columns(params)?),
        other => other,
    };

    let db = cli.db.to_string_lossy();
    info!(db = %db, "opening result store");
    let store = ResultStore::open(&db)
        .await
        .inspect_err(|e| tracing::error!("failed to open result store: {e}"))?;

    let http = commands::http_client()?;
    let retriever = Retriever::new(http, store, &cli.endpoint);

    let output = match command {
        Commands::Scrape(params) => retriever.scrape(params).await?,
        Commands::View(params) => retriever.view(params).await?,
        Commands::Train(params) => retriever.train(params).await?,
        Commands::Query(params) => retriever.query(params).await?,
        Commands::Columns(params) => commands::columns(params)?,
    };
    Ok(output)
}
