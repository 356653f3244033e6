use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::{ColumnsParams, QueryParams, ScrapeParams, TrainParams, ViewParams};
use crate::inference::DEFAULT_ENDPOINT;

/// Top-level CLI parser for the `autoretrieve` binary.
#[derive(Debug, Parser)]
#[command(
    name = "autoretrieve",
    version,
    about = "Search the web for a list of entities, store the hits, and hand them to an inference endpoint"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// SQLite database holding scraped results
    #[arg(long, global = true, env = "AUTORETRIEVE_DB", default_value = "scraped_results.db")]
    pub db: PathBuf,

    /// Inference endpoint used by `train` and `query`
    #[arg(long, global = true, env = "AUTORETRIEVE_INFERENCE_URL", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Search each entity of a CSV column and store the organic results
    Scrape(ScrapeParams),
    /// List the column names of a CSV file
    Columns(ColumnsParams),
    /// Show every stored result
    View(ViewParams),
    /// Submit all stored results to the inference endpoint
    Train(TrainParams),
    /// Ask the inference endpoint about every distinct stored entity
    Query(QueryParams),
}
