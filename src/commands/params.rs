use std::path::PathBuf;

use clap::Args;

use crate::output::OutputFormat;
use crate::template::PlaceholderPolicy;

#[derive(Debug, Args)]
pub struct ScrapeParams {
    /// CSV file with one entity per row
    pub input: PathBuf,
    /// Column holding entity names (default: first column)
    #[arg(short, long)]
    pub column: Option<String>,
    /// Query template; `{entity}` is replaced by each entity
    #[arg(short, long, default_value = "Find contact details for {entity}.")]
    pub template: String,
    /// Whether a template without `{entity}` is accepted
    #[arg(long, value_enum, default_value_t = PlaceholderPolicy::Allow)]
    pub placeholder_policy: PlaceholderPolicy,
    /// Also write the scraped rows to this CSV file (Entity,URL,Title,Snippet)
    #[arg(short, long)]
    pub export: Option<PathBuf>,
    /// How to print the scraped rows
    #[arg(short, long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

#[derive(Debug, Args)]
pub struct ColumnsParams {
    /// CSV file to inspect
    pub input: PathBuf,
}

#[derive(Debug, Args)]
pub struct ViewParams {
    /// How to print the stored rows
    #[arg(short, long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

#[derive(Debug, Args)]
pub struct TrainParams {
    /// Print the submitted training records as JSON
    #[arg(long)]
    pub show_data: bool,
}

#[derive(Debug, Args)]
pub struct QueryParams {
    /// Query template; `{entity}` is replaced by each stored entity
    #[arg(short, long, default_value = "Retrieve URLs for {entity}.")]
    pub template: String,
    /// Whether a template without `{entity}` is accepted
    #[arg(long, value_enum, default_value_t = PlaceholderPolicy::Require)]
    pub placeholder_policy: PlaceholderPolicy,
}
