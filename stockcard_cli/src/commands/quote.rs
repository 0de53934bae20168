use anyhow::Result;
use clap::Args;
use stockcard_lib::validation;
use stockcard_lib::{card, load_quote, AppConfig, ChartFetcher};

use super::FetchArgs;
use crate::output::{print_json, print_quotes_markdown, print_quotes_table, OutputFormat};

#[derive(Args)]
pub struct QuoteArgs {
    /// Ticker symbol (defaults to the configured default symbol)
    #[arg(long)]
    pub symbol: Option<String>,

    #[command(flatten)]
    pub fetch: FetchArgs,
}

/// Fetches one quote and prints its card: the Adaptive Card payload for
/// `json`, a summary table otherwise.
pub async fn run(args: &QuoteArgs, config: &AppConfig, format: &OutputFormat) -> Result<()> {
    let mut config = config.clone();
    args.fetch.apply(&mut config)?;

    let symbol = validation::validate_symbol(
        args.symbol.as_deref().unwrap_or(&config.default_symbol),
    )?;
    let fetcher = ChartFetcher::from_config(&config);
    let details = load_quote(&fetcher, &symbol).await?;

    match format {
        OutputFormat::Json => print_json(&card::build(&details)),
        OutputFormat::Table => print_quotes_table(&[details]),
        OutputFormat::Markdown => print_quotes_markdown(&[details]),
    }

    Ok(())
}
