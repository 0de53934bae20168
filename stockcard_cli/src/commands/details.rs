use anyhow::Result;
use clap::Args;
use stockcard_lib::validation;
use stockcard_lib::{load_quote, AppConfig, ChartFetcher, QuoteDetails};

use super::FetchArgs;
use crate::output::{print_json, print_quotes_markdown, print_quotes_table, OutputFormat};

#[derive(Args)]
pub struct DetailsArgs {
    /// Ticker symbols to look up; repeat for several
    #[arg(long = "symbol", required = true)]
    pub symbols: Vec<String>,

    #[command(flatten)]
    pub fetch: FetchArgs,
}

/// Prints the mapped quote details for one or more symbols, one request each.
pub async fn run(args: &DetailsArgs, config: &AppConfig, format: &OutputFormat) -> Result<()> {
    let mut config = config.clone();
    args.fetch.apply(&mut config)?;
    let fetcher = ChartFetcher::from_config(&config);

    let mut details: Vec<QuoteDetails> = Vec::with_capacity(args.symbols.len());
    for raw in &args.symbols {
        let symbol = validation::validate_symbol(raw)?;
        details.push(load_quote(&fetcher, &symbol).await?);
    }

    match format {
        OutputFormat::Json => print_json(&details),
        OutputFormat::Table => print_quotes_table(&details),
        OutputFormat::Markdown => print_quotes_markdown(&details),
    }

    Ok(())
}
