mod commands;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use stockcard_lib::AppConfig;

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "stockcard")]
#[command(about = "Render stock quotes as Adaptive Cards")]
struct Cli {
    /// Output format: json, table or markdown
    #[arg(long, default_value = "json", global = true)]
    output: String,

    /// TOML config file (base_url, api_key, default_symbol, interval, range)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a quote and print its card
    Quote(commands::quote::QuoteArgs),
    /// Print the mapped quote details
    Details(commands::details::DetailsArgs),
    /// Keep a card refreshed on an interval
    Watch(commands::watch::WatchArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("stockcard=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let format = match cli.output.as_str() {
        "table" => OutputFormat::Table,
        "markdown" | "md" => OutputFormat::Markdown,
        _ => OutputFormat::Json,
    };

    let config = AppConfig::load(cli.config.as_deref())?;

    match &cli.command {
        Commands::Quote(args) => commands::quote::run(args, &config, &format).await?,
        Commands::Details(args) => commands::details::run(args, &config, &format).await?,
        Commands::Watch(args) => commands::watch::run(args, &config, &format).await?,
    }

    Ok(())
}
