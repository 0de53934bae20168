//! CLI subcommand implementations.

pub mod details;
pub mod quote;
pub mod watch;

use anyhow::{anyhow, Result};
use clap::Args;
use stockcard_lib::{AppConfig, ChartInterval, ChartRange};

/// Fetch settings shared by every subcommand. Flags override the config
/// file and environment.
#[derive(Args)]
pub struct FetchArgs {
    /// Chart interval (1m, 5m, 15m, 1h, 1d, 1wk, 1mo, ...)
    #[arg(long)]
    pub interval: Option<String>,

    /// Chart range (1d, 5d, 1mo, 3mo, 6mo, 1y, ytd, max, ...)
    #[arg(long)]
    pub range: Option<String>,

    /// Override the chart endpoint base URL
    #[arg(long)]
    pub base_url: Option<String>,
}

impl FetchArgs {
    pub fn apply(&self, config: &mut AppConfig) -> Result<()> {
        if let Some(interval) = &self.interval {
            config.interval = Some(interval.parse::<ChartInterval>().map_err(|e| anyhow!(e))?);
        }
        if let Some(range) = &self.range {
            config.range = Some(range.parse::<ChartRange>().map_err(|e| anyhow!(e))?);
        }
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        Ok(())
    }
}
