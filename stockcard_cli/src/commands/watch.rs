use std::time::Duration;

use anyhow::{bail, Result};
use clap::Args;
use stockcard_lib::{
    AppConfig, ChartFetcher, MemoryContainer, QuoteControl, RenderOutcome, StockMarketCard,
    WidgetConfig,
};

use super::FetchArgs;
use crate::output::{print_card_markdown, print_card_table, print_json_line, OutputFormat};

#[derive(Args)]
pub struct WatchArgs {
    /// Ticker symbol; repeat to rotate through several on each refresh
    #[arg(long = "symbol")]
    pub symbols: Vec<String>,

    /// Seconds between refreshes
    #[arg(long, default_value = "60")]
    pub every: u64,

    /// Stop after this many renders (runs until Ctrl-C when omitted)
    #[arg(long)]
    pub count: Option<u64>,

    #[command(flatten)]
    pub fetch: FetchArgs,
}

/// Hosts the widget in-process: initialize, refresh on a timer, teardown on
/// Ctrl-C or once `--count` renders are done. Each render prints the card
/// the container now shows.
pub async fn run(args: &WatchArgs, config: &AppConfig, format: &OutputFormat) -> Result<()> {
    check_schedule(args.every, args.count)?;
    let mut config = config.clone();
    args.fetch.apply(&mut config)?;

    let symbols: Vec<String> = if args.symbols.is_empty() {
        vec![config.default_symbol.clone()]
    } else {
        args.symbols.clone()
    };

    let container = MemoryContainer::new();
    let widget = StockMarketCard::new(ChartFetcher::from_config(&config), container.clone())
        .with_default_symbol(config.default_symbol.clone());

    let outcome = widget.initialize(WidgetConfig::new(&symbols[0])).await;
    report(&outcome, &container, format);

    let mut ticker = tokio::time::interval(Duration::from_secs(args.every));
    ticker.tick().await;

    let mut renders: u64 = 1;
    while args.count.map_or(true, |max| renders < max) {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = tokio::signal::ctrl_c() => {
                eprintln!("Interrupted");
                break;
            }
        }
        let symbol = &symbols[(renders as usize) % symbols.len()];
        let outcome = widget.refresh(WidgetConfig::new(symbol)).await;
        report(&outcome, &container, format);
        renders += 1;
    }

    widget.teardown();
    Ok(())
}

fn check_schedule(every: u64, count: Option<u64>) -> Result<()> {
    if every == 0 {
        bail!("--every must be at least 1 second");
    }
    if count == Some(0) {
        bail!("--count must be at least 1");
    }
    Ok(())
}

fn report(outcome: &RenderOutcome, container: &MemoryContainer, format: &OutputFormat) {
    let now = chrono::Utc::now().format("%H:%M:%S");
    match outcome {
        RenderOutcome::Rendered => eprintln!("[{}] rendered", now),
        RenderOutcome::Failed(e) => eprintln!("[{}] showing fallback: {}", now, e),
        RenderOutcome::Stale | RenderOutcome::TornDown => return,
    }
    if let Some(card) = container.current() {
        match format {
            OutputFormat::Json => print_json_line(&card),
            OutputFormat::Table => print_card_table(&card),
            OutputFormat::Markdown => print_card_markdown(&card),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_accepts_positive_values() {
        assert!(check_schedule(1, None).is_ok());
        assert!(check_schedule(60, Some(1)).is_ok());
    }

    #[test]
    fn schedule_rejects_zero_interval() {
        let err = check_schedule(0, None).unwrap_err();
        assert_eq!(err.to_string(), "--every must be at least 1 second");
    }

    #[test]
    fn schedule_rejects_zero_count() {
        let err = check_schedule(60, Some(0)).unwrap_err();
        assert_eq!(err.to_string(), "--count must be at least 1");
    }
}
