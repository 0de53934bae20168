//! Quote fetcher seam between the widget and the chart client.

use std::future::Future;

use stockcard_api::types::ChartResponse;
use stockcard_api::{ChartQuery, Client};

use crate::config::AppConfig;
use crate::error::StockCardError;
use crate::quote::{self, QuoteDetails};

/// Source of raw chart data for a symbol.
pub trait QuoteFetcher: Send + Sync {
    fn fetch(
        &self,
        symbol: &str,
    ) -> impl Future<Output = Result<ChartResponse, StockCardError>> + Send;
}

/// [`QuoteFetcher`] backed by the HTTP chart client.
#[derive(Clone, Debug)]
pub struct ChartFetcher {
    client: Client,
    query: ChartQuery,
}

impl ChartFetcher {
    pub fn new(client: Client, query: ChartQuery) -> Self {
        Self { client, query }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let client = Client::with_base_url(&config.base_url).with_api_key(config.api_key.clone());
        Self::new(client, config.chart_query())
    }
}

impl QuoteFetcher for ChartFetcher {
    async fn fetch(&self, symbol: &str) -> Result<ChartResponse, StockCardError> {
        Ok(self.client.get_chart(symbol, &self.query).await?)
    }
}

/// Fetches and maps one quote.
pub async fn load_quote<F: QuoteFetcher>(
    fetcher: &F,
    symbol: &str,
) -> Result<QuoteDetails, StockCardError> {
    tracing::info!("Fetching quote for {}", symbol);
    let raw = fetcher.fetch(symbol).await?;
    quote::map(&raw)
}
