//! Library layer for the stock quote card: quote mapping, Adaptive Card
//! assembly, and the widget lifecycle the host drives.
//!
//! Wraps the `stockcard_api` chart client with a validating mapper, a
//! pure card builder, layered configuration, and a widget that keeps
//! exactly one rendered view in its container.

pub mod card;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod quote;
pub mod validation;
pub mod widget;

pub use stockcard_api;
pub use stockcard_api::types;
pub use stockcard_api::{ChartInterval, ChartQuery, ChartRange};

pub use card::{CardDocument, Direction};
pub use config::{AppConfig, ConfigError, WidgetConfig};
pub use error::StockCardError;
pub use fetcher::{load_quote, ChartFetcher, QuoteFetcher};
pub use quote::QuoteDetails;
pub use widget::{CardContainer, MemoryContainer, QuoteControl, RenderOutcome, StockMarketCard};
