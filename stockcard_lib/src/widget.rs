//! Host-facing widget lifecycle.
//!
//! The host drives the widget through [`QuoteControl`]: `initialize` once,
//! `refresh` whenever its symbol property changes, `teardown` at the end.
//! Every lifecycle call fetches, maps and builds a card, then swaps it into
//! the [`CardContainer`]. The container holds exactly one view; it is
//! replaced on each render, never appended to.

use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::card::{self, CardDocument};
use crate::config::{WidgetConfig, DEFAULT_SYMBOL};
use crate::error::StockCardError;
use crate::fetcher::{load_quote, QuoteFetcher};
use crate::validation::validate_symbol;

/// The host element the card is shown in.
pub trait CardContainer: Send + Sync {
    /// Replaces the current view with `card`.
    fn replace(&self, card: CardDocument);
    /// Removes the current view.
    fn clear(&self);
}

/// In-process container. Clones share the same view.
#[derive(Clone, Default)]
pub struct MemoryContainer {
    view: Arc<Mutex<Option<CardDocument>>>,
}

impl MemoryContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The card currently shown, if any.
    pub fn current(&self) -> Option<CardDocument> {
        self.view.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl CardContainer for MemoryContainer {
    fn replace(&self, card: CardDocument) {
        *self.view.lock().unwrap_or_else(|e| e.into_inner()) = Some(card);
    }

    fn clear(&self) {
        *self.view.lock().unwrap_or_else(|e| e.into_inner()) = None;
    }
}

/// Result of one lifecycle call.
#[derive(Debug)]
pub enum RenderOutcome {
    /// The quote card is now shown.
    Rendered,
    /// The fallback card is shown; the error explains why.
    Failed(StockCardError),
    /// A newer render started while this one was in flight; its result was dropped.
    Stale,
    /// The widget was torn down; nothing was shown.
    TornDown,
}

impl RenderOutcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, RenderOutcome::Rendered)
    }
}

/// Lifecycle contract implemented for the host.
pub trait QuoteControl {
    fn initialize(&self, config: WidgetConfig) -> impl Future<Output = RenderOutcome> + Send;
    fn refresh(&self, config: WidgetConfig) -> impl Future<Output = RenderOutcome> + Send;
    fn teardown(&self);
}

/// Stock quote widget.
///
/// Renders may overlap. Each one takes a generation number when it starts;
/// only the most recently started render may touch the container, so a slow
/// response can never overwrite a newer one.
pub struct StockMarketCard<F, C> {
    fetcher: F,
    container: C,
    default_symbol: String,
    symbol: Mutex<Option<String>>,
    generation: AtomicU64,
    torn_down: AtomicBool,
    /// Serializes the generation check with the container swap.
    swap: Mutex<()>,
}

impl<F: QuoteFetcher, C: CardContainer> StockMarketCard<F, C> {
    pub fn new(fetcher: F, container: C) -> Self {
        Self {
            fetcher,
            container,
            default_symbol: DEFAULT_SYMBOL.to_string(),
            symbol: Mutex::new(None),
            generation: AtomicU64::new(0),
            torn_down: AtomicBool::new(false),
            swap: Mutex::new(()),
        }
    }

    /// Symbol used when the host passes a blank one.
    pub fn with_default_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.default_symbol = symbol.into();
        self
    }

    /// The symbol of the most recent lifecycle call.
    pub fn symbol(&self) -> Option<String> {
        self.symbol.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn container(&self) -> &C {
        &self.container
    }

    async fn render(&self, config: WidgetConfig) -> RenderOutcome {
        if self.torn_down.load(Ordering::SeqCst) {
            return RenderOutcome::TornDown;
        }
        let token = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let requested = config.symbol_or(&self.default_symbol).to_string();
        *self.symbol.lock().unwrap_or_else(|e| e.into_inner()) = Some(requested.clone());

        let result = match validate_symbol(&requested) {
            Ok(symbol) => load_quote(&self.fetcher, &symbol)
                .await
                .map(|details| card::build(&details)),
            Err(e) => Err(e),
        };

        let _guard = self.swap.lock().unwrap_or_else(|e| e.into_inner());
        if self.torn_down.load(Ordering::SeqCst) {
            return RenderOutcome::TornDown;
        }
        if self.generation.load(Ordering::SeqCst) != token {
            tracing::debug!("Discarding stale quote for {}", requested);
            return RenderOutcome::Stale;
        }
        match result {
            Ok(card) => {
                self.container.replace(card);
                RenderOutcome::Rendered
            }
            Err(e) => {
                tracing::warn!("Failed to render quote for {}: {}", requested, e);
                self.container
                    .replace(card::fallback(&requested, &e.user_message()));
                RenderOutcome::Failed(e)
            }
        }
    }
}

impl<F: QuoteFetcher, C: CardContainer> QuoteControl for StockMarketCard<F, C> {
    async fn initialize(&self, config: WidgetConfig) -> RenderOutcome {
        self.render(config).await
    }

    async fn refresh(&self, config: WidgetConfig) -> RenderOutcome {
        self.render(config).await
    }

    fn teardown(&self) {
        let _guard = self.swap.lock().unwrap_or_else(|e| e.into_inner());
        self.torn_down.store(true, Ordering::SeqCst);
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.container.clear();
    }
}
