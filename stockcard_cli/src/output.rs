use stockcard_lib::card::{self, CardDocument};
use stockcard_lib::QuoteDetails;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Json,
    Table,
    Markdown,
}

#[derive(Tabled)]
struct QuoteRow {
    #[tabled(rename = "Symbol")]
    symbol: String,
    #[tabled(rename = "Trading Day")]
    trading_day: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Change")]
    change: String,
    #[tabled(rename = "Open")]
    open: String,
    #[tabled(rename = "High")]
    high: String,
    #[tabled(rename = "Low")]
    low: String,
}

#[derive(Tabled)]
struct CardRow {
    #[tabled(rename = "Field")]
    field: String,
    #[tabled(rename = "Value")]
    value: String,
}

// -- Row builders --

fn build_quote_rows(details: &[QuoteDetails]) -> Vec<QuoteRow> {
    details
        .iter()
        .map(|d| QuoteRow {
            symbol: d.symbol.clone(),
            trading_day: card::format_timestamp(&d.trading_day),
            price: card::format_two_decimals(d.price),
            change: card::change_text(d),
            open: card::format_timestamp(&d.open),
            high: card::format_two_decimals(d.high),
            low: card::format_two_decimals(d.low),
        })
        .collect()
}

/// Flattens a card into label/value rows: text blocks first, then facts.
fn build_card_rows(card: &CardDocument) -> Vec<CardRow> {
    let mut rows: Vec<CardRow> = card
        .text_blocks()
        .iter()
        .map(|t| CardRow {
            field: String::new(),
            value: t.text.clone(),
        })
        .collect();
    rows.extend(card.facts().iter().map(|f| CardRow {
        field: f.title.clone(),
        value: f.value.clone(),
    }));
    rows
}

pub fn print_quotes_table(details: &[QuoteDetails]) {
    println!("{}", Table::new(build_quote_rows(details)));
}

pub fn print_quotes_markdown(details: &[QuoteDetails]) {
    let mut table = Table::new(build_quote_rows(details));
    table.with(Style::markdown());
    println!("{}", table);
}

pub fn print_card_table(card: &CardDocument) {
    println!("{}", Table::new(build_card_rows(card)));
}

pub fn print_card_markdown(card: &CardDocument) {
    let mut table = Table::new(build_card_rows(card));
    table.with(Style::markdown());
    println!("{}", table);
}

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

/// One compact JSON document per line, for streaming output.
pub fn print_json_line<T: serde::Serialize>(data: &T) {
    match serde_json::to_string(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}
