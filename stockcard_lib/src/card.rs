//! Card builder: lays out a [`QuoteDetails`] as an Adaptive Card document.
//!
//! The document is only data. Rendering it is left to whatever Adaptive Card
//! renderer the host embeds; [`CardDocument::to_json`] produces the payload.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StockCardError;
use crate::quote::QuoteDetails;

pub const CARD_SCHEMA: &str = "http://adaptivecards.io/schemas/adaptive-card.json";
pub const CARD_VERSION: &str = "1.0";

/// Shown in place of any number that is not finite.
pub const PLACEHOLDER: &str = "—";

const UP_GLYPH: &str = "▲";
const DOWN_GLYPH: &str = "▼";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardDocument {
    #[serde(rename = "$schema")]
    pub schema: String,
    #[serde(rename = "type")]
    pub kind: CardKind,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speak: Option<String>,
    pub body: Vec<Element>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardKind {
    #[default]
    AdaptiveCard,
}

/// The subset of Adaptive Card elements the quote card uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Element {
    Container(Container),
    TextBlock(TextBlock),
    ColumnSet(ColumnSet),
    FactSet(FactSet),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Container {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spacing: Option<Spacing>,
    pub items: Vec<Element>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBlock {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<TextSize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<TextColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_subtle: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spacing: Option<Spacing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wrap: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ColumnSet {
    pub columns: Vec<Column>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Column {
    #[serde(rename = "type")]
    pub kind: ColumnKind,
    pub width: ColumnWidth,
    pub items: Vec<Element>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    #[default]
    Column,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnWidth {
    #[default]
    Auto,
    Stretch,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FactSet {
    pub facts: Vec<Fact>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fact {
    pub title: String,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextSize {
    Small,
    Default,
    Medium,
    Large,
    ExtraLarge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextColor {
    Default,
    Good,
    Attention,
    Warning,
    Accent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Spacing {
    None,
    Small,
    Default,
    Medium,
    Large,
}

/// Direction shown by the change line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    /// The percentage is not finite (previous close of zero).
    Unknown,
}

impl Direction {
    /// `>= 0` is up, including exactly zero.
    pub fn of(change_percent: f64) -> Self {
        if !change_percent.is_finite() {
            Direction::Unknown
        } else if change_percent >= 0.0 {
            Direction::Up
        } else {
            Direction::Down
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Direction::Up => UP_GLYPH,
            Direction::Down => DOWN_GLYPH,
            Direction::Unknown => "",
        }
    }

    pub fn color(self) -> TextColor {
        match self {
            Direction::Up => TextColor::Good,
            Direction::Down => TextColor::Attention,
            Direction::Unknown => TextColor::Default,
        }
    }
}

/// Formats a number with two decimals, or [`PLACEHOLDER`] if it is not finite.
pub fn format_two_decimals(value: f64) -> String {
    if !value.is_finite() {
        return PLACEHOLDER.to_string();
    }
    // Avoid "-0.00" for a negative zero.
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{:.2}", value)
}

/// Re-formats a display string produced by [`format_two_decimals`].
/// Anything that does not parse as a number becomes the placeholder.
pub fn reformat_two_decimals(text: &str) -> String {
    match text.trim().parse::<f64>() {
        Ok(value) => format_two_decimals(value),
        Err(_) => PLACEHOLDER.to_string(),
    }
}

pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// The change line, e.g. `"▲ 1.23 (0.45% )"`.
pub fn change_text(details: &QuoteDetails) -> String {
    let direction = Direction::of(details.change_percent);
    let change = format_two_decimals(details.change);
    let percent = format_two_decimals(details.change_percent);
    match direction {
        Direction::Unknown => format!("{} ({}% )", change, percent),
        _ => format!("{} {} ({}% )", direction.glyph(), change, percent),
    }
}

fn speak_text(details: &QuoteDetails) -> String {
    // Neutral wording: the change is previous close minus price, so
    // "up"/"down" would contradict the price movement.
    let price = format_two_decimals(details.price);
    match Direction::of(details.change_percent) {
        Direction::Unknown => format!("{} is trading at {} a share", details.symbol, price),
        _ => format!(
            "{} is trading at {} a share, a change of {} ({}%)",
            details.symbol,
            price,
            format_two_decimals(details.change),
            format_two_decimals(details.change_percent),
        ),
    }
}

fn text(text: impl Into<String>) -> TextBlock {
    TextBlock {
        text: text.into(),
        ..Default::default()
    }
}

/// Builds the quote card: a header with symbol and trading day, then the
/// price and change line beside a fact list of Open, High and Low.
pub fn build(details: &QuoteDetails) -> CardDocument {
    let direction = Direction::of(details.change_percent);

    let header = Container {
        spacing: None,
        items: vec![
            Element::TextBlock(TextBlock {
                size: Some(TextSize::Medium),
                is_subtle: Some(true),
                ..text(details.symbol.clone())
            }),
            Element::TextBlock(TextBlock {
                is_subtle: Some(true),
                ..text(format_timestamp(&details.trading_day))
            }),
        ],
    };

    let price_column = Column {
        width: ColumnWidth::Stretch,
        items: vec![
            Element::TextBlock(TextBlock {
                size: Some(TextSize::ExtraLarge),
                ..text(format_two_decimals(details.price))
            }),
            Element::TextBlock(TextBlock {
                size: Some(TextSize::Small),
                color: Some(direction.color()),
                spacing: Some(Spacing::None),
                ..text(change_text(details))
            }),
        ],
        ..Default::default()
    };

    let facts_column = Column {
        width: ColumnWidth::Auto,
        items: vec![Element::FactSet(FactSet {
            facts: vec![
                Fact {
                    title: "Open".to_string(),
                    value: format_timestamp(&details.open),
                },
                Fact {
                    title: "High".to_string(),
                    value: format_two_decimals(details.high),
                },
                Fact {
                    title: "Low".to_string(),
                    value: format_two_decimals(details.low),
                },
            ],
        })],
        ..Default::default()
    };

    let primary = Container {
        spacing: Some(Spacing::None),
        items: vec![Element::ColumnSet(ColumnSet {
            columns: vec![price_column, facts_column],
        })],
    };

    CardDocument {
        speak: Some(speak_text(details)),
        ..CardDocument::with_body(vec![
            Element::Container(header),
            Element::Container(primary),
        ])
    }
}

/// Card shown in the container when a quote cannot be produced.
pub fn fallback(symbol: &str, message: &str) -> CardDocument {
    let body = vec![Element::Container(Container {
        spacing: None,
        items: vec![
            Element::TextBlock(TextBlock {
                size: Some(TextSize::Medium),
                is_subtle: Some(true),
                ..text(symbol)
            }),
            Element::TextBlock(TextBlock {
                color: Some(TextColor::Attention),
                wrap: Some(true),
                ..text(message)
            }),
        ],
    })];
    CardDocument {
        speak: Some(format!("{}: {}", symbol, message)),
        ..CardDocument::with_body(body)
    }
}

impl CardDocument {
    fn with_body(body: Vec<Element>) -> Self {
        Self {
            schema: CARD_SCHEMA.to_string(),
            kind: CardKind::AdaptiveCard,
            version: CARD_VERSION.to_string(),
            speak: None,
            body,
        }
    }

    /// Serialized payload for the renderer.
    pub fn to_json(&self) -> Result<String, StockCardError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Every text block in document order.
    pub fn text_blocks(&self) -> Vec<&TextBlock> {
        let mut out = Vec::new();
        collect_text_blocks(&self.body, &mut out);
        out
    }

    /// Every fact in document order.
    pub fn facts(&self) -> Vec<&Fact> {
        let mut out = Vec::new();
        collect_facts(&self.body, &mut out);
        out
    }
}

fn collect_text_blocks<'a>(elements: &'a [Element], out: &mut Vec<&'a TextBlock>) {
    for element in elements {
        match element {
            Element::TextBlock(block) => out.push(block),
            Element::Container(c) => collect_text_blocks(&c.items, out),
            Element::ColumnSet(set) => {
                for column in &set.columns {
                    collect_text_blocks(&column.items, out);
                }
            }
            Element::FactSet(_) => {}
        }
    }
}

fn collect_facts<'a>(elements: &'a [Element], out: &mut Vec<&'a Fact>) {
    for element in elements {
        match element {
            Element::FactSet(set) => out.extend(set.facts.iter()),
            Element::Container(c) => collect_facts(&c.items, out),
            Element::ColumnSet(set) => {
                for column in &set.columns {
                    collect_facts(&column.items, out);
                }
            }
            Element::TextBlock(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quote::price_change;

    fn details(previous_close: f64, price: f64) -> QuoteDetails {
        let (change, change_percent) = price_change(previous_close, price);
        QuoteDetails {
            symbol: "MSFT".to_string(),
            trading_day: DateTime::from_timestamp(1718395201, 0).unwrap(),
            price,
            open: DateTime::from_timestamp_millis(1718371800).unwrap(),
            high: 443.389,
            low: 436.7,
            change,
            change_percent,
        }
    }

    fn change_block(card: &CardDocument) -> TextBlock {
        card.text_blocks()[3].clone()
    }

    #[test]
    fn falling_price_renders_up_glyph() {
        let card = build(&details(100.0, 95.0));
        let block = change_block(&card);
        assert_eq!(block.text, "▲ 5.00 (5.00% )");
        assert_eq!(block.color, Some(TextColor::Good));
    }

    #[test]
    fn rising_price_renders_down_glyph() {
        let card = build(&details(100.0, 105.0));
        let block = change_block(&card);
        assert_eq!(block.text, "▼ -5.00 (-5.00% )");
        assert_eq!(block.color, Some(TextColor::Attention));
    }

    #[test]
    fn zero_change_renders_up() {
        let card = build(&details(100.0, 100.0));
        let block = change_block(&card);
        assert_eq!(block.text, "▲ 0.00 (0.00% )");
        assert_eq!(block.color, Some(TextColor::Good));
    }

    #[test]
    fn zero_previous_close_renders_placeholder() {
        let card = build(&details(0.0, 12.5));
        let block = change_block(&card);
        assert_eq!(block.text, "-12.50 (—% )");
        assert_eq!(block.color, Some(TextColor::Default));

        let json = card.to_json().unwrap();
        assert!(!json.contains("NaN"));
        assert!(!json.to_lowercase().contains("inf"));
    }

    #[test]
    fn zero_over_zero_renders_placeholder() {
        let card = build(&details(0.0, 0.0));
        assert_eq!(change_block(&card).text, "0.00 (—% )");
    }

    #[test]
    fn direction_selection() {
        assert_eq!(Direction::of(0.0), Direction::Up);
        assert_eq!(Direction::of(-0.0), Direction::Up);
        assert_eq!(Direction::of(0.01), Direction::Up);
        assert_eq!(Direction::of(-0.01), Direction::Down);
        assert_eq!(Direction::of(f64::NAN), Direction::Unknown);
        assert_eq!(Direction::of(f64::INFINITY), Direction::Unknown);
        assert_eq!(Direction::of(f64::NEG_INFINITY), Direction::Unknown);
    }

    #[test]
    fn layout_is_fixed() {
        let card = build(&details(441.58, 442.57));
        let texts: Vec<&str> = card.text_blocks().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts[0], "MSFT");
        assert_eq!(texts[1], "2024-06-14T20:00:01Z");
        assert_eq!(texts[2], "442.57");
        assert_eq!(texts.len(), 4);

        let facts = card.facts();
        let titles: Vec<&str> = facts.iter().map(|f| f.title.as_str()).collect();
        assert_eq!(titles, vec!["Open", "High", "Low"]);
        assert_eq!(facts[0].value, "1970-01-20T21:19:31Z");
        assert_eq!(facts[1].value, "443.39");
        assert_eq!(facts[2].value, "436.70");
    }

    #[test]
    fn price_is_extra_large_and_header_subtle() {
        let card = build(&details(100.0, 95.0));
        let blocks = card.text_blocks();
        assert_eq!(blocks[0].size, Some(TextSize::Medium));
        assert_eq!(blocks[0].is_subtle, Some(true));
        assert_eq!(blocks[1].is_subtle, Some(true));
        assert_eq!(blocks[2].size, Some(TextSize::ExtraLarge));
        assert_eq!(blocks[3].size, Some(TextSize::Small));
        assert_eq!(blocks[3].spacing, Some(Spacing::None));
    }

    #[test]
    fn json_payload_shape() {
        let card = build(&details(100.0, 95.0));
        let value: serde_json::Value = serde_json::from_str(&card.to_json().unwrap()).unwrap();
        assert_eq!(value["$schema"], CARD_SCHEMA);
        assert_eq!(value["type"], "AdaptiveCard");
        assert_eq!(value["version"], "1.0");
        assert_eq!(value["body"][0]["type"], "Container");
        assert_eq!(value["body"][0]["items"][0]["isSubtle"], true);
        assert_eq!(value["body"][1]["spacing"], "None");
        let columns = &value["body"][1]["items"][0]["columns"];
        assert_eq!(value["body"][1]["items"][0]["type"], "ColumnSet");
        assert_eq!(columns[0]["type"], "Column");
        assert_eq!(columns[0]["width"], "stretch");
        assert_eq!(columns[1]["width"], "auto");
        assert_eq!(columns[1]["items"][0]["type"], "FactSet");
        assert_eq!(columns[0]["items"][1]["color"], "Good");
        assert!(value["body"][0].get("spacing").is_none());
    }

    #[test]
    fn json_payload_parses_back() {
        let card = build(&details(100.0, 105.0));
        let parsed: CardDocument = serde_json::from_str(&card.to_json().unwrap()).unwrap();
        assert_eq!(parsed, card);
    }

    #[test]
    fn speak_text_states_change_without_direction_words() {
        let falling = build(&details(100.0, 95.0)).speak.unwrap();
        assert_eq!(
            falling,
            "MSFT is trading at 95.00 a share, a change of 5.00 (5.00%)"
        );
        assert!(!falling.contains(" up ") && !falling.contains(" down "));
        assert_eq!(
            build(&details(100.0, 105.0)).speak.as_deref(),
            Some("MSFT is trading at 105.00 a share, a change of -5.00 (-5.00%)")
        );
        assert_eq!(
            build(&details(0.0, 12.5)).speak.as_deref(),
            Some("MSFT is trading at 12.50 a share")
        );
    }

    #[test]
    fn two_decimal_formatting() {
        assert_eq!(format_two_decimals(62.3), "62.30");
        assert_eq!(format_two_decimals(-0.0), "0.00");
        assert_eq!(format_two_decimals(1.005e3), "1005.00");
        assert_eq!(format_two_decimals(f64::NAN), PLACEHOLDER);
        assert_eq!(format_two_decimals(f64::INFINITY), PLACEHOLDER);
    }

    #[test]
    fn two_decimal_formatting_is_idempotent() {
        for value in [0.0, 5.0, -5.0, 62.3, 442.57, 0.125, 1234.5678, f64::NAN] {
            let once = format_two_decimals(value);
            assert_eq!(reformat_two_decimals(&once), once);
            assert_eq!(reformat_two_decimals(&reformat_two_decimals(&once)), once);
        }
    }

    #[test]
    fn fallback_card_shows_message() {
        let card = fallback("NOPE", "No quote found for NOPE");
        let blocks = card.text_blocks();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].text, "NOPE");
        assert_eq!(blocks[1].text, "No quote found for NOPE");
        assert_eq!(blocks[1].color, Some(TextColor::Attention));
        assert!(card.facts().is_empty());
        assert_eq!(card.schema, CARD_SCHEMA);
    }
}
