use crate::error::StockCardError;

pub const MAX_SYMBOL_LENGTH: usize = 16;

/// Strip ASCII control characters (0x00-0x1F except space 0x20), trim whitespace,
/// and enforce a byte-length limit on what remains.
pub fn sanitize_text(input: &str, max_len: usize) -> Result<String, StockCardError> {
    let sanitized: String = input
        .chars()
        .filter(|c| !c.is_ascii_control() || *c == ' ')
        .collect::<String>()
        .trim()
        .to_string();
    if sanitized.is_empty() {
        return Err(StockCardError::InvalidInput(
            "input is empty after sanitization".to_string(),
        ));
    }
    if sanitized.len() > max_len {
        return Err(StockCardError::InvalidInput(format!(
            "input exceeds maximum length of {} bytes",
            max_len
        )));
    }
    Ok(sanitized)
}

/// Validate a ticker symbol: trim, uppercase, and restrict to the characters
/// used by equity, index, currency and share-class tickers
/// (`MSFT`, `^GSPC`, `EURUSD=X`, `BRK-B`, `RDS.A`).
pub fn validate_symbol(input: &str) -> Result<String, StockCardError> {
    let symbol = sanitize_text(input, MAX_SYMBOL_LENGTH)?.to_uppercase();
    if let Some(bad) = symbol
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^' | '=')))
    {
        return Err(StockCardError::InvalidInput(format!(
            "invalid character '{}' in symbol '{}'",
            bad, symbol
        )));
    }
    Ok(symbol)
}
