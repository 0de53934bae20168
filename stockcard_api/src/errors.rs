//! Error types for the chart client.

/// Errors that can occur when requesting chart data.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// An HTTP request failed (network error, timeout, or unreadable response).
    #[error("Request failed")]
    RequestFailed,
    /// The endpoint has no chart for this symbol (HTTP 404).
    #[error("No chart data found for symbol {symbol}")]
    NotFound { symbol: String },
    /// A success response whose body is not the expected JSON shape.
    #[error("Failed to decode response body")]
    Decode { body: String },
    /// The endpoint returned a non-success status with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
}
