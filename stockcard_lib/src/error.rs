//! Error types for the library layer.

use std::fmt;

/// Errors produced while fetching, mapping and rendering a quote.
///
/// Transport failures come through `Api`; everything the endpoint returned
/// that cannot be turned into a quote is `Upstream` or `MalformedQuoteData`.
#[derive(Debug)]
pub enum StockCardError {
    /// Network, HTTP status or body decoding failure from the chart client.
    Api(stockcard_api::Error),
    /// The endpoint answered with an explicit `chart.error` object.
    Upstream { code: String, description: String },
    /// The response parsed as JSON but a field the mapper needs is missing or unusable.
    MalformedQuoteData(String),
    /// User-provided input failed validation.
    InvalidInput(String),
    /// JSON serialization or deserialization failed.
    Serialization(serde_json::Error),
}

impl fmt::Display for StockCardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => write!(f, "API error: {}", e),
            Self::Upstream { code, description } => {
                write!(f, "Upstream error: {} ({})", code, description)
            }
            Self::MalformedQuoteData(msg) => write!(f, "Malformed quote data: {}", msg),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Self::Serialization(e) => write!(f, "Serialization error: {}", e),
        }
    }
}

impl std::error::Error for StockCardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            Self::Serialization(e) => Some(e),
            _ => None,
        }
    }
}

impl From<stockcard_api::Error> for StockCardError {
    fn from(e: stockcard_api::Error) -> Self {
        match e {
            stockcard_api::Error::Decode { body } => {
                Self::MalformedQuoteData(format!("response is not a chart document: {}", body))
            }
            e => Self::Api(e),
        }
    }
}

impl From<serde_json::Error> for StockCardError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e)
    }
}

impl StockCardError {
    /// Short text for the fallback card shown in the widget.
    pub fn user_message(&self) -> String {
        match self {
            Self::Api(stockcard_api::Error::NotFound { symbol }) => {
                format!("No quote found for {}", symbol)
            }
            Self::Api(_) => "Quote service unavailable".to_string(),
            Self::Upstream { description, .. } if !description.is_empty() => description.clone(),
            Self::Upstream { code, .. } => code.clone(),
            Self::MalformedQuoteData(_) => "Quote data unavailable".to_string(),
            Self::InvalidInput(msg) => msg.clone(),
            Self::Serialization(_) => "Quote could not be rendered".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_detail() {
        let err = StockCardError::MalformedQuoteData("meta.regularMarketPrice".to_string());
        assert!(err.to_string().contains("Malformed quote data"));
        assert!(err.to_string().contains("regularMarketPrice"));

        let err = StockCardError::Upstream {
            code: "Not Found".to_string(),
            description: "No data found".to_string(),
        };
        assert_eq!(err.to_string(), "Upstream error: Not Found (No data found)");
    }

    #[test]
    fn api_error_has_source() {
        use std::error::Error;
        let err = StockCardError::from(stockcard_api::Error::RequestFailed);
        assert!(err.source().is_some());
        let err = StockCardError::InvalidInput("x".to_string());
        assert!(err.source().is_none());
    }

    #[test]
    fn user_message_for_not_found() {
        let err = StockCardError::from(stockcard_api::Error::NotFound {
            symbol: "NOPE".to_string(),
        });
        assert_eq!(err.user_message(), "No quote found for NOPE");
    }

    #[test]
    fn decode_error_is_malformed_data() {
        let err = StockCardError::from(stockcard_api::Error::Decode {
            body: "{\"quoteResponse\":{}}".to_string(),
        });
        assert!(matches!(err, StockCardError::MalformedQuoteData(_)));
        assert_eq!(err.user_message(), "Quote data unavailable");
    }

    #[test]
    fn transport_error_stays_api() {
        let err = StockCardError::from(stockcard_api::Error::RequestFailed);
        assert!(matches!(err, StockCardError::Api(_)));
        assert_eq!(err.user_message(), "Quote service unavailable");
    }

    #[test]
    fn user_message_prefers_upstream_description() {
        let err = StockCardError::Upstream {
            code: "Bad Request".to_string(),
            description: String::new(),
        };
        assert_eq!(err.user_message(), "Bad Request");
    }
}
