/*
[INPUT]:  Error sources (transport, HTTP status, JSON-RPC error bodies, serialization)
[OUTPUT]: Structured error types with context and retry hints
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for the BTSX wallet adapter
#[derive(Error, Debug)]
pub enum BtsxError {
    /// Transport failure (connection refused, timeout, DNS)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Wallet returned a non-200 status
    #[error("API error (code {code}): {message}")]
    Api { code: i32, message: String },

    /// Wallet answered 200 with a JSON-RPC error object
    #[error("RPC error (code {code}): {message}")]
    Rpc { code: i64, message: String },

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Invalid response from the wallet
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// `blockchain_get_asset` knows no such symbol
    #[error("Unknown asset: {0}")]
    UnknownAsset(String),

    /// Gave up waiting for the head block to move
    #[error("No new block after {waited_ms}ms")]
    Timeout { waited_ms: u64 },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl BtsxError {
    /// Check if the error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            BtsxError::Http(_) | BtsxError::Timeout { .. } => true,
            BtsxError::Api { code, .. } => *code >= 500,
            _ => false,
        }
    }

    /// Create an API error from status code and message
    pub fn api_error(status: StatusCode, message: impl Into<String>) -> Self {
        BtsxError::Api {
            code: status.as_u16() as i32,
            message: message.into(),
        }
    }
}

/// Result type alias for BTSX wallet operations
pub type Result<T> = std::result::Result<T, BtsxError>;
