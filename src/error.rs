// Error types for CertTrust
//
// Structured failure kinds for the verification core. Checkers never let these
// escape `verify`; they are logged and degraded to `VerificationStatus::Uncertain`.
// Command-level code converts them into anyhow errors.

use std::io;
use std::time::Duration;
use thiserror::Error;

/// Main error type for CertTrust operations
#[derive(Debug, Error)]
pub enum TrustError {
    /// Transport-level failure (DNS, connect, reset, body read)
    #[error("Network request to {url} failed: {details}")]
    Network { url: String, details: String },

    /// The remote did not answer within the configured timeout
    #[error("Request to {url} timed out after {duration:?}")]
    Timeout { url: String, duration: Duration },

    /// Remote answered with something other than 200
    #[error("HTTP error (status {status}) from {url}")]
    HttpStatus { status: u16, url: String },

    /// Parsing error for remote data (CSV header, empty fingerprint list, ...)
    #[error("Parse error: {message}")]
    Parse { message: String },

    /// Invalid input from the certificate or the user
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// Invalid configuration or parameters
    #[error("Invalid configuration: {message}")]
    Config { message: String },

    /// A verifier needs at least one checker
    #[error("At least one checker must be configured")]
    NoCheckers,

    /// File system errors
    #[error("File system error: {path}: {source}")]
    FileSystem {
        path: String,
        #[source]
        source: io::Error,
    },

    /// CSV reader errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl TrustError {
    pub fn parse(message: impl Into<String>) -> Self {
        TrustError::Parse {
            message: message.into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        TrustError::InvalidInput {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        TrustError::Config {
            message: message.into(),
        }
    }

    /// Map a reqwest failure onto the network error kinds
    pub fn from_reqwest(url: &str, timeout: Duration, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TrustError::Timeout {
                url: url.to_string(),
                duration: timeout,
            }
        } else {
            TrustError::Network {
                url: url.to_string(),
                details: err.to_string(),
            }
        }
    }

    /// Whether the failure happened on the wire rather than in our own parsing
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            TrustError::Network { .. } | TrustError::Timeout { .. } | TrustError::HttpStatus { .. }
        )
    }
}
