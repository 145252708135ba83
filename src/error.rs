//! Provider-side error taxonomy.
//!
//! Partial data is NOT an error: the provider returns a snapshot with absent
//! fields and the evaluators degrade deterministically. These variants cover
//! the cases where a ticker is dropped from the current run.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider has nothing usable for this ticker at all.
    #[error("no usable data for {ticker}")]
    DataUnavailable { ticker: String },

    /// Payload arrived but its shape made the required fields unreadable.
    #[error("malformed payload for {ticker}: {reason}")]
    Malformed { ticker: String, reason: String },

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

impl ProviderError {
    pub fn unavailable(ticker: &str) -> Self {
        Self::DataUnavailable {
            ticker: ticker.to_string(),
        }
    }

    pub fn malformed(ticker: &str, reason: impl Into<String>) -> Self {
        Self::Malformed {
            ticker: ticker.to_string(),
            reason: reason.into(),
        }
    }
}
