//! Fundamentals provider contract.

use crate::error::ProviderError;
use crate::types::FundamentalsSnapshot;

/// Fetches one company's fundamentals and normalizes them into a snapshot.
///
/// Implementations must tolerate partial data (missing balance sheet, cash
/// flow or dividend) by returning a snapshot with absent fields; they fail
/// only when nothing usable exists for the ticker.
#[async_trait::async_trait]
pub trait FundamentalsProvider {
    async fn fetch(&self, ticker: &str) -> Result<FundamentalsSnapshot, ProviderError>;
}
