//! Evaluation pipeline: map a ticker list through fetch + evaluate, isolating
//! per-ticker failures. Best effort across the batch; a failed ticker is
//! logged and dropped from the current run, never retried.

use tracing::{info, warn};

use crate::buy::evaluate_buy;
use crate::provider::FundamentalsProvider;
use crate::sell::evaluate_sell;
use crate::types::{BuyEvaluation, SellEvaluation};
use crate::utils::sanitize_ticker;

/// Trim, drop blanks, and apply the caller-supplied ceiling (0 = unbounded).
pub fn prepare_tickers(raw: &[String], max_tickers: usize) -> Vec<String> {
    let cleaned = raw
        .iter()
        .map(|t| sanitize_ticker(t))
        .filter(|t| !t.is_empty());
    if max_tickers > 0 {
        cleaned.take(max_tickers).collect()
    } else {
        cleaned.collect()
    }
}

pub async fn run_buy_scan(
    provider: &dyn FundamentalsProvider,
    tickers: &[String],
    max_tickers: usize,
) -> Vec<BuyEvaluation> {
    let tickers = prepare_tickers(tickers, max_tickers);
    let mut results = Vec::with_capacity(tickers.len());

    for ticker in &tickers {
        info!("buy scan: {}", ticker);
        match provider.fetch(ticker).await {
            Ok(snap) => results.push(evaluate_buy(&snap)),
            Err(e) => warn!("skipping {}: {:#}", ticker, e),
        }
    }

    info!(
        "buy scan done: {}/{} tickers scored",
        results.len(),
        tickers.len()
    );
    results
}

pub async fn run_sell_scan(
    provider: &dyn FundamentalsProvider,
    tickers: &[String],
) -> Vec<SellEvaluation> {
    let tickers = prepare_tickers(tickers, 0);
    let mut results = Vec::with_capacity(tickers.len());

    for ticker in &tickers {
        info!("sell scan: {}", ticker);
        match provider.fetch(ticker).await {
            Ok(snap) => results.push(evaluate_sell(&snap)),
            Err(e) => warn!("skipping {}: {:#}", ticker, e),
        }
    }

    info!(
        "sell scan done: {}/{} tickers scored",
        results.len(),
        tickers.len()
    );
    results
}
