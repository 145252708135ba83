//! Yahoo Finance quoteSummary provider.
//!
//! Fetch is a single GET per ticker; `normalize` is a pure function turning
//! the loosely-typed JSON payload into the strongly-typed snapshot. Field
//! names vary across Yahoo payload generations, so lookups chase aliases and
//! absence maps to `None` rather than an error.

use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use crate::error::ProviderError;
use crate::provider::FundamentalsProvider;
use crate::types::{BalanceSheet, FundamentalsSnapshot};

const MODULES: &str = "price,summaryDetail,defaultKeyStatistics,financialData,\
balanceSheetHistory,incomeStatementHistory,cashflowStatementHistory";

pub struct YahooProvider {
    client: Client,
    base_url: String,
}

impl YahooProvider {
    pub fn new(base_url: &str, timeout_sec: u64) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_sec))
            .user_agent("Mozilla/5.0 (compatible; graham-screener/1.0)")
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait::async_trait]
impl FundamentalsProvider for YahooProvider {
    async fn fetch(&self, ticker: &str) -> Result<FundamentalsSnapshot, ProviderError> {
        let url = format!(
            "{}/v10/finance/quoteSummary/{}?modules={}",
            self.base_url, ticker, MODULES
        );
        let payload: Value = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        normalize(ticker, &payload)
    }
}

/// Normalize one quoteSummary payload into a snapshot. Fails only when the
/// response carries no result for the ticker at all.
pub fn normalize(ticker: &str, payload: &Value) -> Result<FundamentalsSnapshot, ProviderError> {
    let result = payload
        .get("quoteSummary")
        .and_then(|q| q.get("result"))
        .and_then(|r| r.as_array())
        .and_then(|a| a.first())
        .ok_or_else(|| ProviderError::unavailable(ticker))?;
    if !result.is_object() {
        return Err(ProviderError::malformed(ticker, "result is not an object"));
    }

    let price = result.get("price");
    let summary = result.get("summaryDetail");
    let stats = result.get("defaultKeyStatistics");
    let financial = result.get("financialData");

    let company_name = price
        .and_then(|p| p.get("longName").or_else(|| p.get("shortName")))
        .and_then(|n| n.as_str())
        .unwrap_or(ticker)
        .to_string();

    let market_cap_usd = raw_num(price, "marketCap")
        .or_else(|| raw_num(summary, "marketCap"))
        .unwrap_or(0.0);

    let current_price = raw_num(financial, "currentPrice")
        .or_else(|| raw_num(price, "regularMarketPrice"))
        .unwrap_or(0.0);

    let balance_statements = result
        .get("balanceSheetHistory")
        .and_then(|b| b.get("balanceSheetStatements"))
        .and_then(|s| s.as_array());

    let balance_sheet = balance_statements.and_then(|stmts| {
        let latest = stmts.first()?;
        let current_shares = share_count(Some(latest));
        let prior_shares = share_count(stmts.get(1));
        Some(BalanceSheet {
            current_assets: raw_num(Some(latest), "totalCurrentAssets")
                .or_else(|| raw_num(Some(latest), "currentAssets"))
                .unwrap_or(0.0),
            current_liabilities: raw_num(Some(latest), "totalCurrentLiabilities")
                .or_else(|| raw_num(Some(latest), "currentLiabilities"))
                .unwrap_or(0.0),
            total_debt: total_debt(latest),
            stockholders_equity: raw_num(Some(latest), "totalStockholderEquity")
                .or_else(|| raw_num(Some(latest), "stockholdersEquity"))
                .unwrap_or(0.0),
            current_shares_outstanding: current_shares,
            prior_shares_outstanding: prior_shares,
        })
    });

    let net_income_series = result
        .get("incomeStatementHistory")
        .and_then(|h| h.get("incomeStatementHistory"))
        .and_then(|s| s.as_array())
        .map(|stmts| {
            stmts
                .iter()
                .filter_map(|stmt| raw_num(Some(stmt), "netIncome"))
                .collect()
        })
        .unwrap_or_default();

    let most_recent_free_cash_flow = raw_num(financial, "freeCashflow").or_else(|| {
        result
            .get("cashflowStatementHistory")
            .and_then(|h| h.get("cashflowStatements"))
            .and_then(|s| s.as_array())
            .and_then(|stmts| raw_num(stmts.first(), "freeCashFlow"))
    });

    Ok(FundamentalsSnapshot {
        ticker: ticker.to_string(),
        company_name,
        market_cap_usd,
        trailing_pe: raw_num(summary, "trailingPE").or_else(|| raw_num(stats, "trailingPE")),
        forward_pe: raw_num(summary, "forwardPE").or_else(|| raw_num(stats, "forwardPE")),
        price_to_book: raw_num(stats, "priceToBook"),
        current_price,
        trailing_eps: raw_num(stats, "trailingEps")
            .or_else(|| raw_num(financial, "trailingEps"))
            .unwrap_or(0.0),
        book_value_per_share: raw_num(stats, "bookValue").unwrap_or(0.0),
        dividend_yield: raw_num(summary, "dividendYield"),
        balance_sheet,
        net_income_series,
        most_recent_free_cash_flow,
    })
}

/// Yahoo wraps numbers as `{"raw": n, "fmt": "..."}`; older payloads carry
/// the bare number.
fn raw_num(obj: Option<&Value>, key: &str) -> Option<f64> {
    let field = obj?.get(key)?;
    field
        .get("raw")
        .and_then(|r| r.as_f64())
        .or_else(|| field.as_f64())
}

fn share_count(stmt: Option<&Value>) -> Option<f64> {
    raw_num(stmt, "ordinarySharesNumber").or_else(|| raw_num(stmt, "shareIssued"))
}

fn total_debt(stmt: &Value) -> f64 {
    if let Some(total) = raw_num(Some(stmt), "totalDebt") {
        return total;
    }
    let short = raw_num(Some(stmt), "shortLongTermDebt").unwrap_or(0.0);
    let long = raw_num(Some(stmt), "longTermDebt").unwrap_or(0.0);
    short + long
}
