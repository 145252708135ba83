//! Entry point. Wires Sheets ticker lists -> Yahoo fundamentals ->
//! buy/sell evaluators -> append-only Sheets rows.

mod buy;
mod config;
mod error;
mod pipeline;
mod provider;
mod sell;
mod sheets;
mod types;
mod utils;
mod yahoo;

use anyhow::{Context, Result};
use chrono::Local;
use dotenvy::dotenv;
use std::time::Duration;
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use crate::sheets::SheetsClient;
use crate::yahoo::YahooProvider;

const SHEETS_BASE_URL: &str = "https://sheets.googleapis.com";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .init();

    let cfg = AppConfig::load("config.yaml")?;
    let token = std::env::var("GOOGLE_SHEETS_TOKEN").context("GOOGLE_SHEETS_TOKEN not set")?;
    let spreadsheet_id = std::env::var("SPREADSHEET_ID")
        .unwrap_or_else(|_| cfg.sheets.spreadsheet_id.clone());

    let sheets = SheetsClient::new(SHEETS_BASE_URL, &spreadsheet_id, &token)?;
    let provider = YahooProvider::new(&cfg.provider.base_url, cfg.provider.timeout_sec)
        .context("create fundamentals provider")?;

    info!(
        "Screener started. Interval={}s, MaxTickers={}, Spreadsheet={}",
        cfg.scan.interval_sec, cfg.scan.max_tickers, spreadsheet_id
    );

    if cfg.scan.interval_sec == 0 {
        run_scan(&provider, &sheets, &cfg).await;
        return Ok(());
    }

    let mut ticker = tokio::time::interval(Duration::from_secs(cfg.scan.interval_sec));
    loop {
        ticker.tick().await;
        run_scan(&provider, &sheets, &cfg).await;
    }
}

/// One full scan: buy-side over the stocklist, sell-side over the portfolio.
/// Each side is best effort; a failed side never blocks the other.
async fn run_scan(provider: &YahooProvider, sheets: &SheetsClient, cfg: &AppConfig) {
    if let Err(e) = run_buy_side(provider, sheets, cfg).await {
        error!("buy scan failed: {:#}", e);
    }
    if let Err(e) = run_sell_side(provider, sheets, cfg).await {
        error!("sell scan failed: {:#}", e);
    }
}

async fn run_buy_side(provider: &YahooProvider, sheets: &SheetsClient, cfg: &AppConfig) -> Result<()> {
    let tickers = sheets
        .read_tickers(&cfg.sheets.stocklist_worksheet)
        .await
        .context("read stocklist")?;
    let evals = pipeline::run_buy_scan(provider, &tickers, cfg.scan.max_tickers).await;

    let now = Local::now();
    let rows: Vec<_> = evals.iter().map(|e| e.to_row(now)).collect();
    sheets
        .append_rows(&cfg.sheets.buy_triggers_worksheet, &rows)
        .await
        .context("append buy triggers")?;
    Ok(())
}

async fn run_sell_side(provider: &YahooProvider, sheets: &SheetsClient, cfg: &AppConfig) -> Result<()> {
    let tickers = sheets
        .read_tickers(&cfg.sheets.portfolio_worksheet)
        .await
        .context("read portfolio")?;
    let evals = pipeline::run_sell_scan(provider, &tickers).await;

    let now = Local::now();
    let rows: Vec<_> = evals.iter().map(|e| e.to_row(now)).collect();
    sheets
        .append_rows(&cfg.sheets.sell_triggers_worksheet, &rows)
        .await
        .context("append sell triggers")?;
    Ok(())
}
