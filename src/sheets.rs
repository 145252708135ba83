//! Thin wrapper over the Google Sheets REST API: ticker-column reads and
//! append-only row writes. Auth is a bearer token provisioned externally.

use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::info;

pub struct SheetsClient {
    client: Client,
    base_url: String,
    spreadsheet_id: String,
    token: String,
}

impl SheetsClient {
    pub fn new(base_url: &str, spreadsheet_id: &str, token: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("create sheets http client")?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            spreadsheet_id: spreadsheet_id.to_string(),
            token: token.to_string(),
        })
    }

    /// Read column A of a worksheet, skipping the header row. Blank cells are
    /// kept here; the pipeline filters them.
    pub async fn read_tickers(&self, worksheet: &str) -> Result<Vec<String>> {
        let url = format!(
            "{}/v4/spreadsheets/{}/values/{}!A2:A",
            self.base_url, self.spreadsheet_id, worksheet
        );
        let payload: Value = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await
            .context("read ticker column")?
            .error_for_status()
            .context("read ticker column status")?
            .json()
            .await
            .context("decode ticker column")?;
        Ok(parse_ticker_column(&payload))
    }

    /// Append a batch of rows to a worksheet. Append-only: no update, no
    /// dedup. A no-op for an empty batch.
    pub async fn append_rows(&self, worksheet: &str, rows: &[Vec<Value>]) -> Result<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let url = format!(
            "{}/v4/spreadsheets/{}/values/{}!A1:append?valueInputOption=USER_ENTERED",
            self.base_url, self.spreadsheet_id, worksheet
        );
        self.client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&json!({ "values": rows }))
            .send()
            .await
            .context("append rows")?
            .error_for_status()
            .context("append rows status")?;
        info!("appended {} rows to {}", rows.len(), worksheet);
        Ok(())
    }
}

/// First cell of each row in a `values` range response.
fn parse_ticker_column(payload: &Value) -> Vec<String> {
    payload
        .get("values")
        .and_then(|v| v.as_array())
        .map(|rows| {
            rows.iter()
                .filter_map(|row| row.get(0).and_then(|c| c.as_str()))
                .map(|s| s.to_string())
                .collect()
        })
        .unwrap_or_default()
}
