//! Load and validate runtime configuration.

use serde::Deserialize;
use std::{fs, path::Path};

#[derive(Debug, Deserialize, Clone)]
pub struct SheetsCfg {
    pub spreadsheet_id: String,
    /// Worksheet holding the buy-candidate ticker list (column A).
    pub stocklist_worksheet: String,
    /// Worksheet holding the portfolio ticker list (column A).
    pub portfolio_worksheet: String,
    /// Append targets.
    pub buy_triggers_worksheet: String,
    pub sell_triggers_worksheet: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProviderCfg {
    pub base_url: String,
    pub timeout_sec: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ScanCfg {
    /// Seconds between scans; 0 = run once and exit.
    pub interval_sec: u64,
    /// Ceiling on the buy-side ticker list; 0 = unbounded.
    pub max_tickers: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub sheets: SheetsCfg,
    pub provider: ProviderCfg,
    pub scan: ScanCfg,
}

impl AppConfig {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let s = fs::read_to_string(path)?;
        let cfg: Self = serde_yaml::from_str(&s)?;
        if cfg.provider.timeout_sec == 0 {
            anyhow::bail!("provider.timeout_sec must be greater than 0");
        }
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let yaml = r#"
sheets:
  spreadsheet_id: "abc123"
  stocklist_worksheet: "stocklist"
  portfolio_worksheet: "portfolio"
  buy_triggers_worksheet: "Buy-triggers"
  sell_triggers_worksheet: "sell-triggers"
provider:
  base_url: "https://query2.finance.yahoo.com"
  timeout_sec: 20
scan:
  interval_sec: 0
  max_tickers: 200
"#;
        let cfg: AppConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.sheets.buy_triggers_worksheet, "Buy-triggers");
        assert_eq!(cfg.scan.max_tickers, 200);
        assert_eq!(cfg.scan.interval_sec, 0);
    }
}
