//! Core domain types: fundamentals snapshot, evaluation results and sheet rows.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::utils::{round1, round2};

/// Most recent balance-sheet period, plus share counts from the two most
/// recent periods. Absent as a whole when the provider has no balance-sheet
/// data for the company.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BalanceSheet {
    pub current_assets: f64,
    pub current_liabilities: f64,
    pub total_debt: f64,
    pub stockholders_equity: f64,
    pub current_shares_outstanding: Option<f64>,
    pub prior_shares_outstanding: Option<f64>,
}

/// Normalized view of one company's fundamentals at one point in time.
/// Built once per ticker per run; never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FundamentalsSnapshot {
    pub ticker: String,
    pub company_name: String,
    pub market_cap_usd: f64,
    pub trailing_pe: Option<f64>,
    pub forward_pe: Option<f64>,
    pub price_to_book: Option<f64>,
    pub current_price: f64,
    pub trailing_eps: f64,
    pub book_value_per_share: f64,
    pub dividend_yield: Option<f64>,
    pub balance_sheet: Option<BalanceSheet>,
    /// Annual net income, most recent first. May be empty.
    pub net_income_series: Vec<f64>,
    pub most_recent_free_cash_flow: Option<f64>,
}

impl FundamentalsSnapshot {
    /// Trailing P/E with forward fallback, for the report column only.
    /// Scoring uses `trailing_pe` exclusively.
    pub fn reporting_pe(&self) -> f64 {
        self.trailing_pe
            .or(self.forward_pe)
            .unwrap_or(0.0)
    }

    pub fn market_cap_billions(&self) -> f64 {
        self.market_cap_usd / 1e9
    }
}

/// Buy-side evaluation of one snapshot (extended 7+3 rubric).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuyEvaluation {
    pub ticker: String,
    pub company_name: String,
    pub graham_score: u8,
    pub bonus_score: u8,
    pub current_price: f64,
    pub graham_price: f64,
    pub margin_of_safety_pct: f64,
    pub trailing_pe: f64,
    pub market_cap_billions: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Recommendation {
    Hold,
    Sell,
}

impl Recommendation {
    pub fn label(self) -> &'static str {
        match self {
            Recommendation::Sell => "🛑 SELL",
            Recommendation::Hold => "✅ HOLD",
        }
    }
}

/// Sell-side evaluation of one held position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SellEvaluation {
    pub ticker: String,
    pub company_name: String,
    pub sell_score: u8,
    pub recommendation: Recommendation,
}

pub fn format_timestamp(ts: DateTime<Local>) -> String {
    ts.format("%d.%m.%Y %H:%M").to_string()
}

impl BuyEvaluation {
    /// Extended 10-column row: timestamp, ticker, name, graham score,
    /// bonus score, price, graham price, margin "N%", P/E, mcap billions.
    pub fn to_row(&self, ts: DateTime<Local>) -> Vec<Value> {
        vec![
            json!(format_timestamp(ts)),
            json!(self.ticker),
            json!(self.company_name),
            json!(self.graham_score),
            json!(self.bonus_score),
            json!(round2(self.current_price)),
            json!(round2(self.graham_price)),
            json!(format!("{}%", round1(self.margin_of_safety_pct))),
            json!(round2(self.trailing_pe)),
            json!(round2(self.market_cap_billions)),
        ]
    }
}

impl SellEvaluation {
    pub fn to_row(&self, ts: DateTime<Local>) -> Vec<Value> {
        vec![
            json!(format_timestamp(ts)),
            json!(self.ticker),
            json!(self.company_name),
            json!(self.sell_score),
            json!(self.recommendation.label()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn eval() -> BuyEvaluation {
        BuyEvaluation {
            ticker: "AAPL".into(),
            company_name: "Apple Inc.".into(),
            graham_score: 4,
            bonus_score: 2,
            current_price: 150.456,
            graham_price: 47.434,
            margin_of_safety_pct: -217.22,
            trailing_pe: 28.913,
            market_cap_billions: 2400.129,
        }
    }

    #[test]
    fn buy_row_has_ten_columns_with_formatted_margin() {
        let ts = Local.with_ymd_and_hms(2024, 3, 5, 9, 30, 0).unwrap();
        let row = eval().to_row(ts);
        assert_eq!(row.len(), 10);
        assert_eq!(row[0], json!("05.03.2024 09:30"));
        assert_eq!(row[3], json!(4));
        assert_eq!(row[5], json!(150.46));
        assert_eq!(row[6], json!(47.43));
        assert_eq!(row[7], json!("-217.2%"));
    }

    #[test]
    fn sell_row_carries_recommendation_label() {
        let ts = Local.with_ymd_and_hms(2024, 3, 5, 9, 30, 0).unwrap();
        let row = SellEvaluation {
            ticker: "GME".into(),
            company_name: "GameStop".into(),
            sell_score: 4,
            recommendation: Recommendation::Sell,
        }
        .to_row(ts);
        assert_eq!(row.len(), 5);
        assert_eq!(row[4], json!("🛑 SELL"));
    }

    #[test]
    fn reporting_pe_falls_back_to_forward() {
        let snap = FundamentalsSnapshot {
            ticker: "X".into(),
            company_name: "X".into(),
            market_cap_usd: 0.0,
            trailing_pe: None,
            forward_pe: Some(11.5),
            price_to_book: None,
            current_price: 0.0,
            trailing_eps: 0.0,
            book_value_per_share: 0.0,
            dividend_yield: None,
            balance_sheet: None,
            net_income_series: vec![],
            most_recent_free_cash_flow: None,
        };
        assert_eq!(snap.reporting_pe(), 11.5);
    }
}
