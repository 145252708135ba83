//! Sell-side evaluator: 0-5 exit score and HOLD/SELL recommendation for an
//! already-held position.
//!
//! Criteria 1-4 need balance-sheet or earnings history; when the provider has
//! no balance-sheet data at all they are skipped outright and only the
//! valuation criterion (price multiples) can contribute.

use crate::types::{FundamentalsSnapshot, Recommendation, SellEvaluation};

const MIN_HEALTHY_CURRENT_RATIO: f64 = 1.5;
const MAX_DEBT_TO_EQUITY: f64 = 2.0;
const MIN_LOSS_YEARS: usize = 2;
const MAX_GRAHAM_MULTIPLIER: f64 = 45.0;
const SELL_THRESHOLD: u8 = 3;

pub fn evaluate_sell(snap: &FundamentalsSnapshot) -> SellEvaluation {
    let sell_score = sell_score(snap);
    SellEvaluation {
        ticker: snap.ticker.clone(),
        company_name: snap.company_name.clone(),
        sell_score,
        recommendation: if sell_score >= SELL_THRESHOLD {
            Recommendation::Sell
        } else {
            Recommendation::Hold
        },
    }
}

pub fn sell_score(snap: &FundamentalsSnapshot) -> u8 {
    let mut score = 0;

    if let Some(bs) = &snap.balance_sheet {
        // 1. Liquidity deterioration. Zero liabilities default to 1 so the
        //    check stays conservative instead of being skipped.
        let cl = if bs.current_liabilities > 0.0 {
            bs.current_liabilities
        } else {
            1.0
        };
        if bs.current_assets / cl < MIN_HEALTHY_CURRENT_RATIO {
            score += 1;
        }

        // 2. Over-leverage
        if bs.stockholders_equity <= 0.0
            || bs.total_debt / bs.stockholders_equity > MAX_DEBT_TO_EQUITY
        {
            score += 1;
        }

        // 3. Multi-year losses
        let ni = &snap.net_income_series;
        if ni.iter().filter(|&&v| v <= 0.0).count() >= MIN_LOSS_YEARS {
            score += 1;
        }

        // 4. Negative earnings trend: newest below oldest, needs >= 2 periods
        if ni.len() >= 2 && ni[0] < ni[ni.len() - 1] {
            score += 1;
        }
    }

    // 5. Overvaluation, independent of balance-sheet availability
    let pe = snap.trailing_pe.unwrap_or(0.0);
    let pb = snap.price_to_book.unwrap_or(0.0);
    if pe * pb > MAX_GRAHAM_MULTIPLIER {
        score += 1;
    }

    score
}
