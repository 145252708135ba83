//! Buy-side evaluator: Graham defensive-investor score (0-7), bonus quality
//! score (0-3), intrinsic Graham price and margin of safety.
//!
//! Pure function of a `FundamentalsSnapshot`; absent or zero-guarded data
//! simply fails to award the corresponding point.

use crate::types::{BuyEvaluation, FundamentalsSnapshot};

const MIN_MARKET_CAP_USD: f64 = 2_000_000_000.0;
const MIN_CURRENT_RATIO: f64 = 2.0;
const MAX_TRAILING_PE: f64 = 15.0;
const MAX_PRICE_TO_BOOK: f64 = 1.5;
const GRAHAM_MULTIPLIER: f64 = 22.5;
const MIN_ROIC: f64 = 0.15;

pub fn evaluate_buy(snap: &FundamentalsSnapshot) -> BuyEvaluation {
    let graham_price = graham_price(snap.trailing_eps, snap.book_value_per_share);

    BuyEvaluation {
        ticker: snap.ticker.clone(),
        company_name: snap.company_name.clone(),
        graham_score: graham_score(snap),
        bonus_score: bonus_score(snap),
        current_price: snap.current_price,
        graham_price,
        margin_of_safety_pct: margin_of_safety_pct(snap.current_price, graham_price),
        trailing_pe: snap.reporting_pe(),
        market_cap_billions: snap.market_cap_billions(),
    }
}

/// One point per satisfied criterion, seven criteria total.
pub fn graham_score(snap: &FundamentalsSnapshot) -> u8 {
    let mut score = 0;

    // 1. Size
    if snap.market_cap_usd >= MIN_MARKET_CAP_USD {
        score += 1;
    }

    if let Some(bs) = &snap.balance_sheet {
        // 2. Liquidity
        if bs.current_liabilities > 0.0
            && bs.current_assets / bs.current_liabilities >= MIN_CURRENT_RATIO
        {
            score += 1;
        }
        // 3. Conservative leverage: net current assets cover total debt
        if bs.total_debt < bs.current_assets - bs.current_liabilities {
            score += 1;
        }
    }

    // 4. Earnings stability: every year profitable
    let ni = &snap.net_income_series;
    if !ni.is_empty() && ni.iter().all(|&v| v > 0.0) {
        score += 1;
    }

    // 5. Dividend
    if snap.dividend_yield.unwrap_or(0.0) > 0.0 {
        score += 1;
    }

    // 6. Earnings growth: newest vs oldest, series is most-recent-first
    if ni.len() >= 3 && ni[0] > ni[ni.len() - 1] {
        score += 1;
    }

    // 7. Valuation multiplier
    let pe = snap.trailing_pe.unwrap_or(0.0);
    let pb = snap.price_to_book.unwrap_or(0.0);
    if pe > 0.0
        && pe <= MAX_TRAILING_PE
        && pb > 0.0
        && pb <= MAX_PRICE_TO_BOOK
        && pe * pb <= GRAHAM_MULTIPLIER
    {
        score += 1;
    }

    score
}

/// Supplementary quality score: buybacks, free cash flow, capital efficiency.
pub fn bonus_score(snap: &FundamentalsSnapshot) -> u8 {
    let mut score = 0;

    if let Some(bs) = &snap.balance_sheet {
        // 1. Buybacks: share count shrank between the two most recent periods
        if let (Some(curr), Some(prior)) =
            (bs.current_shares_outstanding, bs.prior_shares_outstanding)
        {
            if curr > 0.0 && prior > 0.0 && curr < prior {
                score += 1;
            }
        }

        // 3. ROIC > 15% on equity + debt
        let invested_capital = bs.stockholders_equity + bs.total_debt;
        if invested_capital > 0.0 {
            if let Some(&latest_ni) = snap.net_income_series.first() {
                if latest_ni / invested_capital > MIN_ROIC {
                    score += 1;
                }
            }
        }
    }

    // 2. Positive free cash flow
    if snap.most_recent_free_cash_flow.unwrap_or(0.0) > 0.0 {
        score += 1;
    }

    score
}

/// Graham intrinsic value: sqrt(22.5 * EPS * BVPS), 0 unless both are positive.
pub fn graham_price(trailing_eps: f64, book_value_per_share: f64) -> f64 {
    if trailing_eps > 0.0 && book_value_per_share > 0.0 {
        (GRAHAM_MULTIPLIER * trailing_eps * book_value_per_share).sqrt()
    } else {
        0.0
    }
}

/// Signed percentage below (positive) or above (negative) fair value.
pub fn margin_of_safety_pct(current_price: f64, graham_price: f64) -> f64 {
    if graham_price > 0.0 {
        (1.0 - current_price / graham_price) * 100.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BalanceSheet;

    fn empty_snapshot(ticker: &str) -> FundamentalsSnapshot {
        FundamentalsSnapshot {
            ticker: ticker.to_string(),
            company_name: ticker.to_string(),
            market_cap_usd: 0.0,
            trailing_pe: None,
            forward_pe: None,
            price_to_book: None,
            current_price: 0.0,
            trailing_eps: 0.0,
            book_value_per_share: 0.0,
            dividend_yield: None,
            balance_sheet: None,
            net_income_series: vec![],
            most_recent_free_cash_flow: None,
        }
    }

    /// Satisfies all 7 Graham criteria and all 3 bonus criteria.
    fn model_company() -> FundamentalsSnapshot {
        FundamentalsSnapshot {
            ticker: "ACME".into(),
            company_name: "Acme Corp".into(),
            market_cap_usd: 5_000_000_000.0,
            trailing_pe: Some(12.0),
            forward_pe: Some(11.0),
            price_to_book: Some(1.2),
            current_price: 40.0,
            trailing_eps: 5.0,
            book_value_per_share: 20.0,
            dividend_yield: Some(0.03),
            balance_sheet: Some(BalanceSheet {
                current_assets: 800_000_000.0,
                current_liabilities: 300_000_000.0,
                total_debt: 200_000_000.0,
                stockholders_equity: 1_000_000_000.0,
                current_shares_outstanding: Some(95_000_000.0),
                prior_shares_outstanding: Some(100_000_000.0),
            }),
            net_income_series: vec![250_000_000.0, 220_000_000.0, 180_000_000.0],
            most_recent_free_cash_flow: Some(150_000_000.0),
        }
    }

    #[test]
    fn full_marks_for_model_company() {
        let eval = evaluate_buy(&model_company());
        assert_eq!(eval.graham_score, 7);
        assert_eq!(eval.bonus_score, 3);
    }

    #[test]
    fn empty_snapshot_scores_zero() {
        let eval = evaluate_buy(&empty_snapshot("NIL"));
        assert_eq!(eval.graham_score, 0);
        assert_eq!(eval.bonus_score, 0);
        assert_eq!(eval.graham_price, 0.0);
        assert_eq!(eval.margin_of_safety_pct, 0.0);
    }

    #[test]
    fn scores_stay_in_range() {
        for snap in [empty_snapshot("A"), model_company()] {
            let eval = evaluate_buy(&snap);
            assert!(eval.graham_score <= 7);
            assert!(eval.bonus_score <= 3);
        }
    }

    #[test]
    fn evaluation_is_deterministic() {
        let snap = model_company();
        assert_eq!(evaluate_buy(&snap), evaluate_buy(&snap));
    }

    #[test]
    fn zero_current_liabilities_withholds_liquidity_point() {
        let mut snap = model_company();
        snap.balance_sheet.as_mut().unwrap().current_liabilities = 0.0;
        // Liquidity point lost; leverage criterion still holds (debt < CA - 0).
        assert_eq!(graham_score(&snap), 6);
    }

    #[test]
    fn absent_pe_cannot_satisfy_valuation_criterion() {
        let mut snap = model_company();
        snap.trailing_pe = None;
        assert_eq!(graham_score(&snap), 6);
    }

    #[test]
    fn empty_net_income_series_loses_stability_and_growth() {
        let mut snap = model_company();
        snap.net_income_series.clear();
        assert_eq!(graham_score(&snap), 5);
        // ROIC bonus also needs the series.
        assert_eq!(bonus_score(&snap), 2);
    }

    #[test]
    fn growth_needs_at_least_three_periods() {
        let mut snap = model_company();
        snap.net_income_series = vec![250_000_000.0, 180_000_000.0];
        assert_eq!(graham_score(&snap), 6);
    }

    #[test]
    fn graham_price_exact() {
        let p = graham_price(5.0, 20.0);
        assert!((p - 2250.0_f64.sqrt()).abs() < 1e-12);
        assert_eq!(graham_price(-1.0, 20.0), 0.0);
        assert_eq!(graham_price(5.0, 0.0), 0.0);
    }

    #[test]
    fn margin_of_safety_sign_convention() {
        assert_eq!(margin_of_safety_pct(50.0, 100.0), 50.0);
        assert_eq!(margin_of_safety_pct(150.0, 100.0), -50.0);
        assert_eq!(margin_of_safety_pct(50.0, 0.0), 0.0);
    }

    #[test]
    fn buybacks_require_both_share_counts() {
        let mut snap = model_company();
        snap.balance_sheet.as_mut().unwrap().prior_shares_outstanding = None;
        assert_eq!(bonus_score(&snap), 2);
    }

    #[test]
    fn roic_at_threshold_is_not_awarded() {
        let mut snap = model_company();
        // invested capital 1.2e9, 15% exactly
        snap.net_income_series[0] = 180_000_000.0;
        assert_eq!(bonus_score(&snap), 2);
    }
}
