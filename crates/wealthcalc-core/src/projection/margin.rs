use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::costs::{apply_costs, CostBreakdown, CostInput};
use crate::error::WealthCalcError;
use crate::projection::{final_point, share_pct};
use crate::rate_math::{self, DAYS_PER_YEAR};
use crate::types::*;
use crate::WealthCalcResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A leveraged position held for a number of days.
///
/// `margin_pct` is the share of the position paid with the investor's own
/// capital; the rest is borrowed at `borrow_rate_pct`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarginParams {
    /// Full position size (own capital + borrowed).
    pub principal: Money,
    /// Expected annual return of the stock.
    pub annual_rate_pct: Percent,
    pub margin_pct: Percent,
    pub borrow_rate_pct: Percent,
    pub horizon_days: u32,
    #[serde(default)]
    pub brokerage_rate_per_unit: Rate,
}

impl MarginParams {
    pub fn margin_amount(&self) -> Money {
        // The fraction is at most one, so the product never exceeds the principal.
        self.principal * (self.margin_pct / Decimal::ONE_HUNDRED)
    }

    pub fn borrowed(&self) -> Money {
        self.principal - self.margin_amount()
    }

    pub fn validate(&self) -> WealthCalcResult<()> {
        if self.horizon_days == 0 {
            return Err(WealthCalcError::invalid(
                "horizon_days",
                "Horizon must be at least one day",
            ));
        }
        if self.principal < Decimal::ZERO {
            return Err(WealthCalcError::invalid(
                "principal",
                "Principal cannot be negative",
            ));
        }
        if self.margin_pct < Decimal::ZERO || self.margin_pct > Decimal::ONE_HUNDRED {
            return Err(WealthCalcError::invalid(
                "margin_pct",
                "Margin must be between 0 and 100 percent",
            ));
        }
        if self.borrow_rate_pct < Decimal::ZERO {
            return Err(WealthCalcError::invalid(
                "borrow_rate_pct",
                "Borrow rate cannot be negative",
            ));
        }
        if self.brokerage_rate_per_unit < Decimal::ZERO {
            return Err(WealthCalcError::invalid(
                "brokerage_rate_per_unit",
                "Brokerage rate cannot be negative",
            ));
        }
        if rate_math::daily_rate(self.annual_rate_pct) <= Decimal::NEGATIVE_ONE {
            return Err(WealthCalcError::invalid(
                "annual_rate_pct",
                "Daily rate must be greater than -100%",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarginSeriesPoint {
    /// Day number, starting at 1.
    pub index: u32,
    /// Market value of the whole position.
    pub value: Money,
    pub invested_to_date: Money,
    pub return_to_date: Money,
    /// Simple interest accrued on the borrowed amount so far.
    pub interest_cost: Money,
    /// value − interest_cost
    pub net_value: Money,
    /// What the investor owns after repaying the loan and its interest.
    pub equity_value: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarginTradeOutput {
    pub series: Vec<MarginSeriesPoint>,
    pub margin_amount: Money,
    pub borrowed: Money,
    /// principal / margin_amount; `None` without own capital.
    pub leverage: Option<Decimal>,
    pub interest_cost: Money,
    pub costs: CostBreakdown,
    /// Net value after brokerage once the borrowed amount is repaid.
    pub equity_after_repayment: Money,
    /// (equity_after_repayment − margin_amount) / margin_amount, in percent.
    pub return_on_capital_pct: Option<Percent>,
    /// The same own capital invested without borrowing, after brokerage.
    pub unleveraged: CostBreakdown,
}

// ---------------------------------------------------------------------------
// Series
// ---------------------------------------------------------------------------

/// Day-by-day value of a margin position.
///
/// The stock compounds daily on a 365-day year while borrow interest accrues
/// linearly: `borrowed × borrow_rate/100/365 × day`.
pub fn margin_series(params: &MarginParams) -> WealthCalcResult<Vec<MarginSeriesPoint>> {
    params.validate()?;

    let borrowed = params.borrowed();
    let daily_interest = rate_math::checked_product(
        borrowed,
        rate_math::daily_rate(params.borrow_rate_pct),
        "margin daily interest",
    )?;
    let mut series = Vec::with_capacity(params.horizon_days as usize);

    for day in 1..=params.horizon_days {
        let value =
            rate_math::compound_growth(params.principal, params.annual_rate_pct, day, DAYS_PER_YEAR)?;
        let interest_cost =
            rate_math::checked_product(daily_interest, Decimal::from(day), "margin interest")?;
        let net_value = rate_math::checked_difference(value, interest_cost, "margin net value")?;
        series.push(MarginSeriesPoint {
            index: day,
            value,
            invested_to_date: params.principal,
            return_to_date: value - params.principal,
            interest_cost,
            net_value,
            equity_value: rate_math::checked_difference(net_value, borrowed, "margin equity")?,
        });
    }

    log::debug!(
        "margin: {} at {}% margin over {} days, borrowed {}",
        params.principal,
        params.margin_pct,
        params.horizon_days,
        borrowed
    );
    Ok(series)
}

/// Cost inputs for a margin trade, measured against the investor's own capital.
///
/// Brokerage is charged on the full position both ways; the gross value is the
/// final net value, which already excludes accrued interest.
pub fn margin_cost_input(final_point: &MarginSeriesPoint, params: &MarginParams) -> CostInput {
    CostInput {
        gross_final_value: final_point.net_value,
        interest_accrued: final_point.interest_cost,
        buy_base_amount: params.principal,
        sell_base_amount: final_point.value,
        brokerage_rate: params.brokerage_rate_per_unit,
        base_invested: params.margin_amount(),
    }
}

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

pub fn analyze_margin_trade(
    params: &MarginParams,
) -> WealthCalcResult<ComputationOutput<MarginTradeOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let series = margin_series(params)?;
    let last = final_point(&series, "Margin")?;

    let margin_amount = params.margin_amount();
    let borrowed = params.borrowed();
    let costs = apply_costs(&margin_cost_input(last, params))?;
    let equity_after_repayment =
        rate_math::checked_difference(costs.net_final_value, borrowed, "margin repayment")?;

    let leverage = params.principal.checked_div(margin_amount);
    if leverage.is_none() {
        warnings.push("Position is fully borrowed; leverage and return on capital are undefined".into());
    }

    if equity_after_repayment < Decimal::ZERO {
        warnings.push(format!(
            "Loan and costs exceed the position: the investor owes {} at exit",
            -equity_after_repayment
        ));
    }

    let unleveraged_value =
        rate_math::compound_growth(margin_amount, params.annual_rate_pct, params.horizon_days, DAYS_PER_YEAR)?;
    let unleveraged = apply_costs(&CostInput::cash(
        &SeriesPoint::new(params.horizon_days, unleveraged_value, margin_amount),
        params.brokerage_rate_per_unit,
    ))?;

    let output = MarginTradeOutput {
        margin_amount,
        borrowed,
        leverage,
        interest_cost: last.interest_cost,
        return_on_capital_pct: share_pct(
            rate_math::checked_difference(equity_after_repayment, margin_amount, "margin return")?,
            margin_amount,
        ),
        equity_after_repayment,
        costs,
        unleveraged,
        series,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Margin Trade (daily compounding, simple borrow interest, brokerage)",
        params,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn thirty_day_trade() -> MarginParams {
        MarginParams {
            principal: dec!(100000),
            annual_rate_pct: dec!(15),
            margin_pct: dec!(50),
            borrow_rate_pct: dec!(18),
            horizon_days: 30,
            brokerage_rate_per_unit: dec!(0.00175),
        }
    }

    #[test]
    fn test_interest_after_thirty_days() {
        let series = margin_series(&thirty_day_trade()).unwrap();
        assert_eq!(series.len(), 30);
        // 50000 * 0.18/365 * 30 ≈ 739.73
        assert!((series[29].interest_cost - dec!(739.73)).abs() < dec!(0.01));
    }

    #[test]
    fn test_interest_is_linear_in_days() {
        let series = margin_series(&thirty_day_trade()).unwrap();
        let day1 = series[0].interest_cost;
        assert_eq!(series[9].interest_cost, day1 * dec!(10));
    }

    #[test]
    fn test_full_margin_has_no_interest() {
        let params = MarginParams {
            margin_pct: dec!(100),
            ..thirty_day_trade()
        };
        let series = margin_series(&params).unwrap();
        assert!(series.iter().all(|p| p.interest_cost.is_zero()));
        assert!(series.iter().all(|p| p.net_value == p.value));
    }

    #[test]
    fn test_margin_out_of_range_rejected() {
        let params = MarginParams {
            margin_pct: dec!(120),
            ..thirty_day_trade()
        };
        assert!(margin_series(&params).is_err());
    }

    #[test]
    fn test_zero_days_rejected() {
        let params = MarginParams {
            horizon_days: 0,
            ..thirty_day_trade()
        };
        assert!(matches!(
            margin_series(&params),
            Err(WealthCalcError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_trade_costs_measured_against_own_capital() {
        let params = thirty_day_trade();
        let out = analyze_margin_trade(&params).unwrap().result;
        assert_eq!(out.margin_amount, dec!(50000));
        assert_eq!(out.borrowed, dec!(50000));
        assert_eq!(out.leverage, Some(dec!(2)));
        assert_eq!(out.costs.brokerage_buy, dec!(175));

        let last = out.series.last().unwrap();
        assert_eq!(out.costs.gross_final_value, last.net_value);
        assert_eq!(
            out.costs.net_final_value,
            last.net_value - out.costs.brokerage_buy - out.costs.brokerage_sell
        );
        assert_eq!(
            out.costs.net_return,
            out.costs.net_final_value - dec!(50000)
        );
        assert_eq!(out.equity_after_repayment, out.costs.net_final_value - dec!(50000));
    }

    #[test]
    fn test_extreme_borrow_rate_is_overflow() {
        let params = MarginParams {
            borrow_rate_pct: Decimal::MAX,
            ..thirty_day_trade()
        };
        assert!(matches!(
            margin_series(&params),
            Err(WealthCalcError::Overflow { .. })
        ));
    }

    #[test]
    fn test_fully_borrowed_warns() {
        let params = MarginParams {
            margin_pct: dec!(0),
            ..thirty_day_trade()
        };
        let out = analyze_margin_trade(&params).unwrap();
        assert!(out.result.leverage.is_none());
        assert!(out.result.return_on_capital_pct.is_none());
        assert!(!out.warnings.is_empty());
    }
}
