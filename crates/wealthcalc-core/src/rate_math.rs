use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::WealthCalcError;
use crate::types::{Money, Percent, Rate, Years};
use crate::WealthCalcResult;

/// Day-count convention for daily accrual.
pub const DAYS_PER_YEAR: u32 = 365;

const RULE_OF_70: Decimal = dec!(70);

/// Fractional rate per period: `annual_rate_pct / 100 / periods_per_year`.
pub fn periodic_rate(annual_rate_pct: Percent, periods_per_year: u32) -> WealthCalcResult<Rate> {
    if periods_per_year == 0 {
        return Err(WealthCalcError::InvalidInput {
            field: "periods_per_year".into(),
            reason: "Periods per year must be at least 1".into(),
        });
    }
    Ok(annual_rate_pct / Decimal::ONE_HUNDRED / Decimal::from(periods_per_year))
}

/// Fractional daily rate on a 365-day year.
pub fn daily_rate(annual_rate_pct: Percent) -> Rate {
    annual_rate_pct / Decimal::ONE_HUNDRED / Decimal::from(DAYS_PER_YEAR)
}

/// `a × b` with overflow surfaced as an error.
pub fn checked_product(a: Decimal, b: Decimal, context: &str) -> WealthCalcResult<Decimal> {
    a.checked_mul(b).ok_or_else(|| WealthCalcError::Overflow {
        context: context.into(),
    })
}

/// `a − b` with overflow surfaced as an error.
pub fn checked_difference(a: Decimal, b: Decimal, context: &str) -> WealthCalcResult<Decimal> {
    a.checked_sub(b).ok_or_else(|| WealthCalcError::Overflow {
        context: context.into(),
    })
}

/// (1 + rate)^periods with overflow surfaced as an error.
fn growth_factor(rate: Rate, periods: u32, context: &str) -> WealthCalcResult<Decimal> {
    (Decimal::ONE + rate)
        .checked_powu(u64::from(periods))
        .ok_or_else(|| WealthCalcError::Overflow {
            context: format!("{context} growth factor over {periods} periods"),
        })
}

/// `principal × (1 + annual_rate_pct/100/periods_per_year)^periods`
pub fn compound_growth(
    principal: Money,
    annual_rate_pct: Percent,
    periods: u32,
    periods_per_year: u32,
) -> WealthCalcResult<Money> {
    let r = periodic_rate(annual_rate_pct, periods_per_year)?;
    if periods == 0 {
        return Ok(principal);
    }
    let factor = growth_factor(r, periods, "compound")?;
    checked_product(principal, factor, "compound growth")
}

/// Future value of an annuity-due: `c × ((1+r)^n − 1)/r × (1+r)`.
///
/// A zero periodic rate has no closed form here; callers special-case it as
/// `contribution × periods`.
pub fn annuity_future_value(
    periodic_contribution: Money,
    annual_rate_pct: Percent,
    periods: u32,
    periods_per_year: u32,
) -> WealthCalcResult<Money> {
    let r = periodic_rate(annual_rate_pct, periods_per_year)?;
    if r.is_zero() {
        return Err(WealthCalcError::DivisionByZero {
            context: "annuity future value at a zero periodic rate".into(),
        });
    }
    let factor = growth_factor(r, periods, "annuity")?;
    let accumulation = checked_product((factor - Decimal::ONE) / r, Decimal::ONE + r, "annuity factor")?;
    checked_product(periodic_contribution, accumulation, "annuity future value")
}

/// Compound annual growth rate, in percent.
pub fn cagr(final_value: Money, initial_value: Money, years: Years) -> WealthCalcResult<Percent> {
    if initial_value <= Decimal::ZERO {
        return Err(WealthCalcError::InvalidInput {
            field: "initial_value".into(),
            reason: "Initial value must be positive".into(),
        });
    }
    if years <= Decimal::ZERO {
        return Err(WealthCalcError::InvalidInput {
            field: "years".into(),
            reason: "Years must be positive".into(),
        });
    }
    if final_value <= Decimal::ZERO {
        return Err(WealthCalcError::InvalidInput {
            field: "final_value".into(),
            reason: "Final value must be positive for a growth rate to exist".into(),
        });
    }

    let ratio = final_value / initial_value;
    let growth = if years == Decimal::ONE {
        ratio
    } else {
        ratio
            .checked_powd(Decimal::ONE / years)
            .ok_or_else(|| WealthCalcError::Overflow {
                context: "CAGR root".into(),
            })?
    };
    Ok((growth - Decimal::ONE) * Decimal::ONE_HUNDRED)
}

/// Annual effective rate for a nominal rate compounded `periods_per_year` times.
pub fn effective_annual_rate_pct(
    annual_rate_pct: Percent,
    periods_per_year: u32,
) -> WealthCalcResult<Percent> {
    let r = periodic_rate(annual_rate_pct, periods_per_year)?;
    let factor = growth_factor(r, periods_per_year, "effective rate")?;
    Ok((factor - Decimal::ONE) * Decimal::ONE_HUNDRED)
}

/// Rule-of-70 estimate of the years needed to double.
pub fn doubling_time_rule_of_70(annual_rate_pct: Percent) -> WealthCalcResult<Years> {
    if annual_rate_pct <= Decimal::ZERO {
        return Err(WealthCalcError::InvalidInput {
            field: "annual_rate_pct".into(),
            reason: "Money only doubles at a positive rate".into(),
        });
    }
    Ok(RULE_OF_70 / annual_rate_pct)
}

/// Exact doubling time: `ln 2 / (k × ln(1 + r/k))`.
pub fn doubling_time_exact(annual_rate_pct: Percent, periods_per_year: u32) -> WealthCalcResult<Years> {
    if annual_rate_pct <= Decimal::ZERO {
        return Err(WealthCalcError::InvalidInput {
            field: "annual_rate_pct".into(),
            reason: "Money only doubles at a positive rate".into(),
        });
    }
    let r = periodic_rate(annual_rate_pct, periods_per_year)?;
    let ln_growth = (Decimal::ONE + r)
        .checked_ln()
        .ok_or_else(|| WealthCalcError::Overflow {
            context: "doubling time logarithm".into(),
        })?;
    let denominator = ln_growth * Decimal::from(periods_per_year);
    if denominator.is_zero() {
        return Err(WealthCalcError::DivisionByZero {
            context: "doubling time".into(),
        });
    }
    Ok(Decimal::TWO.ln() / denominator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_compound_growth_ten_years_at_twelve_pct() {
        let result = compound_growth(dec!(100000), dec!(12), 10, 1).unwrap();
        // 1.12^10 = 3.10584820...
        assert!((result - dec!(310584.82)).abs() < dec!(0.01));
    }

    #[test]
    fn test_compound_growth_zero_periods_returns_principal() {
        let result = compound_growth(dec!(2500), dec!(9), 0, 12).unwrap();
        assert_eq!(result, dec!(2500));
    }

    #[test]
    fn test_compound_growth_negative_rate_shrinks() {
        let result = compound_growth(dec!(1000), dec!(-10), 2, 1).unwrap();
        assert_eq!(result, dec!(810));
    }

    #[test]
    fn test_compound_growth_rejects_zero_frequency() {
        assert!(compound_growth(dec!(1000), dec!(5), 3, 0).is_err());
    }

    #[test]
    fn test_annuity_due_one_year_monthly() {
        // 1000/month at 12% for 12 months: 1000 * (1.01^12 - 1)/0.01 * 1.01 ≈ 12809.33
        let fv = annuity_future_value(dec!(1000), dec!(12), 12, 12).unwrap();
        assert!((fv - dec!(12809.33)).abs() < dec!(0.01));
    }

    #[test]
    fn test_annuity_zero_rate_is_division_by_zero() {
        let err = annuity_future_value(dec!(1000), dec!(0), 12, 12).unwrap_err();
        assert!(matches!(err, WealthCalcError::DivisionByZero { .. }));
    }

    #[test]
    fn test_cagr_recovers_rate() {
        let g = cagr(dec!(310584.82), dec!(100000), dec!(10)).unwrap();
        assert!((g - dec!(12)).abs() < dec!(0.001), "got {g}");
    }

    #[test]
    fn test_cagr_single_year_is_simple_growth() {
        let g = cagr(dec!(1150), dec!(1000), dec!(1)).unwrap();
        assert_eq!(g, dec!(15));
    }

    #[test]
    fn test_cagr_rejects_non_positive_base() {
        assert!(cagr(dec!(100), dec!(0), dec!(5)).is_err());
        assert!(cagr(dec!(0), dec!(100), dec!(5)).is_err());
        assert!(cagr(dec!(100), dec!(50), dec!(0)).is_err());
    }

    #[test]
    fn test_daily_rate() {
        assert_eq!(daily_rate(dec!(36.5)), dec!(0.001));
    }

    #[test]
    fn test_effective_annual_rate_monthly() {
        // 12% nominal monthly = 12.6825...% effective
        let ear = effective_annual_rate_pct(dec!(12), 12).unwrap();
        assert!((ear - dec!(12.6825)).abs() < dec!(0.0001));
    }

    #[test]
    fn test_doubling_times() {
        assert_eq!(doubling_time_rule_of_70(dec!(7)).unwrap(), dec!(10));
        // ln2 / ln1.07 ≈ 10.2448
        let exact = doubling_time_exact(dec!(7), 1).unwrap();
        assert!((exact - dec!(10.2448)).abs() < dec!(0.001));
        assert!(doubling_time_rule_of_70(dec!(0)).is_err());
    }
}
