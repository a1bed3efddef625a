use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::WealthCalcError;
use crate::projection::final_point;
use crate::rate_math;
use crate::types::*;
use crate::WealthCalcResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SipOutput {
    pub series: Vec<SeriesPoint>,
    pub total_invested: Money,
    pub maturity_value: Money,
    pub total_returns: Money,
    /// maturity / invested; `None` when nothing was invested.
    pub wealth_gain_ratio: Option<Decimal>,
}

// ---------------------------------------------------------------------------
// Series
// ---------------------------------------------------------------------------

/// Year-by-year value of a fixed periodic contribution.
///
/// Contributions are made `periods_per_year` times a year at the start of each
/// period (annuity-due), so 12 gives the usual monthly SIP. A 0% rate is
/// handled directly as the sum of contributions.
pub fn sip_series(params: &ProjectionParams) -> WealthCalcResult<Vec<SeriesPoint>> {
    params.validate()?;
    let contribution = params
        .periodic_contribution
        .ok_or_else(|| WealthCalcError::InvalidInput {
            field: "periodic_contribution".into(),
            reason: "SIP projection requires a periodic contribution".into(),
        })?;

    let k = params.periods_per_year;
    let mut series = Vec::with_capacity(params.horizon_years as usize);

    for year in 1..=params.horizon_years {
        let periods = year
            .checked_mul(k)
            .ok_or_else(|| WealthCalcError::Overflow {
                context: format!("SIP period count in year {year}"),
            })?;
        let invested = rate_math::checked_product(
            contribution,
            Decimal::from(periods),
            "SIP invested amount",
        )?;
        let value = if params.annual_rate_pct.is_zero() {
            invested
        } else {
            rate_math::annuity_future_value(contribution, params.annual_rate_pct, periods, k)?
        };
        series.push(SeriesPoint::new(year, value, invested));
    }

    log::debug!(
        "sip: {} years x {} contributions at {}%",
        params.horizon_years,
        k,
        params.annual_rate_pct
    );
    Ok(series)
}

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

pub fn project_sip(params: &ProjectionParams) -> WealthCalcResult<ComputationOutput<SipOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if !params.principal.is_zero() {
        warnings.push(format!(
            "Principal of {} is not part of a SIP projection and was ignored",
            params.principal
        ));
    }

    let series = sip_series(params)?;
    let last = final_point(&series, "SIP")?;

    let wealth_gain_ratio = last.value.checked_div(last.invested_to_date);

    let output = SipOutput {
        total_invested: last.invested_to_date,
        maturity_value: last.value,
        total_returns: last.return_to_date,
        wealth_gain_ratio,
        series,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Systematic Investment Plan (annuity-due future value)",
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

    #[test]
    fn test_sip_fifteen_years_monthly() {
        let params = ProjectionParams::monthly_sip(dec!(10000), dec!(12), 15);
        let out = project_sip(&params).unwrap().result;
        assert_eq!(out.series.len(), 15);
        assert_eq!(out.total_invested, dec!(1800000));
        // 10000 * (1.01^180 - 1)/0.01 * 1.01 ≈ 5,045,760
        assert!((out.maturity_value - dec!(5045760)).abs() < dec!(1));
        assert!(out.total_returns > Decimal::ZERO);
    }

    #[test]
    fn test_sip_zero_rate_is_sum_of_contributions() {
        let params = ProjectionParams::monthly_sip(dec!(500), dec!(0), 3);
        let series = sip_series(&params).unwrap();
        assert_eq!(series[2].value, dec!(18000));
        assert_eq!(series[2].return_to_date, Decimal::ZERO);
    }

    #[test]
    fn test_sip_requires_contribution() {
        let params = ProjectionParams::lump_sum(dec!(1000), dec!(10), 5);
        assert!(sip_series(&params).is_err());
    }

    #[test]
    fn test_sip_principal_ignored_with_warning() {
        let mut params = ProjectionParams::monthly_sip(dec!(1000), dec!(10), 2);
        params.principal = dec!(50000);
        let out = project_sip(&params).unwrap();
        assert_eq!(out.warnings.len(), 1);
        assert_eq!(out.result.total_invested, dec!(24000));
    }

    #[test]
    fn test_sip_zero_contribution_has_no_gain_ratio() {
        let params = ProjectionParams::monthly_sip(dec!(0), dec!(12), 4);
        let out = project_sip(&params).unwrap().result;
        assert_eq!(out.maturity_value, Decimal::ZERO);
        assert!(out.wealth_gain_ratio.is_none());
    }

    #[test]
    fn test_sip_oversized_contribution_is_overflow() {
        let params = ProjectionParams::monthly_sip(Decimal::MAX / dec!(100), Decimal::ZERO, 10);
        assert!(matches!(
            sip_series(&params),
            Err(WealthCalcError::Overflow { .. })
        ));
    }
}
