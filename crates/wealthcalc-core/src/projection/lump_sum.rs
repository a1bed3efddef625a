use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::WealthCalcError;
use crate::projection::{cagr_or_warn, final_point, share_pct};
use crate::rate_math;
use crate::types::*;
use crate::WealthCalcResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LumpSumOutput {
    pub series: Vec<SeriesPoint>,
    pub maturity_value: Money,
    pub total_interest: Money,
    /// Total interest as a percentage of principal.
    pub absolute_return_pct: Option<Percent>,
    pub cagr_pct: Option<Percent>,
    pub effective_annual_rate_pct: Percent,
    /// Rule-of-70 estimate; `None` when the rate is not positive.
    pub doubling_time_years: Option<Years>,
}

// ---------------------------------------------------------------------------
// Series
// ---------------------------------------------------------------------------

/// Year-by-year value of a single upfront investment.
///
/// Compounds `periods_per_year` times a year; the annual case is
/// `compound_growth(principal, rate, year, 1)`.
pub fn lump_sum_series(params: &ProjectionParams) -> WealthCalcResult<Vec<SeriesPoint>> {
    params.validate()?;
    let k = params.periods_per_year;
    let mut series = Vec::with_capacity(params.horizon_years as usize);

    for year in 1..=params.horizon_years {
        let periods = year
            .checked_mul(k)
            .ok_or_else(|| WealthCalcError::Overflow {
                context: format!("lump sum period count in year {year}"),
            })?;
        let value = rate_math::compound_growth(params.principal, params.annual_rate_pct, periods, k)?;
        series.push(SeriesPoint::new(year, value, params.principal));
    }

    log::debug!(
        "lump sum: {} over {} years at {}%",
        params.principal,
        params.horizon_years,
        params.annual_rate_pct
    );
    Ok(series)
}

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

pub fn project_lump_sum(
    params: &ProjectionParams,
) -> WealthCalcResult<ComputationOutput<LumpSumOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if params.periodic_contribution.is_some_and(|c| !c.is_zero()) {
        warnings.push("Periodic contribution is not part of a lump-sum projection and was ignored".into());
    }

    let series = lump_sum_series(params)?;
    let last = final_point(&series, "Lump sum")?;

    let cagr_pct = cagr_or_warn(
        last.value,
        params.principal,
        params.horizon_years,
        "Lump sum",
        &mut warnings,
    );
    let doubling_time_years = rate_math::doubling_time_rule_of_70(params.annual_rate_pct).ok();

    let output = LumpSumOutput {
        maturity_value: last.value,
        total_interest: last.return_to_date,
        absolute_return_pct: share_pct(last.return_to_date, params.principal),
        cagr_pct,
        effective_annual_rate_pct: rate_math::effective_annual_rate_pct(
            params.annual_rate_pct,
            params.periods_per_year,
        )?,
        doubling_time_years,
        series,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Lump Sum (compound growth of a single investment)",
        params,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
