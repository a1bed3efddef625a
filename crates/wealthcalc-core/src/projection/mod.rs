pub mod fixed_income;
pub mod lump_sum;
pub mod margin;
pub mod sip;
pub mod stock_benchmark;

use rust_decimal::Decimal;

use crate::error::WealthCalcError;
use crate::rate_math;
use crate::types::{Money, Percent, Years};
use crate::WealthCalcResult;

/// Last point of a series; every calculator emits at least one.
pub(crate) fn final_point<'a, T>(series: &'a [T], label: &str) -> WealthCalcResult<&'a T> {
    series
        .last()
        .ok_or_else(|| WealthCalcError::InsufficientData(format!("{label} series is empty")))
}

/// CAGR, or `None` plus a warning when the growth base is not positive.
pub(crate) fn cagr_or_warn(
    final_value: Money,
    initial_value: Money,
    years: u32,
    label: &str,
    warnings: &mut Vec<String>,
) -> Option<Percent> {
    match rate_math::cagr(final_value, initial_value, Years::from(years)) {
        Ok(g) => Some(g),
        Err(e) => {
            warnings.push(format!("{label} CAGR not defined: {e}"));
            None
        }
    }
}

/// `part / whole` in percent, `None` when the whole is zero or the ratio overflows.
pub(crate) fn share_pct(part: Money, whole: Money) -> Option<Percent> {
    part.checked_div(whole)?.checked_mul(Decimal::ONE_HUNDRED)
}

/// Sum of final values with overflow surfaced as an error.
pub(crate) fn checked_total<I: IntoIterator<Item = Money>>(
    values: I,
    context: &str,
) -> WealthCalcResult<Money> {
    values.into_iter().try_fold(Decimal::ZERO, |acc, v| {
        acc.checked_add(v).ok_or_else(|| WealthCalcError::Overflow {
            context: context.into(),
        })
    })
}
