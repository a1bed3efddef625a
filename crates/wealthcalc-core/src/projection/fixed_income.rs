use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::projection::lump_sum::lump_sum_series;
use crate::projection::{checked_total, final_point, share_pct};
use crate::types::*;
use crate::WealthCalcResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Instrument {
    FixedDeposit,
    Bond,
    Equity,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixedIncomeInput {
    pub fixed_deposit: ProjectionParams,
    pub bond: ProjectionParams,
    pub equity: ProjectionParams,
    pub horizon_years: u32,
}

impl FixedIncomeInput {
    /// The same amount placed in each instrument.
    pub fn same_principal(
        principal: Money,
        fd_rate_pct: Percent,
        bond_rate_pct: Percent,
        equity_rate_pct: Percent,
        horizon_years: u32,
    ) -> Self {
        Self {
            fixed_deposit: ProjectionParams::lump_sum(principal, fd_rate_pct, horizon_years),
            bond: ProjectionParams::lump_sum(principal, bond_rate_pct, horizon_years),
            equity: ProjectionParams::lump_sum(principal, equity_rate_pct, horizon_years),
            horizon_years,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixedIncomeYear {
    pub year: u32,
    pub fixed_deposit: SeriesPoint,
    pub bond: SeriesPoint,
    pub equity: SeriesPoint,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstrumentSummary {
    pub instrument: Instrument,
    pub final_value: Money,
    pub total_return: Money,
    /// Share of the three instruments' combined final value.
    pub share_of_total_pct: Option<Percent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixedIncomeOutput {
    pub years: Vec<FixedIncomeYear>,
    pub instruments: Vec<InstrumentSummary>,
    pub best_instrument: Instrument,
}

// ---------------------------------------------------------------------------
// Series
// ---------------------------------------------------------------------------

/// Fixed deposit, bond and equity lump sums over one horizon, zipped per year.
pub fn fixed_income_series(
    fixed_deposit: &ProjectionParams,
    bond: &ProjectionParams,
    equity: &ProjectionParams,
    horizon_years: u32,
) -> WealthCalcResult<Vec<(SeriesPoint, SeriesPoint, SeriesPoint)>> {
    let fd_leg = lump_sum_series(&fixed_deposit.with_horizon(horizon_years))?;
    let bond_leg = lump_sum_series(&bond.with_horizon(horizon_years))?;
    let equity_leg = lump_sum_series(&equity.with_horizon(horizon_years))?;

    Ok(fd_leg
        .into_iter()
        .zip(bond_leg)
        .zip(equity_leg)
        .map(|((fd, b), e)| (fd, b, e))
        .collect())
}

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

pub fn project_fixed_income(
    input: &FixedIncomeInput,
) -> WealthCalcResult<ComputationOutput<FixedIncomeOutput>> {
    let start = Instant::now();
    let warnings: Vec<String> = Vec::new();

    let triples = fixed_income_series(
        &input.fixed_deposit,
        &input.bond,
        &input.equity,
        input.horizon_years,
    )?;
    let (fd_last, bond_last, equity_last) = final_point(&triples, "Fixed income")?.clone();

    let finals = [
        (Instrument::FixedDeposit, fd_last),
        (Instrument::Bond, bond_last),
        (Instrument::Equity, equity_last),
    ];
    let combined = checked_total(finals.iter().map(|(_, p)| p.value), "fixed income total")?;

    // Strictly greater wins, so ties keep declaration order.
    let mut best = &finals[0];
    for candidate in &finals[1..] {
        if candidate.1.value > best.1.value {
            best = candidate;
        }
    }
    let best_instrument = best.0;

    let instruments = finals
        .iter()
        .map(|(instrument, p)| InstrumentSummary {
            instrument: *instrument,
            final_value: p.value,
            total_return: p.return_to_date,
            share_of_total_pct: share_pct(p.value, combined),
        })
        .collect();

    let years = triples
        .into_iter()
        .map(|(fixed_deposit, bond, equity)| FixedIncomeYear {
            year: fixed_deposit.index,
            fixed_deposit,
            bond,
            equity,
        })
        .collect();

    let output = FixedIncomeOutput {
        years,
        instruments,
        best_instrument,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed Income (FD, bond and equity compound growth)",
        input,
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
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn default_input() -> FixedIncomeInput {
        FixedIncomeInput::same_principal(dec!(500000), dec!(6.5), dec!(7.2), dec!(12), 10)
    }

    #[test]
    fn test_equity_wins_at_defaults() {
        let out = project_fixed_income(&default_input()).unwrap().result;
        assert_eq!(out.best_instrument, Instrument::Equity);
        assert_eq!(out.years.len(), 10);
        assert_eq!(out.instruments.len(), 3);
    }

    #[test]
    fn test_first_year_values() {
        let triples = fixed_income_series(
            &ProjectionParams::lump_sum(dec!(1000), dec!(6.5), 1),
            &ProjectionParams::lump_sum(dec!(1000), dec!(7.2), 1),
            &ProjectionParams::lump_sum(dec!(1000), dec!(12), 1),
            3,
        )
        .unwrap();
        assert_eq!(triples.len(), 3);
        assert_eq!(triples[0].0.value, dec!(1065));
        assert_eq!(triples[0].1.value, dec!(1072));
        assert_eq!(triples[0].2.value, dec!(1120));
    }

    #[test]
    fn test_shares_sum_to_hundred() {
        let out = project_fixed_income(&default_input()).unwrap().result;
        let total: Decimal = out
            .instruments
            .iter()
            .filter_map(|i| i.share_of_total_pct)
            .sum();
        assert!((total - dec!(100)).abs() < dec!(0.000001));
    }

    #[test]
    fn test_tie_goes_to_fixed_deposit() {
        let input = FixedIncomeInput::same_principal(dec!(1000), dec!(7), dec!(7), dec!(7), 4);
        let out = project_fixed_income(&input).unwrap().result;
        assert_eq!(out.best_instrument, Instrument::FixedDeposit);
    }
}
