use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Instant;

use crate::error::WealthCalcError;
use crate::projection::lump_sum::lump_sum_series;
use crate::projection::sip::sip_series;
use crate::projection::{checked_total, final_point, share_pct};
use crate::types::*;
use crate::WealthCalcResult;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Which projection a strategy runs through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Calculator {
    Sip,
    LumpSum,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedStrategy {
    pub name: String,
    pub calculator: Calculator,
    pub params: ProjectionParams,
}

impl NamedStrategy {
    pub fn new(name: impl Into<String>, calculator: Calculator, params: ProjectionParams) -> Self {
        Self {
            name: name.into(),
            calculator,
            params,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub strategy: String,
    pub calculator: Calculator,
    pub final_point: SeriesPoint,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonOutput {
    /// One row per strategy, in the order supplied.
    pub rows: Vec<ComparisonRow>,
    /// Strictly greatest final value; ties keep the first declared.
    pub best_performer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonInput {
    pub strategies: Vec<NamedStrategy>,
    pub horizon_years: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonSummaryRow {
    pub strategy: String,
    pub calculator: Calculator,
    pub invested: Money,
    pub final_value: Money,
    pub returns: Money,
    pub share_of_total_pct: Option<Percent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub horizon_years: u32,
    pub rows: Vec<ComparisonSummaryRow>,
    pub best_performer: String,
}

/// The four strategies of the classic comparison screen.
pub fn default_strategies(lump_sum: Money, monthly_contribution: Money) -> Vec<NamedStrategy> {
    vec![
        NamedStrategy::new(
            "SIP",
            Calculator::Sip,
            ProjectionParams::monthly_sip(monthly_contribution, dec!(12), 1),
        ),
        NamedStrategy::new(
            "Lump Sum",
            Calculator::LumpSum,
            ProjectionParams::lump_sum(lump_sum, dec!(12), 1),
        ),
        NamedStrategy::new(
            "Stocks",
            Calculator::LumpSum,
            ProjectionParams::lump_sum(lump_sum, dec!(15), 1),
        ),
        NamedStrategy::new(
            "Fixed Deposit",
            Calculator::LumpSum,
            ProjectionParams::lump_sum(lump_sum, dec!(6.5), 1),
        ),
    ]
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

fn final_row(strategy: &NamedStrategy, horizon_years: u32) -> WealthCalcResult<ComparisonRow> {
    let params = strategy.params.with_horizon(horizon_years);
    let series = match strategy.calculator {
        Calculator::Sip => sip_series(&params)?,
        Calculator::LumpSum => lump_sum_series(&params)?,
    };
    let last = final_point(&series, &strategy.name)?;
    Ok(ComparisonRow {
        strategy: strategy.name.clone(),
        calculator: strategy.calculator,
        final_point: last.clone(),
    })
}

#[cfg(not(feature = "parallel"))]
fn final_rows(strategies: &[NamedStrategy], horizon_years: u32) -> WealthCalcResult<Vec<ComparisonRow>> {
    strategies
        .iter()
        .map(|s| final_row(s, horizon_years))
        .collect()
}

#[cfg(feature = "parallel")]
fn final_rows(strategies: &[NamedStrategy], horizon_years: u32) -> WealthCalcResult<Vec<ComparisonRow>> {
    strategies
        .par_iter()
        .map(|s| final_row(s, horizon_years))
        .collect()
}

/// Runs every strategy over one horizon and keeps each final point.
pub fn compare(strategies: &[NamedStrategy], horizon_years: u32) -> WealthCalcResult<ComparisonOutput> {
    if strategies.is_empty() {
        return Err(WealthCalcError::InsufficientData(
            "At least one strategy is required for a comparison".into(),
        ));
    }
    let mut seen = HashSet::new();
    for s in strategies {
        if !seen.insert(s.name.as_str()) {
            return Err(WealthCalcError::InvalidInput {
                field: "strategies".into(),
                reason: format!("Duplicate strategy name '{}'", s.name),
            });
        }
    }

    let rows = final_rows(strategies, horizon_years)?;

    let mut best = &rows[0];
    for row in &rows[1..] {
        if row.final_point.value > best.final_point.value {
            best = row;
        }
    }
    let best_performer = best.strategy.clone();

    log::debug!(
        "compare: {} strategies over {} years, best {}",
        rows.len(),
        horizon_years,
        best_performer
    );
    Ok(ComparisonOutput {
        rows,
        best_performer,
    })
}

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

pub fn run_comparison(
    input: &ComparisonInput,
) -> WealthCalcResult<ComputationOutput<ComparisonReport>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    for s in &input.strategies {
        if s.params.horizon_years != input.horizon_years {
            warnings.push(format!(
                "'{}' horizon of {} years replaced by the shared {} years",
                s.name, s.params.horizon_years, input.horizon_years
            ));
        }
    }

    let comparison = compare(&input.strategies, input.horizon_years)?;
    let combined = checked_total(
        comparison.rows.iter().map(|r| r.final_point.value),
        "comparison total",
    )?;

    let rows = comparison
        .rows
        .into_iter()
        .map(|r| ComparisonSummaryRow {
            share_of_total_pct: share_pct(r.final_point.value, combined),
            invested: r.final_point.invested_to_date,
            final_value: r.final_point.value,
            returns: r.final_point.return_to_date,
            strategy: r.strategy,
            calculator: r.calculator,
        })
        .collect();

    let output = ComparisonReport {
        horizon_years: input.horizon_years,
        rows,
        best_performer: comparison.best_performer,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Strategy Comparison (final values over a shared horizon)",
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

    #[test]
    fn test_defaults_keep_order_and_pick_sip() {
        let out = compare(&default_strategies(dec!(100000), dec!(10000)), 10).unwrap();
        let names: Vec<&str> = out.rows.iter().map(|r| r.strategy.as_str()).collect();
        assert_eq!(names, vec!["SIP", "Lump Sum", "Stocks", "Fixed Deposit"]);
        // A 10000/month SIP over ten years far outgrows a single 100000 lump.
        assert_eq!(out.best_performer, "SIP");
    }

    #[test]
    fn test_tie_resolves_to_first_declared() {
        let strategies = vec![
            NamedStrategy::new("A", Calculator::LumpSum, ProjectionParams::lump_sum(dec!(1000), dec!(8), 1)),
            NamedStrategy::new("B", Calculator::LumpSum, ProjectionParams::lump_sum(dec!(1000), dec!(8), 1)),
        ];
        let out = compare(&strategies, 5).unwrap();
        assert_eq!(out.best_performer, "A");
    }

    #[test]
    fn test_rows_use_shared_horizon() {
        let strategies = vec![NamedStrategy::new(
            "Only",
            Calculator::LumpSum,
            ProjectionParams::lump_sum(dec!(1000), dec!(10), 40),
        )];
        let out = compare(&strategies, 2).unwrap();
        assert_eq!(out.rows[0].final_point.index, 2);
        assert_eq!(out.rows[0].final_point.value, dec!(1210));
    }

    #[test]
    fn test_empty_and_duplicate_rejected() {
        assert!(matches!(compare(&[], 5), Err(WealthCalcError::InsufficientData(_))));
        let dup = vec![
            NamedStrategy::new("X", Calculator::LumpSum, ProjectionParams::lump_sum(dec!(1), dec!(1), 1)),
            NamedStrategy::new("X", Calculator::LumpSum, ProjectionParams::lump_sum(dec!(2), dec!(1), 1)),
        ];
        assert!(matches!(compare(&dup, 5), Err(WealthCalcError::InvalidInput { .. })));
    }

    #[test]
    fn test_report_shares_and_horizon_warnings() {
        let input = ComparisonInput {
            strategies: default_strategies(dec!(100000), dec!(10000)),
            horizon_years: 10,
        };
        let out = run_comparison(&input).unwrap();
        assert_eq!(out.warnings.len(), 4);
        let total: Decimal = out
            .result
            .rows
            .iter()
            .filter_map(|r| r.share_of_total_pct)
            .sum();
        assert!((total - dec!(100)).abs() < dec!(0.000001));
        assert_eq!(out.result.rows[0].invested, dec!(1200000));
    }
}
