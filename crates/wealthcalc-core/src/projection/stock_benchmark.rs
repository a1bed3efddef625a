use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::projection::lump_sum::lump_sum_series;
use crate::projection::{cagr_or_warn, final_point};
use crate::types::*;
use crate::WealthCalcResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockBenchmarkInput {
    pub stock: ProjectionParams,
    pub benchmark: ProjectionParams,
    /// Shared horizon; overrides the horizon on either leg.
    pub horizon_years: u32,
}

impl StockBenchmarkInput {
    /// Both legs funded with the same one-off amount.
    pub fn same_principal(
        principal: Money,
        stock_rate_pct: Percent,
        benchmark_rate_pct: Percent,
        horizon_years: u32,
    ) -> Self {
        Self {
            stock: ProjectionParams::lump_sum(principal, stock_rate_pct, horizon_years),
            benchmark: ProjectionParams::lump_sum(principal, benchmark_rate_pct, horizon_years),
            horizon_years,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkYear {
    pub year: u32,
    pub stock: SeriesPoint,
    pub benchmark: SeriesPoint,
    /// stock value − benchmark value
    pub gap: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockBenchmarkOutput {
    pub years: Vec<BenchmarkYear>,
    pub stock_final_value: Money,
    pub benchmark_final_value: Money,
    pub stock_total_return: Money,
    pub benchmark_total_return: Money,
    pub outperformance: Money,
    pub outperformed: bool,
    pub stock_cagr_pct: Option<Percent>,
    pub benchmark_cagr_pct: Option<Percent>,
    /// Stock rate minus benchmark rate, in percentage points.
    pub alpha_pct: Percent,
}

// ---------------------------------------------------------------------------
// Series
// ---------------------------------------------------------------------------

/// Two independent lump-sum legs over one horizon, zipped per year.
pub fn stock_vs_benchmark_series(
    stock: &ProjectionParams,
    benchmark: &ProjectionParams,
    horizon_years: u32,
) -> WealthCalcResult<Vec<(SeriesPoint, SeriesPoint)>> {
    let stock_leg = lump_sum_series(&stock.with_horizon(horizon_years))?;
    let benchmark_leg = lump_sum_series(&benchmark.with_horizon(horizon_years))?;
    Ok(stock_leg.into_iter().zip(benchmark_leg).collect())
}

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

pub fn project_stock_vs_benchmark(
    input: &StockBenchmarkInput,
) -> WealthCalcResult<ComputationOutput<StockBenchmarkOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.stock.principal != input.benchmark.principal {
        warnings.push(format!(
            "Legs start from different principals ({} vs {}); value gaps mix rate and size effects",
            input.stock.principal, input.benchmark.principal
        ));
    }

    let pairs = stock_vs_benchmark_series(&input.stock, &input.benchmark, input.horizon_years)?;
    let (stock_last, benchmark_last) = final_point(&pairs, "Stock vs benchmark")?.clone();

    let stock_cagr_pct = cagr_or_warn(
        stock_last.value,
        input.stock.principal,
        input.horizon_years,
        "Stock",
        &mut warnings,
    );
    let benchmark_cagr_pct = cagr_or_warn(
        benchmark_last.value,
        input.benchmark.principal,
        input.horizon_years,
        "Benchmark",
        &mut warnings,
    );

    let outperformance = stock_last.value - benchmark_last.value;
    let years = pairs
        .into_iter()
        .map(|(stock, benchmark)| BenchmarkYear {
            year: stock.index,
            gap: stock.value - benchmark.value,
            stock,
            benchmark,
        })
        .collect();

    let output = StockBenchmarkOutput {
        years,
        stock_final_value: stock_last.value,
        benchmark_final_value: benchmark_last.value,
        stock_total_return: stock_last.return_to_date,
        benchmark_total_return: benchmark_last.return_to_date,
        outperformance,
        outperformed: outperformance > Decimal::ZERO,
        stock_cagr_pct,
        benchmark_cagr_pct,
        alpha_pct: input.stock.annual_rate_pct - input.benchmark.annual_rate_pct,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Stock vs Benchmark (paired compound growth with alpha)",
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
    use rust_decimal_macros::dec;

    #[test]
    fn test_stock_beats_benchmark() {
        let input = StockBenchmarkInput::same_principal(dec!(100000), dec!(15), dec!(12), 10);
        let out = project_stock_vs_benchmark(&input).unwrap().result;
        assert_eq!(out.alpha_pct, dec!(3));
        assert!(out.stock_final_value > out.benchmark_final_value);
        assert!(out.outperformed);
        assert_eq!(out.years.len(), 10);
        // 1.15^10 ≈ 4.045558
        assert!((out.stock_final_value - dec!(404555.77)).abs() < dec!(0.01));
    }

    #[test]
    fn test_horizon_overrides_leg_horizons() {
        let stock = ProjectionParams::lump_sum(dec!(1000), dec!(10), 30);
        let benchmark = ProjectionParams::lump_sum(dec!(1000), dec!(8), 2);
        let pairs = stock_vs_benchmark_series(&stock, &benchmark, 5).unwrap();
        assert_eq!(pairs.len(), 5);
        assert!(pairs.iter().all(|(s, b)| s.index == b.index));
    }

    #[test]
    fn test_gap_is_per_year_difference() {
        let input = StockBenchmarkInput::same_principal(dec!(1000), dec!(10), dec!(5), 1);
        let out = project_stock_vs_benchmark(&input).unwrap().result;
        assert_eq!(out.years[0].gap, dec!(50));
    }

    #[test]
    fn test_mismatched_principals_warn() {
        let mut input = StockBenchmarkInput::same_principal(dec!(1000), dec!(10), dec!(5), 3);
        input.benchmark.principal = dec!(2000);
        let out = project_stock_vs_benchmark(&input).unwrap();
        assert_eq!(out.warnings.len(), 1);
    }
}
