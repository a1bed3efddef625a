use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Projections
// ---------------------------------------------------------------------------

#[napi]
pub fn project_sip(input_json: String) -> NapiResult<String> {
    let input: wealthcalc_core::ProjectionParams =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = wealthcalc_core::projection::sip::project_sip(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn project_lump_sum(input_json: String) -> NapiResult<String> {
    let input: wealthcalc_core::ProjectionParams =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        wealthcalc_core::projection::lump_sum::project_lump_sum(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn project_stock_vs_benchmark(input_json: String) -> NapiResult<String> {
    let input: wealthcalc_core::projection::stock_benchmark::StockBenchmarkInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = wealthcalc_core::projection::stock_benchmark::project_stock_vs_benchmark(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn project_fixed_income(input_json: String) -> NapiResult<String> {
    let input: wealthcalc_core::projection::fixed_income::FixedIncomeInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = wealthcalc_core::projection::fixed_income::project_fixed_income(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn analyze_margin_trade(input_json: String) -> NapiResult<String> {
    let input: wealthcalc_core::projection::margin::MarginParams =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = wealthcalc_core::projection::margin::analyze_margin_trade(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Costs
// ---------------------------------------------------------------------------

#[napi]
pub fn apply_costs(input_json: String) -> NapiResult<String> {
    let input: wealthcalc_core::costs::CostInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = wealthcalc_core::costs::apply_costs(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Comparison
// ---------------------------------------------------------------------------

#[napi]
pub fn run_comparison(input_json: String) -> NapiResult<String> {
    let input: wealthcalc_core::comparison::ComparisonInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = wealthcalc_core::comparison::run_comparison(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// The preset SIP / lump sum / stocks / FD comparison. Amounts are decimal strings.
#[napi]
pub fn compare_presets(investment: String, monthly_investment: String, years: u32) -> NapiResult<String> {
    let investment = Decimal::from_str(&investment).map_err(to_napi_error)?;
    let monthly = Decimal::from_str(&monthly_investment).map_err(to_napi_error)?;
    let input = wealthcalc_core::comparison::ComparisonInput {
        strategies: wealthcalc_core::comparison::default_strategies(investment, monthly)
            .into_iter()
            .map(|s| wealthcalc_core::comparison::NamedStrategy {
                params: s.params.with_horizon(years),
                ..s
            })
            .collect(),
        horizon_years: years,
    };
    let output = wealthcalc_core::comparison::run_comparison(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Advisor
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct AdviseInput {
    query: String,
}

#[napi]
pub fn advise(input_json: String) -> NapiResult<String> {
    let input: AdviseInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = wealthcalc_core::advisor::Advisor::default().advise(&input.query);
    serde_json::to_string(&output).map_err(to_napi_error)
}
