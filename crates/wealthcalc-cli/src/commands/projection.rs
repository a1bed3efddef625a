use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use wealthcalc_core::costs::{apply_costs, CostInput};
use wealthcalc_core::projection::fixed_income::{self, FixedIncomeInput};
use wealthcalc_core::projection::lump_sum;
use wealthcalc_core::projection::sip;
use wealthcalc_core::projection::stock_benchmark::{self, StockBenchmarkInput};
use wealthcalc_core::ProjectionParams;

use crate::input;

/// Arguments for a systematic investment plan
#[derive(Args)]
pub struct SipArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount invested each period
    #[arg(long, default_value = "10000")]
    pub monthly_investment: Decimal,

    /// Expected annual return in percent
    #[arg(long, default_value = "12", allow_hyphen_values = true)]
    pub annual_return: Decimal,

    /// Investment horizon in years
    #[arg(long, default_value = "15")]
    pub years: u32,

    /// Contributions per year (12 = monthly)
    #[arg(long, default_value = "12")]
    pub periods_per_year: u32,
}

/// Arguments for a single upfront investment
#[derive(Args)]
pub struct LumpSumArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount invested upfront
    #[arg(long, default_value = "100000")]
    pub principal: Decimal,

    /// Expected annual return in percent
    #[arg(long, default_value = "12", allow_hyphen_values = true)]
    pub annual_return: Decimal,

    /// Investment horizon in years
    #[arg(long, default_value = "10")]
    pub years: u32,

    /// Compounding periods per year
    #[arg(long, default_value = "1")]
    pub periods_per_year: u32,

    /// Brokerage as a fraction of trade value, charged on entry and exit
    #[arg(long)]
    pub brokerage_rate: Option<Decimal>,
}

/// Arguments for a stock vs benchmark comparison
#[derive(Args)]
pub struct StockBenchmarkArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount invested in each leg
    #[arg(long, default_value = "100000")]
    pub principal: Decimal,

    /// Expected annual stock return in percent
    #[arg(long, default_value = "15", allow_hyphen_values = true)]
    pub stock_return: Decimal,

    /// Expected annual benchmark return in percent
    #[arg(long, default_value = "12", allow_hyphen_values = true)]
    pub benchmark_return: Decimal,

    /// Investment horizon in years
    #[arg(long, default_value = "10")]
    pub years: u32,
}

/// Arguments for a fixed deposit / bond / equity comparison
#[derive(Args)]
pub struct FixedIncomeArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount placed in each instrument
    #[arg(long, default_value = "500000")]
    pub principal: Decimal,

    /// Fixed deposit rate in percent
    #[arg(long, default_value = "6.5")]
    pub fd_rate: Decimal,

    /// Bond yield in percent
    #[arg(long, default_value = "7.2")]
    pub bond_rate: Decimal,

    /// Expected equity return in percent
    #[arg(long, default_value = "12", allow_hyphen_values = true)]
    pub equity_return: Decimal,

    /// Investment horizon in years
    #[arg(long, default_value = "10")]
    pub years: u32,
}

pub fn run_sip(args: SipArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params: ProjectionParams = match input::resolve(args.input.as_deref())? {
        Some(params) => params,
        None => ProjectionParams {
            periods_per_year: args.periods_per_year,
            ..ProjectionParams::monthly_sip(args.monthly_investment, args.annual_return, args.years)
        },
    };
    let result = sip::project_sip(&params)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_lump_sum(args: LumpSumArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params: ProjectionParams = match input::resolve(args.input.as_deref())? {
        Some(params) => params,
        None => ProjectionParams {
            periods_per_year: args.periods_per_year,
            ..ProjectionParams::lump_sum(args.principal, args.annual_return, args.years)
        },
    };
    let result = lump_sum::project_lump_sum(&params)?;
    let mut value = serde_json::to_value(&result)?;

    if let Some(rate) = args.brokerage_rate {
        let last = result
            .result
            .series
            .last()
            .ok_or("lump sum projection produced no points")?;
        let costs = apply_costs(&CostInput::cash(last, rate))?;
        if let Some(Value::Object(map)) = value.get_mut("result") {
            map.insert("costs".into(), serde_json::to_value(costs)?);
        }
    }
    Ok(value)
}

pub fn run_stock_vs_benchmark(args: StockBenchmarkArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let bench_input: StockBenchmarkInput = match input::resolve(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => StockBenchmarkInput::same_principal(
            args.principal,
            args.stock_return,
            args.benchmark_return,
            args.years,
        ),
    };
    let result = stock_benchmark::project_stock_vs_benchmark(&bench_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_fixed_income(args: FixedIncomeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let fi_input: FixedIncomeInput = match input::resolve(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => FixedIncomeInput::same_principal(
            args.principal,
            args.fd_rate,
            args.bond_rate,
            args.equity_return,
            args.years,
        ),
    };
    let result = fixed_income::project_fixed_income(&fi_input)?;
    Ok(serde_json::to_value(result)?)
}
