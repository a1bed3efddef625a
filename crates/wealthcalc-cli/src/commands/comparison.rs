use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use wealthcalc_core::comparison::{default_strategies, run_comparison, ComparisonInput, NamedStrategy};

use crate::input;

/// Arguments for a strategy comparison
#[derive(Args)]
pub struct CompareArgs {
    /// Path to JSON/YAML file with named strategies (overrides the presets)
    #[arg(long)]
    pub input: Option<String>,

    /// One-off amount for the lump-sum presets
    #[arg(long, default_value = "100000")]
    pub investment: Decimal,

    /// Monthly amount for the SIP preset
    #[arg(long, default_value = "10000")]
    pub monthly_investment: Decimal,

    /// Shared horizon in years
    #[arg(long, default_value = "10")]
    pub years: u32,
}

pub fn run_compare(args: CompareArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let cmp_input: ComparisonInput = match input::resolve(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => ComparisonInput {
            strategies: default_strategies(args.investment, args.monthly_investment)
                .into_iter()
                .map(|s| NamedStrategy {
                    params: s.params.with_horizon(args.years),
                    ..s
                })
                .collect(),
            horizon_years: args.years,
        },
    };
    let result = run_comparison(&cmp_input)?;
    Ok(serde_json::to_value(result)?)
}
