use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use wealthcalc_core::projection::margin::{self, MarginParams};

use crate::input;

/// Arguments for a margin trade
#[derive(Args)]
pub struct MarginArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Full position size, own capital plus borrowed
    #[arg(long, default_value = "100000")]
    pub principal: Decimal,

    /// Expected annual stock return in percent
    #[arg(long, default_value = "15", allow_hyphen_values = true)]
    pub annual_return: Decimal,

    /// Share of the position paid with own capital, 0 to 100
    #[arg(long, default_value = "50")]
    pub margin_pct: Decimal,

    /// Annual borrow rate in percent
    #[arg(long, default_value = "18")]
    pub borrow_rate: Decimal,

    /// Holding period in days
    #[arg(long, default_value = "30")]
    pub days: u32,

    /// Brokerage as a fraction of trade value (0.00175 = 17.5 paisa per ₹100)
    #[arg(long, default_value = "0.00175")]
    pub brokerage_rate: Decimal,
}

pub fn run_margin(args: MarginArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params: MarginParams = match input::resolve(args.input.as_deref())? {
        Some(params) => params,
        None => MarginParams {
            principal: args.principal,
            annual_rate_pct: args.annual_return,
            margin_pct: args.margin_pct,
            borrow_rate_pct: args.borrow_rate,
            horizon_days: args.days,
            brokerage_rate_per_unit: args.brokerage_rate,
        },
    };
    let result = margin::analyze_margin_trade(&params)?;
    Ok(serde_json::to_value(result)?)
}
