use clap::Args;
use serde::Deserialize;
use serde_json::Value;

use wealthcalc_core::advisor::Advisor;

use crate::input;

/// Arguments for the canned advisor
#[derive(Args)]
pub struct AdviseArgs {
    /// Path to JSON/YAML file with a `query` field
    #[arg(long)]
    pub input: Option<String>,

    /// The question, e.g. "how should I plan for retirement"
    pub query: Vec<String>,
}

#[derive(Deserialize)]
struct AdviseInput {
    query: String,
}

pub fn run_advise(args: AdviseArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let query = if !args.query.is_empty() {
        args.query.join(" ")
    } else {
        match input::resolve::<AdviseInput>(args.input.as_deref())? {
            Some(parsed) => parsed.query,
            None => return Err("a question (or --input with a `query` field) is required".into()),
        }
    };
    let advice = Advisor::default().advise(&query);
    Ok(serde_json::json!({ "result": advice }))
}
