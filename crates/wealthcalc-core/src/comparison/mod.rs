pub mod aggregator;

pub use aggregator::{
    compare, default_strategies, run_comparison, Calculator, ComparisonInput, ComparisonOutput,
    ComparisonReport, ComparisonRow, ComparisonSummaryRow, NamedStrategy,
};
