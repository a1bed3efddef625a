pub mod brokerage;

pub use brokerage::{apply_costs, brokerage, CostBreakdown, CostInput};
