use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::WealthCalcError;
use crate::WealthCalcResult;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Annual rates as the user enters them: 12 means 12% a year.
pub type Percent = Decimal;

/// Fractional per-period rates (0.01 = 1% per period).
pub type Rate = Decimal;

/// Year fractions or counts
pub type Years = Decimal;

fn default_periods_per_year() -> u32 {
    1
}

/// Parameters shared by every year-based projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionParams {
    pub principal: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub periodic_contribution: Option<Money>,
    pub annual_rate_pct: Percent,
    pub horizon_years: u32,
    /// Compounding (lump sum) or contribution (SIP) frequency.
    #[serde(default = "default_periods_per_year")]
    pub periods_per_year: u32,
}

impl ProjectionParams {
    /// One-off investment compounding once a year.
    pub fn lump_sum(principal: Money, annual_rate_pct: Percent, horizon_years: u32) -> Self {
        Self {
            principal,
            periodic_contribution: None,
            annual_rate_pct,
            horizon_years,
            periods_per_year: 1,
        }
    }

    /// Monthly contribution plan with monthly compounding.
    pub fn monthly_sip(contribution: Money, annual_rate_pct: Percent, horizon_years: u32) -> Self {
        Self {
            principal: Decimal::ZERO,
            periodic_contribution: Some(contribution),
            annual_rate_pct,
            horizon_years,
            periods_per_year: 12,
        }
    }

    /// Same parameters over a different horizon.
    pub fn with_horizon(&self, horizon_years: u32) -> Self {
        Self {
            horizon_years,
            ..self.clone()
        }
    }

    /// Checks the invariants every calculator relies on.
    pub fn validate(&self) -> WealthCalcResult<()> {
        if self.horizon_years == 0 {
            return Err(WealthCalcError::invalid(
                "horizon_years",
                "Horizon must be at least one year",
            ));
        }
        if self.principal < Decimal::ZERO {
            return Err(WealthCalcError::invalid(
                "principal",
                "Principal cannot be negative",
            ));
        }
        if let Some(c) = self.periodic_contribution {
            if c < Decimal::ZERO {
                return Err(WealthCalcError::invalid(
                    "periodic_contribution",
                    "Contribution cannot be negative",
                ));
            }
        }
        if self.periods_per_year == 0 {
            return Err(WealthCalcError::invalid(
                "periods_per_year",
                "Periods per year must be at least 1",
            ));
        }
        let per_period = self.annual_rate_pct / Decimal::from(self.periods_per_year);
        if per_period <= -Decimal::ONE_HUNDRED {
            return Err(WealthCalcError::invalid(
                "annual_rate_pct",
                "Rate per period must be greater than -100%",
            ));
        }
        Ok(())
    }
}

/// One period of a projected series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// Year (or day) number, starting at 1.
    pub index: u32,
    pub value: Money,
    pub invested_to_date: Money,
    pub return_to_date: Money,
}

impl SeriesPoint {
    pub fn new(index: u32, value: Money, invested_to_date: Money) -> Self {
        Self {
            index,
            value,
            invested_to_date,
            return_to_date: value - invested_to_date,
        }
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    for w in &warnings {
        log::warn!("{methodology}: {w}");
    }
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_series_point_return_is_value_minus_invested() {
        let p = SeriesPoint::new(3, dec!(1500), dec!(1200));
        assert_eq!(p.return_to_date, dec!(300));
    }

    #[test]
    fn test_validate_rejects_zero_horizon() {
        let params = ProjectionParams::lump_sum(dec!(1000), dec!(8), 0);
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_validate_allows_negative_rate() {
        let params = ProjectionParams::lump_sum(dec!(1000), dec!(-5), 3);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_total_loss_per_period() {
        let params = ProjectionParams::lump_sum(dec!(1000), dec!(-100), 3);
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_periods_per_year_defaults_to_annual() {
        let params: ProjectionParams = serde_json::from_str(
            r#"{"principal": "1000", "annual_rate_pct": "7", "horizon_years": 5}"#,
        )
        .unwrap();
        assert_eq!(params.periods_per_year, 1);
        assert!(params.periodic_contribution.is_none());
    }
}
