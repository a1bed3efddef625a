use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::WealthCalcError;
use crate::rate_math;
use crate::types::*;
use crate::WealthCalcResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Everything needed to turn a gross final value into a net one.
///
/// The model never infers whether a trade was leveraged: the caller picks the
/// gross value and the baseline that fit its mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostInput {
    pub gross_final_value: Money,
    /// Borrowing cost already netted out of `gross_final_value`; reported only.
    #[serde(default)]
    pub interest_accrued: Money,
    pub buy_base_amount: Money,
    pub sell_base_amount: Money,
    /// Fraction of trade value, e.g. 0.00175.
    pub brokerage_rate: Rate,
    /// Capital the investor put in; `net_return` is measured against it.
    pub base_invested: Money,
}

impl CostInput {
    /// Unleveraged trade: bought for what was invested, sold at the final value.
    pub fn cash(final_point: &SeriesPoint, brokerage_rate: Rate) -> Self {
        Self {
            gross_final_value: final_point.value,
            interest_accrued: Decimal::ZERO,
            buy_base_amount: final_point.invested_to_date,
            sell_base_amount: final_point.value,
            brokerage_rate,
            base_invested: final_point.invested_to_date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub gross_final_value: Money,
    pub interest_accrued: Money,
    pub brokerage_buy: Money,
    pub brokerage_sell: Money,
    pub net_final_value: Money,
    pub net_return: Money,
}

// ---------------------------------------------------------------------------
// Functions
// ---------------------------------------------------------------------------

/// Fee on one side of a trade: `amount × rate_per_unit`.
pub fn brokerage(amount: Money, rate_per_unit: Rate) -> WealthCalcResult<Money> {
    if amount < Decimal::ZERO {
        return Err(WealthCalcError::InvalidInput {
            field: "amount".into(),
            reason: "Trade value cannot be negative".into(),
        });
    }
    if rate_per_unit < Decimal::ZERO {
        return Err(WealthCalcError::InvalidInput {
            field: "brokerage_rate".into(),
            reason: "Brokerage rate cannot be negative".into(),
        });
    }
    rate_math::checked_product(amount, rate_per_unit, "brokerage")
}

/// Deducts buy and sell brokerage from the gross final value.
pub fn apply_costs(input: &CostInput) -> WealthCalcResult<CostBreakdown> {
    let brokerage_buy = brokerage(input.buy_base_amount, input.brokerage_rate)?;
    let brokerage_sell = brokerage(input.sell_base_amount, input.brokerage_rate)?;
    let net_final_value = rate_math::checked_difference(
        rate_math::checked_difference(input.gross_final_value, brokerage_buy, "net final value")?,
        brokerage_sell,
        "net final value",
    )?;
    let net_return = rate_math::checked_difference(net_final_value, input.base_invested, "net return")?;

    Ok(CostBreakdown {
        gross_final_value: input.gross_final_value,
        interest_accrued: input.interest_accrued,
        brokerage_buy,
        brokerage_sell,
        net_final_value,
        net_return,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
