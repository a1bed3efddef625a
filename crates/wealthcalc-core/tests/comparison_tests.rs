use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use wealthcalc_core::comparison::{
    compare, default_strategies, run_comparison, Calculator, ComparisonInput, NamedStrategy,
};
use wealthcalc_core::projection::{lump_sum, sip};
use wealthcalc_core::{ProjectionParams, WealthCalcError};

#[test]
fn test_rows_match_individual_projections() {
    let strategies = default_strategies(dec!(100000), dec!(10000));
    let out = compare(&strategies, 10).unwrap();

    let sip_last = sip::sip_series(&strategies[0].params.with_horizon(10))
        .unwrap()
        .pop()
        .unwrap();
    let fd_last = lump_sum::lump_sum_series(&strategies[3].params.with_horizon(10))
        .unwrap()
        .pop()
        .unwrap();

    assert_eq!(out.rows[0].final_point, sip_last);
    assert_eq!(out.rows[3].final_point, fd_last);
    assert_eq!(out.rows[3].calculator, Calculator::LumpSum);
}

#[test]
fn test_best_performer_is_greatest_final_value() {
    let strategies = vec![
        NamedStrategy::new("Conservative", Calculator::LumpSum, ProjectionParams::lump_sum(dec!(10000), dec!(6), 5)),
        NamedStrategy::new("Aggressive", Calculator::LumpSum, ProjectionParams::lump_sum(dec!(10000), dec!(14), 5)),
        NamedStrategy::new("Balanced", Calculator::LumpSum, ProjectionParams::lump_sum(dec!(10000), dec!(10), 5)),
    ];
    let out = compare(&strategies, 5).unwrap();
    assert_eq!(out.best_performer, "Aggressive");
    let max = out.rows.iter().map(|r| r.final_point.value).max().unwrap();
    let best = out.rows.iter().find(|r| r.strategy == out.best_performer).unwrap();
    assert_eq!(best.final_point.value, max);
}

#[test]
fn test_strategy_error_fails_the_comparison() {
    let strategies = vec![
        NamedStrategy::new("Good", Calculator::LumpSum, ProjectionParams::lump_sum(dec!(1000), dec!(6), 5)),
        NamedStrategy::new("No contribution", Calculator::Sip, ProjectionParams::lump_sum(dec!(1000), dec!(6), 5)),
    ];
    assert!(matches!(
        compare(&strategies, 5),
        Err(WealthCalcError::InvalidInput { .. })
    ));
}

#[test]
fn test_report_round_trips_through_json() {
    let input = ComparisonInput {
        strategies: default_strategies(dec!(50000), dec!(5000)),
        horizon_years: 1,
    };
    let json = serde_json::to_string(&input).unwrap();
    let parsed: ComparisonInput = serde_json::from_str(&json).unwrap();
    let out = run_comparison(&parsed).unwrap();
    assert_eq!(out.result.rows.len(), 4);
    assert!(out.warnings.is_empty());
    assert_eq!(out.result.horizon_years, 1);
}
