//! Discounting engine properties: duration convergence, sign and
//! monotonicity, yield recovery.

use approx::assert_relative_eq;
use pricer_core::market_data::curves::{AffineSegment, RateCurve, YieldCurve};
use pricer_core::market_data::CompoundingConvention;
use pricer_core::math::solvers::SolverConfig;
use pricer_models::instruments::CashFlowSchedule;
use pricer_models::schedules::Frequency;
use pricer_pricing::discounting::DiscountingEngine;
use proptest::prelude::*;

fn engine(convention: CompoundingConvention) -> DiscountingEngine {
    DiscountingEngine::new(convention).unwrap()
}

// ============================================================================
// Duration Convergence
// ============================================================================

#[test]
fn test_effective_duration_converges_to_modified() {
    let cases = [
        (CompoundingConvention::Annual, Frequency::Annual),
        (CompoundingConvention::periodic(2).unwrap(), Frequency::SemiAnnual),
        (CompoundingConvention::periodic(4).unwrap(), Frequency::Quarterly),
    ];

    for (convention, frequency) in cases {
        let bond = CashFlowSchedule::fixed_coupon_bond(1000.0, 0.06, 10.0, frequency).unwrap();
        let y = 0.055;
        let curve = RateCurve::flat(y).unwrap();
        let engine = engine(convention);

        let target = engine.modified_duration(&bond, y).unwrap();
        let mut previous_error = f64::INFINITY;
        for bump in [1e-2, 1e-3, 1e-4] {
            let effective = engine.effective_duration(&bond, &curve, bump).unwrap();
            let error = (effective - target).abs();
            assert!(
                error < previous_error,
                "{}: bump={} error={} previous={}",
                convention,
                bump,
                error,
                previous_error
            );
            previous_error = error;
        }
        assert!(previous_error < 1e-5, "{}: final error {}", convention, previous_error);
    }
}

#[test]
fn test_continuous_effective_duration_converges_to_macaulay() {
    let engine = engine(CompoundingConvention::Continuous);
    let bond =
        CashFlowSchedule::fixed_coupon_bond(100.0, 0.04, 5.0, Frequency::SemiAnnual).unwrap();
    let curve = RateCurve::flat(0.03).unwrap();
    let mac = engine.macaulay_duration(&bond, &curve).unwrap();
    let effective = engine.effective_duration(&bond, &curve, 1e-5).unwrap();
    assert_relative_eq!(effective, mac, epsilon = 1e-8);
}

#[test]
fn test_single_flow_under_flat_annual_curve() {
    let engine = engine(CompoundingConvention::Annual);
    for (t, amount, r) in [(1.0, 100.0, 0.05), (3.5, 250.0, 0.02), (10.0, 1.0, 0.08)] {
        let schedule = CashFlowSchedule::new(vec![(t, amount)]).unwrap();
        let curve = RateCurve::flat(r).unwrap();
        let pv = engine.present_value(&schedule, &curve).unwrap();
        let expected = amount / (1.0_f64 + r).powf(t);
        assert!((pv - expected).abs() < 1e-9, "t={} pv={} expected={}", t, pv, expected);
    }
}

#[test]
fn test_duration_on_coursework_curve() {
    // 0.04 + 0.000704·(t − 0.5), frozen after 7 years
    let curve = RateCurve::from_segments(
        vec![AffineSegment::anchored(0.0, 0.5, 0.04, 0.000704)],
        7.0,
    )
    .unwrap();
    let bond =
        CashFlowSchedule::fixed_coupon_bond(1000.0, 0.04375, 10.0, Frequency::SemiAnnual).unwrap();
    let engine = engine(CompoundingConvention::periodic(2).unwrap());

    let pv = engine.present_value(&bond, &curve).unwrap();
    let d1 = engine.effective_duration(&bond, &curve, 1e-3).unwrap();
    let d2 = engine.effective_duration(&bond, &curve, 1e-4).unwrap();
    assert!(pv > 0.0);
    assert!(d1 > 0.0 && d2 > 0.0);
    assert!((d1 - d2).abs() < 1e-3);

    let convexity = engine.effective_convexity(&bond, &curve, 1e-3).unwrap();
    assert!(convexity > 0.0);
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn pv_decreases_as_curve_shifts_up(
        coupon in 0.0f64..0.12,
        years in 1u32..30,
        y in -0.01f64..0.12,
        shift in 1e-4f64..0.02,
    ) {
        let bond = CashFlowSchedule::fixed_coupon_bond(
            100.0, coupon, f64::from(years), Frequency::SemiAnnual,
        ).unwrap();
        let engine = engine(CompoundingConvention::periodic(2).unwrap());
        let curve = RateCurve::flat(y).unwrap();
        let base = engine.present_value(&bond, &curve).unwrap();
        let bumped = engine.present_value(&bond, &curve.parallel_shift(shift)).unwrap();
        prop_assert!(bumped < base);
    }

    #[test]
    fn duration_positive_and_bounded_by_maturity(
        coupon in 0.0f64..0.12,
        years in 1u32..30,
        y in 0.0f64..0.12,
    ) {
        let maturity = f64::from(years);
        let bond = CashFlowSchedule::fixed_coupon_bond(
            100.0, coupon, maturity, Frequency::Annual,
        ).unwrap();
        let engine = engine(CompoundingConvention::Annual);
        let curve = RateCurve::flat(y).unwrap();
        let mac = engine.macaulay_duration(&bond, &curve).unwrap();
        let effective = engine.effective_duration(&bond, &curve, 1e-4).unwrap();
        let convexity = engine.effective_convexity(&bond, &curve, 1e-3).unwrap();
        prop_assert!(mac > 0.0 && mac <= maturity + 1e-12);
        prop_assert!(effective > 0.0);
        prop_assert!(convexity > 0.0);
    }

    #[test]
    fn yield_solver_recovers_flat_yield(
        coupon in 0.0f64..0.1,
        years in 1u32..20,
        y in -0.02f64..0.15,
    ) {
        let bond = CashFlowSchedule::fixed_coupon_bond(
            100.0, coupon, f64::from(years), Frequency::Quarterly,
        ).unwrap();
        let engine = engine(CompoundingConvention::periodic(4).unwrap());
        let price = engine.present_value(&bond, &RateCurve::flat(y).unwrap()).unwrap();
        let solved = engine
            .yield_from_price(&bond, price, (-0.5, 1.0), SolverConfig::high_precision())
            .unwrap();
        prop_assert!((solved.root - y).abs() < 1e-9);
    }
}
