//! Integration tests for module exports.
//!
//! Verify that all public modules and types are correctly exported
//! and accessible via absolute paths.

/// Test that error types are accessible via absolute path.
#[test]
fn test_types_module_exports() {
    use pricer_core::types::error::{DomainError, PricingError, SolverError};
    use pricer_core::types::PricingError as ReExported;

    let err: PricingError = DomainError::ZeroPeriods.into();
    let _: ReExported = err;
    let _ = SolverError::NonFiniteValue { x: 0.0 };
}

/// Test that solvers are accessible via absolute path.
#[test]
fn test_solvers_module_exports() {
    use pricer_core::math::solvers::{solve, BisectionSolver, RootResult, SolverConfig};

    let solver: BisectionSolver<f64> = BisectionSolver::new(SolverConfig::default());
    let result: RootResult<f64> = solver.solve(|x| x - 0.5, 0.0, 1.0).unwrap();
    assert!((result.root - 0.5).abs() < 1e-10);

    let result = solve(|x: f64| x - 0.5, 0.0, 1.0, 1e-10, 100).unwrap();
    assert!((result.root - 0.5).abs() < 1e-10);
}

/// Test that market data types are accessible via absolute path.
#[test]
fn test_market_data_module_exports() {
    use pricer_core::market_data::compounding::CompoundingConvention;
    use pricer_core::market_data::curves::{AffineSegment, RateCurve, ShiftedCurve, YieldCurve};

    let curve = RateCurve::from_segments(vec![AffineSegment::new(0.0, 0.03, 0.0)], 0.0).unwrap();
    let view = ShiftedCurve::new(&curve, 0.01);
    let df = view
        .discount_factor(1.0, CompoundingConvention::Continuous)
        .unwrap();
    assert!((df - (-0.04_f64).exp()).abs() < 1e-15);
}

/// Test that a shifted view can be taken of a trait object.
#[test]
fn test_shifted_view_over_dyn_curve() {
    use pricer_core::market_data::{RateCurve, ShiftedCurve, YieldCurve};

    let curve = RateCurve::flat(0.02).unwrap();
    let dyn_curve: &dyn YieldCurve = &curve;
    let view = ShiftedCurve::new(dyn_curve, 0.005);
    assert!((view.rate(5.0).unwrap() - 0.025).abs() < 1e-15);
}
