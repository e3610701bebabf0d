//! Present value and rate sensitivities of cash-flow schedules.

use pricer_core::market_data::curves::{RateCurve, ShiftedCurve, YieldCurve};
use pricer_core::market_data::CompoundingConvention;
use pricer_core::math::solvers::{BisectionSolver, RootResult, SolverConfig};
use pricer_core::types::{DomainError, PricingError};
use pricer_models::instruments::CashFlowSchedule;
use tracing::{debug, trace};

/// Discounts cash-flow schedules off a [`YieldCurve`] under one
/// compounding convention.
///
/// Every sensitivity is computed by repricing: effective duration and
/// convexity use a symmetric parallel shift of the curve whose size is
/// always supplied by the caller.
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::curves::RateCurve;
/// use pricer_core::market_data::CompoundingConvention;
/// use pricer_models::instruments::CashFlowSchedule;
/// use pricer_pricing::discounting::DiscountingEngine;
///
/// let engine = DiscountingEngine::new(CompoundingConvention::Annual).unwrap();
/// let curve = RateCurve::flat(0.05).unwrap();
/// let schedule = CashFlowSchedule::new(vec![(2.0, 100.0)]).unwrap();
///
/// let pv = engine.present_value(&schedule, &curve).unwrap();
/// assert!((pv - 100.0 / 1.05_f64.powi(2)).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscountingEngine {
    convention: CompoundingConvention,
}

impl DiscountingEngine {
    /// Creates an engine discounting under `convention`.
    ///
    /// # Errors
    ///
    /// `DomainError::ZeroPeriods` for a periodic convention with `m = 0`.
    pub fn new(convention: CompoundingConvention) -> Result<Self, DomainError> {
        convention.validate()?;
        Ok(Self { convention })
    }

    /// The compounding convention used for every discount factor.
    #[inline]
    pub fn convention(&self) -> CompoundingConvention {
        self.convention
    }

    /// Sum of `amount · DF(t)` over the schedule, in schedule order.
    ///
    /// # Errors
    ///
    /// `DomainError` if the curve rejects a time or a compound factor is not
    /// positive and finite.
    pub fn present_value<C: YieldCurve + ?Sized>(
        &self,
        schedule: &CashFlowSchedule,
        curve: &C,
    ) -> Result<f64, DomainError> {
        let mut pv = 0.0;
        for flow in schedule {
            let df = curve.discount_factor(flow.time, self.convention)?;
            trace!(t = flow.time, amount = flow.amount, df, "discounted flow");
            pv += flow.amount * df;
        }
        Ok(pv)
    }

    /// Percentage price change per unit parallel shift, by central difference.
    ///
    /// # Mathematical Definition
    ///
    /// ```text
    /// D_eff = (PV(−b) − PV(+b)) / (2 · PV(0) · b)
    /// ```
    ///
    /// # Errors
    ///
    /// - `DomainError::NonPositiveBump` if `bump` is not positive and finite
    /// - `DomainError::NonPositiveBasePrice` if `PV(0) <= 0`
    pub fn effective_duration<C: YieldCurve + ?Sized>(
        &self,
        schedule: &CashFlowSchedule,
        curve: &C,
        bump: f64,
    ) -> Result<f64, DomainError> {
        let (pv_down, pv, pv_up) = self.bumped_values(schedule, curve, bump)?;
        let duration = (pv_down - pv_up) / (2.0 * pv * bump);
        debug!(bump, pv, duration, "effective duration");
        Ok(duration)
    }

    /// Second-order price sensitivity to a parallel shift, by central difference.
    ///
    /// # Mathematical Definition
    ///
    /// ```text
    /// C_eff = (PV(−b) + PV(+b) − 2 · PV(0)) / (PV(0) · b²)
    /// ```
    ///
    /// # Errors
    ///
    /// Same as [`effective_duration`](Self::effective_duration).
    pub fn effective_convexity<C: YieldCurve + ?Sized>(
        &self,
        schedule: &CashFlowSchedule,
        curve: &C,
        bump: f64,
    ) -> Result<f64, DomainError> {
        let (pv_down, pv, pv_up) = self.bumped_values(schedule, curve, bump)?;
        let convexity = (pv_down + pv_up - 2.0 * pv) / (pv * bump * bump);
        debug!(bump, pv, convexity, "effective convexity");
        Ok(convexity)
    }

    /// Present-value-weighted average time of the flows, `Σ t·PV_t / PV`.
    ///
    /// # Errors
    ///
    /// `DomainError::NonPositiveBasePrice` if `PV <= 0`, plus the errors of
    /// [`present_value`](Self::present_value).
    pub fn macaulay_duration<C: YieldCurve + ?Sized>(
        &self,
        schedule: &CashFlowSchedule,
        curve: &C,
    ) -> Result<f64, DomainError> {
        let mut pv = 0.0;
        let mut weighted = 0.0;
        for flow in schedule {
            let flow_pv = flow.amount * curve.discount_factor(flow.time, self.convention)?;
            pv += flow_pv;
            weighted += flow.time * flow_pv;
        }
        ensure_positive_price(pv)?;
        Ok(weighted / pv)
    }

    /// Macaulay duration under a flat yield divided by `1 + y/m`.
    ///
    /// `m` is 1 for annual compounding; under continuous compounding the
    /// modified and Macaulay durations coincide.
    pub fn modified_duration(
        &self,
        schedule: &CashFlowSchedule,
        flat_yield: f64,
    ) -> Result<f64, DomainError> {
        let curve = RateCurve::flat(flat_yield)?;
        let macaulay = self.macaulay_duration(schedule, &curve)?;
        Ok(match self.convention.periods_per_year() {
            Some(m) => macaulay / (1.0 + flat_yield / f64::from(m)),
            None => macaulay,
        })
    }

    /// Flat yield at which the schedule is worth `target_price`.
    ///
    /// Bisects `PV(y) − target_price` over `bracket` with the shared
    /// [`BisectionSolver`]. Yields at which the compound factor is invalid
    /// make the objective non-finite and abort the search.
    ///
    /// # Errors
    ///
    /// - `PricingError::Domain` for a non-finite target price
    /// - `PricingError::Solver(SolverError::NoBracket)` if the target price
    ///   is not attained within the bracket
    /// - `PricingError::Solver(SolverError::NotConverged)` when the budget
    ///   runs out
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_core::market_data::CompoundingConvention;
    /// use pricer_core::math::solvers::SolverConfig;
    /// use pricer_models::instruments::CashFlowSchedule;
    /// use pricer_pricing::discounting::DiscountingEngine;
    ///
    /// let engine = DiscountingEngine::new(CompoundingConvention::Annual).unwrap();
    /// let zero = CashFlowSchedule::new(vec![(1.0, 100.0)]).unwrap();
    /// let result = engine
    ///     .yield_from_price(&zero, 95.0, (0.0, 0.5), SolverConfig::high_precision())
    ///     .unwrap();
    /// assert!((result.root - (100.0 / 95.0 - 1.0)).abs() < 1e-12);
    /// ```
    pub fn yield_from_price(
        &self,
        schedule: &CashFlowSchedule,
        target_price: f64,
        bracket: (f64, f64),
        config: SolverConfig<f64>,
    ) -> Result<RootResult<f64>, PricingError> {
        if !target_price.is_finite() {
            return Err(DomainError::invalid("target_price", target_price).into());
        }
        let objective = |y: f64| {
            RateCurve::flat(y)
                .and_then(|curve| self.present_value(schedule, &curve))
                .map(|pv| pv - target_price)
                .unwrap_or(f64::NAN)
        };
        let result = BisectionSolver::new(config).solve(objective, bracket.0, bracket.1)?;
        debug!(
            target_price,
            flat_yield = result.root,
            iterations = result.iterations,
            "yield solved"
        );
        Ok(result)
    }

    /// `(PV(−b), PV(0), PV(+b))` after checking the bump and base price.
    fn bumped_values<C: YieldCurve + ?Sized>(
        &self,
        schedule: &CashFlowSchedule,
        curve: &C,
        bump: f64,
    ) -> Result<(f64, f64, f64), DomainError> {
        if !(bump.is_finite() && bump > 0.0) {
            return Err(DomainError::NonPositiveBump { bump });
        }
        let pv = self.present_value(schedule, curve)?;
        ensure_positive_price(pv)?;
        let pv_down = self.present_value(schedule, &ShiftedCurve::new(curve, -bump))?;
        let pv_up = self.present_value(schedule, &ShiftedCurve::new(curve, bump))?;
        Ok((pv_down, pv, pv_up))
    }
}

fn ensure_positive_price(pv: f64) -> Result<(), DomainError> {
    if pv.is_finite() && pv > 0.0 {
        Ok(())
    } else {
        Err(DomainError::NonPositiveBasePrice { price: pv })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_core::market_data::curves::AffineSegment;
    use pricer_models::schedules::Frequency;

    fn annual() -> DiscountingEngine {
        DiscountingEngine::new(CompoundingConvention::Annual).unwrap()
    }

    fn semi_annual() -> DiscountingEngine {
        DiscountingEngine::new(CompoundingConvention::periodic(2).unwrap()).unwrap()
    }

    fn bond() -> CashFlowSchedule {
        CashFlowSchedule::fixed_coupon_bond(1000.0, 0.04375, 10.0, Frequency::SemiAnnual).unwrap()
    }

    #[test]
    fn test_single_flow() {
        let schedule = CashFlowSchedule::new(vec![(2.0, 100.0)]).unwrap();
        let pv = annual()
            .present_value(&schedule, &RateCurve::flat(0.05).unwrap())
            .unwrap();
        assert_relative_eq!(pv, 90.702_947_845_804_99, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_yield_pv_is_sum() {
        let schedule = bond();
        let zero = RateCurve::flat(0.0).unwrap();
        for engine in [
            annual(),
            semi_annual(),
            DiscountingEngine::new(CompoundingConvention::Continuous).unwrap(),
        ] {
            let pv = engine.present_value(&schedule, &zero).unwrap();
            assert_relative_eq!(pv, schedule.total_amount(), epsilon = 1e-9);
        }
    }

    #[test]
    fn test_flow_at_time_zero_is_undiscounted() {
        let schedule = CashFlowSchedule::new(vec![(0.0, 50.0), (1.0, 100.0)]).unwrap();
        let pv = annual()
            .present_value(&schedule, &RateCurve::flat(0.1).unwrap())
            .unwrap();
        assert_relative_eq!(pv, 50.0 + 100.0 / 1.1, epsilon = 1e-12);
    }

    #[test]
    fn test_bond_price_semi_annual() {
        let pv = semi_annual()
            .present_value(&bond(), &RateCurve::flat(0.04).unwrap())
            .unwrap();
        assert_relative_eq!(pv, 1_030.658_937_521_119, epsilon = 1e-8);
    }

    #[test]
    fn test_invalid_compounding_propagates() {
        // periodic rate below -m
        let err = semi_annual()
            .present_value(&bond(), &RateCurve::flat(-2.5).unwrap())
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidCompounding { .. }));
    }

    #[test]
    fn test_macaulay_and_modified() {
        let engine = semi_annual();
        let curve = RateCurve::flat(0.04).unwrap();
        let mac = engine.macaulay_duration(&bond(), &curve).unwrap();
        assert_relative_eq!(mac, 8.237_568_199_005_018, epsilon = 1e-9);

        let modified = engine.modified_duration(&bond(), 0.04).unwrap();
        assert_relative_eq!(modified, 8.076_047_253_926_488, epsilon = 1e-9);
    }

    #[test]
    fn test_macaulay_of_zero_coupon_is_maturity() {
        let schedule = CashFlowSchedule::new(vec![(7.0, 100.0)]).unwrap();
        let mac = annual()
            .macaulay_duration(&schedule, &RateCurve::flat(0.06).unwrap())
            .unwrap();
        assert_relative_eq!(mac, 7.0, epsilon = 1e-12);
    }

    #[test]
    fn test_continuous_modified_equals_macaulay() {
        let engine = DiscountingEngine::new(CompoundingConvention::Continuous).unwrap();
        let curve = RateCurve::flat(0.03).unwrap();
        let mac = engine.macaulay_duration(&bond(), &curve).unwrap();
        let modified = engine.modified_duration(&bond(), 0.03).unwrap();
        assert_eq!(mac, modified);
    }

    #[test]
    fn test_effective_duration_reference_values() {
        let engine = semi_annual();
        let curve = RateCurve::flat(0.04).unwrap();
        let d = engine.effective_duration(&bond(), &curve, 0.01).unwrap();
        assert_relative_eq!(d, 8.089_510_395_705_86, epsilon = 1e-8);
        let c = engine.effective_convexity(&bond(), &curve, 0.001).unwrap();
        assert_relative_eq!(c, 77.550_435_259_861_64, epsilon = 1e-4);
    }

    #[test]
    fn test_effective_duration_positive_on_sloped_curve() {
        let curve = RateCurve::from_segments(
            vec![AffineSegment::anchored(0.0, 0.5, 0.04, 0.000704)],
            7.0,
        )
        .unwrap();
        let schedule =
            CashFlowSchedule::fixed_coupon_bond(100.0, 0.05, 7.0, Frequency::Annual).unwrap();
        let d = annual().effective_duration(&schedule, &curve, 1e-4).unwrap();
        let mac = annual().macaulay_duration(&schedule, &curve).unwrap();
        assert!(d > 0.0);
        assert!(d < mac);
    }

    #[test]
    fn test_invalid_bump() {
        let curve = RateCurve::flat(0.04).unwrap();
        for bump in [0.0, -0.01, f64::NAN] {
            assert!(matches!(
                annual().effective_duration(&bond(), &curve, bump),
                Err(DomainError::NonPositiveBump { .. })
            ));
            assert!(matches!(
                annual().effective_convexity(&bond(), &curve, bump),
                Err(DomainError::NonPositiveBump { .. })
            ));
        }
    }

    #[test]
    fn test_non_positive_base_price() {
        let short = CashFlowSchedule::new(vec![(1.0, -100.0)]).unwrap();
        let curve = RateCurve::flat(0.04).unwrap();
        assert!(matches!(
            annual().effective_duration(&short, &curve, 1e-4),
            Err(DomainError::NonPositiveBasePrice { .. })
        ));
        assert!(matches!(
            annual().macaulay_duration(&short, &curve),
            Err(DomainError::NonPositiveBasePrice { .. })
        ));
    }

    #[test]
    fn test_yield_from_price_recovers_yield() {
        let engine = semi_annual();
        let price = engine
            .present_value(&bond(), &RateCurve::flat(0.045).unwrap())
            .unwrap();
        let result = engine
            .yield_from_price(&bond(), price, (-0.5, 1.0), SolverConfig::high_precision())
            .unwrap();
        assert_relative_eq!(result.root, 0.045, epsilon = 1e-10);
    }

    #[test]
    fn test_yield_outside_bracket() {
        let err = semi_annual()
            .yield_from_price(&bond(), 1_030.0, (0.1, 0.2), SolverConfig::default())
            .unwrap_err();
        assert!(err.is_bracket());
    }

    #[test]
    fn test_yield_non_finite_target() {
        assert!(matches!(
            annual().yield_from_price(&bond(), f64::NAN, (0.0, 0.1), SolverConfig::default()),
            Err(PricingError::Domain(_))
        ));
    }

    #[test]
    fn test_zero_periods_rejected() {
        let bad = CompoundingConvention::Periodic {
            periods_per_year: 0,
        };
        assert_eq!(DiscountingEngine::new(bad), Err(DomainError::ZeroPeriods));
    }
}
