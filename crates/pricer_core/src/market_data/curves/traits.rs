//! Yield curve trait definition.

use super::ShiftedCurve;
use crate::market_data::CompoundingConvention;
use crate::types::DomainError;

/// Term structure of annual interest rates.
///
/// Implemented by [`RateCurve`](super::RateCurve) and by the parallel-shifted
/// view [`ShiftedCurve`], so the discounting engine can reprice under a bump
/// without rebuilding the curve.
///
/// # Contract
///
/// - `rate(t)` is defined for every `t >= 0` and fails with
///   `DomainError::NegativeTime` otherwise
/// - `discount_factor(0, _) == 1`
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::{RateCurve, YieldCurve};
/// use pricer_core::market_data::CompoundingConvention;
///
/// let curve = RateCurve::flat(0.05).unwrap();
///
/// let df = curve.discount_factor(1.0, CompoundingConvention::Annual).unwrap();
/// assert!((df - 1.0 / 1.05).abs() < 1e-15);
///
/// // Forward rate of a flat curve is the flat rate
/// let fwd = curve.forward_rate(1.0, 2.0, CompoundingConvention::Annual).unwrap();
/// assert!((fwd - 0.05).abs() < 1e-12);
/// ```
pub trait YieldCurve {
    /// Annual rate applicable to a cash flow at time `t` (years).
    fn rate(&self, t: f64) -> Result<f64, DomainError>;

    /// Discount factor for a cash flow at `t` under `convention`.
    ///
    /// # Mathematical Definition
    ///
    /// ```text
    /// DF(t) = 1 / compound(rate(t), t, convention)
    /// ```
    fn discount_factor(
        &self,
        t: f64,
        convention: CompoundingConvention,
    ) -> Result<f64, DomainError> {
        convention.discount_factor(self.rate(t)?, t)
    }

    /// Rate implied between `t1` and `t2` under `convention`.
    ///
    /// # Mathematical Definition
    ///
    /// ```text
    /// compound(f, t2 - t1) = compound(r2, t2) / compound(r1, t1)
    /// ```
    ///
    /// For annual compounding this is
    /// `((1+r2)^t2 / (1+r1)^t1)^(1/(t2-t1)) - 1`, for continuous compounding
    /// `(r2·t2 - r1·t1) / (t2 - t1)`.
    ///
    /// # Errors
    ///
    /// - `DomainError::NegativeTime` if `t1 < 0`
    /// - `DomainError::NonIncreasingTimes` if `t2 <= t1`
    fn forward_rate(
        &self,
        t1: f64,
        t2: f64,
        convention: CompoundingConvention,
    ) -> Result<f64, DomainError> {
        if t1.is_nan() || t1 < 0.0 {
            return Err(DomainError::NegativeTime { t: t1 });
        }
        if t2.is_nan() || t2 <= t1 {
            return Err(DomainError::NonIncreasingTimes { index: 1, t: t2 });
        }
        let growth1 = convention.compound_factor(self.rate(t1)?, t1)?;
        let growth2 = convention.compound_factor(self.rate(t2)?, t2)?;
        convention.implied_rate(growth2 / growth1, t2 - t1)
    }

    /// Borrowed view of this curve with `bump` added to every rate.
    fn parallel_shift(&self, bump: f64) -> ShiftedCurve<'_, Self>
    where
        Self: Sized,
    {
        ShiftedCurve::new(self, bump)
    }
}

impl<C: YieldCurve + ?Sized> YieldCurve for &C {
    #[inline]
    fn rate(&self, t: f64) -> Result<f64, DomainError> {
        (**self).rate(t)
    }
}
