//! Parallel-shifted curve view.

use super::YieldCurve;
use crate::types::DomainError;

/// A curve with a constant `shift` added to every rate.
///
/// Borrows the underlying curve; used for finite-difference repricing.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::{RateCurve, ShiftedCurve, YieldCurve};
///
/// let base = RateCurve::flat(0.04).unwrap();
/// let up = ShiftedCurve::new(&base, 0.0001);
/// assert!((up.rate(3.0).unwrap() - 0.0401).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ShiftedCurve<'a, C: ?Sized> {
    curve: &'a C,
    shift: f64,
}

impl<'a, C: YieldCurve + ?Sized> ShiftedCurve<'a, C> {
    /// Wraps `curve` with a parallel `shift` (decimal rate units).
    pub fn new(curve: &'a C, shift: f64) -> Self {
        Self { curve, shift }
    }

    /// The parallel shift applied.
    #[inline]
    pub fn shift(&self) -> f64 {
        self.shift
    }
}

impl<C: YieldCurve + ?Sized> YieldCurve for ShiftedCurve<'_, C> {
    #[inline]
    fn rate(&self, t: f64) -> Result<f64, DomainError> {
        Ok(self.curve.rate(t)? + self.shift)
    }
}
