//! Compounding conventions for converting annual rates into growth factors.

use crate::types::DomainError;
use std::fmt;

/// How an annual rate accrues over time.
///
/// | Convention | Growth factor over `t` years |
/// |---|---|
/// | `Annual` | `(1 + r)^t` |
/// | `Periodic { m }` | `(1 + r/m)^(m·t)` |
/// | `Continuous` | `exp(r·t)` |
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::CompoundingConvention;
///
/// let semi = CompoundingConvention::periodic(2).unwrap();
/// let df = semi.discount_factor(0.05, 1.0).unwrap();
/// assert!((df - 1.0 / 1.025_f64.powi(2)).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CompoundingConvention {
    /// Once per year.
    Annual,
    /// `periods_per_year` times per year.
    Periodic {
        /// Compounding periods per year (≥ 1)
        periods_per_year: u32,
    },
    /// Continuously compounded.
    Continuous,
}

impl CompoundingConvention {
    /// Periodic compounding with `periods_per_year` periods.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ZeroPeriods` if `periods_per_year == 0`.
    pub fn periodic(periods_per_year: u32) -> Result<Self, DomainError> {
        let convention = CompoundingConvention::Periodic { periods_per_year };
        convention.validate()?;
        Ok(convention)
    }

    /// Rejects `Periodic { periods_per_year: 0 }`.
    pub fn validate(&self) -> Result<(), DomainError> {
        match self {
            CompoundingConvention::Periodic { periods_per_year: 0 } => Err(DomainError::ZeroPeriods),
            _ => Ok(()),
        }
    }

    /// Compounding periods per year, or `None` for continuous compounding.
    #[inline]
    pub fn periods_per_year(&self) -> Option<u32> {
        match self {
            CompoundingConvention::Annual => Some(1),
            CompoundingConvention::Periodic { periods_per_year } => Some(*periods_per_year),
            CompoundingConvention::Continuous => None,
        }
    }

    /// Growth factor of one unit invested at `rate` for `t` years.
    ///
    /// # Errors
    ///
    /// - `DomainError::NegativeTime` if `t < 0` or NaN
    /// - `DomainError::ZeroPeriods` for a malformed periodic convention
    /// - `DomainError::InvalidCompounding` if the factor is not positive and finite,
    ///   e.g. a periodic rate at or below `-m`
    pub fn compound_factor(&self, rate: f64, t: f64) -> Result<f64, DomainError> {
        if t.is_nan() || t < 0.0 {
            return Err(DomainError::NegativeTime { t });
        }
        self.validate()?;

        let factor = match self {
            CompoundingConvention::Annual => {
                let base = 1.0 + rate;
                if base <= 0.0 {
                    f64::NAN
                } else {
                    base.powf(t)
                }
            }
            CompoundingConvention::Periodic { periods_per_year } => {
                let m = f64::from(*periods_per_year);
                let base = 1.0 + rate / m;
                if base <= 0.0 {
                    f64::NAN
                } else {
                    base.powf(m * t)
                }
            }
            CompoundingConvention::Continuous => (rate * t).exp(),
        };

        if factor.is_finite() && factor > 0.0 {
            Ok(factor)
        } else {
            Err(DomainError::InvalidCompounding { rate, t, factor })
        }
    }

    /// Discount factor `1 / compound_factor(rate, t)`.
    #[inline]
    pub fn discount_factor(&self, rate: f64, t: f64) -> Result<f64, DomainError> {
        Ok(1.0 / self.compound_factor(rate, t)?)
    }

    /// Annual rate that grows one unit into `factor` over `t > 0` years.
    ///
    /// Inverse of [`compound_factor`](Self::compound_factor).
    pub fn implied_rate(&self, factor: f64, t: f64) -> Result<f64, DomainError> {
        if t.is_nan() || t <= 0.0 {
            return Err(DomainError::invalid("t", t));
        }
        if !(factor.is_finite() && factor > 0.0) {
            return Err(DomainError::InvalidCompounding {
                rate: f64::NAN,
                t,
                factor,
            });
        }
        self.validate()?;

        Ok(match self {
            CompoundingConvention::Annual => factor.powf(1.0 / t) - 1.0,
            CompoundingConvention::Periodic { periods_per_year } => {
                let m = f64::from(*periods_per_year);
                m * (factor.powf(1.0 / (m * t)) - 1.0)
            }
            CompoundingConvention::Continuous => factor.ln() / t,
        })
    }
}

impl fmt::Display for CompoundingConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompoundingConvention::Annual => write!(f, "annual"),
            CompoundingConvention::Periodic { periods_per_year } => {
                write!(f, "periodic({})", periods_per_year)
            }
            CompoundingConvention::Continuous => write!(f, "continuous"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_annual_factor() {
        let f = CompoundingConvention::Annual.compound_factor(0.05, 3.0).unwrap();
        assert_relative_eq!(f, 1.05_f64.powi(3), epsilon = 1e-15);
    }

    #[test]
    fn test_periodic_factor() {
        let semi = CompoundingConvention::periodic(2).unwrap();
        let f = semi.compound_factor(0.05, 10.0).unwrap();
        assert_relative_eq!(f, 1.025_f64.powi(20), epsilon = 1e-12);
    }

    #[test]
    fn test_periodic_one_equals_annual() {
        let p1 = CompoundingConvention::periodic(1).unwrap();
        for &t in &[0.0, 0.5, 1.0, 7.25] {
            assert_relative_eq!(
                p1.compound_factor(0.04, t).unwrap(),
                CompoundingConvention::Annual.compound_factor(0.04, t).unwrap(),
                epsilon = 1e-15
            );
        }
    }

    #[test]
    fn test_continuous_factor() {
        let f = CompoundingConvention::Continuous
            .compound_factor(0.05, 2.0)
            .unwrap();
        assert_relative_eq!(f, (0.1_f64).exp(), epsilon = 1e-15);
    }

    #[test]
    fn test_zero_time_is_unity() {
        for conv in [
            CompoundingConvention::Annual,
            CompoundingConvention::Periodic { periods_per_year: 4 },
            CompoundingConvention::Continuous,
        ] {
            assert_eq!(conv.discount_factor(0.07, 0.0).unwrap(), 1.0);
        }
    }

    #[test]
    fn test_zero_periods_rejected() {
        assert_eq!(
            CompoundingConvention::periodic(0),
            Err(DomainError::ZeroPeriods)
        );
        let bad = CompoundingConvention::Periodic { periods_per_year: 0 };
        assert_eq!(bad.compound_factor(0.05, 1.0), Err(DomainError::ZeroPeriods));
    }

    #[test]
    fn test_negative_time_rejected() {
        let err = CompoundingConvention::Annual
            .compound_factor(0.05, -1.0)
            .unwrap_err();
        assert_eq!(err, DomainError::NegativeTime { t: -1.0 });
    }

    #[test]
    fn test_rate_below_minus_m_rejected() {
        let semi = CompoundingConvention::periodic(2).unwrap();
        assert!(matches!(
            semi.compound_factor(-2.5, 1.5),
            Err(DomainError::InvalidCompounding { .. })
        ));
        assert!(matches!(
            CompoundingConvention::Annual.compound_factor(-1.0, 2.0),
            Err(DomainError::InvalidCompounding { .. })
        ));
    }

    #[test]
    fn test_implied_rate_inverts_factor() {
        for conv in [
            CompoundingConvention::Annual,
            CompoundingConvention::Periodic { periods_per_year: 12 },
            CompoundingConvention::Continuous,
        ] {
            let f = conv.compound_factor(0.0437, 3.5).unwrap();
            assert_relative_eq!(conv.implied_rate(f, 3.5).unwrap(), 0.0437, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(CompoundingConvention::Annual.to_string(), "annual");
        assert_eq!(
            CompoundingConvention::Periodic { periods_per_year: 2 }.to_string(),
            "periodic(2)"
        );
        assert_eq!(CompoundingConvention::Continuous.to_string(), "continuous");
    }
}
