//! Error types for structured error handling.
//!
//! This module provides:
//! - `DomainError`: An input violates a mathematical precondition
//! - `SolverError`: Root-finding failures (bracket, convergence, non-finite values)
//! - `PricingError`: Aggregate error returned by the pricing engines
//!
//! No component substitutes a default value for a failed computation; every
//! variant is surfaced to the caller.

use thiserror::Error;

/// An input violates a mathematical precondition.
///
/// Domain errors are never recovered internally.
///
/// # Examples
/// ```
/// use pricer_core::types::DomainError;
///
/// let err = DomainError::NegativeTime { t: -0.5 };
/// assert_eq!(format!("{}", err), "Negative time: t = -0.5");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum DomainError {
    /// Time to cash flow is negative (or NaN).
    #[error("Negative time: t = {t}")]
    NegativeTime {
        /// The offending time in years
        t: f64,
    },

    /// Volatility is zero, negative or not finite.
    #[error("Invalid volatility: σ = {volatility}")]
    NonPositiveVolatility {
        /// The offending volatility
        volatility: f64,
    },

    /// Time to expiry is zero, negative or not finite.
    #[error("Invalid expiry: T = {expiry}")]
    NonPositiveExpiry {
        /// The offending time to expiry
        expiry: f64,
    },

    /// Spot price is zero, negative or not finite.
    #[error("Invalid spot price: S = {spot}")]
    NonPositiveSpot {
        /// The offending spot price
        spot: f64,
    },

    /// Strike price is zero, negative or not finite.
    #[error("Invalid strike: K = {strike}")]
    NonPositiveStrike {
        /// The offending strike
        strike: f64,
    },

    /// Finite-difference bump is zero, negative or not finite.
    #[error("Invalid bump: {bump} (must be a positive decimal rate shift)")]
    NonPositiveBump {
        /// The offending bump size
        bump: f64,
    },

    /// Base present value used as a denominator is not positive.
    #[error("Non-positive base price: PV = {price}")]
    NonPositiveBasePrice {
        /// The offending present value
        price: f64,
    },

    /// A compounding factor `(1 + r/m)^(m t)` is not positive and finite.
    #[error("Invalid compounding factor {factor} for rate {rate} at t = {t}")]
    InvalidCompounding {
        /// Annual rate used
        rate: f64,
        /// Time in years
        t: f64,
        /// The resulting compounding factor
        factor: f64,
    },

    /// Periodic compounding declared with zero periods per year.
    #[error("Periodic compounding requires at least one period per year")]
    ZeroPeriods,

    /// Sequence of times is not strictly increasing.
    #[error("Times must be strictly increasing: index {index} has t = {t}")]
    NonIncreasingTimes {
        /// Index of the first offending entry
        index: usize,
        /// Time at that index
        t: f64,
    },

    /// A curve, schedule or sample set was empty.
    #[error("Empty input: {0}")]
    Empty(&'static str),

    /// Monte Carlo sample count too small to estimate dispersion.
    #[error("Invalid sample count: {count} (need at least {min})")]
    InvalidSampleCount {
        /// Requested sample count
        count: usize,
        /// Minimum accepted sample count
        min: usize,
    },

    /// A named parameter is invalid.
    #[error("Invalid parameter {name}: {value}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Description of the invalid value
        value: String,
    },
}

impl DomainError {
    /// Shorthand for [`DomainError::InvalidParameter`].
    pub fn invalid(name: &'static str, value: impl ToString) -> Self {
        DomainError::InvalidParameter {
            name,
            value: value.to_string(),
        }
    }
}

/// Root-finding solver errors.
///
/// # Variants
/// - `NoBracket`: Function values at bracket endpoints have the same sign
/// - `NotConverged`: Iteration budget exhausted before reaching tolerance
/// - `NonFiniteValue`: The objective produced NaN or infinity
///
/// # Examples
/// ```
/// use pricer_core::types::SolverError;
///
/// let err = SolverError::NotConverged { iterations: 100, bracket_width: 1e-3, estimate: 0.2 };
/// assert!(format!("{}", err).contains("100 iterations"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolverError {
    /// No valid bracket: `f(low)` and `f(high)` have the same sign.
    #[error("No bracket: f({low}) = {f_low} and f({high}) = {f_high} have the same sign")]
    NoBracket {
        /// Lower bracket endpoint
        low: f64,
        /// Upper bracket endpoint
        high: f64,
        /// Function value at `low`
        f_low: f64,
        /// Function value at `high`
        f_high: f64,
    },

    /// Iteration budget exhausted without reaching tolerance.
    #[error(
        "Failed to converge after {iterations} iterations \
         (bracket width {bracket_width:e}, last estimate {estimate})"
    )]
    NotConverged {
        /// Number of iterations performed
        iterations: usize,
        /// Width of the final bracket
        bracket_width: f64,
        /// Midpoint of the final bracket
        estimate: f64,
    },

    /// The objective returned NaN or an infinite value.
    #[error("Objective is not finite at x = {x}")]
    NonFiniteValue {
        /// Abscissa where the objective failed
        x: f64,
    },
}

/// Aggregate error returned by the pricing engines.
///
/// # Examples
/// ```
/// use pricer_core::types::{DomainError, PricingError};
///
/// let err: PricingError = DomainError::NonPositiveBump { bump: 0.0 }.into();
/// assert!(matches!(err, PricingError::Domain(_)));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum PricingError {
    /// Mathematical precondition violated.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Root finding failed.
    #[error(transparent)]
    Solver(#[from] SolverError),
}

impl PricingError {
    /// Returns `true` if this is a bracket failure.
    pub fn is_bracket(&self) -> bool {
        matches!(self, PricingError::Solver(SolverError::NoBracket { .. }))
    }

    /// Returns `true` if this is a convergence failure.
    pub fn is_convergence(&self) -> bool {
        matches!(self, PricingError::Solver(SolverError::NotConverged { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_error_display() {
        let err = DomainError::NonPositiveVolatility { volatility: -0.2 };
        assert_eq!(format!("{}", err), "Invalid volatility: σ = -0.2");

        let err = DomainError::NonIncreasingTimes { index: 2, t: 1.0 };
        assert!(format!("{}", err).contains("index 2"));

        let err = DomainError::invalid("tolerance", -1.0);
        assert_eq!(format!("{}", err), "Invalid parameter tolerance: -1");
    }

    #[test]
    fn test_solver_error_display() {
        let err = SolverError::NoBracket {
            low: 1.0,
            high: 2.0,
            f_low: 1.0,
            f_high: 4.0,
        };
        assert!(format!("{}", err).contains("same sign"));

        let err = SolverError::NonFiniteValue { x: 0.5 };
        assert_eq!(format!("{}", err), "Objective is not finite at x = 0.5");
    }

    #[test]
    fn test_pricing_error_is_transparent() {
        let inner = DomainError::NonPositiveBump { bump: 0.0 };
        let err: PricingError = inner.clone().into();
        assert_eq!(format!("{}", err), format!("{}", inner));
    }

    #[test]
    fn test_pricing_error_classification() {
        let bracket: PricingError = SolverError::NoBracket {
            low: 0.0,
            high: 1.0,
            f_low: 1.0,
            f_high: 1.0,
        }
        .into();
        assert!(bracket.is_bracket());
        assert!(!bracket.is_convergence());

        let conv: PricingError = SolverError::NotConverged {
            iterations: 3,
            bracket_width: 0.1,
            estimate: 0.5,
        }
        .into();
        assert!(conv.is_convergence());
        assert!(!conv.is_bracket());
    }

    #[test]
    fn test_error_trait_implementation() {
        let err = PricingError::from(DomainError::ZeroPeriods);
        let _: &dyn std::error::Error = &err;
    }
}
