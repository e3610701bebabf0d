//! Bisection root-finding solver.

use super::SolverConfig;
use crate::types::{DomainError, PricingError, SolverError};
use num_traits::Float;
use tracing::{debug, trace};

/// Outcome of a successful root search.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RootResult<T> {
    /// Midpoint of the final bracket.
    pub root: T,
    /// Final bracket `(low, high)` containing the root.
    pub bracket: (T, T),
    /// Number of halvings performed.
    pub iterations: usize,
}

impl<T: Float> RootResult<T> {
    /// Width of the final bracket.
    #[inline]
    pub fn bracket_width(&self) -> T {
        self.bracket.1 - self.bracket.0
    }
}

/// Bisection root finder.
///
/// Halves a sign-changing bracket until its half-width falls below the
/// configured tolerance. Convergence is guaranteed for any continuous
/// function with a valid bracket, and the iteration count is a fixed function
/// of the bracket width and tolerance.
///
/// # Type Parameters
///
/// * `T` - Floating-point type (e.g., `f64`)
///
/// # Example
///
/// ```
/// use pricer_core::math::solvers::{BisectionSolver, SolverConfig};
///
/// let solver = BisectionSolver::new(SolverConfig::default());
///
/// // Solve x³ - x - 2 = 0 in bracket [1, 2]
/// let f = |x: f64| x * x * x - x - 2.0;
///
/// let result = solver.solve(f, 1.0, 2.0).unwrap();
/// assert!(f(result.root).abs() < 1e-8);
/// ```
#[derive(Debug, Clone)]
pub struct BisectionSolver<T: Float> {
    config: SolverConfig<T>,
}

impl<T: Float> BisectionSolver<T> {
    /// Create a new bisection solver with the given configuration.
    pub fn new(config: SolverConfig<T>) -> Self {
        Self { config }
    }

    /// Return the solver configuration.
    #[inline]
    pub fn config(&self) -> &SolverConfig<T> {
        &self.config
    }

    /// Find a root of `f` in the bracket `[low, high]`.
    ///
    /// A reversed bracket is normalised first. An endpoint where `f` is
    /// exactly zero is returned immediately.
    ///
    /// # Returns
    ///
    /// * `Ok(RootResult)` - Midpoint of the final bracket with half-width `< tolerance`
    /// * `Err(PricingError::Domain)` - Invalid configuration or non-finite endpoints
    /// * `Err(PricingError::Solver(SolverError::NoBracket))` - `f(low)` and `f(high)` have the same sign
    /// * `Err(PricingError::Solver(SolverError::NotConverged))` - Iteration budget exhausted
    /// * `Err(PricingError::Solver(SolverError::NonFiniteValue))` - `f` returned NaN or ±∞
    ///
    /// # Example
    ///
    /// ```
    /// use pricer_core::math::solvers::{BisectionSolver, SolverConfig};
    ///
    /// let solver = BisectionSolver::new(SolverConfig::default());
    ///
    /// // Reversed brackets are accepted
    /// let result = solver.solve(|x: f64| x * x - 2.0, 2.0, 0.0).unwrap();
    /// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-9);
    /// ```
    pub fn solve<F>(&self, f: F, low: T, high: T) -> Result<RootResult<T>, PricingError>
    where
        F: Fn(T) -> T,
    {
        self.config.validate()?;
        if !low.is_finite() {
            return Err(DomainError::invalid("low", as_f64(low)).into());
        }
        if !high.is_finite() {
            return Err(DomainError::invalid("high", as_f64(high)).into());
        }

        let (mut low, mut high) = if low > high { (high, low) } else { (low, high) };
        let mut f_low = evaluate(&f, low)?;
        let f_high = evaluate(&f, high)?;

        if f_low == T::zero() {
            return Ok(RootResult {
                root: low,
                bracket: (low, low),
                iterations: 0,
            });
        }
        if f_high == T::zero() {
            return Ok(RootResult {
                root: high,
                bracket: (high, high),
                iterations: 0,
            });
        }
        if f_low.signum() == f_high.signum() {
            return Err(SolverError::NoBracket {
                low: as_f64(low),
                high: as_f64(high),
                f_low: as_f64(f_low),
                f_high: as_f64(f_high),
            }
            .into());
        }

        let two = T::one() + T::one();
        let tolerance = self.config.tolerance;

        if (high - low) / two < tolerance {
            return Ok(self.converged(low, high, 0));
        }

        let mut mid = low + (high - low) / two;
        for iteration in 1..=self.config.max_iterations {
            mid = low + (high - low) / two;
            let f_mid = evaluate(&f, mid)?;
            trace!(
                iteration,
                low = as_f64(low),
                high = as_f64(high),
                f_mid = as_f64(f_mid),
                "bisection step"
            );

            if f_mid == T::zero() {
                return Ok(self.converged(mid, mid, iteration));
            }
            if f_mid.signum() == f_low.signum() {
                low = mid;
                f_low = f_mid;
            } else {
                high = mid;
            }

            if (high - low) / two < tolerance {
                return Ok(self.converged(low, high, iteration));
            }
        }

        Err(SolverError::NotConverged {
            iterations: self.config.max_iterations,
            bracket_width: as_f64(high - low),
            estimate: as_f64(mid),
        }
        .into())
    }

    fn converged(&self, low: T, high: T, iterations: usize) -> RootResult<T> {
        let two = T::one() + T::one();
        let root = low + (high - low) / two;
        debug!(
            root = as_f64(root),
            width = as_f64(high - low),
            iterations,
            "bisection converged"
        );
        RootResult {
            root,
            bracket: (low, high),
            iterations,
        }
    }
}

/// Find a root of `f` in `[low, high]` with an explicit tolerance and budget.
///
/// Convenience wrapper around [`BisectionSolver`].
///
/// # Example
///
/// ```
/// use pricer_core::math::solvers::solve;
///
/// let result = solve(|x: f64| x - 0.3, 0.0, 1.0, 1e-10, 100).unwrap();
/// assert!((result.root - 0.3).abs() < 1e-10);
/// ```
pub fn solve<T, F>(
    f: F,
    low: T,
    high: T,
    tolerance: T,
    max_iterations: usize,
) -> Result<RootResult<T>, PricingError>
where
    T: Float,
    F: Fn(T) -> T,
{
    let config = SolverConfig::new(tolerance, max_iterations)?;
    BisectionSolver::new(config).solve(f, low, high)
}

#[inline]
fn evaluate<T, F>(f: &F, x: T) -> Result<T, SolverError>
where
    T: Float,
    F: Fn(T) -> T,
{
    let y = f(x);
    if y.is_finite() {
        Ok(y)
    } else {
        Err(SolverError::NonFiniteValue { x: as_f64(x) })
    }
}

#[inline]
fn as_f64<T: Float>(x: T) -> f64 {
    x.to_f64().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linear_root() {
        let result = solve(|x: f64| x - 0.3, 0.0, 1.0, 1e-10, 100).unwrap();
        assert_relative_eq!(result.root, 0.3, epsilon = 1e-10);
        assert!(result.bracket_width() < 2e-10);
        assert!(result.bracket.0 <= 0.3 && 0.3 <= result.bracket.1);
    }

    #[test]
    fn test_iteration_count_matches_halvings() {
        // width 1, tolerance 1e-3: stop once 2^-n / 2 < 1e-3 → n = 9
        let result = solve(|x: f64| x - 0.3, 0.0, 1.0, 1e-3, 100).unwrap();
        assert_eq!(result.iterations, 9);
    }

    #[test]
    fn test_sqrt_two() {
        let solver = BisectionSolver::new(SolverConfig::default());
        let result = solver.solve(|x: f64| x * x - 2.0, 0.0, 2.0).unwrap();
        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-10);
    }

    #[test]
    fn test_reversed_bracket_is_normalised() {
        let result = solve(|x: f64| x - 0.7, 1.0, 0.0, 1e-10, 100).unwrap();
        assert_relative_eq!(result.root, 0.7, epsilon = 1e-10);
        assert!(result.bracket.0 <= result.bracket.1);
    }

    #[test]
    fn test_decreasing_function() {
        let result = solve(|x: f64| 1.0 - 2.0 * x, 0.0, 1.0, 1e-12, 100).unwrap();
        assert_relative_eq!(result.root, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_endpoint_root_returned_immediately() {
        let result = solve(|x: f64| x, 0.0, 1.0, 1e-10, 100).unwrap();
        assert_eq!(result.root, 0.0);
        assert_eq!(result.iterations, 0);

        let result = solve(|x: f64| x - 1.0, 0.0, 1.0, 1e-10, 100).unwrap();
        assert_eq!(result.root, 1.0);
        assert_eq!(result.iterations, 0);
    }

    #[test]
    fn test_same_sign_is_bracket_error() {
        let err = solve(|x: f64| x * x + 1.0, -1.0, 1.0, 1e-10, 100).unwrap_err();
        match err {
            PricingError::Solver(SolverError::NoBracket {
                low,
                high,
                f_low,
                f_high,
            }) => {
                assert_eq!(low, -1.0);
                assert_eq!(high, 1.0);
                assert_eq!(f_low, 2.0);
                assert_eq!(f_high, 2.0);
            }
            other => panic!("expected NoBracket, got {other:?}"),
        }
    }

    #[test]
    fn test_budget_exhausted_is_convergence_error() {
        let err = solve(|x: f64| x - 0.3, 0.0, 1.0, 1e-12, 5).unwrap_err();
        match err {
            PricingError::Solver(SolverError::NotConverged {
                iterations,
                bracket_width,
                estimate,
            }) => {
                assert_eq!(iterations, 5);
                assert_relative_eq!(bracket_width, 1.0 / 32.0);
                assert!((estimate - 0.3).abs() < 0.1);
            }
            other => panic!("expected NotConverged, got {other:?}"),
        }
    }

    #[test]
    fn test_non_finite_objective() {
        let err = solve(|x: f64| (x - 0.5).ln(), 0.0, 1.0, 1e-10, 100).unwrap_err();
        assert!(matches!(
            err,
            PricingError::Solver(SolverError::NonFiniteValue { .. })
        ));
    }

    #[test]
    fn test_invalid_inputs_are_domain_errors() {
        assert!(matches!(
            solve(|x: f64| x, -1.0, 1.0, 0.0, 100),
            Err(PricingError::Domain(_))
        ));
        assert!(matches!(
            solve(|x: f64| x, -1.0, 1.0, 1e-10, 0),
            Err(PricingError::Domain(_))
        ));
        assert!(matches!(
            solve(|x: f64| x, f64::NEG_INFINITY, 1.0, 1e-10, 100),
            Err(PricingError::Domain(_))
        ));
    }

    #[test]
    fn test_deterministic() {
        let f = |x: f64| x.exp() - 3.0;
        let a = solve(f, 0.0, 2.0, 1e-12, 200).unwrap();
        let b = solve(f, 0.0, 2.0, 1e-12, 200).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_f32() {
        let result = solve(|x: f32| x - 0.25, 0.0_f32, 1.0, 1e-5, 100).unwrap();
        assert!((result.root - 0.25).abs() < 1e-5);
    }
}
