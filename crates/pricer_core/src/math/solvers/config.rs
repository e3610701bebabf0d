//! Solver configuration types.

use crate::types::DomainError;
use num_traits::Float;

/// Configuration for root-finding algorithms.
///
/// Provides the settings shared by every bracketing solver: the convergence
/// tolerance on the bracket half-width and the iteration budget.
///
/// # Type Parameters
///
/// * `T` - Floating-point type for tolerance (e.g., `f64`)
///
/// # Example
///
/// ```
/// use pricer_core::math::solvers::SolverConfig;
///
/// // Use default configuration
/// let config: SolverConfig<f64> = SolverConfig::default();
/// assert!(config.tolerance < 1e-8);
/// assert!(config.max_iterations >= 50);
///
/// // Custom configuration
/// let custom = SolverConfig::new(1e-12, 200).unwrap();
/// assert_eq!(custom.max_iterations, 200);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SolverConfig<T: Float> {
    /// Convergence tolerance.
    ///
    /// The solver stops when the half-width of the bracket drops below
    /// `tolerance`.
    pub tolerance: T,

    /// Maximum number of iterations before giving up.
    ///
    /// If the solver doesn't converge within this limit,
    /// it returns `SolverError::NotConverged`.
    pub max_iterations: usize,
}

impl<T: Float> Default for SolverConfig<T> {
    /// Create a default configuration.
    ///
    /// Default values:
    /// - `tolerance`: 1e-10
    /// - `max_iterations`: 100
    fn default() -> Self {
        Self {
            tolerance: T::from(1e-10).unwrap_or_else(T::epsilon),
            max_iterations: 100,
        }
    }
}

impl<T: Float> SolverConfig<T> {
    /// Create a new configuration with specified values.
    ///
    /// # Arguments
    ///
    /// * `tolerance` - Convergence tolerance (must be positive and finite)
    /// * `max_iterations` - Maximum iteration count (must be > 0)
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidParameter` if either value is out of range.
    ///
    /// # Example
    ///
    /// ```
    /// use pricer_core::math::solvers::SolverConfig;
    ///
    /// let config = SolverConfig::new(1e-12, 200).unwrap();
    /// assert_eq!(config.max_iterations, 200);
    ///
    /// assert!(SolverConfig::new(0.0, 200).is_err());
    /// ```
    pub fn new(tolerance: T, max_iterations: usize) -> Result<Self, DomainError> {
        let config = Self {
            tolerance,
            max_iterations,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks the configuration, since fields are public and may be set directly.
    pub fn validate(&self) -> Result<(), DomainError> {
        if !(self.tolerance.is_finite() && self.tolerance > T::zero()) {
            return Err(DomainError::invalid(
                "tolerance",
                self.tolerance.to_f64().unwrap_or(f64::NAN),
            ));
        }
        if self.max_iterations == 0 {
            return Err(DomainError::invalid("max_iterations", 0));
        }
        Ok(())
    }

    /// Create a configuration with high precision settings.
    ///
    /// Uses tighter tolerance (1e-14) and more iterations (500).
    pub fn high_precision() -> Self {
        Self {
            tolerance: T::from(1e-14).unwrap_or_else(T::epsilon),
            max_iterations: 500,
        }
    }
}
