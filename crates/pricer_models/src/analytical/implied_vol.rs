//! Implied volatility by inverting the Black-Scholes price.
//!
//! Bisection on `BS(σ) - market_price` over a volatility bracket. The call
//! and put prices are strictly increasing in σ, so a bracket whose endpoint
//! prices straddle the market price contains exactly one root.

use pricer_core::math::solvers::{BisectionSolver, SolverConfig};
use pricer_core::types::{DomainError, PricingError};
use tracing::debug;

use super::black_scholes::BlackScholes;
use crate::instruments::OptionContract;

/// Default lower volatility bound.
pub const DEFAULT_VOL_LOW: f64 = 0.01;
/// Default upper volatility bound.
pub const DEFAULT_VOL_HIGH: f64 = 5.0;

/// Result of an implied volatility search.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VolatilityEstimate {
    /// Implied volatility (midpoint of the final bracket).
    pub volatility: f64,
    /// Bracket the search started from.
    pub initial_bracket: (f64, f64),
    /// Bracket the search ended with.
    pub final_bracket: (f64, f64),
    /// Number of bisection steps.
    pub iterations: usize,
}

/// Recovers the volatility that reproduces an observed option price.
///
/// # Examples
/// ```
/// use pricer_models::analytical::ImpliedVolatilitySolver;
/// use pricer_models::instruments::{OptionContract, OptionType};
///
/// let call = OptionContract::new(100.0, 105.0, 0.05, 1.0, OptionType::Call).unwrap();
/// let estimate = ImpliedVolatilitySolver::new()
///     .implied_volatility(&call, 6.8)
///     .unwrap();
/// assert!((estimate.volatility - 0.16923).abs() < 1e-4);
/// ```
#[derive(Debug, Clone)]
pub struct ImpliedVolatilitySolver {
    bracket: (f64, f64),
    config: SolverConfig<f64>,
}

impl Default for ImpliedVolatilitySolver {
    /// Bracket `(0.01, 5.0)`, tolerance 1e-8, 200 iterations.
    fn default() -> Self {
        Self {
            bracket: (DEFAULT_VOL_LOW, DEFAULT_VOL_HIGH),
            config: SolverConfig {
                tolerance: 1e-8,
                max_iterations: 200,
            },
        }
    }
}

impl ImpliedVolatilitySolver {
    /// Solver with the default bracket and configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the volatility bracket.
    pub fn with_bracket(mut self, low: f64, high: f64) -> Self {
        self.bracket = (low, high);
        self
    }

    /// Replaces the solver configuration.
    pub fn with_config(mut self, config: SolverConfig<f64>) -> Self {
        self.config = config;
        self
    }

    /// The volatility bracket searched.
    #[inline]
    pub fn bracket(&self) -> (f64, f64) {
        self.bracket
    }

    /// The solver configuration.
    #[inline]
    pub fn config(&self) -> &SolverConfig<f64> {
        &self.config
    }

    /// Volatility at which the Black-Scholes price of `contract` equals `market_price`.
    ///
    /// # Errors
    /// - `PricingError::Domain` for a non-finite market price, an invalid
    ///   contract, or a bracket endpoint that is not a positive volatility
    /// - `PricingError::Solver(SolverError::NoBracket)` when the market price
    ///   lies outside the prices attainable within the bracket
    /// - `PricingError::Solver(SolverError::NotConverged)` when the iteration
    ///   budget runs out
    pub fn implied_volatility(
        &self,
        contract: &OptionContract,
        market_price: f64,
    ) -> Result<VolatilityEstimate, PricingError> {
        if !market_price.is_finite() {
            return Err(DomainError::invalid("market_price", market_price).into());
        }
        contract.validate()?;
        let (low, high) = if self.bracket.0 > self.bracket.1 {
            (self.bracket.1, self.bracket.0)
        } else {
            self.bracket
        };
        for volatility in [low, high] {
            if !(volatility.is_finite() && volatility > 0.0) {
                return Err(DomainError::NonPositiveVolatility { volatility }.into());
            }
        }

        let objective = |sigma: f64| {
            BlackScholes::new(*contract, sigma)
                .map(|model| model.price() - market_price)
                .unwrap_or(f64::NAN)
        };
        let result = BisectionSolver::new(self.config).solve(objective, low, high)?;

        debug!(
            market_price,
            volatility = result.root,
            iterations = result.iterations,
            "implied volatility solved"
        );

        Ok(VolatilityEstimate {
            volatility: result.root,
            initial_bracket: (low, high),
            final_bracket: result.bracket,
            iterations: result.iterations,
        })
    }
}
