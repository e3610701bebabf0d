//! Analytical pricing formulas for European options.
//!
//! This module provides closed-form solutions for option pricing:
//! - Black-Scholes model for lognormal dynamics
//! - Analytical Greeks (Delta, Gamma, Vega, Theta, Rho)
//! - Implied volatility by bisection on the Black-Scholes price
//!
//! ## Numerical Stability
//!
//! The normal CDF is computed from an erfc implementation that stays accurate
//! deep in the tails.

pub mod black_scholes;
pub mod distributions;
pub mod implied_vol;

// Re-export main types at module level
pub use black_scholes::{black_scholes_price, BlackScholes, Greeks};
pub use distributions::{norm_cdf, norm_pdf};
pub use implied_vol::{ImpliedVolatilitySolver, VolatilityEstimate};
