//! Black-Scholes pricing model for European options.
//!
//! This module provides the Black-Scholes model for pricing European
//! call and put options with analytical Greeks calculations.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T

use pricer_core::types::DomainError;

use super::distributions::{norm_cdf, norm_pdf};
use crate::instruments::{OptionContract, OptionType};

/// First-order (and gamma) sensitivities of an option price.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Greeks {
    /// ∂V/∂S
    pub delta: f64,
    /// ∂²V/∂S²
    pub gamma: f64,
    /// ∂V/∂σ
    pub vega: f64,
    /// ∂V/∂t (calendar time, per year)
    pub theta: f64,
    /// ∂V/∂r
    pub rho: f64,
}

/// Black-Scholes model bound to a contract and a volatility.
///
/// Construction validates every input, so pricing and Greeks are infallible.
///
/// # Examples
/// ```
/// use pricer_models::analytical::BlackScholes;
/// use pricer_models::instruments::{OptionContract, OptionType};
///
/// let call = OptionContract::new(100.0, 100.0, 0.05, 1.0, OptionType::Call).unwrap();
/// let put = call.with_type(OptionType::Put);
///
/// let c = BlackScholes::new(call, 0.2).unwrap().price();
/// let p = BlackScholes::new(put, 0.2).unwrap().price();
///
/// // Put-call parity: C - P = S - K*exp(-rT)
/// let parity = c - p - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackScholes {
    contract: OptionContract,
    volatility: f64,
}

impl BlackScholes {
    /// Creates a new Black-Scholes model.
    ///
    /// # Errors
    /// - `DomainError::NonPositiveVolatility` if volatility <= 0 or non-finite
    /// - Any error from [`OptionContract::validate`]
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    /// use pricer_models::instruments::{OptionContract, OptionType};
    ///
    /// let contract = OptionContract::new(100.0, 100.0, 0.05, 1.0, OptionType::Call).unwrap();
    /// assert!(BlackScholes::new(contract, 0.2).is_ok());
    /// assert!(BlackScholes::new(contract, 0.0).is_err());
    /// ```
    pub fn new(contract: OptionContract, volatility: f64) -> Result<Self, DomainError> {
        if !(volatility.is_finite() && volatility > 0.0) {
            return Err(DomainError::NonPositiveVolatility { volatility });
        }
        contract.validate()?;
        Ok(Self {
            contract,
            volatility,
        })
    }

    /// Returns the contract.
    #[inline]
    pub fn contract(&self) -> &OptionContract {
        &self.contract
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Computes the d1 term of the Black-Scholes formula.
    ///
    /// d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
    #[inline]
    pub fn d1(&self) -> f64 {
        let c = &self.contract;
        let vol_sqrt_t = self.volatility * c.expiry().sqrt();
        let log_moneyness = (c.spot() / c.strike()).ln();
        let drift = (c.rate() + 0.5 * self.volatility * self.volatility) * c.expiry();
        (log_moneyness + drift) / vol_sqrt_t
    }

    /// Computes the d2 term of the Black-Scholes formula.
    ///
    /// d₂ = d₁ - σ√T
    #[inline]
    pub fn d2(&self) -> f64 {
        self.d1() - self.volatility * self.contract.expiry().sqrt()
    }

    /// Price of the bound contract.
    pub fn price(&self) -> f64 {
        let c = &self.contract;
        let d1 = self.d1();
        let d2 = self.d2();
        let discounted_strike = c.strike() * c.discount_factor();
        match c.option_type() {
            // C = S·N(d₁) - K·e^(-rT)·N(d₂)
            OptionType::Call => c.spot() * norm_cdf(d1) - discounted_strike * norm_cdf(d2),
            // P = K·e^(-rT)·N(-d₂) - S·N(-d₁)
            OptionType::Put => discounted_strike * norm_cdf(-d2) - c.spot() * norm_cdf(-d1),
        }
    }

    /// Computes Delta (∂V/∂S).
    ///
    /// - Call Delta = N(d₁)
    /// - Put Delta = N(d₁) - 1
    #[inline]
    pub fn delta(&self) -> f64 {
        let n_d1 = norm_cdf(self.d1());
        match self.contract.option_type() {
            OptionType::Call => n_d1,
            OptionType::Put => n_d1 - 1.0,
        }
    }

    /// Computes Gamma (∂²V/∂S²).
    ///
    /// Gamma = φ(d₁) / (S·σ·√T)
    ///
    /// Gamma is the same for both calls and puts.
    #[inline]
    pub fn gamma(&self) -> f64 {
        let c = &self.contract;
        norm_pdf(self.d1()) / (c.spot() * self.volatility * c.expiry().sqrt())
    }

    /// Computes Vega (∂V/∂σ).
    ///
    /// Vega = S·√T·φ(d₁)
    ///
    /// Vega is the same for both calls and puts.
    #[inline]
    pub fn vega(&self) -> f64 {
        let c = &self.contract;
        c.spot() * c.expiry().sqrt() * norm_pdf(self.d1())
    }

    /// Computes Theta (∂V/∂t).
    ///
    /// - Call Theta = -(S·σ·φ(d₁))/(2√T) - r·K·e^(-rT)·N(d₂)
    /// - Put Theta = -(S·σ·φ(d₁))/(2√T) + r·K·e^(-rT)·N(-d₂)
    ///
    /// Rate of change as calendar time passes, usually negative.
    pub fn theta(&self) -> f64 {
        let c = &self.contract;
        let d2 = self.d2();
        let decay = -(c.spot() * self.volatility * norm_pdf(self.d1())) / (2.0 * c.expiry().sqrt());
        let carry = c.rate() * c.strike() * c.discount_factor();
        match c.option_type() {
            OptionType::Call => decay - carry * norm_cdf(d2),
            OptionType::Put => decay + carry * norm_cdf(-d2),
        }
    }

    /// Computes Rho (∂V/∂r).
    ///
    /// - Call Rho = K·T·e^(-rT)·N(d₂)
    /// - Put Rho = -K·T·e^(-rT)·N(-d₂)
    pub fn rho(&self) -> f64 {
        let c = &self.contract;
        let d2 = self.d2();
        let scale = c.strike() * c.expiry() * c.discount_factor();
        match c.option_type() {
            OptionType::Call => scale * norm_cdf(d2),
            OptionType::Put => -scale * norm_cdf(-d2),
        }
    }

    /// All Greeks at once.
    pub fn greeks(&self) -> Greeks {
        Greeks {
            delta: self.delta(),
            gamma: self.gamma(),
            vega: self.vega(),
            theta: self.theta(),
            rho: self.rho(),
        }
    }
}

/// Black-Scholes price of `contract` at `volatility`.
///
/// # Errors
/// Same as [`BlackScholes::new`].
///
/// # Examples
/// ```
/// use pricer_models::analytical::black_scholes_price;
/// use pricer_models::instruments::{OptionContract, OptionType};
///
/// let contract = OptionContract::new(100.0, 100.0, 0.05, 1.0, OptionType::Call).unwrap();
/// let price = black_scholes_price(&contract, 0.2).unwrap();
/// assert!((price - 10.450583572185565).abs() < 1e-10);
/// ```
pub fn black_scholes_price(contract: &OptionContract, volatility: f64) -> Result<f64, DomainError> {
    Ok(BlackScholes::new(*contract, volatility)?.price())
}
